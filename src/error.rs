//! Errors for the few fallible terrain entry points.
//!
//! Recoverable editing conditions (no terrain, empty undo stack, degenerate blend
//! weights) are not errors; they surface as return values plus a notification.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TerrainError {
    #[error("grid resolution must be at least 2, got {0}")]
    InvalidResolution(usize),

    #[error("world size must be positive on every axis, got {0:?}")]
    InvalidWorldSize([f32; 3]),

    #[error("{what}: expected {expected} samples, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{what}: sample {index} is {value}, outside [0, 1]")]
    ValueOutOfRange {
        what: &'static str,
        index: usize,
        value: f32,
    },

    #[error("blend layer {index} does not exist ({count} layers)")]
    LayerOutOfRange { index: usize, count: usize },

    #[error("cannot remove the last blend layer")]
    LastLayer,
}

pub type Result<T> = std::result::Result<T, TerrainError>;
