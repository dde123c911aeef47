//! Heightfield terrain sculpting and texture painting with bounded undo.
//!
//! The host feeds a [`TerrainEditor`] discrete [`EditorEvent`]s and one
//! [`InputState`] per frame; the editor routes them to the active tool, which
//! snapshots the touched region into the undo history before editing it.

pub mod brush;
pub mod config;
pub mod drag;
pub mod editor;
pub mod erosion;
pub mod error;
pub mod grid;
pub mod heightfield;
pub mod noise_field;
pub mod notify;
pub mod paint;
pub mod sculpt;
pub mod stamp;
pub mod terrain;
pub mod texture_layer;
pub mod tool;
pub mod undo;

pub use brush::{Brush, BrushFootprint, BrushShape, FalloffCurve};
pub use config::{SculptConfig, TerrainSettings};
pub use editor::{EditorEvent, EventResponse, TerrainEditor};
pub use error::{Result, TerrainError};
pub use grid::{GridMapping, GridRegion};
pub use heightfield::HeightField;
pub use notify::{NoticeLevel, NotificationSink, TracingNotifier};
pub use paint::{PaintMode, TexturePainter};
pub use sculpt::{FlattenTarget, SculptEngine, SculptMode, StrokeOutcome};
pub use terrain::{Terrain, TerrainData};
pub use texture_layer::{LayerId, TextureBlendField};
pub use tool::{InputAction, InputSnapshot, InputState, Tool, ToolController, ToolKind};
pub use undo::{UndoEntry, UndoManager, UndoTarget};
