//! Texture painting on the blend field.

use std::fmt;

use glam::Vec3;

use crate::brush::{Brush, BrushFootprint};
use crate::config::SculptConfig;
use crate::error::{Result, TerrainError};
use crate::sculpt::StrokeOutcome;
use crate::texture_layer::TextureBlendField;
use crate::undo::UndoManager;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum PaintMode {
    /// Grow the selected layer
    #[default]
    Paint,
    /// Shrink the selected layer in favor of the base layer
    Erase,
    /// Average weights with the neighbors
    Smooth,
}

impl PaintMode {
    pub const ALL: [PaintMode; 3] = [PaintMode::Paint, PaintMode::Erase, PaintMode::Smooth];

    pub fn name(self) -> &'static str {
        match self {
            PaintMode::Paint => "paint",
            PaintMode::Erase => "erase",
            PaintMode::Smooth => "smooth",
        }
    }
}

impl fmt::Display for PaintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
pub struct TexturePainter {
    mode: PaintMode,
    selected_layer: usize,
    pub brush: Brush,
    /// Weight per second at full influence
    paint_rate: f32,
}

impl TexturePainter {
    pub fn new(config: &SculptConfig) -> Self {
        Self {
            mode: PaintMode::default(),
            selected_layer: 0,
            brush: Brush::new(config),
            paint_rate: config.paint_rate,
        }
    }

    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PaintMode) {
        if mode != self.mode {
            tracing::info!(%mode, "paint mode selected");
        }
        self.mode = mode;
    }

    pub fn selected_layer(&self) -> usize {
        self.selected_layer
    }

    /// Select the layer painted or erased by later strokes. Validated per stroke,
    /// since layers may be removed in between.
    pub fn select_layer(&mut self, layer: usize) {
        self.selected_layer = layer;
        tracing::info!(layer, "paint layer selected");
    }

    /// Apply one tick at `world`. The footprint rectangle is snapshotted first.
    pub fn stroke(
        &mut self,
        field: Option<&mut TextureBlendField>,
        undo: &mut UndoManager,
        world: Vec3,
        dt: f32,
    ) -> Result<StrokeOutcome> {
        let Some(field) = field else {
            return Ok(StrokeOutcome::NoTarget);
        };
        let layer = self.selected_layer;
        if self.mode != PaintMode::Smooth && layer >= field.layer_count() {
            return Err(TerrainError::LayerOutOfRange {
                index: layer,
                count: field.layer_count(),
            });
        }

        let center = field.world_to_grid(world);
        let radius = self.brush.radius_in_samples(field.mapping());
        let footprint = BrushFootprint::compute(&self.brush, center, radius, field.resolution());
        let region = footprint.region;
        let scale = self.paint_rate * dt;

        undo.snapshot_blend(field, region, format!("{} layer {layer}", self.mode));
        match self.mode {
            PaintMode::Paint => field.paint(&footprint, layer, scale)?,
            PaintMode::Erase => field.erase(&footprint, layer, scale)?,
            PaintMode::Smooth => field.smooth(&footprint, scale),
        }

        tracing::debug!(
            mode = %self.mode,
            layer,
            samples = footprint.len(),
            "paint tick"
        );
        Ok(StrokeOutcome::Applied {
            region,
            samples: footprint.len(),
        })
    }
}
