//! Drag sculpting: vertical pointer movement drives a target height.

use glam::Vec3;

use crate::brush::{Brush, BrushFootprint};
use crate::config::SculptConfig;
use crate::grid::GridRegion;
use crate::heightfield::HeightField;

/// Tracks one drag gesture and pulls the terrain under the brush toward its target.
#[derive(Clone, Debug)]
pub struct DragSculptController {
    sensitivity: f32,
    max_height: f32,
    blend_rate: f32,
    large_scale_factor: f32,
    /// Flip the pointer-to-height direction
    pub inverted: bool,
    /// Multiply the brush radius by the large-scale factor
    pub large_scale: bool,
    dragging: bool,
    origin: Vec3,
    /// World height above the terrain base where the drag started
    origin_height: f32,
    accumulated: f32,
}

impl DragSculptController {
    pub fn new(config: &SculptConfig) -> Self {
        Self {
            sensitivity: config.drag_sensitivity,
            max_height: config.max_drag_height.max(0.0),
            blend_rate: config.drag_blend_rate,
            large_scale_factor: config.large_scale_factor.max(1.0),
            inverted: false,
            large_scale: false,
            dragging: false,
            origin: Vec3::ZERO,
            origin_height: 0.0,
            accumulated: 0.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Start a drag at `world`, whose height above the terrain base is `height`.
    pub fn begin(&mut self, world: Vec3, height: f32) {
        self.dragging = true;
        self.origin = world;
        self.origin_height = height;
        self.accumulated = 0.0;
        tracing::debug!(height, "drag sculpt started");
    }

    pub fn end(&mut self) {
        if self.dragging {
            tracing::debug!(target = self.target_height(), "drag sculpt ended");
        }
        self.dragging = false;
    }

    /// Accumulate this tick's vertical pointer movement (screen space, down positive).
    pub fn update(&mut self, pointer_dy: f32, dt: f32) {
        if !self.dragging {
            return;
        }
        let mut delta = -pointer_dy * self.sensitivity * dt;
        if self.inverted {
            delta = -delta;
        }
        self.accumulated += delta;
    }

    /// Current goal in world units above the terrain base.
    pub fn target_height(&self) -> f32 {
        (self.origin_height + self.accumulated).clamp(0.0, self.max_height)
    }

    /// Brush radius in samples, enlarged in large-scale mode.
    pub fn effective_radius(&self, brush: &Brush, field: &HeightField) -> f32 {
        let radius = brush.radius_in_samples(field.mapping());
        if self.large_scale {
            radius * self.large_scale_factor
        } else {
            radius
        }
    }

    /// Lerp every footprint sample toward the target height. `buffer` holds the
    /// samples of `region`, which must cover the footprint. Returns the number of
    /// samples moved.
    pub fn apply(
        &self,
        field: &HeightField,
        brush: &Brush,
        footprint: &BrushFootprint,
        region: &GridRegion,
        buffer: &mut [f32],
        dt: f32,
    ) -> usize {
        let target = field.to_normalized_height(self.target_height());
        let mut moved = 0;
        for cell in footprint.iter() {
            let normalized = if footprint.radius > 0.0 {
                cell.distance / footprint.radius
            } else {
                0.0
            };
            let t = (brush.falloff.evaluate(normalized) * brush.strength * dt * self.blend_rate)
                .clamp(0.0, 1.0);
            let h = &mut buffer[region.local_index(cell.x, cell.z)];
            *h = (*h + (target - *h) * t).clamp(0.0, 1.0);
            moved += 1;
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridMapping;

    fn controller() -> DragSculptController {
        DragSculptController::new(&SculptConfig {
            drag_sensitivity: 1.0,
            max_drag_height: 20.0,
            ..SculptConfig::default()
        })
    }

    #[test]
    fn test_upward_drag_raises_target() {
        let mut drag = controller();
        drag.begin(Vec3::new(1.0, 5.0, 1.0), 5.0);
        drag.update(-10.0, 0.5);
        assert!((drag.target_height() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_inverted_drag() {
        let mut drag = controller();
        drag.inverted = true;
        drag.begin(Vec3::ZERO, 5.0);
        drag.update(-4.0, 1.0);
        assert!((drag.target_height() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_target_clamped() {
        let mut drag = controller();
        drag.begin(Vec3::ZERO, 5.0);
        drag.update(-1000.0, 1.0);
        assert_eq!(drag.target_height(), 20.0);
        drag.update(5000.0, 1.0);
        assert_eq!(drag.target_height(), 0.0);
    }

    #[test]
    fn test_update_ignored_when_not_dragging() {
        let mut drag = controller();
        drag.update(-10.0, 1.0);
        assert_eq!(drag.target_height(), 0.0);
        drag.begin(Vec3::ZERO, 2.0);
        drag.end();
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_large_scale_radius() {
        let mut drag = controller();
        let mapping = GridMapping::new(Vec3::ZERO, Vec3::new(64.0, 20.0, 64.0), 64);
        let field = HeightField::new(mapping, 0.0).unwrap();
        let brush = Brush::default();
        let normal = drag.effective_radius(&brush, &field);
        drag.large_scale = true;
        assert!((drag.effective_radius(&brush, &field) - normal * 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_apply_moves_toward_target() {
        let mut drag = controller();
        let mapping = GridMapping::new(Vec3::ZERO, Vec3::new(32.0, 20.0, 32.0), 32);
        let field = HeightField::new(mapping, 0.0).unwrap();
        let mut brush = Brush::default();
        brush.set_strength(1.0);
        drag.begin(Vec3::ZERO, 10.0);

        let footprint = BrushFootprint::compute(&brush, (16, 16), 4.0, 32);
        let mut buffer = field.get_region(&footprint.region);
        let moved = drag.apply(&field, &brush, &footprint, &footprint.region, &mut buffer, 0.1);
        assert_eq!(moved, footprint.len());
        let center = buffer[footprint.region.local_index(16, 16)];
        assert!(center > 0.0 && center <= 0.5);
        assert!(buffer.iter().all(|h| (0.0..=0.5).contains(h)));
    }
}
