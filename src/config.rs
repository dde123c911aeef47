//! Tunable parameters for the sculpting and painting tools.
//!
//! Every constant the tools use lives here so hosts can override it from a
//! settings file; unspecified fields fall back to the defaults below.

use glam::Vec3;
use serde::Deserialize;

/// Parameters shared by every tool in an editing session.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SculptConfig {
    /// Smallest brush radius in world units
    pub min_brush_size: f32,
    /// Largest brush radius in world units
    pub max_brush_size: f32,
    pub default_brush_size: f32,
    pub default_brush_strength: f32,
    /// Multiplicative resize step per scroll notch
    pub brush_scroll_step: f32,
    pub strength_step: f32,
    /// Degrees per rotate event
    pub rotation_step: f32,

    /// Undo entries kept before the oldest is evicted
    pub undo_capacity: usize,

    /// Normalized height per second at full influence for raise/lower
    pub raise_rate: f32,
    /// Scales brush influence into a flatten lerp factor
    pub flatten_accelerator: f32,
    pub noise_frequency: f32,
    pub noise_scale: f32,
    pub noise_seed: u32,

    /// Normalized height plateaus converge to
    pub plateau_height: f32,
    pub plateau_rate: f32,
    /// Normalized floor height of a canyon cross-section
    pub canyon_depth: f32,
    pub canyon_rate: f32,
    /// Normalized height per second added on the ridge line
    pub ridge_rate: f32,
    /// Exponential decay of the ridge bump per brush radius
    pub ridge_decay: f32,
    /// Normalized height per second pushed up (high side) or down (low side)
    pub cliff_step: f32,

    /// Side length of generated stamp patterns, in samples
    pub stamp_size: usize,
    pub mountain_peak: f32,
    pub valley_depth: f32,
    pub ridge_amplitude: f32,
    /// Amplitude of the variation noise baked into stamps
    pub stamp_noise: f32,
    /// Normalized height per second at full stamp value
    pub stamp_rate: f32,

    pub erosion_rate: f32,
    /// Gradients below this magnitude do not erode
    pub erosion_threshold: f32,

    /// World units per pointer pixel per second
    pub drag_sensitivity: f32,
    /// Upper bound for drag targets, in world units
    pub max_drag_height: f32,
    /// Lerp speed toward the drag target
    pub drag_blend_rate: f32,
    /// Brush radius multiplier in large-scale drag mode
    pub large_scale_factor: f32,

    /// Weight per second moved into the selected layer at full influence
    pub paint_rate: f32,
    /// Sample weight sums below this skip renormalization
    pub normalize_epsilon: f32,
}

impl Default for SculptConfig {
    fn default() -> Self {
        Self {
            min_brush_size: 0.5,
            max_brush_size: 200.0,
            default_brush_size: 10.0,
            default_brush_strength: 0.5,
            brush_scroll_step: 1.1,
            strength_step: 0.05,
            rotation_step: 15.0,
            undo_capacity: 20,
            raise_rate: 0.5,
            flatten_accelerator: 0.5,
            noise_frequency: 0.1,
            noise_scale: 0.05,
            noise_seed: 1337,
            plateau_height: 0.7,
            plateau_rate: 0.5,
            canyon_depth: 0.3,
            canyon_rate: 0.5,
            ridge_rate: 0.5,
            ridge_decay: 4.0,
            cliff_step: 0.2,
            stamp_size: 64,
            mountain_peak: 1.0,
            valley_depth: 1.0,
            ridge_amplitude: 1.0,
            stamp_noise: 0.05,
            stamp_rate: 0.5,
            erosion_rate: 0.5,
            erosion_threshold: 1e-4,
            drag_sensitivity: 0.5,
            max_drag_height: 100.0,
            drag_blend_rate: 5.0,
            large_scale_factor: 5.0,
            paint_rate: 2.0,
            normalize_epsilon: 1e-6,
        }
    }
}

/// Describes a terrain to create from scratch.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Height samples per axis
    pub resolution: usize,
    /// Blend weight samples per axis
    pub blend_resolution: usize,
    /// World extent: width, max height, depth
    pub size: [f32; 3],
    pub origin: [f32; 3],
    /// Normalized starting height
    pub initial_height: f32,
    pub base_layer: String,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            resolution: 513,
            blend_resolution: 512,
            size: [500.0, 30.0, 500.0],
            origin: [0.0, 0.0, 0.0],
            initial_height: 0.0,
            base_layer: "base".to_string(),
        }
    }
}

impl TerrainSettings {
    pub fn size(&self) -> Vec3 {
        Vec3::from_array(self.size)
    }

    pub fn origin(&self) -> Vec3 {
        Vec3::from_array(self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SculptConfig =
            serde_json::from_str(r#"{ "undo_capacity": 5, "plateau_height": 0.6 }"#).unwrap();
        assert_eq!(config.undo_capacity, 5);
        assert_eq!(config.plateau_height, 0.6);
        assert_eq!(config.canyon_depth, SculptConfig::default().canyon_depth);
    }

    #[test]
    fn test_terrain_settings_from_json() {
        let settings: TerrainSettings =
            serde_json::from_str(r#"{ "resolution": 129, "size": [100.0, 20.0, 100.0] }"#)
                .unwrap();
        assert_eq!(settings.resolution, 129);
        assert_eq!(settings.size(), Vec3::new(100.0, 20.0, 100.0));
        assert_eq!(settings.base_layer, "base");
    }
}
