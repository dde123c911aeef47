//! Procedural height stamps (mountain, valley, ridge).
//!
//! Patterns are generated once when the sculpt tool activates and are read-only
//! afterwards. They are tiled by modulo indexing rather than resized to the brush.

use rayon::prelude::*;

use crate::brush::BrushShape;
use crate::config::SculptConfig;
use crate::noise_field::SculptNoise;

/// Which landform a stamp emulates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StampKind {
    Mountain,
    Valley,
    Ridge,
}

impl StampKind {
    pub const ALL: [StampKind; 3] = [StampKind::Mountain, StampKind::Valley, StampKind::Ridge];

    pub fn name(self) -> &'static str {
        match self {
            StampKind::Mountain => "mountain",
            StampKind::Valley => "valley",
            StampKind::Ridge => "ridge",
        }
    }

    /// Brush shape tag associated with the stamp.
    pub fn shape(self) -> BrushShape {
        match self {
            StampKind::Mountain => BrushShape::Mountain,
            StampKind::Valley => BrushShape::Valley,
            StampKind::Ridge => BrushShape::Ridge,
        }
    }

    // Keeps the variation noise of different stamps decorrelated.
    fn noise_offset(self) -> f32 {
        match self {
            StampKind::Mountain => 0.0,
            StampKind::Valley => 137.0,
            StampKind::Ridge => 311.0,
        }
    }
}

/// A fixed-size square height pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainStamp {
    kind: StampKind,
    size: usize,
    intensity: f32,
    /// Unit-amplitude pattern, row-major
    pattern: Vec<f32>,
}

impl TerrainStamp {
    pub fn generate(
        kind: StampKind,
        size: usize,
        intensity: f32,
        noise_amplitude: f32,
        noise: &SculptNoise,
    ) -> Self {
        let size = size.max(2);
        let center = (size - 1) as f32 * 0.5;
        let max_radius = size as f32 * 0.5;
        let offset = kind.noise_offset();

        let mut pattern = vec![0.0f32; size * size];
        pattern
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(z, row)| {
                for (x, value) in row.iter_mut().enumerate() {
                    let fx = x as f32;
                    let fz = z as f32;
                    *value = match kind {
                        StampKind::Mountain | StampKind::Valley => {
                            let dx = fx - center;
                            let dz = fz - center;
                            let d = (dx * dx + dz * dz).sqrt() / max_radius;
                            if d >= 1.0 {
                                0.0
                            } else {
                                let variation = (noise.fractal(fx * 0.1 + offset, fz * 0.1 + offset) - 0.5)
                                    * noise_amplitude;
                                let profile = if kind == StampKind::Mountain {
                                    (1.0 - d).powi(2)
                                } else {
                                    -(1.0 - d).powf(1.5)
                                };
                                profile + variation
                            }
                        }
                        StampKind::Ridge => {
                            let across = 1.0 - (fz - center).abs() / center;
                            // stretched along x so the variation runs with the ridge
                            let variation = (noise.fractal(fx * 0.03 + offset, fz * 0.2 + offset) - 0.5)
                                * noise_amplitude;
                            across + variation
                        }
                    };
                }
            });

        Self {
            kind,
            size,
            intensity,
            pattern,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn kind(&self) -> StampKind {
        self.kind
    }

    pub fn shape(&self) -> BrushShape {
        self.kind.shape()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Pattern value times intensity at grid position `(x, z)`, tiled.
    pub fn sample(&self, x: usize, z: usize) -> f32 {
        self.pattern[(z % self.size) * self.size + x % self.size] * self.intensity
    }
}

/// The stamps available to the sculpt tool.
#[derive(Clone, Debug)]
pub struct StampLibrary {
    stamps: Vec<TerrainStamp>,
}

impl StampLibrary {
    pub fn generate(config: &SculptConfig, noise: &SculptNoise) -> Self {
        let stamps = StampKind::ALL
            .iter()
            .map(|&kind| {
                let intensity = match kind {
                    StampKind::Mountain => config.mountain_peak,
                    StampKind::Valley => config.valley_depth,
                    StampKind::Ridge => config.ridge_amplitude,
                };
                TerrainStamp::generate(kind, config.stamp_size, intensity, config.stamp_noise, noise)
            })
            .collect();
        tracing::debug!(size = config.stamp_size, "generated terrain stamps");
        Self { stamps }
    }

    pub fn get(&self, kind: StampKind) -> &TerrainStamp {
        // generate() builds one stamp per kind, in ALL order
        &self.stamps[kind as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TerrainStamp> {
        self.stamps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(kind: StampKind) -> TerrainStamp {
        TerrainStamp::generate(kind, 33, 1.0, 0.0, &SculptNoise::new(1))
    }

    #[test]
    fn test_mountain_peaks_at_center() {
        let stamp = quiet(StampKind::Mountain);
        assert!((stamp.sample(16, 16) - 1.0).abs() < 1e-5);
        assert!(stamp.sample(16, 16) > stamp.sample(10, 16));
        assert_eq!(stamp.sample(0, 0), 0.0);
    }

    #[test]
    fn test_valley_is_negative_inside() {
        let stamp = quiet(StampKind::Valley);
        assert!((stamp.sample(16, 16) + 1.0).abs() < 1e-5);
        assert!(stamp.sample(12, 16) < 0.0);
        assert_eq!(stamp.sample(0, 32), 0.0);
    }

    #[test]
    fn test_ridge_varies_across_one_axis() {
        let stamp = quiet(StampKind::Ridge);
        assert_eq!(stamp.sample(3, 16), stamp.sample(29, 16));
        assert!(stamp.sample(3, 16) > stamp.sample(3, 4));
        assert!(stamp.sample(3, 0).abs() < 1e-5);
    }

    #[test]
    fn test_sample_tiles_by_modulo() {
        let stamp = TerrainStamp::generate(StampKind::Mountain, 16, 2.0, 0.05, &SculptNoise::new(9));
        assert_eq!(stamp.sample(5, 7), stamp.sample(5 + 16, 7 + 32));
        assert_eq!(stamp.intensity(), 2.0);
    }

    #[test]
    fn test_library_has_every_kind() {
        let config = SculptConfig {
            stamp_size: 16,
            ..SculptConfig::default()
        };
        let library = StampLibrary::generate(&config, &SculptNoise::new(config.noise_seed));
        for kind in StampKind::ALL {
            assert_eq!(library.get(kind).kind(), kind);
            assert_eq!(library.get(kind).shape(), kind.shape());
        }
        assert_eq!(library.iter().count(), 3);
    }
}
