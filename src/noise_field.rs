use noise::{Fbm, MultiFractal, NoiseFn, Perlin, Seedable};

/// Coherent noise used by the noise sculpt mode and stamp variation.
/// Values are remapped from Perlin's `[-1, 1]` to `[0, 1]`.
#[derive(Clone, Debug)]
pub struct SculptNoise {
    perlin: Perlin,
    fbm: Fbm<Perlin>,
}

impl SculptNoise {
    pub fn new(seed: u32) -> Self {
        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(4)
            .set_frequency(1.0)
            .set_lacunarity(2.0)
            .set_persistence(0.5);

        Self {
            perlin: Perlin::new(seed),
            fbm,
        }
    }

    pub fn seed(&self) -> u32 {
        self.perlin.seed()
    }

    /// Single-octave Perlin in `[0, 1]`.
    pub fn perlin(&self, x: f32, z: f32) -> f32 {
        remap(self.perlin.get([x as f64, z as f64]))
    }

    /// Four-octave fractal noise in `[0, 1]`.
    pub fn fractal(&self, x: f32, z: f32) -> f32 {
        remap(self.fbm.get([x as f64, z as f64]))
    }
}

fn remap(value: f64) -> f32 {
    ((value as f32 + 1.0) * 0.5).clamp(0.0, 1.0)
}
