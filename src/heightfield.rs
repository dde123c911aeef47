//! Normalized height samples on a square grid.

use glam::Vec3;

use crate::error::{Result, TerrainError};
use crate::grid::{GridMapping, GridRegion};

/// Square grid of `resolution × resolution` heights, each in `[0, 1]`.
/// Row-major: sample `(x, z)` lives at `z * resolution + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    mapping: GridMapping,
    samples: Vec<f32>,
}

impl HeightField {
    /// Flat field at `initial` (clamped to `[0, 1]`).
    pub fn new(mapping: GridMapping, initial: f32) -> Result<Self> {
        validate_mapping(&mapping)?;
        let count = mapping.resolution * mapping.resolution;
        Ok(Self {
            mapping,
            samples: vec![initial.clamp(0.0, 1.0); count],
        })
    }

    /// Rebuild a field from a flat array handed over by a loader.
    pub fn from_flat(mapping: GridMapping, samples: Vec<f32>) -> Result<Self> {
        validate_mapping(&mapping)?;
        let expected = mapping.resolution * mapping.resolution;
        if samples.len() != expected {
            return Err(TerrainError::LengthMismatch {
                what: "heights",
                expected,
                actual: samples.len(),
            });
        }
        if let Some((index, &value)) = samples
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(TerrainError::ValueOutOfRange {
                what: "heights",
                index,
                value,
            });
        }
        Ok(Self { mapping, samples })
    }

    pub fn mapping(&self) -> &GridMapping {
        &self.mapping
    }

    pub fn resolution(&self) -> usize {
        self.mapping.resolution
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    pub fn world_to_grid(&self, world: Vec3) -> (usize, usize) {
        self.mapping.world_to_grid(world)
    }

    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.samples[z * self.resolution() + x]
    }

    /// Normalized height under a world point.
    pub fn sample_at_world(&self, world: Vec3) -> f32 {
        let (x, z) = self.world_to_grid(world);
        self.get(x, z)
    }

    /// Copy of the samples inside `region`, row-major.
    ///
    /// Callers clamp regions themselves; a region outside the grid is a contract violation.
    pub fn get_region(&self, region: &GridRegion) -> Vec<f32> {
        assert!(
            region.fits(self.resolution()),
            "region {region:?} outside {}x{} height field",
            self.resolution(),
            self.resolution()
        );
        let res = self.resolution();
        let mut out = Vec::with_capacity(region.len());
        for z in region.z..region.z + region.height {
            let row = z * res;
            out.extend_from_slice(&self.samples[row + region.x..row + region.x + region.width]);
        }
        out
    }

    /// Write `data` back into `region`, clamping every sample to `[0, 1]`.
    pub fn set_region(&mut self, region: &GridRegion, data: &[f32]) {
        assert!(
            region.fits(self.resolution()),
            "region {region:?} outside {}x{} height field",
            self.resolution(),
            self.resolution()
        );
        assert_eq!(data.len(), region.len(), "region buffer length mismatch");
        let res = self.resolution();
        for (row_index, row) in data.chunks(region.width.max(1)).enumerate() {
            let start = (region.z + row_index) * res + region.x;
            for (dst, src) in self.samples[start..start + region.width].iter_mut().zip(row) {
                *dst = src.clamp(0.0, 1.0);
            }
        }
    }

    /// World-space height of a normalized sample value.
    pub fn to_world_height(&self, normalized: f32) -> f32 {
        normalized * self.mapping.max_height()
    }

    /// Normalized value of a height measured from the terrain base, clamped to `[0, 1]`.
    pub fn to_normalized_height(&self, world_height: f32) -> f32 {
        let max = self.mapping.max_height();
        if max <= 0.0 {
            return 0.0;
        }
        (world_height / max).clamp(0.0, 1.0)
    }
}

pub(crate) fn validate_mapping(mapping: &GridMapping) -> Result<()> {
    if mapping.resolution < 2 {
        return Err(TerrainError::InvalidResolution(mapping.resolution));
    }
    let size = mapping.size;
    if !(size.x > 0.0 && size.y > 0.0 && size.z > 0.0) {
        return Err(TerrainError::InvalidWorldSize(size.to_array()));
    }
    Ok(())
}
