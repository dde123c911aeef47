//! Simplified hydraulic erosion applied per brush sample.
//!
//! Each affected sample loses height proportional to its local slope and half of
//! the removed material lands on the single downhill neighbor. This is a one-step
//! local approximation, not a multi-pass flow simulation.

use glam::Vec2;

use crate::config::SculptConfig;
use crate::grid::GridRegion;

/// Transient working grids sized to the height field. Not persisted.
#[derive(Clone, Debug, Default)]
pub struct ErosionMaps {
    resolution: usize,
    erosion: Vec<f32>,
    sediment: Vec<f32>,
    velocity_x: Vec<f32>,
    velocity_z: Vec<f32>,
}

impl ErosionMaps {
    pub fn new(resolution: usize) -> Self {
        let count = resolution * resolution;
        Self {
            resolution,
            erosion: vec![0.0; count],
            sediment: vec![0.0; count],
            velocity_x: vec![0.0; count],
            velocity_z: vec![0.0; count],
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Zero every map, reallocating when the resolution changed.
    pub fn reset(&mut self, resolution: usize) {
        if resolution != self.resolution {
            *self = Self::new(resolution);
            return;
        }
        for map in [
            &mut self.erosion,
            &mut self.sediment,
            &mut self.velocity_x,
            &mut self.velocity_z,
        ] {
            map.fill(0.0);
        }
    }

    fn index(&self, x: usize, z: usize) -> usize {
        z * self.resolution + x
    }

    /// Total height removed at `(x, z)` since the last reset.
    pub fn erosion_at(&self, x: usize, z: usize) -> f32 {
        self.erosion[self.index(x, z)]
    }

    /// Total height deposited at `(x, z)` since the last reset.
    pub fn sediment_at(&self, x: usize, z: usize) -> f32 {
        self.sediment[self.index(x, z)]
    }

    /// Last downhill flow vector seen at `(x, z)`.
    pub fn velocity_at(&self, x: usize, z: usize) -> Vec2 {
        let i = self.index(x, z);
        Vec2::new(self.velocity_x[i], self.velocity_z[i])
    }

    pub fn total_eroded(&self) -> f32 {
        self.erosion.iter().sum()
    }

    pub fn total_deposited(&self) -> f32 {
        self.sediment.iter().sum()
    }
}

#[derive(Clone, Debug)]
pub struct ErosionSimulator {
    rate: f32,
    threshold: f32,
    maps: ErosionMaps,
}

impl ErosionSimulator {
    pub fn new(config: &SculptConfig) -> Self {
        Self {
            rate: config.erosion_rate,
            threshold: config.erosion_threshold,
            maps: ErosionMaps::default(),
        }
    }

    /// Called on tool activation: maps start from zero.
    pub fn activate(&mut self, resolution: usize) {
        self.maps.reset(resolution);
    }

    pub fn maps(&self) -> &ErosionMaps {
        &self.maps
    }

    /// Erode grid sample `(x, z)` inside `buffer`, the row-major samples of `region`.
    /// Neighbors outside `region` are treated as missing. Returns the height removed.
    pub fn erode_sample(
        &mut self,
        buffer: &mut [f32],
        region: &GridRegion,
        x: usize,
        z: usize,
        influence: f32,
    ) -> f32 {
        let at = |gx: usize, gz: usize| buffer[region.local_index(gx, gz)];

        let grad_x = if x > region.x && x < region.max_x() {
            (at(x + 1, z) - at(x - 1, z)) * 0.5
        } else {
            0.0
        };
        let grad_z = if z > region.z && z < region.max_z() {
            (at(x, z + 1) - at(x, z - 1)) * 0.5
        } else {
            0.0
        };

        let magnitude = (grad_x * grad_x + grad_z * grad_z).sqrt();
        if magnitude <= self.threshold {
            return 0.0;
        }

        let here = region.local_index(x, z);
        let current = buffer[here];
        let eroded = (current - self.rate * influence * magnitude).max(0.0);
        let removed = current - eroded;
        buffer[here] = eroded;

        let downhill = Vec2::new(-grad_x, -grad_z) / magnitude;
        let target_x = step(x, downhill.x, region.x, region.max_x());
        let target_z = step(z, downhill.y, region.z, region.max_z());
        let target = region.local_index(target_x, target_z);
        let deposit = removed * 0.5;
        buffer[target] = (buffer[target] + deposit).min(1.0);

        if self.maps.resolution > x.max(z) {
            let i = self.maps.index(x, z);
            self.maps.erosion[i] += removed;
            self.maps.velocity_x[i] = downhill.x * magnitude;
            self.maps.velocity_z[i] = downhill.y * magnitude;
        }
        if self.maps.resolution > target_x.max(target_z) {
            let t = self.maps.index(target_x, target_z);
            self.maps.sediment[t] += deposit;
        }

        removed
    }
}

fn step(coord: usize, direction: f32, min: usize, max: usize) -> usize {
    let offset = direction.round() as isize;
    (coord as isize + offset).clamp(min as isize, max as isize) as usize
}
