//! Grid utilities shared by the height field and the texture blend field.
//!
//! Provides the world-to-grid mapping and clamped rectangular sample regions.

use glam::Vec3;

/// A rectangular block of grid samples, always lying inside the grid it was built for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridRegion {
    pub x: usize,
    pub z: usize,
    pub width: usize,
    pub height: usize,
}

impl GridRegion {
    pub fn new(x: usize, z: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            z,
            width,
            height,
        }
    }

    /// Square region of half-extent `radius` around `(center_x, center_z)`,
    /// clipped to a `resolution`-sized grid.
    pub fn around(center_x: usize, center_z: usize, radius: usize, resolution: usize) -> Self {
        let last = resolution.saturating_sub(1);
        let min_x = center_x.saturating_sub(radius).min(last);
        let min_z = center_z.saturating_sub(radius).min(last);
        let max_x = center_x.saturating_add(radius).min(last);
        let max_z = center_z.saturating_add(radius).min(last);

        if resolution == 0 {
            return Self::new(0, 0, 0, 0);
        }
        Self::new(min_x, min_z, max_x - min_x + 1, max_z - min_z + 1)
    }

    /// Grow by `margin` samples on every side, clipped to the grid.
    pub fn expand(&self, margin: usize, resolution: usize) -> Self {
        if self.is_empty() {
            return *self;
        }
        let min_x = self.x.saturating_sub(margin);
        let min_z = self.z.saturating_sub(margin);
        let max_x = (self.max_x() + margin).min(resolution - 1);
        let max_z = (self.max_z() + margin).min(resolution - 1);
        Self::new(min_x, min_z, max_x - min_x + 1, max_z - min_z + 1)
    }

    /// Inclusive last column.
    pub fn max_x(&self) -> usize {
        self.x + self.width.saturating_sub(1)
    }

    /// Inclusive last row.
    pub fn max_z(&self) -> usize {
        self.z + self.height.saturating_sub(1)
    }

    pub fn contains(&self, x: usize, z: usize) -> bool {
        x >= self.x && z >= self.z && x < self.x + self.width && z < self.z + self.height
    }

    /// Whether the region fits inside a `resolution`-sized grid.
    pub fn fits(&self, resolution: usize) -> bool {
        self.x + self.width <= resolution && self.z + self.height <= resolution
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Index of grid sample `(x, z)` inside a row-major buffer of this region.
    pub fn local_index(&self, x: usize, z: usize) -> usize {
        (z - self.z) * self.width + (x - self.x)
    }

    /// Iterate all `(x, z)` grid coordinates, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.z..self.z + self.height)
            .flat_map(move |z| (self.x..self.x + self.width).map(move |x| (x, z)))
    }
}

/// Affine mapping between world space and a square sample grid.
/// The Y axis only carries the height range; it does not affect grid lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMapping {
    /// World position of grid sample (0, 0)
    pub origin: Vec3,
    /// World extent: x = width, y = max height, z = depth
    pub size: Vec3,
    /// Samples per axis
    pub resolution: usize,
}

impl GridMapping {
    pub fn new(origin: Vec3, size: Vec3, resolution: usize) -> Self {
        Self {
            origin,
            size,
            resolution,
        }
    }

    /// Same world placement, different sample count.
    pub fn with_resolution(&self, resolution: usize) -> Self {
        Self {
            resolution,
            ..*self
        }
    }

    /// Continuous grid coordinates of a world point (not clamped).
    pub fn world_to_grid_f(&self, world: Vec3) -> (f32, f32) {
        let local = world - self.origin;
        let res = self.resolution as f32;
        (local.x / self.size.x * res, local.z / self.size.z * res)
    }

    /// Integer grid indices of a world point, clamped to `[0, resolution - 1]`.
    pub fn world_to_grid(&self, world: Vec3) -> (usize, usize) {
        let (gx, gz) = self.world_to_grid_f(world);
        (self.clamp_index(gx), self.clamp_index(gz))
    }

    fn clamp_index(&self, v: f32) -> usize {
        let last = self.resolution.saturating_sub(1) as f32;
        if v.is_nan() {
            return 0;
        }
        v.floor().clamp(0.0, last) as usize
    }

    /// World X/Z of a grid sample.
    pub fn grid_to_world(&self, x: usize, z: usize) -> (f32, f32) {
        let res = self.resolution as f32;
        (
            self.origin.x + x as f32 / res * self.size.x,
            self.origin.z + z as f32 / res * self.size.z,
        )
    }

    /// Converts a world-space length along X into a sample count.
    pub fn world_to_samples(&self, length: f32) -> f32 {
        if self.size.x <= 0.0 {
            return 0.0;
        }
        length / self.size.x * self.resolution as f32
    }

    pub fn max_height(&self) -> f32 {
        self.size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> GridMapping {
        GridMapping::new(Vec3::new(10.0, 0.0, 20.0), Vec3::new(100.0, 30.0, 100.0), 101)
    }

    #[test]
    fn test_world_to_grid_subtracts_origin() {
        let m = mapping();
        assert_eq!(m.world_to_grid(Vec3::new(10.0, 5.0, 20.0)), (0, 0));
        assert_eq!(m.world_to_grid(Vec3::new(60.0, 0.0, 70.0)), (50, 50));
    }

    #[test]
    fn test_world_to_grid_clamps() {
        let m = mapping();
        assert_eq!(m.world_to_grid(Vec3::new(-500.0, 0.0, -500.0)), (0, 0));
        assert_eq!(m.world_to_grid(Vec3::new(500.0, 0.0, 500.0)), (100, 100));
    }

    #[test]
    fn test_world_to_grid_ignores_y() {
        let m = mapping();
        let a = m.world_to_grid(Vec3::new(40.0, -100.0, 40.0));
        let b = m.world_to_grid(Vec3::new(40.0, 900.0, 40.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_region_around_clipped_at_corner() {
        let r = GridRegion::around(1, 2, 5, 64);
        assert_eq!(r, GridRegion::new(0, 0, 7, 8));
        assert!(r.fits(64));

        let r = GridRegion::around(62, 63, 5, 64);
        assert_eq!(r.max_x(), 63);
        assert_eq!(r.max_z(), 63);
        assert!(r.fits(64));
    }

    #[test]
    fn test_region_expand() {
        let r = GridRegion::new(5, 5, 3, 3).expand(1, 8);
        assert_eq!(r, GridRegion::new(4, 4, 4, 4));
    }

    #[test]
    fn test_region_cells_and_local_index() {
        let r = GridRegion::new(2, 3, 2, 2);
        let cells: Vec<_> = r.cells().collect();
        assert_eq!(cells, vec![(2, 3), (3, 3), (2, 4), (3, 4)]);
        assert_eq!(r.local_index(3, 4), 3);
        assert!(r.contains(2, 3));
        assert!(!r.contains(4, 3));
    }
}
