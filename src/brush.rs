//! Brush parameters and per-sample influence evaluation.
//!
//! A brush turns a sample's grid offset from the brush center into an influence
//! in `[0, strength]`. Shapes reinterpret the distance before the falloff lookup;
//! samples outside the radius get no influence at all.

use glam::Vec2;

use crate::config::SculptConfig;
use crate::grid::{GridMapping, GridRegion};

const RADIUS_EPSILON: f32 = 1e-6;

/// Shape of the brush footprint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum BrushShape {
    /// Euclidean distance through the falloff curve
    #[default]
    Circle,
    /// Uniform full intensity over the whole square
    Square,
    /// Ring-like profile, strongest halfway to the edge
    Diamond,
    /// Eight-lobed star
    Star,
    /// `(1 - d)^2`, ignores the falloff curve
    Mountain,
    /// `1 - (1 - d)^2`, ignores the falloff curve
    Valley,
    /// Falloff across the line through the center along the brush rotation
    Ridge,
}

impl BrushShape {
    pub const ALL: [BrushShape; 7] = [
        BrushShape::Circle,
        BrushShape::Square,
        BrushShape::Diamond,
        BrushShape::Star,
        BrushShape::Mountain,
        BrushShape::Valley,
        BrushShape::Ridge,
    ];

    /// Next shape in cycling order, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

/// Maps normalized distance (0 = center, 1 = edge) to intensity.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum FalloffCurve {
    /// `1 - d`
    Linear,
    /// Hermite smoothstep
    #[default]
    Smooth,
    /// Quadratic decay
    Sharp,
    /// Full strength everywhere inside the radius
    Constant,
    /// `sqrt(1 - d^2)`
    Sphere,
    /// Piecewise-linear keys `[distance, intensity]`, sorted by distance
    Custom(Vec<[f32; 2]>),
}

impl FalloffCurve {
    /// Keyframed curve; keys are sorted by distance.
    pub fn custom(mut keys: Vec<[f32; 2]>) -> Self {
        keys.sort_by(|a, b| a[0].total_cmp(&b[0]));
        FalloffCurve::Custom(keys)
    }

    pub fn evaluate(&self, normalized_distance: f32) -> f32 {
        let d = normalized_distance.clamp(0.0, 1.0);
        match self {
            FalloffCurve::Linear => 1.0 - d,
            FalloffCurve::Smooth => {
                let t = 1.0 - d;
                t * t * (3.0 - 2.0 * t)
            }
            FalloffCurve::Sharp => {
                let t = 1.0 - d;
                t * t
            }
            FalloffCurve::Constant => 1.0,
            FalloffCurve::Sphere => (1.0 - d * d).max(0.0).sqrt(),
            FalloffCurve::Custom(keys) => evaluate_keys(keys, d),
        }
    }
}

fn evaluate_keys(keys: &[[f32; 2]], d: f32) -> f32 {
    let (first, last) = match (keys.first(), keys.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 1.0,
    };
    if d <= first[0] {
        return first[1].clamp(0.0, 1.0);
    }
    if d >= last[0] {
        return last[1].clamp(0.0, 1.0);
    }
    for pair in keys.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if d <= b[0] {
            let span = b[0] - a[0];
            let t = if span > 0.0 { (d - a[0]) / span } else { 1.0 };
            return (a[1] + (b[1] - a[1]) * t).clamp(0.0, 1.0);
        }
    }
    last[1].clamp(0.0, 1.0)
}

/// Brush state; persists across ticks and is mutated by discrete input events.
#[derive(Clone, Debug, PartialEq)]
pub struct Brush {
    /// Radius in world units
    pub size: f32,
    /// 0..1
    pub strength: f32,
    pub falloff: FalloffCurve,
    pub shape: BrushShape,
    /// Degrees in `[0, 360)`
    pub rotation: f32,
    min_size: f32,
    max_size: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(&SculptConfig::default())
    }
}

impl Brush {
    pub fn new(config: &SculptConfig) -> Self {
        let min_size = config.min_brush_size.max(0.0);
        let max_size = config.max_brush_size.max(min_size);
        Self {
            size: config.default_brush_size.clamp(min_size, max_size),
            strength: config.default_brush_strength.clamp(0.0, 1.0),
            falloff: FalloffCurve::default(),
            shape: BrushShape::default(),
            rotation: 0.0,
            min_size,
            max_size,
        }
    }

    pub fn size_limits(&self) -> (f32, f32) {
        (self.min_size, self.max_size)
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size.clamp(self.min_size, self.max_size);
    }

    /// Multiply the size (scroll resize), clamped to the configured limits.
    pub fn scale_size(&mut self, factor: f32) {
        self.set_size(self.size * factor);
    }

    pub fn set_strength(&mut self, strength: f32) {
        self.strength = strength.clamp(0.0, 1.0);
    }

    pub fn adjust_strength(&mut self, delta: f32) {
        self.set_strength(self.strength + delta);
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees.rem_euclid(360.0);
    }

    pub fn rotate(&mut self, delta_degrees: f32) {
        self.set_rotation(self.rotation + delta_degrees);
    }

    pub fn set_shape(&mut self, shape: BrushShape) {
        self.shape = shape;
    }

    pub fn cycle_shape(&mut self) {
        self.shape = self.shape.next();
    }

    /// Unit vector along the brush rotation in the XZ plane.
    pub fn direction(&self) -> Vec2 {
        let radians = self.rotation.to_radians();
        Vec2::new(radians.cos(), radians.sin())
    }

    /// Brush radius expressed in samples of `mapping`'s grid.
    pub fn radius_in_samples(&self, mapping: &GridMapping) -> f32 {
        mapping.world_to_samples(self.size)
    }

    /// Influence of a sample at grid offset `(dx, dz)` from the center,
    /// or `None` when the sample lies outside `radius` (boundary included).
    pub fn influence(&self, dx: f32, dz: f32, radius: f32) -> Option<f32> {
        let euclid = (dx * dx + dz * dz).sqrt();
        let gate = match self.shape {
            BrushShape::Square => dx.abs().max(dz.abs()),
            _ => euclid,
        };

        let d = if radius > RADIUS_EPSILON {
            if gate > radius {
                return None;
            }
            let profile = match self.shape {
                BrushShape::Ridge => {
                    let dir = self.direction();
                    (dz * dir.x - dx * dir.y).abs()
                }
                _ => euclid,
            };
            (profile / radius).clamp(0.0, 1.0)
        } else if gate <= RADIUS_EPSILON {
            0.0
        } else {
            return None;
        };

        let value = match self.shape {
            BrushShape::Circle | BrushShape::Ridge => self.falloff.evaluate(d),
            BrushShape::Square => self.falloff.evaluate(0.0),
            BrushShape::Diamond => self.falloff.evaluate((d - 0.5).abs() * 2.0),
            BrushShape::Star => {
                let angle = dz.atan2(dx) - self.rotation.to_radians();
                self.falloff.evaluate(d) * (0.5 + 0.5 * (8.0 * angle).cos())
            }
            BrushShape::Mountain => (1.0 - d) * (1.0 - d),
            BrushShape::Valley => 1.0 - (1.0 - d) * (1.0 - d),
        };
        Some(value * self.strength)
    }
}

/// One in-radius sample of a brush footprint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FootprintCell {
    pub x: usize,
    pub z: usize,
    /// Offset from the brush center, in samples
    pub dx: f32,
    pub dz: f32,
    /// Euclidean distance from the center, in samples
    pub distance: f32,
    pub influence: f32,
}

/// The samples a brush touches at one grid position, with their influence.
#[derive(Clone, Debug, Default)]
pub struct BrushFootprint {
    pub center: (usize, usize),
    /// Radius in samples
    pub radius: f32,
    /// Bounding region, clipped to the grid
    pub region: GridRegion,
    cells: Vec<FootprintCell>,
}

impl BrushFootprint {
    pub fn compute(brush: &Brush, center: (usize, usize), radius: f32, resolution: usize) -> Self {
        let radius = radius.max(0.0);
        let extent = radius.ceil() as usize;
        let region = GridRegion::around(center.0, center.1, extent, resolution);

        let cells = region
            .cells()
            .filter_map(|(x, z)| {
                let dx = x as f32 - center.0 as f32;
                let dz = z as f32 - center.1 as f32;
                brush.influence(dx, dz, radius).map(|influence| FootprintCell {
                    x,
                    z,
                    dx,
                    dz,
                    distance: (dx * dx + dz * dz).sqrt(),
                    influence,
                })
            })
            .collect();

        Self {
            center,
            radius,
            region,
            cells,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FootprintCell> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
