//! Height sculpting: one brush application per tick in the selected mode.
//!
//! Every tick snapshots the touched rectangle into the undo history, edits a
//! copy of it and writes it back. The rectangle is the brush footprint grown by
//! one sample so that neighborhood reads (smooth, erosion) and erosion deposits
//! stay inside the captured area.

use std::fmt;

use glam::{Vec2, Vec3};

use crate::brush::{Brush, BrushFootprint, FootprintCell};
use crate::config::SculptConfig;
use crate::drag::DragSculptController;
use crate::erosion::{ErosionMaps, ErosionSimulator};
use crate::grid::GridRegion;
use crate::heightfield::HeightField;
use crate::noise_field::SculptNoise;
use crate::stamp::{StampKind, StampLibrary};
use crate::undo::UndoManager;

/// Samples added around the footprint for neighbor reads
const APRON: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum SculptMode {
    #[default]
    Raise,
    Lower,
    Smooth,
    Flatten,
    Noise,
    Plateau,
    Canyon,
    Ridge,
    Cliff,
    Erosion,
    MountainStamp,
    ValleyStamp,
    RidgeStamp,
    DragSculpt,
}

impl SculptMode {
    pub const ALL: [SculptMode; 14] = [
        SculptMode::Raise,
        SculptMode::Lower,
        SculptMode::Smooth,
        SculptMode::Flatten,
        SculptMode::Noise,
        SculptMode::Plateau,
        SculptMode::Canyon,
        SculptMode::Ridge,
        SculptMode::Cliff,
        SculptMode::Erosion,
        SculptMode::MountainStamp,
        SculptMode::ValleyStamp,
        SculptMode::RidgeStamp,
        SculptMode::DragSculpt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SculptMode::Raise => "raise",
            SculptMode::Lower => "lower",
            SculptMode::Smooth => "smooth",
            SculptMode::Flatten => "flatten",
            SculptMode::Noise => "noise",
            SculptMode::Plateau => "plateau",
            SculptMode::Canyon => "canyon",
            SculptMode::Ridge => "ridge",
            SculptMode::Cliff => "cliff",
            SculptMode::Erosion => "erosion",
            SculptMode::MountainStamp => "mountain stamp",
            SculptMode::ValleyStamp => "valley stamp",
            SculptMode::RidgeStamp => "ridge stamp",
            SculptMode::DragSculpt => "drag sculpt",
        }
    }

    /// The stamp a stamp mode blends in.
    pub fn stamp(self) -> Option<StampKind> {
        match self {
            SculptMode::MountainStamp => Some(StampKind::Mountain),
            SculptMode::ValleyStamp => Some(StampKind::Valley),
            SculptMode::RidgeStamp => Some(StampKind::Ridge),
            _ => None,
        }
    }
}

impl fmt::Display for SculptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where flatten strokes get their target height from.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum FlattenTarget {
    /// Height under the cursor when the stroke starts
    #[default]
    StrokeStart,
    /// Fixed height in world units above the terrain base
    Absolute(f32),
}

/// Result of one sculpt tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeOutcome {
    /// `samples` heights inside the brush were updated; `region` was snapshotted
    Applied { region: GridRegion, samples: usize },
    /// No terrain to edit
    NoTarget,
}

impl StrokeOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, StrokeOutcome::Applied { .. })
    }
}

/// Mode state machine plus the per-mode height algorithms.
#[derive(Debug)]
pub struct SculptEngine {
    mode: SculptMode,
    pub brush: Brush,
    config: SculptConfig,
    noise: SculptNoise,
    stamps: Option<StampLibrary>,
    erosion: ErosionSimulator,
    drag: DragSculptController,
    flatten: FlattenTarget,
    /// Normalized flatten goal of the current stroke
    flatten_height: Option<f32>,
    stroking: bool,
}

impl SculptEngine {
    pub fn new(config: SculptConfig) -> Self {
        Self {
            mode: SculptMode::default(),
            brush: Brush::new(&config),
            noise: SculptNoise::new(config.noise_seed),
            stamps: None,
            erosion: ErosionSimulator::new(&config),
            drag: DragSculptController::new(&config),
            flatten: FlattenTarget::default(),
            flatten_height: None,
            stroking: false,
            config,
        }
    }

    pub fn config(&self) -> &SculptConfig {
        &self.config
    }

    pub fn mode(&self) -> SculptMode {
        self.mode
    }

    /// Switch modes. Ends any stroke in progress.
    pub fn set_mode(&mut self, mode: SculptMode) {
        if mode != self.mode {
            self.end_stroke();
            tracing::info!(%mode, "sculpt mode selected");
        }
        self.mode = mode;
    }

    pub fn flatten_target(&self) -> FlattenTarget {
        self.flatten
    }

    pub fn set_flatten_target(&mut self, target: FlattenTarget) {
        self.flatten = target;
    }

    pub fn drag(&self) -> &DragSculptController {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut DragSculptController {
        &mut self.drag
    }

    pub fn stamps(&self) -> Option<&StampLibrary> {
        self.stamps.as_ref()
    }

    pub fn erosion_maps(&self) -> &ErosionMaps {
        self.erosion.maps()
    }

    pub fn is_stroking(&self) -> bool {
        self.stroking
    }

    /// Generate stamps and reset erosion maps for `field`.
    pub fn activate(&mut self, field: Option<&HeightField>) {
        if self.stamps.is_none() {
            self.stamps = Some(StampLibrary::generate(&self.config, &self.noise));
        }
        if let Some(field) = field {
            self.erosion.activate(field.resolution());
        }
        tracing::debug!(mode = %self.mode, "sculpt engine activated");
    }

    pub fn deactivate(&mut self) {
        self.end_stroke();
    }

    /// Capture per-stroke state at `world`. Returns false when there is no terrain.
    pub fn begin_stroke(&mut self, field: Option<&HeightField>, world: Vec3) -> bool {
        let Some(field) = field else {
            return false;
        };
        self.stroking = true;
        self.flatten_height = Some(match self.flatten {
            FlattenTarget::StrokeStart => field.sample_at_world(world),
            FlattenTarget::Absolute(height) => field.to_normalized_height(height),
        });
        if self.mode == SculptMode::DragSculpt {
            let height = field.to_world_height(field.sample_at_world(world));
            self.drag.begin(world, height);
        }
        tracing::debug!(mode = %self.mode, "stroke started");
        true
    }

    /// Primary input released. Applied edits stay; undo is the only rollback.
    pub fn end_stroke(&mut self) {
        if self.stroking {
            tracing::debug!(mode = %self.mode, "stroke ended");
        }
        self.stroking = false;
        self.flatten_height = None;
        self.drag.end();
    }

    /// Apply one tick of the current mode at `world`. Starts a stroke when none is
    /// active. `pointer_delta` is only read by drag sculpting.
    pub fn stroke(
        &mut self,
        field: Option<&mut HeightField>,
        undo: &mut UndoManager,
        world: Vec3,
        pointer_delta: Vec2,
        dt: f32,
    ) -> StrokeOutcome {
        let Some(field) = field else {
            return StrokeOutcome::NoTarget;
        };
        if !self.stroking {
            self.begin_stroke(Some(&*field), world);
        }

        let resolution = field.resolution();
        let center = field.world_to_grid(world);
        let radius = if self.mode == SculptMode::DragSculpt {
            self.drag.effective_radius(&self.brush, field)
        } else {
            self.brush.radius_in_samples(field.mapping())
        };
        let footprint = BrushFootprint::compute(&self.brush, center, radius, resolution);
        let region = footprint.region.expand(APRON, resolution);

        undo.snapshot_heights(field, region, format!("sculpt {}", self.mode));
        let mut buffer = field.get_region(&region);

        if self.mode == SculptMode::DragSculpt {
            self.drag.update(pointer_delta.y, dt);
            self.drag.apply(field, &self.brush, &footprint, &region, &mut buffer, dt);
        } else {
            self.apply_brush(field, &footprint, &region, &mut buffer, dt);
        }

        field.set_region(&region, &buffer);
        tracing::debug!(
            mode = %self.mode,
            x = center.0,
            z = center.1,
            samples = footprint.len(),
            "sculpt tick"
        );
        StrokeOutcome::Applied {
            region,
            samples: footprint.len(),
        }
    }

    fn apply_brush(
        &mut self,
        field: &HeightField,
        footprint: &BrushFootprint,
        region: &GridRegion,
        buffer: &mut [f32],
        dt: f32,
    ) {
        let resolution = field.resolution();
        if self.mode == SculptMode::Erosion && self.erosion.maps().resolution() != resolution {
            self.erosion.activate(resolution);
        }
        if self.mode.stamp().is_some() && self.stamps.is_none() {
            self.stamps = Some(StampLibrary::generate(&self.config, &self.noise));
        }

        let config = &self.config;
        let direction = self.brush.direction();
        let flatten_height = self.flatten_height.unwrap_or(0.0);
        let stamp = match (self.mode.stamp(), &self.stamps) {
            (Some(kind), Some(library)) => Some(library.get(kind)),
            _ => None,
        };
        // neighborhood reads see the heights from before this tick
        let source = if self.mode == SculptMode::Smooth {
            buffer.to_vec()
        } else {
            Vec::new()
        };

        for cell in footprint.iter() {
            let index = region.local_index(cell.x, cell.z);
            let h = buffer[index];
            let influence = cell.influence;
            let edge = normalized_distance(cell, footprint.radius);

            let updated = match self.mode {
                SculptMode::Raise => h + influence * config.raise_rate * dt,
                SculptMode::Lower => h - influence * config.raise_rate * dt,
                SculptMode::Smooth => {
                    let mean = neighborhood_mean(&source, region, cell.x, cell.z);
                    lerp(h, mean, influence)
                }
                SculptMode::Flatten => {
                    lerp(h, flatten_height, influence * config.flatten_accelerator)
                }
                SculptMode::Noise => {
                    let (wx, wz) = field.mapping().grid_to_world(cell.x, cell.z);
                    let n = self
                        .noise
                        .perlin(wx * config.noise_frequency, wz * config.noise_frequency);
                    h + (n - 0.5) * influence * config.noise_scale
                }
                SculptMode::Plateau => {
                    let mut t = influence * config.plateau_rate;
                    if h > config.plateau_height {
                        t *= 0.5;
                    }
                    lerp(h, config.plateau_height, t)
                }
                SculptMode::Canyon => {
                    // U-shaped cross-section: full depth at the center, untouched at the rim
                    let floor = lerp(config.canyon_depth, h, edge * edge);
                    lerp(h, floor, influence * config.canyon_rate)
                }
                SculptMode::Ridge => {
                    let across = (cell.dz * direction.x - cell.dx * direction.y).abs();
                    let across = if footprint.radius > 0.0 {
                        across / footprint.radius
                    } else {
                        0.0
                    };
                    let bump = (-config.ridge_decay * across).exp();
                    h + bump * influence * config.ridge_rate * dt
                }
                SculptMode::Cliff => {
                    let along = cell.dx * direction.x + cell.dz * direction.y;
                    let side = if along >= 0.0 { 1.0 } else { -1.0 };
                    h + side * config.cliff_step * influence * dt
                }
                SculptMode::Erosion => {
                    // in place: later samples see deposits made earlier in this tick
                    self.erosion.erode_sample(buffer, region, cell.x, cell.z, influence);
                    continue;
                }
                SculptMode::MountainStamp | SculptMode::ValleyStamp | SculptMode::RidgeStamp => {
                    match stamp {
                        Some(stamp) => {
                            h + stamp.sample(cell.x, cell.z) * influence * config.stamp_rate * dt
                        }
                        None => h,
                    }
                }
                // handled by the drag controller
                SculptMode::DragSculpt => h,
            };
            buffer[index] = updated.clamp(0.0, 1.0);
        }
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

fn normalized_distance(cell: &FootprintCell, radius: f32) -> f32 {
    if radius > 0.0 {
        (cell.distance / radius).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Mean of the 3x3 neighborhood of `(x, z)` over the samples that exist in `region`.
fn neighborhood_mean(buffer: &[f32], region: &GridRegion, x: usize, z: usize) -> f32 {
    let mut sum = 0.0;
    let mut count = 0;
    for nz in z.saturating_sub(1)..=z + 1 {
        for nx in x.saturating_sub(1)..=x + 1 {
            if region.contains(nx, nz) {
                sum += buffer[region.local_index(nx, nz)];
                count += 1;
            }
        }
    }
    sum / count as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{BrushShape, FalloffCurve};
    use crate::grid::GridMapping;

    const DT: f32 = 1.0 / 60.0;

    /// 64x64 samples over 64x64 world units, max height 30
    fn field(initial: f32) -> HeightField {
        let mapping = GridMapping::new(Vec3::ZERO, Vec3::new(64.0, 30.0, 64.0), 64);
        HeightField::new(mapping, initial).unwrap()
    }

    fn engine(mode: SculptMode) -> SculptEngine {
        let mut engine = SculptEngine::new(SculptConfig::default());
        engine.set_mode(mode);
        engine.brush.set_size(8.0);
        engine.brush.set_strength(1.0);
        engine
    }

    fn center() -> Vec3 {
        Vec3::new(32.0, 0.0, 32.0)
    }

    fn tick(
        engine: &mut SculptEngine,
        field: &mut HeightField,
        undo: &mut UndoManager,
    ) -> StrokeOutcome {
        engine.stroke(Some(field), undo, center(), Vec2::ZERO, DT)
    }

    #[test]
    fn test_no_target() {
        let mut engine = engine(SculptMode::Raise);
        let mut undo = UndoManager::new(4);
        let outcome = engine.stroke(None, &mut undo, center(), Vec2::ZERO, DT);
        assert_eq!(outcome, StrokeOutcome::NoTarget);
        assert!(!undo.can_undo());
        assert!(!engine.begin_stroke(None, center()));
    }

    #[test]
    fn test_raise_and_lower() {
        let mut field = field(0.5);
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Raise);

        assert!(tick(&mut engine, &mut field, &mut undo).is_applied());
        let raised = field.get(32, 32);
        assert!((raised - (0.5 + SculptConfig::default().raise_rate * DT)).abs() < 1e-6);
        assert!(field.get(35, 32) > 0.5 && field.get(35, 32) < raised);
        assert_eq!(field.get(50, 50), 0.5);

        engine.set_mode(SculptMode::Lower);
        tick(&mut engine, &mut field, &mut undo);
        assert!((field.get(32, 32) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_each_tick_snapshots_footprint_with_apron() {
        let mut field = field(0.5);
        let mut undo = UndoManager::new(10);
        let mut engine = engine(SculptMode::Raise);
        let outcome = tick(&mut engine, &mut field, &mut undo);
        tick(&mut engine, &mut field, &mut undo);
        assert_eq!(undo.undo_count(), 2);
        assert_eq!(undo.peek_undo(), Some("sculpt raise"));

        let StrokeOutcome::Applied { region, .. } = outcome else {
            panic!("expected an applied stroke");
        };
        // radius 8 samples, plus one apron sample on each side
        assert_eq!(region, GridRegion::new(23, 23, 19, 19));
    }

    #[test]
    fn test_raise_clamps_at_one() {
        let mut field = field(0.999);
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Raise);
        for _ in 0..10 {
            engine.stroke(Some(&mut field), &mut undo, center(), Vec2::ZERO, 1.0);
        }
        assert!(field.as_slice().iter().all(|h| (0.0..=1.0).contains(h)));
        assert_eq!(field.get(32, 32), 1.0);
    }

    #[test]
    fn test_smooth_flat_ground_unchanged() {
        let mut field = field(0.4);
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Smooth);
        for _ in 0..5 {
            tick(&mut engine, &mut field, &mut undo);
        }
        assert!(field.as_slice().iter().all(|&h| (h - 0.4).abs() < 1e-6));
    }

    #[test]
    fn test_smooth_reduces_spike() {
        let mut field = field(0.2);
        field.set_region(&GridRegion::new(32, 32, 1, 1), &[0.8]);
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Smooth);
        tick(&mut engine, &mut field, &mut undo);
        assert!(field.get(32, 32) < 0.8);
        assert!(field.get(33, 32) > 0.2);
    }

    #[test]
    fn test_flatten_toward_stroke_start_height() {
        let mut field = field(0.2);
        field.set_region(&GridRegion::new(32, 32, 1, 1), &[0.6]);
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Flatten);
        for _ in 0..20 {
            tick(&mut engine, &mut field, &mut undo);
        }
        // target captured at the spike, the surroundings rise toward it
        assert!(field.get(33, 32) > 0.2);
        assert!(field.get(33, 32) <= 0.6);
    }

    #[test]
    fn test_flatten_absolute_target() {
        let mut field = field(0.9);
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Flatten);
        engine.set_flatten_target(FlattenTarget::Absolute(15.0));
        for _ in 0..50 {
            tick(&mut engine, &mut field, &mut undo);
        }
        assert!((field.get(32, 32) - 0.5).abs() < 1e-3);
        assert!(field.as_slice().iter().all(|&h| h >= 0.5 - 1e-6));
    }

    #[test]
    fn test_noise_perturbs_within_scale() {
        let mut field = field(0.5);
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Noise);
        tick(&mut engine, &mut field, &mut undo);
        let scale = SculptConfig::default().noise_scale;
        assert!(field.as_slice().iter().all(|&h| (h - 0.5).abs() <= scale * 0.5 + 1e-6));
    }

    #[test]
    fn test_plateau_approach_is_slower_from_above() {
        let plateau = SculptConfig::default().plateau_height;
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Plateau);

        let mut below = field(plateau - 0.2);
        tick(&mut engine, &mut below, &mut undo);
        let mut above = field(plateau + 0.2);
        tick(&mut engine, &mut above, &mut undo);

        let rise = below.get(32, 32) - (plateau - 0.2);
        let fall = (plateau + 0.2) - above.get(32, 32);
        assert!(rise > 0.0 && fall > 0.0);
        assert!((fall - rise * 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_canyon_is_deepest_at_center() {
        let mut field = field(0.8);
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Canyon);
        engine.brush.falloff = FalloffCurve::Constant;
        tick(&mut engine, &mut field, &mut undo);
        let center = field.get(32, 32);
        let mid = field.get(36, 32);
        assert!(center < mid);
        assert!(mid < 0.8);
        assert!(center >= SculptConfig::default().canyon_depth);
    }

    #[test]
    fn test_ridge_follows_rotation() {
        let mut field = field(0.3);
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Ridge);
        engine.brush.falloff = FalloffCurve::Constant;
        // rotation 0 runs the ridge along +x
        tick(&mut engine, &mut field, &mut undo);
        let along = field.get(37, 32);
        let across = field.get(32, 37);
        assert!(along > across);
        assert!(across > 0.3);
    }

    #[test]
    fn test_cliff_splits_sides() {
        let mut field = field(0.5);
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Cliff);
        engine.brush.falloff = FalloffCurve::Constant;
        engine.brush.set_rotation(90.0);
        tick(&mut engine, &mut field, &mut undo);
        // rotation 90 points along +z
        assert!(field.get(32, 36) > 0.5);
        assert!(field.get(32, 28) < 0.5);
    }

    #[test]
    fn test_stamps_raise_and_lower() {
        let mut undo = UndoManager::new(4);
        let mut mountain = field(0.5);
        let mut engine = engine(SculptMode::MountainStamp);
        engine.activate(Some(&mountain));
        assert!(engine.stamps().is_some());
        // the mountain stamp peaks in the middle of its 64-sample tile
        engine.stroke(Some(&mut mountain), &mut undo, center(), Vec2::ZERO, 1.0);
        assert!(mountain.get(32, 32) > 0.5);

        let mut valley = field(0.5);
        engine.set_mode(SculptMode::ValleyStamp);
        engine.stroke(Some(&mut valley), &mut undo, center(), Vec2::ZERO, 1.0);
        assert!(valley.get(32, 32) < 0.5);

        let mut ridge = field(0.5);
        engine.set_mode(SculptMode::RidgeStamp);
        engine.stroke(Some(&mut ridge), &mut undo, center(), Vec2::ZERO, 1.0);
        assert!(ridge.get(32, 32) > 0.5);
    }

    #[test]
    fn test_erosion_moves_material_downhill() {
        let mapping = GridMapping::new(Vec3::ZERO, Vec3::new(64.0, 30.0, 64.0), 64);
        let slope = (0..64 * 64).map(|i| (i % 64) as f32 / 64.0).collect();
        let mut field = HeightField::from_flat(mapping, slope).unwrap();
        let before: f32 = field.as_slice().iter().sum();
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Erosion);
        engine.activate(Some(&field));
        engine.brush.set_size(4.0);
        engine.stroke(Some(&mut field), &mut undo, center(), Vec2::ZERO, DT);

        let after: f32 = field.as_slice().iter().sum();
        assert!(after < before);
        assert!(engine.erosion_maps().total_eroded() > 0.0);
        assert!(engine.erosion_maps().total_deposited() > 0.0);
    }

    #[test]
    fn test_drag_sculpt_pulls_toward_target() {
        let mut field = field(0.5);
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::DragSculpt);
        engine.drag_mut().large_scale = true;
        assert!(engine.begin_stroke(Some(&field), center()));
        assert!(engine.drag().is_dragging());
        // dragging the pointer up raises the target
        for _ in 0..30 {
            engine.stroke(Some(&mut field), &mut undo, center(), Vec2::new(0.0, -200.0), DT);
        }
        assert!(field.get(32, 32) > 0.5);
        // large-scale mode reaches far beyond the 8-sample brush
        assert!(field.get(32, 50) > 0.5);
        engine.end_stroke();
        assert!(!engine.drag().is_dragging());
    }

    #[test]
    fn test_radius_gating_circle() {
        let mut field = field(0.5);
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Raise);
        engine.brush.falloff = FalloffCurve::Constant;
        tick(&mut engine, &mut field, &mut undo);
        for z in 0..64 {
            for x in 0..64 {
                let dx = x as f32 - 32.0;
                let dz = z as f32 - 32.0;
                if (dx * dx + dz * dz).sqrt() > 8.0 {
                    assert_eq!(field.get(x, z), 0.5, "sample ({x}, {z}) changed");
                }
            }
        }
    }

    #[test]
    fn test_square_brush_reaches_corners() {
        let mut field = field(0.5);
        let mut undo = UndoManager::new(4);
        let mut engine = engine(SculptMode::Raise);
        engine.brush.set_shape(BrushShape::Square);
        tick(&mut engine, &mut field, &mut undo);
        assert!((field.get(40, 40) - field.get(32, 32)).abs() < 1e-6);
        assert_eq!(field.get(41, 41), 0.5);
    }

    #[test]
    fn test_mode_switch_ends_stroke() {
        let field = field(0.5);
        let mut engine = engine(SculptMode::Raise);
        engine.begin_stroke(Some(&field), center());
        assert!(engine.is_stroking());
        engine.set_mode(SculptMode::Smooth);
        assert!(!engine.is_stroking());
        assert_eq!(engine.mode().to_string(), "smooth");
    }
}
