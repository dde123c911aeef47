//! Editor tools and the input contract they consume.
//!
//! The host polls its input devices and hands the result over as an
//! [`InputState`]; tools never talk to an input API directly.

use std::fmt;

use glam::{Vec2, Vec3};

use crate::brush::Brush;
use crate::config::SculptConfig;
use crate::notify::NotificationSink;
use crate::paint::TexturePainter;
use crate::sculpt::{SculptEngine, StrokeOutcome};
use crate::terrain::Terrain;
use crate::undo::UndoManager;

/// Held inputs a tool cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Apply the tool while held
    Primary,
    /// Suppresses the tool so the host can use the pointer for something else
    Bypass,
}

pub trait InputState {
    fn is_action_held(&self, action: InputAction) -> bool;
    /// Terrain surface point under the pointer, if any.
    fn pointer_world_position(&self) -> Option<Vec3>;
    /// Screen-space pointer movement this tick, y down.
    fn pointer_delta(&self) -> Vec2;
    /// Scroll steps this tick, positive away from the user.
    fn scroll_delta(&self) -> f32;
}

/// Input as plain values, captured once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub primary: bool,
    pub bypass: bool,
    pub pointer: Option<Vec3>,
    pub pointer_delta: Vec2,
    pub scroll: f32,
}

impl InputSnapshot {
    /// Primary held with the pointer over `world`.
    pub fn pressed_at(world: Vec3) -> Self {
        Self {
            primary: true,
            pointer: Some(world),
            ..Self::default()
        }
    }
}

impl InputState for InputSnapshot {
    fn is_action_held(&self, action: InputAction) -> bool {
        match action {
            InputAction::Primary => self.primary,
            InputAction::Bypass => self.bypass,
        }
    }

    fn pointer_world_position(&self) -> Option<Vec3> {
        self.pointer
    }

    fn pointer_delta(&self) -> Vec2 {
        self.pointer_delta
    }

    fn scroll_delta(&self) -> f32 {
        self.scroll
    }
}

/// What a tool may touch during one tick.
pub struct ToolContext<'a> {
    pub terrain: Option<&'a mut Terrain>,
    pub undo: &'a mut UndoManager,
    pub notify: &'a mut dyn NotificationSink,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum ToolKind {
    #[default]
    Sculpt,
    Paint,
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolKind::Sculpt => f.write_str("sculpt"),
            ToolKind::Paint => f.write_str("paint"),
        }
    }
}

pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn activate(&mut self, terrain: Option<&Terrain>);

    /// Ends any stroke in progress.
    fn deactivate(&mut self);

    /// Advance one frame. Returns `None` when the tool did not try to edit.
    fn tick(
        &mut self,
        ctx: &mut ToolContext<'_>,
        input: &dyn InputState,
        dt: f32,
    ) -> Option<StrokeOutcome>;

    fn brush(&self) -> &Brush;

    fn brush_mut(&mut self) -> &mut Brush;
}

/// World point to edit this tick: primary held, bypass not held, pointer on terrain.
fn stroke_target(input: &dyn InputState) -> Option<Vec3> {
    if input.is_action_held(InputAction::Primary) && !input.is_action_held(InputAction::Bypass) {
        input.pointer_world_position()
    } else {
        None
    }
}

fn apply_scroll(brush: &mut Brush, input: &dyn InputState, step: f32) {
    let scroll = input.scroll_delta();
    if scroll != 0.0 {
        brush.scale_size(step.powf(scroll));
    }
}

/// Warns once per held stroke rather than every frame.
fn report_no_target(warned: &mut bool, notify: &mut dyn NotificationSink) {
    if !*warned {
        notify.warn("no terrain to edit");
        *warned = true;
    }
}

#[derive(Debug)]
pub struct SculptTool {
    pub engine: SculptEngine,
    scroll_step: f32,
    warned: bool,
}

impl SculptTool {
    pub fn new(config: &SculptConfig) -> Self {
        Self {
            engine: SculptEngine::new(config.clone()),
            scroll_step: config.brush_scroll_step,
            warned: false,
        }
    }
}

impl Tool for SculptTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Sculpt
    }

    fn activate(&mut self, terrain: Option<&Terrain>) {
        self.engine.activate(terrain.map(|t| &t.heights));
    }

    fn deactivate(&mut self) {
        self.engine.deactivate();
        self.warned = false;
    }

    fn tick(
        &mut self,
        ctx: &mut ToolContext<'_>,
        input: &dyn InputState,
        dt: f32,
    ) -> Option<StrokeOutcome> {
        apply_scroll(&mut self.engine.brush, input, self.scroll_step);
        let Some(world) = stroke_target(input) else {
            self.engine.end_stroke();
            self.warned = false;
            return None;
        };

        let heights = ctx.terrain.as_deref_mut().map(|t| &mut t.heights);
        let outcome = self
            .engine
            .stroke(heights, ctx.undo, world, input.pointer_delta(), dt);
        if outcome == StrokeOutcome::NoTarget {
            report_no_target(&mut self.warned, ctx.notify);
        }
        Some(outcome)
    }

    fn brush(&self) -> &Brush {
        &self.engine.brush
    }

    fn brush_mut(&mut self) -> &mut Brush {
        &mut self.engine.brush
    }
}

#[derive(Debug)]
pub struct PaintTool {
    pub painter: TexturePainter,
    scroll_step: f32,
    warned: bool,
}

impl PaintTool {
    pub fn new(config: &SculptConfig) -> Self {
        Self {
            painter: TexturePainter::new(config),
            scroll_step: config.brush_scroll_step,
            warned: false,
        }
    }
}

impl Tool for PaintTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Paint
    }

    fn activate(&mut self, _terrain: Option<&Terrain>) {
        self.warned = false;
    }

    fn deactivate(&mut self) {
        self.warned = false;
    }

    fn tick(
        &mut self,
        ctx: &mut ToolContext<'_>,
        input: &dyn InputState,
        dt: f32,
    ) -> Option<StrokeOutcome> {
        apply_scroll(&mut self.painter.brush, input, self.scroll_step);
        let Some(world) = stroke_target(input) else {
            self.warned = false;
            return None;
        };

        let blend = ctx.terrain.as_deref_mut().map(|t| &mut t.blend);
        match self.painter.stroke(blend, ctx.undo, world, dt) {
            Ok(StrokeOutcome::NoTarget) => {
                report_no_target(&mut self.warned, ctx.notify);
                Some(StrokeOutcome::NoTarget)
            }
            Ok(outcome) => Some(outcome),
            Err(err) => {
                if !self.warned {
                    ctx.notify.warn(&err.to_string());
                    self.warned = true;
                }
                None
            }
        }
    }

    fn brush(&self) -> &Brush {
        &self.painter.brush
    }

    fn brush_mut(&mut self) -> &mut Brush {
        &mut self.painter.brush
    }
}

/// Owns one instance of every tool and routes ticks to the active one.
#[derive(Debug)]
pub struct ToolController {
    sculpt: SculptTool,
    paint: PaintTool,
    active: ToolKind,
}

impl ToolController {
    pub fn new(config: &SculptConfig) -> Self {
        Self {
            sculpt: SculptTool::new(config),
            paint: PaintTool::new(config),
            active: ToolKind::default(),
        }
    }

    pub fn active_kind(&self) -> ToolKind {
        self.active
    }

    pub fn get(&self, kind: ToolKind) -> &dyn Tool {
        match kind {
            ToolKind::Sculpt => &self.sculpt,
            ToolKind::Paint => &self.paint,
        }
    }

    pub fn get_mut(&mut self, kind: ToolKind) -> &mut dyn Tool {
        match kind {
            ToolKind::Sculpt => &mut self.sculpt,
            ToolKind::Paint => &mut self.paint,
        }
    }

    pub fn active(&self) -> &dyn Tool {
        self.get(self.active)
    }

    pub fn active_mut(&mut self) -> &mut dyn Tool {
        self.get_mut(self.active)
    }

    pub fn sculpt(&self) -> &SculptTool {
        &self.sculpt
    }

    pub fn sculpt_mut(&mut self) -> &mut SculptTool {
        &mut self.sculpt
    }

    pub fn paint(&self) -> &PaintTool {
        &self.paint
    }

    pub fn paint_mut(&mut self) -> &mut PaintTool {
        &mut self.paint
    }

    /// Deactivate the current tool and activate `kind`.
    pub fn select(&mut self, kind: ToolKind, terrain: Option<&Terrain>) {
        self.active_mut().deactivate();
        self.active = kind;
        self.active_mut().activate(terrain);
        tracing::info!(tool = %kind, "tool selected");
    }

    pub fn tick(
        &mut self,
        ctx: &mut ToolContext<'_>,
        input: &dyn InputState,
        dt: f32,
    ) -> Option<StrokeOutcome> {
        self.active_mut().tick(ctx, input, dt)
    }
}
