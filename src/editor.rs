//! Editing session: owns the terrain, history and tools, and routes input to them.

use crate::brush::{BrushShape, FalloffCurve};
use crate::config::{SculptConfig, TerrainSettings};
use crate::notify::{NotificationSink, TracingNotifier};
use crate::paint::PaintMode;
use crate::sculpt::{FlattenTarget, SculptMode, StrokeOutcome};
use crate::terrain::Terrain;
use crate::tool::{InputState, ToolContext, ToolController, ToolKind};
use crate::undo::UndoManager;

/// Discrete user commands (hotkeys, toolbar buttons).
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    SelectTool(ToolKind),
    SelectSculptMode(SculptMode),
    SelectPaintMode(PaintMode),
    /// Multiply the active brush size by the scroll step this many times
    ResizeBrush(f32),
    /// Strength steps, negative to weaken
    AdjustStrength(i32),
    /// Rotation steps, negative for counter-clockwise
    RotateBrush(i32),
    SetShape(BrushShape),
    CycleShape,
    SetFalloff(FalloffCurve),
    SetFlattenTarget(FlattenTarget),
    ToggleDragInvert,
    ToggleLargeScale,
    SelectLayer(usize),
    AddLayer(String),
    RemoveLayer(usize),
    Undo,
    Redo,
    NewTerrain(TerrainSettings),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventResponse {
    /// Consumed by the editor
    Handled,
    /// Not applicable right now; the host may use it
    Pass,
}

pub struct TerrainEditor<N: NotificationSink = TracingNotifier> {
    config: SculptConfig,
    terrain: Option<Terrain>,
    undo: UndoManager,
    tools: ToolController,
    notifier: N,
}

impl TerrainEditor<TracingNotifier> {
    pub fn new(config: SculptConfig) -> Self {
        Self::with_notifier(config, TracingNotifier)
    }
}

impl<N: NotificationSink> TerrainEditor<N> {
    pub fn with_notifier(config: SculptConfig, notifier: N) -> Self {
        let mut tools = ToolController::new(&config);
        tools.active_mut().activate(None);
        Self {
            undo: UndoManager::new(config.undo_capacity),
            tools,
            terrain: None,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &SculptConfig {
        &self.config
    }

    pub fn terrain(&self) -> Option<&Terrain> {
        self.terrain.as_ref()
    }

    pub fn terrain_mut(&mut self) -> Option<&mut Terrain> {
        self.terrain.as_mut()
    }

    /// Replace the edited terrain wholesale. History of the old terrain is dropped.
    pub fn set_terrain(&mut self, mut terrain: Option<Terrain>) {
        self.undo.clear();
        if let Some(terrain) = terrain.as_mut() {
            terrain.blend.set_normalize_epsilon(self.config.normalize_epsilon);
        }
        self.terrain = terrain;
        self.tools.active_mut().deactivate();
        self.tools.active_mut().activate(self.terrain.as_ref());
    }

    pub fn undo_manager(&self) -> &UndoManager {
        &self.undo
    }

    pub fn tools(&self) -> &ToolController {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolController {
        &mut self.tools
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Advance the active tool by one frame.
    pub fn tick(&mut self, input: &dyn InputState, dt: f32) -> Option<StrokeOutcome> {
        let mut ctx = ToolContext {
            terrain: self.terrain.as_mut(),
            undo: &mut self.undo,
            notify: &mut self.notifier,
        };
        self.tools.tick(&mut ctx, input, dt)
    }

    pub fn undo(&mut self) -> bool {
        let Some(terrain) = self.terrain.as_mut() else {
            self.notifier.warn("no terrain to undo on");
            return false;
        };
        match self.undo.undo(terrain) {
            Some(description) => {
                tracing::info!(%description, "undo");
                self.notifier.info(&format!("undo: {description}"));
                true
            }
            None => {
                self.notifier.warn("nothing to undo");
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        let Some(terrain) = self.terrain.as_mut() else {
            self.notifier.warn("no terrain to redo on");
            return false;
        };
        match self.undo.redo(terrain) {
            Some(description) => {
                tracing::info!(%description, "redo");
                self.notifier.info(&format!("redo: {description}"));
                true
            }
            None => {
                self.notifier.warn("nothing to redo");
                false
            }
        }
    }

    pub fn handle_event(&mut self, event: EditorEvent) -> EventResponse {
        match event {
            EditorEvent::SelectTool(kind) => {
                if kind != self.tools.active_kind() {
                    self.tools.select(kind, self.terrain.as_ref());
                    self.notifier.info(&format!("tool: {kind}"));
                }
            }
            EditorEvent::SelectSculptMode(mode) => {
                if self.tools.active_kind() != ToolKind::Sculpt {
                    self.tools.select(ToolKind::Sculpt, self.terrain.as_ref());
                }
                self.tools.sculpt_mut().engine.set_mode(mode);
                self.notifier.info(&format!("sculpt mode: {mode}"));
            }
            EditorEvent::SelectPaintMode(mode) => {
                if self.tools.active_kind() != ToolKind::Paint {
                    self.tools.select(ToolKind::Paint, self.terrain.as_ref());
                }
                self.tools.paint_mut().painter.set_mode(mode);
                self.notifier.info(&format!("paint mode: {mode}"));
            }

            EditorEvent::ResizeBrush(steps) => {
                let factor = self.config.brush_scroll_step.powf(steps);
                self.tools.active_mut().brush_mut().scale_size(factor);
            }
            EditorEvent::AdjustStrength(steps) => {
                let delta = self.config.strength_step * steps as f32;
                self.tools.active_mut().brush_mut().adjust_strength(delta);
            }
            EditorEvent::RotateBrush(steps) => {
                let delta = self.config.rotation_step * steps as f32;
                self.tools.active_mut().brush_mut().rotate(delta);
            }
            EditorEvent::SetShape(shape) => self.tools.active_mut().brush_mut().set_shape(shape),
            EditorEvent::CycleShape => self.tools.active_mut().brush_mut().cycle_shape(),
            EditorEvent::SetFalloff(curve) => self.tools.active_mut().brush_mut().falloff = curve,

            EditorEvent::SetFlattenTarget(target) => {
                self.tools.sculpt_mut().engine.set_flatten_target(target);
            }
            EditorEvent::ToggleDragInvert => {
                let drag = self.tools.sculpt_mut().engine.drag_mut();
                drag.inverted = !drag.inverted;
                let state = if drag.inverted { "inverted" } else { "normal" };
                self.notifier.info(&format!("drag direction: {state}"));
            }
            EditorEvent::ToggleLargeScale => {
                let drag = self.tools.sculpt_mut().engine.drag_mut();
                drag.large_scale = !drag.large_scale;
                let state = if drag.large_scale { "on" } else { "off" };
                self.notifier.info(&format!("large-scale drag: {state}"));
            }

            EditorEvent::SelectLayer(layer) => {
                self.tools.paint_mut().painter.select_layer(layer);
            }
            EditorEvent::AddLayer(name) => {
                let Some(terrain) = self.terrain.as_mut() else {
                    self.notifier.warn("no terrain to add a layer to");
                    return EventResponse::Pass;
                };
                let index = terrain.blend.add_layer(&name);
                self.notifier.info(&format!("added layer {index}: {name}"));
            }
            EditorEvent::RemoveLayer(index) => {
                let Some(terrain) = self.terrain.as_mut() else {
                    self.notifier.warn("no terrain to remove a layer from");
                    return EventResponse::Pass;
                };
                match terrain.blend.remove_layer(index) {
                    Ok(layer) => self.notifier.info(&format!("removed layer {}", layer.name)),
                    Err(err) => self.notifier.warn(&err.to_string()),
                }
            }

            EditorEvent::Undo => {
                self.undo();
            }
            EditorEvent::Redo => {
                self.redo();
            }
            EditorEvent::NewTerrain(settings) => match Terrain::new(&settings) {
                Ok(terrain) => {
                    self.set_terrain(Some(terrain));
                    self.notifier.info("created terrain");
                }
                Err(err) => self.notifier.warn(&format!("cannot create terrain: {err}")),
            },
        }
        EventResponse::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridRegion;
    use crate::notify::{NoticeLevel, NoticeLog};
    use crate::tool::InputSnapshot;
    use glam::Vec3;

    fn editor() -> TerrainEditor<NoticeLog> {
        let mut editor = TerrainEditor::with_notifier(SculptConfig::default(), NoticeLog::default());
        let settings = TerrainSettings {
            resolution: 32,
            blend_resolution: 32,
            size: [32.0, 10.0, 32.0],
            initial_height: 0.5,
            ..TerrainSettings::default()
        };
        assert_eq!(
            editor.handle_event(EditorEvent::NewTerrain(settings)),
            EventResponse::Handled
        );
        editor
    }

    fn press(editor: &mut TerrainEditor<NoticeLog>) {
        let input = InputSnapshot::pressed_at(Vec3::new(16.0, 0.0, 16.0));
        editor.tick(&input, 0.1);
        editor.tick(&InputSnapshot::default(), 0.1);
    }

    #[test]
    fn test_undo_redo_events() {
        let mut editor = editor();
        press(&mut editor);
        let raised = editor.terrain().unwrap().heights.get(16, 16);
        assert!(raised > 0.5);

        editor.handle_event(EditorEvent::Undo);
        assert_eq!(editor.terrain().unwrap().heights.get(16, 16), 0.5);
        editor.handle_event(EditorEvent::Redo);
        assert_eq!(editor.terrain().unwrap().heights.get(16, 16), raised);
        assert_eq!(
            editor.notifier().last(),
            Some(&(NoticeLevel::Info, "redo: sculpt raise".to_string()))
        );
    }

    #[test]
    fn test_empty_history_notifies() {
        let mut editor = editor();
        assert!(!editor.undo());
        assert!(!editor.redo());
        let warnings: Vec<_> = editor.notifier().warnings().collect();
        assert_eq!(warnings, vec!["nothing to undo", "nothing to redo"]);
    }

    #[test]
    fn test_new_terrain_clears_history() {
        let mut editor = editor();
        press(&mut editor);
        assert!(editor.undo_manager().can_undo());
        editor.handle_event(EditorEvent::NewTerrain(TerrainSettings {
            resolution: 16,
            blend_resolution: 16,
            ..TerrainSettings::default()
        }));
        assert!(!editor.undo_manager().can_undo());
        assert_eq!(editor.terrain().unwrap().heights.resolution(), 16);

        editor.handle_event(EditorEvent::NewTerrain(TerrainSettings {
            resolution: 1,
            ..TerrainSettings::default()
        }));
        assert!(editor.notifier().last().unwrap().1.starts_with("cannot create terrain"));
        assert_eq!(editor.terrain().unwrap().heights.resolution(), 16);
    }

    #[test]
    fn test_configured_epsilon_reaches_blend_field() {
        let config = SculptConfig {
            normalize_epsilon: 0.5,
            ..SculptConfig::default()
        };
        let mut strict = TerrainEditor::with_notifier(config, NoticeLog::default());
        let mut loose = editor();
        let settings = TerrainSettings {
            resolution: 8,
            blend_resolution: 8,
            size: [8.0, 10.0, 8.0],
            ..TerrainSettings::default()
        };
        strict.handle_event(EditorEvent::NewTerrain(settings.clone()));
        loose.handle_event(EditorEvent::NewTerrain(settings));

        let region = GridRegion::new(2, 2, 1, 1);
        for terrain in [&mut strict.terrain, &mut loose.terrain] {
            let blend = &mut terrain.as_mut().unwrap().blend;
            blend.add_layer("rock");
            blend.set_region(&region, &[vec![0.1], vec![0.1]]);
            blend.paint_sample(2, 2, 1, 0.0).unwrap();
        }

        let strict_blend = &strict.terrain().unwrap().blend;
        assert_eq!(strict_blend.normalize_epsilon(), 0.5);
        assert_eq!(strict_blend.weights_at(2, 2), vec![0.1, 0.1]);
        let loose_weights = loose.terrain().unwrap().blend.weights_at(2, 2);
        assert!((loose_weights[0] - 0.5).abs() < 1e-6);
        assert!((loose_weights[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_mode_events_switch_tools() {
        let mut editor = editor();
        editor.handle_event(EditorEvent::SelectPaintMode(PaintMode::Erase));
        assert_eq!(editor.tools().active_kind(), ToolKind::Paint);
        assert_eq!(editor.tools().paint().painter.mode(), PaintMode::Erase);

        editor.handle_event(EditorEvent::SelectSculptMode(SculptMode::Canyon));
        assert_eq!(editor.tools().active_kind(), ToolKind::Sculpt);
        assert_eq!(editor.tools().sculpt().engine.mode(), SculptMode::Canyon);
        assert_eq!(
            editor.notifier().last(),
            Some(&(NoticeLevel::Info, "sculpt mode: canyon".to_string()))
        );
    }

    #[test]
    fn test_brush_adjust_events() {
        let mut editor = editor();
        let config = SculptConfig::default();
        let size = editor.tools().active().brush().size;
        let strength = editor.tools().active().brush().strength;

        editor.handle_event(EditorEvent::ResizeBrush(-1.0));
        editor.handle_event(EditorEvent::AdjustStrength(2));
        editor.handle_event(EditorEvent::RotateBrush(-1));
        editor.handle_event(EditorEvent::CycleShape);

        let brush = editor.tools().active().brush();
        assert!((brush.size - size / config.brush_scroll_step).abs() < 1e-4);
        assert!((brush.strength - (strength + 2.0 * config.strength_step)).abs() < 1e-5);
        assert!((brush.rotation - (360.0 - config.rotation_step)).abs() < 1e-4);
        assert_eq!(brush.shape, BrushShape::Square);
    }

    #[test]
    fn test_drag_toggles() {
        let mut editor = editor();
        editor.handle_event(EditorEvent::ToggleDragInvert);
        editor.handle_event(EditorEvent::ToggleLargeScale);
        let drag = editor.tools().sculpt().engine.drag();
        assert!(drag.inverted);
        assert!(drag.large_scale);
        editor.handle_event(EditorEvent::ToggleDragInvert);
        assert!(!editor.tools().sculpt().engine.drag().inverted);
    }

    #[test]
    fn test_layer_events() {
        let mut editor = editor();
        editor.handle_event(EditorEvent::AddLayer("rock".to_string()));
        editor.handle_event(EditorEvent::SelectLayer(1));
        editor.handle_event(EditorEvent::SelectTool(ToolKind::Paint));
        press(&mut editor);
        assert!(editor.terrain().unwrap().blend.weight(1, 16, 16) > 0.0);

        editor.handle_event(EditorEvent::RemoveLayer(1));
        assert_eq!(editor.terrain().unwrap().blend.layer_count(), 1);
        editor.handle_event(EditorEvent::RemoveLayer(0));
        assert_eq!(
            editor.notifier().last(),
            Some(&(NoticeLevel::Warning, "cannot remove the last blend layer".to_string()))
        );
    }

    #[test]
    fn test_events_without_terrain() {
        let mut editor = TerrainEditor::with_notifier(SculptConfig::default(), NoticeLog::default());
        assert_eq!(
            editor.handle_event(EditorEvent::AddLayer("rock".to_string())),
            EventResponse::Pass
        );
        assert_eq!(
            editor.tick(&InputSnapshot::pressed_at(Vec3::ZERO), 0.1),
            Some(StrokeOutcome::NoTarget)
        );
        assert!(!editor.undo());
        assert_eq!(editor.notifier().warnings().count(), 3);
    }
}
