use tracing::{debug, info, warn};

use crate::config::PlacementConfig;
use crate::core::{Edges, Modifiers, Point, Rect};
use crate::cycle::{CycleController, CycleDirection};
use crate::present::{OverlayTimer, Presenter};
use crate::snap::{OverlayPreview, RegionManager};
use crate::window::cursors::CursorImage;
use crate::window::desktop::Desktop;
use crate::window::error::{ErrorTracker, PlacementError};
use crate::window::input_mode::{InputMode, InputModeController};
use crate::window::interactive::Grab;
use crate::window::output::{Output, OutputId};
use crate::window::seat::Seat;
use crate::window::view::{View, ViewId};

/// Keybind and pointer-binding actions understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(ViewId),
    /// Resize from the given edges, or from the edges nearest the cursor.
    Resize(ViewId, Option<Edges>),
    NextWindow,
    PreviousWindow,
    CycleConfirm,
    /// Escape: abort whatever mode is active.
    Cancel,
    MenuOpen,
    MenuClose,
}

#[derive(Debug, Clone)]
pub enum Event {
    PointerMotion { x: i32, y: i32 },
    ButtonPress { x: i32, y: i32 },
    ButtonRelease,
    ModifiersChanged(Modifiers),
    Action(Action),
    OverlayTimeout,
    /// Delivered before the view is dropped.
    ViewDestroyed(ViewId),
    OutputRemoved(OutputId),
    OutputUsableAreaChanged { output: OutputId, usable_area: Rect },
    OutputEnabled { output: OutputId, enabled: bool },
    ReloadConfig(Box<PlacementConfig>),
}

/// Owns every piece of placement state. All input reaches it through
/// [`WindowManager::handle_event`].
pub struct WindowManager<P: Presenter, T: OverlayTimer> {
    pub desktop: Desktop,
    pub seat: Seat,
    pub presenter: P,
    pub timer: T,
    pub error_tracker: ErrorTracker,
    pub(crate) config: PlacementConfig,
    pub(crate) modes: InputModeController,
    pub(crate) grab: Option<Grab>,
    pub(crate) overlay: OverlayPreview,
    pub(crate) regions: RegionManager,
    pub(crate) cycle: CycleController,
}

impl<P: Presenter, T: OverlayTimer> WindowManager<P, T> {
    /// An invalid `config` is replaced by the defaults.
    pub fn new(config: PlacementConfig, desktop: Desktop, presenter: P, timer: T) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("Invalid placement config ({}), using defaults", e);
                PlacementConfig::default()
            }
        };
        let mut regions = RegionManager::new();
        regions.rebuild_all(&desktop, &config.regions);
        info!(
            "Placement engine ready: {} outputs, {} regions",
            desktop.outputs().count(),
            regions.len()
        );
        Self {
            desktop,
            seat: Seat::new(),
            presenter,
            timer,
            error_tracker: ErrorTracker::new(),
            config,
            modes: InputModeController::new(),
            grab: None,
            overlay: OverlayPreview::new(),
            regions,
            cycle: CycleController::new(),
        }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn mode(&self) -> InputMode {
        self.modes.mode()
    }

    pub fn grab(&self) -> Option<&Grab> {
        self.grab.as_ref()
    }

    pub fn overlay(&self) -> &OverlayPreview {
        &self.overlay
    }

    pub fn regions(&self) -> &RegionManager {
        &self.regions
    }

    pub fn cycle(&self) -> &CycleController {
        &self.cycle
    }

    pub fn add_output(&mut self, output: Output) -> OutputId {
        let id = self.desktop.add_output(output);
        if let Some(output) = self.desktop.output(id) {
            self.regions.rebuild_output(id, output, &self.config.regions);
        }
        id
    }

    pub fn add_view(&mut self, view: View) -> ViewId {
        let id = self.desktop.add_view(view);
        debug!("Added view {} ({:?})", id, self.desktop.view(id).map(|v| v.current));
        id
    }

    /// Give keyboard focus to a view and raise it.
    pub fn focus_view(&mut self, view: ViewId) -> Result<(), PlacementError> {
        let target = self.desktop.view(view).ok_or(PlacementError::StaleView(view))?;
        if !target.focusable {
            return Err(PlacementError::StateRefused { view, requested: InputMode::Passthrough });
        }
        self.seat.keyboard_focus = Some(view);
        self.desktop.raise(view);
        info!("Focused view {} ('{}')", view, self.desktop.view(view).map_or("", |v| v.title.as_str()));
        Ok(())
    }

    pub fn menu_open(&mut self) -> Result<(), PlacementError> {
        self.modes.focus_override_begin(&mut self.seat, InputMode::Menu, CursorImage::Default)?;
        debug!("Window menu open");
        Ok(())
    }

    pub fn menu_close(&mut self) -> Result<(), PlacementError> {
        if self.modes.mode() != InputMode::Menu {
            return Err(PlacementError::InvalidTransition { current: self.modes.mode(), requested: InputMode::Passthrough });
        }
        self.modes.focus_override_end(&mut self.seat, true);
        Ok(())
    }

    /// Dispatch one input, timer or notification event. Returns whether
    /// anything visible changed.
    pub fn handle_event(&mut self, event: Event) -> bool {
        debug!("Received event: {:?}", event);
        match event {
            Event::PointerMotion { x, y } => {
                self.seat.cursor = Point::new(x, y);
                self.process_motion()
            }
            Event::ButtonPress { x, y } => {
                self.seat.cursor = Point::new(x, y);
                if self.modes.mode() == InputMode::Cycle {
                    self.cycle_click(self.seat.cursor)
                } else {
                    false
                }
            }
            Event::ButtonRelease => match self.grab.as_ref().map(|g| g.view) {
                Some(view) => {
                    self.finish(view);
                    true
                }
                None => false,
            },
            Event::ModifiersChanged(modifiers) => {
                self.seat.modifiers = modifiers;
                if self.modes.mode() == InputMode::Move {
                    self.update_overlay();
                    true
                } else {
                    false
                }
            }
            Event::Action(action) => self.handle_action(action),
            Event::OverlayTimeout => self.overlay.timer_fired(&mut self.presenter),
            Event::ViewDestroyed(view) => self.view_destroyed(view),
            Event::OutputRemoved(output) => self.output_removed(output),
            Event::OutputUsableAreaChanged { output, usable_area } => {
                let result = self.reconfigure_output(output, |o| o.usable_area = usable_area);
                self.error_tracker.absorb(result, "usable area change").is_some()
            }
            Event::OutputEnabled { output, enabled } => {
                let result = self.reconfigure_output(output, |o| o.enabled = enabled);
                self.error_tracker.absorb(result, "output enable").is_some()
            }
            Event::ReloadConfig(config) => {
                let result = self.reload_config(*config);
                self.error_tracker.absorb(result, "config reload").is_some()
            }
        }
    }

    fn handle_action(&mut self, action: Action) -> bool {
        let (operation, result) = match action {
            Action::Move(view) => ("move begin", self.begin_move(view)),
            Action::Resize(view, edges) => ("resize begin", self.begin_resize(view, edges)),
            Action::NextWindow | Action::PreviousWindow => {
                let direction = if action == Action::NextWindow {
                    CycleDirection::Forward
                } else {
                    CycleDirection::Backward
                };
                if self.modes.mode() == InputMode::Cycle {
                    ("cycle step", self.cycle_step(direction))
                } else {
                    ("cycle begin", self.cycle_begin(direction))
                }
            }
            Action::CycleConfirm => ("cycle finish", self.cycle_finish(true)),
            Action::MenuOpen => ("menu open", self.menu_open()),
            Action::MenuClose => ("menu close", self.menu_close()),
            Action::Cancel => match self.modes.mode() {
                InputMode::Move | InputMode::Resize => ("cancel", self.abort_grab()),
                InputMode::Cycle => ("cancel", self.cycle_finish(false)),
                InputMode::Menu => ("cancel", self.menu_close()),
                InputMode::Passthrough => return false,
            },
        };
        self.error_tracker.absorb(result, operation).is_some()
    }

    fn view_destroyed(&mut self, view: ViewId) -> bool {
        if !self.desktop.contains_view(view) {
            self.error_tracker.record("view destroy", &PlacementError::StaleView(view));
            return false;
        }
        self.modes.forget_view(view);
        self.seat.forget_view(view);
        if self.grab.as_ref().is_some_and(|g| g.view == view) {
            info!("Grabbed view {} destroyed, ending session", view);
            self.cancel(view);
        }
        if self.cycle.contains(view) {
            self.cycle_view_destroyed(view);
        }
        self.desktop.remove_view(view);
        true
    }

    fn output_removed(&mut self, output: OutputId) -> bool {
        if self.desktop.output(output).is_none() {
            self.error_tracker.record("output removal", &PlacementError::StaleOutput(output));
            return false;
        }
        if let Some(view) = self.grab.as_ref().filter(|g| g.output == Some(output)).map(|g| g.view) {
            info!("Active output {} removed, ending session", output);
            self.cancel(view);
        }
        self.overlay.hide(&mut self.presenter, &mut self.timer);
        self.regions.evacuate(&mut self.desktop, output);
        self.regions.remove_output(output);
        self.cycle_output_removed(output);
        self.desktop.remove_output(output);

        let orphans: Vec<ViewId> = self.desktop.views().filter(|(_, v)| v.output.is_none()).map(|(id, _)| id).collect();
        for view in orphans {
            self.desktop.discover_output(view);
        }
        self.arrange_evacuated();
        self.update_overlay();
        true
    }

    fn reconfigure_output(&mut self, output: OutputId, change: impl FnOnce(&mut Output)) -> Result<(), PlacementError> {
        let target = self.desktop.output_mut(output).ok_or(PlacementError::StaleOutput(output))?;
        change(target);
        let snapshot = target.clone();
        debug!("Output {} reconfigured: usable={:?} usable_state={}", snapshot.name, snapshot.usable_area, snapshot.is_usable());

        if !snapshot.is_usable() {
            if let Some(view) = self.grab.as_ref().filter(|g| g.output == Some(output)).map(|g| g.view) {
                info!("Active output {} became unusable, ending session", snapshot.name);
                self.cancel(view);
            }
        }

        self.overlay.hide(&mut self.presenter, &mut self.timer);
        self.regions.evacuate(&mut self.desktop, output);
        self.regions.rebuild_output(output, &snapshot, &self.config.regions);
        self.arrange_evacuated();
        self.cycle_outputs_changed();
        self.update_overlay();
        Ok(())
    }

    fn arrange_evacuated(&mut self) {
        for (view, geometry) in self.regions.arrange(&mut self.desktop) {
            self.presenter.configure_view(view, geometry);
        }
    }

    /// Swap in a new configuration. Running sessions end first. An invalid
    /// configuration is rejected and the current one stays in effect.
    pub fn reload_config(&mut self, config: PlacementConfig) -> Result<(), PlacementError> {
        if let Err(e) = config.validate() {
            warn!("Keeping current placement config: {}", e);
            return Err(PlacementError::InvalidConfig(e.to_string()));
        }
        if let Some(view) = self.grab.as_ref().map(|g| g.view) {
            self.cancel(view);
        }
        if self.cycle.is_active() {
            if let Err(e) = self.cycle_finish(false) {
                warn!("Failed to end cycling before reload: {}", e);
            }
        }

        self.config = config;
        let outputs: Vec<OutputId> = self.desktop.outputs().map(|(id, _)| id).collect();
        for output in outputs {
            self.regions.evacuate(&mut self.desktop, output);
        }
        self.regions.rebuild_all(&self.desktop, &self.config.regions);
        self.arrange_evacuated();
        info!("Placement config reloaded ({} regions)", self.regions.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegionConfig;
    use crate::present::{ManualTimer, PresentCall, RecordingPresenter};
    use crate::window::view::PlacementState;

    fn manager() -> WindowManager<RecordingPresenter, ManualTimer> {
        let mut config = PlacementConfig::default();
        config.regions = vec![RegionConfig::new("left", 0, 0, 50, 100), RegionConfig::new("right", 50, 0, 50, 100)];
        let mut wm = WindowManager::new(config, Desktop::new(), RecordingPresenter::new(), ManualTimer::new());
        wm.add_output(Output::new("DP-1", Rect::new(0, 0, 1000, 800)));
        wm
    }

    #[test]
    fn test_menu_blocks_grabs() {
        let mut wm = manager();
        let view = wm.add_view(View::new("term", Rect::new(100, 100, 300, 200)));
        assert!(wm.handle_event(Event::Action(Action::MenuOpen)));
        assert_eq!(wm.mode(), InputMode::Menu);
        assert!(!wm.handle_event(Event::Action(Action::Move(view))));
        assert!(wm.grab().is_none());
        assert!(wm.handle_event(Event::Action(Action::Cancel)));
        assert_eq!(wm.mode(), InputMode::Passthrough);
        assert_eq!(wm.error_tracker.health_check().precondition_violations, 1);
    }

    #[test]
    fn test_destroy_unknown_view_is_stale() {
        let mut wm = manager();
        let view = wm.add_view(View::new("term", Rect::new(100, 100, 300, 200)));
        assert!(wm.handle_event(Event::ViewDestroyed(view)));
        assert!(!wm.handle_event(Event::ViewDestroyed(view)));
        assert_eq!(wm.error_tracker.health_check().stale_references, 1);
    }

    #[test]
    fn test_usable_area_change_rematches_regions() {
        let mut wm = manager();
        let output = wm.desktop.output_by_name("DP-1").unwrap();
        let right = wm.regions().find_by_name(output, "right").unwrap();
        let view = wm.add_view(
            View::new("term", Rect::new(500, 0, 500, 800)).with_placement(PlacementState::Region { region: right }),
        );

        assert!(wm.handle_event(Event::OutputUsableAreaChanged { output, usable_area: Rect::new(0, 40, 1000, 760) }));
        let placed = wm.desktop.view(view).unwrap();
        assert_eq!(placed.current, Rect::new(500, 40, 500, 760));
        let PlacementState::Region { region } = placed.placement else {
            panic!("view should be back in a region");
        };
        assert_eq!(wm.regions().get(region).unwrap().name, "right");
        assert!(wm.presenter.calls.contains(&PresentCall::ConfigureView(view, Rect::new(500, 40, 500, 760))));
    }

    #[test]
    fn test_disabled_output_drops_regions() {
        let mut wm = manager();
        let output = wm.desktop.output_by_name("DP-1").unwrap();
        let left = wm.regions().find_by_name(output, "left").unwrap();
        let view = wm.add_view(
            View::new("term", Rect::new(0, 0, 500, 800)).with_placement(PlacementState::Region { region: left }),
        );
        wm.handle_event(Event::OutputEnabled { output, enabled: false });
        assert!(wm.regions().is_empty());
        assert!(wm.desktop.view(view).unwrap().placement.is_floating());
    }

    #[test]
    fn test_disabling_active_output_ends_grab() {
        let mut wm = manager();
        let output = wm.desktop.output_by_name("DP-1").unwrap();
        let view = wm.add_view(View::new("term", Rect::new(100, 100, 300, 200)));
        wm.seat.cursor = Point::new(150, 150);
        assert!(wm.handle_event(Event::Action(Action::Move(view))));
        wm.handle_event(Event::PointerMotion { x: 200, y: 180 });
        assert_eq!(wm.grab().unwrap().output, Some(output));

        // Still usable: the session carries on.
        wm.handle_event(Event::OutputUsableAreaChanged { output, usable_area: Rect::new(0, 30, 1000, 770) });
        assert_eq!(wm.mode(), InputMode::Move);

        wm.handle_event(Event::OutputEnabled { output, enabled: false });
        assert!(wm.grab().is_none());
        assert_eq!(wm.mode(), InputMode::Passthrough);
        assert_eq!(wm.desktop.view(view).unwrap().current, Rect::new(150, 130, 300, 200));
    }

    #[test]
    fn test_invalid_reload_keeps_current_config() {
        let mut wm = manager();
        let mut config = PlacementConfig::default();
        config.snapping.range_outer = -5;
        config.regions = vec![RegionConfig::new("wide", 60, 0, 60, 100)];

        assert!(!wm.handle_event(Event::ReloadConfig(Box::new(config.clone()))));
        assert_eq!(wm.config().snapping.range_outer, 20);
        assert_eq!(wm.regions().len(), 2);
        assert_eq!(wm.error_tracker.health_check().precondition_violations, 1);
        assert!(matches!(wm.reload_config(config), Err(PlacementError::InvalidConfig(_))));
    }

    #[test]
    fn test_new_falls_back_to_defaults_on_invalid_config() {
        let mut config = PlacementConfig::default();
        config.regions = vec![RegionConfig::new("wide", 60, 0, 60, 100)];
        let wm = WindowManager::new(config, Desktop::new(), RecordingPresenter::new(), ManualTimer::new());
        assert_eq!(wm.config(), &PlacementConfig::default());
    }

    #[test]
    fn test_reload_replaces_regions() {
        let mut wm = manager();
        let mut config = PlacementConfig::default();
        config.regions = vec![RegionConfig::new("full", 0, 0, 100, 100)];
        assert!(wm.handle_event(Event::ReloadConfig(Box::new(config))));
        assert_eq!(wm.regions().len(), 1);
        assert_eq!(wm.config().regions[0].name, "full");
    }
}
