use tracing::debug;

use crate::window::cursors::CursorImage;
use crate::window::error::PlacementError;
use crate::window::seat::Seat;
use crate::window::view::ViewId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Passthrough,
    Move,
    Resize,
    Menu,
    Cycle,
}

#[derive(Debug, Clone, Copy)]
struct FocusOverride {
    /// Keyboard focus at the moment the override began.
    previous: Option<ViewId>,
}

/// Owns the input mode and the focus override shared by grabs, menus and cycling.
#[derive(Debug)]
pub struct InputModeController {
    mode: InputMode,
    focus_override: Option<FocusOverride>,
}

impl InputModeController {
    pub fn new() -> Self {
        Self { mode: InputMode::Passthrough, focus_override: None }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_passthrough(&self) -> bool {
        self.mode == InputMode::Passthrough
    }

    pub fn is_overridden(&self) -> bool {
        self.focus_override.is_some()
    }

    /// Enter `mode` from passthrough: remember the focused view, clear seat
    /// focus and show `cursor`. Nested overrides are rejected.
    pub fn focus_override_begin(
        &mut self,
        seat: &mut Seat,
        mode: InputMode,
        cursor: CursorImage,
    ) -> Result<(), PlacementError> {
        if mode == InputMode::Passthrough || !self.is_passthrough() || self.is_overridden() {
            return Err(PlacementError::InvalidTransition { current: self.mode, requested: mode });
        }
        let previous = seat.keyboard_focus;
        self.focus_override = Some(FocusOverride { previous });
        seat.clear_focus();
        seat.cursor_image = cursor;
        self.mode = mode;
        debug!("Input mode {:?} (focus was {:?})", mode, previous);
        Ok(())
    }

    /// Return to passthrough. With `restore`, the remembered view gets its
    /// focus back unless something else was focused in the meantime.
    pub fn focus_override_end(&mut self, seat: &mut Seat, restore: bool) {
        self.mode = InputMode::Passthrough;
        let Some(state) = self.focus_override.take() else {
            return;
        };
        seat.cursor_image = CursorImage::Default;
        if restore && seat.keyboard_focus.is_none() {
            seat.keyboard_focus = state.previous;
        }
        debug!("Input mode Passthrough (restore={}, focus={:?})", restore, seat.keyboard_focus);
    }

    /// Destroy notification: never restore focus to a view that is gone.
    pub fn forget_view(&mut self, view: ViewId) {
        if let Some(state) = self.focus_override.as_mut() {
            if state.previous == Some(view) {
                state.previous = None;
            }
        }
    }
}

impl Default for InputModeController {
    fn default() -> Self {
        Self::new()
    }
}
