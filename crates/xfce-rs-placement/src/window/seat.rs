use crate::core::{Modifiers, Point};
use crate::window::cursors::CursorImage;
use crate::window::view::ViewId;

/// Pointer and keyboard state of the single seat.
#[derive(Debug, Clone)]
pub struct Seat {
    pub cursor: Point,
    pub modifiers: Modifiers,
    pub keyboard_focus: Option<ViewId>,
    pub pointer_focus: Option<ViewId>,
    pub cursor_image: CursorImage,
}

impl Seat {
    pub fn new() -> Self {
        Self {
            cursor: Point::default(),
            modifiers: Modifiers::empty(),
            keyboard_focus: None,
            pointer_focus: None,
            cursor_image: CursorImage::Default,
        }
    }

    pub fn clear_focus(&mut self) {
        self.keyboard_focus = None;
        self.pointer_focus = None;
    }

    /// Drop every reference to a destroyed view.
    pub fn forget_view(&mut self, view: ViewId) {
        if self.keyboard_focus == Some(view) {
            self.keyboard_focus = None;
        }
        if self.pointer_focus == Some(view) {
            self.pointer_focus = None;
        }
    }
}

impl Default for Seat {
    fn default() -> Self {
        Self::new()
    }
}
