use crate::core::Rect;

pub use crate::core::OutputId;

/// A display in the output layout.
#[derive(Debug, Clone)]
pub struct Output {
    pub name: String,
    /// Full output rectangle in layout coordinates.
    pub geometry: Rect,
    /// Part of `geometry` left over after panels and docks reserved their space.
    pub usable_area: Rect,
    pub connected: bool,
    pub enabled: bool,
}

impl Output {
    pub fn new(name: impl Into<String>, geometry: Rect) -> Self {
        Self {
            name: name.into(),
            geometry,
            usable_area: geometry,
            connected: true,
            enabled: true,
        }
    }

    pub fn with_usable_area(mut self, usable_area: Rect) -> Self {
        self.usable_area = usable_area;
        self
    }

    pub fn is_usable(&self) -> bool {
        self.connected && self.enabled
    }
}
