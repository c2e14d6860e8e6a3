use crate::core::Edges;

/// Cursor image requested while the seat's focus is overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorImage {
    Default,
    Grab,
    Resize(Edges),
}

impl CursorImage {
    /// Xcursor theme name for this image.
    pub fn name(&self) -> &'static str {
        match *self {
            CursorImage::Default => "left_ptr",
            CursorImage::Grab => "fleur",
            CursorImage::Resize(edges) => resize_cursor_name(edges),
        }
    }
}

fn resize_cursor_name(edges: Edges) -> &'static str {
    if edges == Edges::TOP_LEFT {
        "top_left_corner"
    } else if edges == Edges::TOP_RIGHT {
        "top_right_corner"
    } else if edges == Edges::BOTTOM_LEFT {
        "bottom_left_corner"
    } else if edges == Edges::BOTTOM_RIGHT {
        "bottom_right_corner"
    } else if edges == Edges::TOP {
        "top_side"
    } else if edges == Edges::BOTTOM {
        "bottom_side"
    } else if edges == Edges::LEFT {
        "left_side"
    } else if edges == Edges::RIGHT {
        "right_side"
    } else {
        "left_ptr"
    }
}
