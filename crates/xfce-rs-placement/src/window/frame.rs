use crate::core::{Edges, Point, Rect};

/// Resize edges for a grab that did not name any, from where the cursor sits
/// on the view. The view is split into thirds on each axis; the centre cell
/// resizes from the bottom-right corner.
pub fn resize_edges_at(geometry: Rect, cursor: Point) -> Edges {
    let x = cursor.x - geometry.x;
    let y = cursor.y - geometry.y;
    let third_w = geometry.width / 3;
    let third_h = geometry.height / 3;

    let mut edges = Edges::empty();
    if x < third_w {
        edges |= Edges::LEFT;
    } else if x >= geometry.width - third_w {
        edges |= Edges::RIGHT;
    }
    if y < third_h {
        edges |= Edges::TOP;
    } else if y >= geometry.height - third_h {
        edges |= Edges::BOTTOM;
    }

    if edges.is_empty() {
        Edges::BOTTOM_RIGHT
    } else {
        edges
    }
}
