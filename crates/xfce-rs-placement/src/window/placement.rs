use crate::core::{Edges, Point, Rect};

/// Centre a `width`×`height` window in `area`, never above or left of it.
pub fn center_in(area: Rect, width: i32, height: i32) -> Rect {
    let x = area.x + ((area.width - width) / 2).max(0);
    let y = area.y + ((area.height - height) / 2).max(0);
    Rect::new(x, y, width, height)
}

/// Origin for a window resized from `old` to `width`×`height` so that the
/// cursor keeps the same relative position inside it. The new origin never
/// lies before the old one.
pub fn anchor_to_cursor(cursor: Point, old: Rect, width: i32, height: i32) -> Point {
    let anchor = |c: i32, origin: i32, old_size: i32, new_size: i32| {
        if old_size <= 0 {
            return origin;
        }
        let offset = (c - origin) as i64 * new_size as i64 / old_size as i64;
        (c - offset as i32).max(origin)
    };
    Point::new(
        anchor(cursor.x, old.x, old.width, width),
        anchor(cursor.y, old.y, old.height, height),
    )
}

/// Geometry a view takes when tiled to `edges` of `area`: halves for one edge,
/// quarters for a corner. The right and bottom parts take the odd pixel.
pub fn edge_snap_geometry(area: Rect, edges: Edges) -> Rect {
    let half_w = area.width / 2;
    let half_h = area.height / 2;

    let (x, width) = if edges.contains(Edges::LEFT) {
        (area.x, half_w)
    } else if edges.contains(Edges::RIGHT) {
        (area.x + half_w, area.width - half_w)
    } else {
        (area.x, area.width)
    };
    let (y, height) = if edges.contains(Edges::TOP) {
        (area.y, half_h)
    } else if edges.contains(Edges::BOTTOM) {
        (area.y + half_h, area.height - half_h)
    } else {
        (area.y, area.height)
    };

    Rect::new(x, y, width, height)
}

/// Apply a pointer delta to `baseline` for a resize from `edges`, keeping the
/// opposite edges fixed and the size at least `min_width`×`min_height`.
pub fn resize_from_edges(baseline: Rect, edges: Edges, dx: i32, dy: i32, min_width: i32, min_height: i32) -> Rect {
    let mut g = baseline;

    if edges.contains(Edges::LEFT) {
        let width = (baseline.width - dx).max(min_width);
        g.x = baseline.right() - width;
        g.width = width;
    } else if edges.contains(Edges::RIGHT) {
        g.width = (baseline.width + dx).max(min_width);
    }

    if edges.contains(Edges::TOP) {
        let height = (baseline.height - dy).max(min_height);
        g.y = baseline.bottom() - height;
        g.height = height;
    } else if edges.contains(Edges::BOTTOM) {
        g.height = (baseline.height + dy).max(min_height);
    }

    g
}
