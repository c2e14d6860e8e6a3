use crate::config::SnapConfig;
use crate::core::{Direction, Edges, Point};
use crate::window::desktop::Desktop;
use crate::window::output::OutputId;

/// Result of an edge probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeHit {
    pub output: OutputId,
    /// One cardinal edge, optionally combined with a perpendicular one for corners.
    pub edges: Edges,
    /// The cardinal edge borders another output rather than the outside of the layout.
    pub inner: bool,
}

/// Which edge of the output under the cursor, if any, the cursor is close enough to snap to.
pub fn edge_from_cursor(desktop: &Desktop, cursor: Point, config: &SnapConfig) -> Option<EdgeHit> {
    // 1. Output nearest to the cursor
    let output_id = desktop.nearest_output(cursor)?;
    let output = desktop.output(output_id)?;
    if !output.is_usable() {
        return None;
    }

    // 2. Tighter ranges where another output continues the layout
    let range = |direction: Direction| {
        if desktop.has_neighbor(output_id, direction) {
            config.range_inner
        } else {
            config.range_outer
        }
    };
    let top = range(Direction::Up);
    let bottom = range(Direction::Down);
    let left = range(Direction::Left);
    let right = range(Direction::Right);

    // 3. Distance to each edge of the usable area, top/bottom/left/right priority
    let area = output.usable_area;
    let local = cursor - area.origin();
    let primary = if top > 0 && local.y < top {
        Direction::Up
    } else if bottom > 0 && local.y >= area.height - bottom {
        Direction::Down
    } else if left > 0 && local.x < left {
        Direction::Left
    } else if right > 0 && local.x >= area.width - right {
        Direction::Right
    } else {
        return None;
    };

    // 4. Corner extension along the perpendicular axis
    let mut edges = primary.edge();
    let corner = config.corner_range;
    if corner > 0 {
        match primary {
            Direction::Up | Direction::Down => {
                if local.x < corner {
                    edges |= Edges::LEFT;
                } else if local.x >= area.width - corner {
                    edges |= Edges::RIGHT;
                }
            }
            Direction::Left | Direction::Right => {
                if local.y < corner {
                    edges |= Edges::TOP;
                } else if local.y >= area.height - corner {
                    edges |= Edges::BOTTOM;
                }
            }
        }
    }

    Some(EdgeHit {
        output: output_id,
        edges,
        inner: desktop.has_neighbor(output_id, primary),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rect;
    use crate::window::output::Output;

    fn config() -> SnapConfig {
        SnapConfig {
            range_inner: 5,
            range_outer: 20,
            corner_range: 50,
            ..SnapConfig::default()
        }
    }

    fn single() -> (Desktop, OutputId) {
        let mut desktop = Desktop::new();
        let id = desktop.add_output(Output::new("eDP-1", Rect::new(0, 0, 1920, 1080)));
        (desktop, id)
    }

    #[test]
    fn test_left_edge() {
        let (desktop, id) = single();
        let hit = edge_from_cursor(&desktop, Point::new(5, 500), &config()).unwrap();
        assert_eq!(hit, EdgeHit { output: id, edges: Edges::LEFT, inner: false });
    }

    #[test]
    fn test_priority_and_corners() {
        let (desktop, _) = single();
        let cfg = config();
        // Top wins over left, then the corner range adds LEFT.
        let hit = edge_from_cursor(&desktop, Point::new(3, 3), &cfg).unwrap();
        assert_eq!(hit.edges, Edges::TOP_LEFT);
        let hit = edge_from_cursor(&desktop, Point::new(1919, 1079), &cfg).unwrap();
        assert_eq!(hit.edges, Edges::BOTTOM_RIGHT);
        let hit = edge_from_cursor(&desktop, Point::new(1910, 1040), &cfg).unwrap();
        assert_eq!(hit.edges, Edges::BOTTOM_RIGHT);
        let hit = edge_from_cursor(&desktop, Point::new(960, 2), &cfg).unwrap();
        assert_eq!(hit.edges, Edges::TOP);
        assert!(edge_from_cursor(&desktop, Point::new(960, 540), &cfg).is_none());
    }

    #[test]
    fn test_zero_range_disables() {
        let (desktop, _) = single();
        let cfg = SnapConfig { range_outer: 0, ..config() };
        assert!(edge_from_cursor(&desktop, Point::new(0, 500), &cfg).is_none());
        assert!(edge_from_cursor(&desktop, Point::new(0, 0), &cfg).is_none());

        let cfg = SnapConfig { corner_range: 0, ..config() };
        assert_eq!(edge_from_cursor(&desktop, Point::new(0, 0), &cfg).unwrap().edges, Edges::TOP);
    }

    #[test]
    fn test_inner_edge_uses_tighter_range() {
        let (mut desktop, left) = single();
        desktop.add_output(Output::new("HDMI-1", Rect::new(1920, 0, 1920, 1080)));
        let cfg = config();
        // 10px from the shared edge: outside the inner range of 5.
        assert!(edge_from_cursor(&desktop, Point::new(1910, 500), &cfg).is_none());
        let hit = edge_from_cursor(&desktop, Point::new(1917, 500), &cfg).unwrap();
        assert_eq!(hit, EdgeHit { output: left, edges: Edges::RIGHT, inner: true });
        // The outer left edge keeps the wide range.
        assert!(edge_from_cursor(&desktop, Point::new(15, 500), &cfg).is_some());
    }

    #[test]
    fn test_usable_area_offsets() {
        let mut desktop = Desktop::new();
        desktop.add_output(
            Output::new("eDP-1", Rect::new(0, 0, 1920, 1080)).with_usable_area(Rect::new(0, 30, 1920, 1050)),
        );
        // Over the top panel the cursor is above the usable area and still counts as top.
        let hit = edge_from_cursor(&desktop, Point::new(960, 10), &config()).unwrap();
        assert_eq!(hit.edges, Edges::TOP);
        assert!(edge_from_cursor(&desktop, Point::new(960, 60), &config()).is_none());
    }
}
