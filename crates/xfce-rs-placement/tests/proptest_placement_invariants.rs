//! Property tests for the placement geometry and the window switcher.
//!
//! 1. **Cycle round trip**: a forward step followed by a backward step lands
//!    on the same selection for any list of two or more candidates.
//! 2. **Region contiguity**: two regions split at any percentage share their
//!    border and together cover the usable area exactly.
//! 3. **Edge halves**: left and right halves tile the usable width.
//! 4. **Anchor**: a cursor inside the old rectangle stays inside the new one.
//! 5. **Unusable output**: no edge is ever reported while the output nearest
//!    the cursor is disabled or disconnected, whatever the snap ranges.

use proptest::prelude::*;

use xfce_rs_placement::snap::{edge_from_cursor, RegionManager};
use xfce_rs_placement::window::placement::{anchor_to_cursor, edge_snap_geometry};
use xfce_rs_placement::{
    Action, CycleController, CycleDirection, Desktop, Edges, Event, ManualTimer, NullPresenter, Output,
    PlacementConfig, Point, Rect, RegionConfig, View, WindowManager,
};

fn area() -> impl Strategy<Value = Rect> {
    (-2000i32..2000, -2000i32..2000, 1i32..5000, 1i32..5000).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn cycle_forward_then_backward_is_identity(n in 2usize..20, start in 0usize..20) {
        let mut desktop = Desktop::new();
        let views: Vec<_> = (0..n)
            .map(|i| desktop.add_view(View::new(format!("v{}", i), Rect::new(0, 0, 10, 10))))
            .collect();
        let mut cycle = CycleController::new();
        cycle.reset(views.clone(), Some(views[start % n]));
        let before = cycle.selection();

        cycle.step(CycleDirection::Forward);
        prop_assert_ne!(cycle.selection(), before);
        cycle.step(CycleDirection::Backward);
        prop_assert_eq!(cycle.selection(), before);
    }
}

proptest! {
    #[test]
    fn cycle_round_trip_through_events(n in 2usize..10, steps in 0usize..10) {
        let mut wm = WindowManager::new(PlacementConfig::default(), Desktop::new(), NullPresenter, ManualTimer::new());
        wm.add_output(Output::new("DP-1", Rect::new(0, 0, 1920, 1080)));
        for i in 0..n {
            wm.add_view(View::new(format!("v{}", i), Rect::new(0, 0, 100, 100)));
        }
        wm.handle_event(Event::Action(Action::NextWindow));
        for _ in 0..steps {
            wm.handle_event(Event::Action(Action::NextWindow));
        }
        let before = wm.cycle().selection();
        wm.handle_event(Event::Action(Action::NextWindow));
        wm.handle_event(Event::Action(Action::PreviousWindow));
        prop_assert_eq!(wm.cycle().selection(), before);
        prop_assert_eq!(wm.cycle().candidates().len(), n);
    }
}

proptest! {
    #[test]
    fn split_regions_are_contiguous(area in area(), split in 1u32..100) {
        let mut desktop = Desktop::new();
        desktop.add_output(Output::new("DP-1", area));
        let configs = vec![
            RegionConfig::new("a", 0, 0, split, 100),
            RegionConfig::new("b", split, 0, 100 - split, 100),
        ];
        let mut regions = RegionManager::new();
        regions.rebuild_all(&desktop, &configs);

        let rects: Vec<Rect> = regions.iter().map(|(_, r)| r.geometry).collect();
        prop_assert_eq!(rects.len(), 2);
        prop_assert_eq!(rects[0].x, area.x);
        prop_assert_eq!(rects[0].right(), rects[1].x);
        prop_assert_eq!(rects[1].right(), area.right());
        prop_assert_eq!(rects[0].width + rects[1].width, area.width);
    }
}

proptest! {
    #[test]
    fn region_lookup_contains_cursor(area in area(), px in 0i32..5000, py in 0i32..5000) {
        let mut desktop = Desktop::new();
        desktop.add_output(Output::new("DP-1", area));
        let configs = vec![
            RegionConfig::new("full", 0, 0, 100, 100),
            RegionConfig::new("left", 0, 0, 50, 100),
            RegionConfig::new("top-right", 50, 0, 50, 50),
        ];
        let mut regions = RegionManager::new();
        regions.rebuild_all(&desktop, &configs);

        let cursor = Point::new(area.x + px % area.width, area.y + py % area.height);
        let found = regions.regions_from_cursor(&desktop, cursor);
        prop_assert!(found.is_some());
        let region = regions.get(found.unwrap()).unwrap();
        prop_assert!(region.geometry.contains(cursor));
        // Nothing else containing the cursor has a strictly closer centre.
        for (_, other) in regions.iter() {
            if other.geometry.contains(cursor) {
                prop_assert!(other.center.distance_sq(cursor) >= region.center.distance_sq(cursor));
            }
        }
    }
}

proptest! {
    #[test]
    fn edge_halves_tile_width(area in area()) {
        let left = edge_snap_geometry(area, Edges::LEFT);
        let right = edge_snap_geometry(area, Edges::RIGHT);
        prop_assert_eq!(left.width + right.width, area.width);
        prop_assert_eq!(left.right(), right.x);
        prop_assert_eq!(left.height, area.height);
    }
}

proptest! {
    #[test]
    fn anchored_cursor_stays_inside(
        old in area(),
        fx in 0i32..1000,
        fy in 0i32..1000,
        width in 1i32..4000,
        height in 1i32..4000,
    ) {
        let cursor = Point::new(old.x + fx % old.width, old.y + fy % old.height);
        let origin = anchor_to_cursor(cursor, old, width, height);
        let new = Rect::new(origin.x, origin.y, width, height);
        prop_assert!(origin.x >= old.x && origin.y >= old.y);
        prop_assert!(new.contains(cursor));
    }
}

proptest! {
    #[test]
    fn unusable_output_never_snaps(
        px in -3000i32..6000,
        py in -2000i32..3000,
        disable_left in any::<bool>(),
        disconnect in any::<bool>(),
        range in 0i32..2000,
    ) {
        let mut desktop = Desktop::new();
        let left = desktop.add_output(Output::new("DP-1", Rect::new(0, 0, 1920, 1080)));
        let right = desktop.add_output(Output::new("DP-2", Rect::new(1920, 0, 1920, 1080)));
        let dead = if disable_left { left } else { right };
        let output = desktop.output_mut(dead).unwrap();
        if disconnect {
            output.connected = false;
        } else {
            output.enabled = false;
        }

        let mut snapping = PlacementConfig::default().snapping;
        snapping.range_inner = range;
        snapping.range_outer = range;
        snapping.corner_range = range;

        let cursor = Point::new(px, py);
        if desktop.nearest_output(cursor) == Some(dead) {
            prop_assert!(edge_from_cursor(&desktop, cursor, &snapping).is_none());
        }
    }
}
