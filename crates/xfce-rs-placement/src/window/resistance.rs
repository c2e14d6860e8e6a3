use crate::config::SnapConfig;
use crate::core::{Point, Rect};

/// Thresholds that keep small pointer movements from changing a view's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResistanceGuard {
    unsnap_threshold: i32,
    edge_resistance: i32,
}

impl ResistanceGuard {
    pub fn new(unsnap_threshold: i32, edge_resistance: i32) -> Self {
        Self { unsnap_threshold: unsnap_threshold.max(0), edge_resistance: edge_resistance.max(0) }
    }

    pub fn from_config(config: &SnapConfig) -> Self {
        Self::new(config.unsnap_threshold, config.edge_resistance)
    }

    /// Snapped views wait for real motion before coming loose.
    pub fn defers_untile(&self) -> bool {
        self.unsnap_threshold > 0
    }

    /// The cursor moved far enough from `origin` to untile.
    pub fn should_untile(&self, origin: Point, cursor: Point) -> bool {
        let threshold = self.unsnap_threshold as i64;
        origin.distance_sq(cursor) >= threshold * threshold
    }

    /// Hold a moving view at the usable-area edge it is about to cross until
    /// the overshoot reaches the resistance strength. Only edges that were
    /// inside the area in `current` resist.
    pub fn resist_move(&self, current: Rect, proposed: Rect, area: Rect) -> Rect {
        let strength = self.edge_resistance;
        if strength == 0 {
            return proposed;
        }
        let mut g = proposed;

        if current.x >= area.x && proposed.x < area.x && area.x - proposed.x < strength {
            g.x = area.x;
        } else if current.right() <= area.right()
            && proposed.right() > area.right()
            && proposed.right() - area.right() < strength
        {
            g.x = area.right() - proposed.width;
        }

        if current.y >= area.y && proposed.y < area.y && area.y - proposed.y < strength {
            g.y = area.y;
        } else if current.bottom() <= area.bottom()
            && proposed.bottom() > area.bottom()
            && proposed.bottom() - area.bottom() < strength
        {
            g.y = area.bottom() - proposed.height;
        }

        g
    }
}
