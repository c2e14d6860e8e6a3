pub mod edges;
pub mod overlay;
pub mod regions;

use crate::config::SnapConfig;
use crate::core::{Edges, Rect};
use crate::window::desktop::Desktop;

pub use edges::{edge_from_cursor, EdgeHit};
pub use overlay::{OverlayPreview, OverlayState};
pub use regions::{regions_should_snap, Region, RegionId, RegionManager};

/// Where a moved view lands if dropped now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    Region(RegionId),
    Edge(EdgeHit),
}

impl SnapTarget {
    /// Geometry the view would take. `None` once the region or output is gone.
    pub fn geometry(&self, desktop: &Desktop, regions: &RegionManager, config: &SnapConfig) -> Option<Rect> {
        match *self {
            SnapTarget::Region(id) => regions.get(id).map(|r| r.geometry),
            SnapTarget::Edge(hit) => {
                let area = desktop.output(hit.output)?.usable_area;
                if hit.edges == Edges::TOP && config.top_maximize {
                    Some(area)
                } else {
                    Some(crate::window::placement::edge_snap_geometry(area, hit.edges))
                }
            }
        }
    }
}
