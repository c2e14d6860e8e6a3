use slotmap::SlotMap;
use tracing::{debug, info};

use crate::config::RegionConfig;
use crate::core::{Modifiers, Point, Rect};
use crate::window::desktop::Desktop;
use crate::window::input_mode::InputMode;
use crate::window::output::{Output, OutputId};
use crate::window::view::{PlacementState, View, ViewId};

pub use crate::core::RegionId;

/// A configured region resolved against one output's usable area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub output: OutputId,
    /// Declared percentages, kept to rebuild on usable-area changes.
    pub percent: RegionConfig,
    pub geometry: Rect,
    pub center: Point,
}

/// Scale a percentage rectangle onto `area`. Each far edge is computed from the
/// summed percentages so neighbouring regions share their border exactly.
pub fn scale_to_area(area: Rect, percent: &RegionConfig) -> Rect {
    let scale = |origin: i32, size: i32, pct: u32| origin + ((size as i64 * pct as i64) / 100) as i32;
    let left = scale(area.x, area.width, percent.x);
    let right = scale(area.x, area.width, percent.x + percent.width);
    let top = scale(area.y, area.height, percent.y);
    let bottom = scale(area.y, area.height, percent.y + percent.height);
    Rect::new(left, top, right - left, bottom - top)
}

/// Holds resolved regions for every output, in declaration order.
#[derive(Debug, Default)]
pub struct RegionManager {
    regions: SlotMap<RegionId, Region>,
    order: Vec<RegionId>,
}

impl RegionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.order.iter().filter_map(|id| self.regions.get(*id).map(|r| (*id, r)))
    }

    pub fn for_output(&self, output: OutputId) -> impl Iterator<Item = (RegionId, &Region)> {
        self.iter().filter(move |(_, r)| r.output == output)
    }

    pub fn find_by_name(&self, output: OutputId, name: &str) -> Option<RegionId> {
        self.for_output(output).find(|(_, r)| r.name == name).map(|(id, _)| id)
    }

    /// Replace the regions of one output with freshly scaled ones.
    pub fn rebuild_output(&mut self, output_id: OutputId, output: &Output, configs: &[RegionConfig]) {
        self.remove_output(output_id);
        if !output.is_usable() {
            return;
        }
        for percent in configs.iter().filter(|c| c.applies_to(&output.name)) {
            let geometry = scale_to_area(output.usable_area, percent);
            let id = self.regions.insert(Region {
                name: percent.name.clone(),
                output: output_id,
                percent: percent.clone(),
                geometry,
                center: geometry.center(),
            });
            self.order.push(id);
        }
        debug!(
            "Rebuilt regions for {} on {:?}: {}",
            output.name,
            output.usable_area,
            self.for_output(output_id).count()
        );
    }

    /// Rebuild every usable output from scratch.
    pub fn rebuild_all(&mut self, desktop: &Desktop, configs: &[RegionConfig]) {
        self.regions.clear();
        self.order.clear();
        for (id, output) in desktop.outputs() {
            self.rebuild_output(id, output, configs);
        }
    }

    pub fn remove_output(&mut self, output: OutputId) {
        let regions = &mut self.regions;
        self.order.retain(|id| {
            let drop = regions.get(*id).map_or(true, |r| r.output == output);
            if drop {
                regions.remove(*id);
            }
            !drop
        });
    }

    /// The region under `cursor` whose centre is closest to it. Only the output
    /// nearest the cursor is searched; ties keep the first declared region.
    pub fn regions_from_cursor(&self, desktop: &Desktop, cursor: Point) -> Option<RegionId> {
        let output_id = desktop.nearest_output(cursor)?;
        if !desktop.output(output_id)?.is_usable() {
            return None;
        }
        let mut best: Option<(RegionId, i64)> = None;
        for (id, region) in self.for_output(output_id) {
            if !region.geometry.contains(cursor) {
                continue;
            }
            let dist = region.center.distance_sq(cursor);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((id, dist));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Return views snapped to regions of `output` to floating, remembering the
    /// region name so they can be re-matched after the rebuild.
    pub fn evacuate(&self, desktop: &mut Desktop, output: OutputId) -> Vec<ViewId> {
        let mut evacuated = Vec::new();
        for (id, view) in desktop.views_mut() {
            let PlacementState::Region { region } = view.placement else {
                continue;
            };
            let Some(r) = self.regions.get(region) else {
                // Region already gone: plain floating view.
                view.placement = PlacementState::Floating;
                continue;
            };
            if r.output != output {
                continue;
            }
            view.evacuated_region = Some(r.name.clone());
            view.placement = PlacementState::Floating;
            evacuated.push(id);
        }
        if !evacuated.is_empty() {
            info!("Evacuated {} views from regions of output {}", evacuated.len(), output);
        }
        evacuated
    }

    /// Snap evacuated views back into the region of the same name on their
    /// output. Returns the views whose geometry changed.
    pub fn arrange(&self, desktop: &mut Desktop) -> Vec<(ViewId, Rect)> {
        let mut arranged = Vec::new();
        for (id, view) in desktop.views_mut() {
            let Some(name) = view.evacuated_region.take() else {
                continue;
            };
            let Some(output) = view.output else {
                continue;
            };
            let Some(region_id) = self.find_by_name(output, &name) else {
                debug!("Region '{}' no longer exists, {} stays floating", name, id);
                continue;
            };
            let Some(region) = self.regions.get(region_id) else {
                continue;
            };
            view.placement = PlacementState::Region { region: region_id };
            view.current = region.geometry;
            view.pending = region.geometry;
            arranged.push((id, region.geometry));
        }
        arranged
    }
}

/// Modifiers held on the seat satisfy the configured requirement. An empty
/// requirement accepts any modifier.
pub fn modifiers_match(held: Modifiers, required: Modifiers) -> bool {
    if required.is_empty() {
        !held.is_empty()
    } else {
        held.contains(required)
    }
}

/// Region snapping applies only to a floating view being moved while the
/// region modifier is held.
pub fn regions_should_snap(
    regions: &RegionManager,
    mode: InputMode,
    dragged: Option<&View>,
    held: Modifiers,
    required: Modifiers,
) -> bool {
    mode == InputMode::Move
        && !regions.is_empty()
        && dragged.map_or(false, |view| view.placement.is_floating())
        && modifiers_match(held, required)
}
