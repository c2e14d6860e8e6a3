//! Alt-Tab window switching.

pub mod osd;

use tracing::{debug, info};

use crate::core::Point;
use crate::present::{OverlayTimer, Presenter};
use crate::window::cursors::CursorImage;
use crate::window::desktop::Desktop;
use crate::window::error::PlacementError;
use crate::window::input_mode::InputMode;
use crate::window::manager::WindowManager;
use crate::window::output::OutputId;
use crate::window::view::ViewId;

pub use osd::CycleOsd;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleDirection {
    Forward,
    Backward,
}

/// Candidate list and selection of a running switcher session. Inactive
/// whenever the candidate list is empty.
#[derive(Debug, Default)]
pub struct CycleController {
    candidates: Vec<ViewId>,
    selected: usize,
    osds: Vec<CycleOsd>,
}

impl CycleController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[ViewId] {
        &self.candidates
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.is_active().then_some(self.selected)
    }

    pub fn selection(&self) -> Option<ViewId> {
        self.candidates.get(self.selected).copied()
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.candidates.contains(&view)
    }

    pub fn osds(&self) -> &[CycleOsd] {
        &self.osds
    }

    /// Focusable top-level views, topmost first.
    pub fn collect_candidates(desktop: &Desktop) -> Vec<ViewId> {
        desktop
            .stacking_top_down()
            .filter(|id| desktop.view(*id).is_some_and(|v| v.focusable && v.is_root()))
            .collect()
    }

    /// Move the selection one entry, wrapping at both ends.
    pub fn step(&mut self, direction: CycleDirection) {
        let len = self.candidates.len();
        if len == 0 {
            return;
        }
        self.selected = match direction {
            CycleDirection::Forward => (self.selected + 1) % len,
            CycleDirection::Backward => (self.selected + len - 1) % len,
        };
    }

    /// Start over with `candidates`, selecting `active` when present.
    pub fn reset(&mut self, candidates: Vec<ViewId>, active: Option<ViewId>) {
        self.selected = active.and_then(|a| candidates.iter().position(|c| *c == a)).unwrap_or(0);
        self.candidates = candidates;
    }

    /// Drop `view` from the list. The selection stays on the same view if it
    /// survives, else moves to its predecessor, else to the first entry.
    pub fn remove(&mut self, view: ViewId) -> bool {
        let Some(index) = self.candidates.iter().position(|c| *c == view) else {
            return false;
        };
        self.candidates.remove(index);
        if index < self.selected {
            self.selected -= 1;
        } else if index == self.selected {
            self.selected = index.saturating_sub(1);
        }
        if self.selected >= self.candidates.len() {
            self.selected = 0;
        }
        true
    }

    fn clear(&mut self) -> Vec<CycleOsd> {
        self.candidates.clear();
        self.selected = 0;
        std::mem::take(&mut self.osds)
    }
}

impl<P: Presenter, T: OverlayTimer> WindowManager<P, T> {
    pub fn cycle_begin(&mut self, direction: CycleDirection) -> Result<(), PlacementError> {
        if !self.modes.is_passthrough() {
            return Err(PlacementError::InvalidTransition { current: self.modes.mode(), requested: InputMode::Cycle });
        }
        let candidates = CycleController::collect_candidates(&self.desktop);
        if candidates.is_empty() {
            return Err(PlacementError::NoCycleCandidates);
        }
        let active = self.seat.keyboard_focus;
        self.modes.focus_override_begin(&mut self.seat, InputMode::Cycle, CursorImage::Default)?;

        self.cycle.reset(candidates, active);
        self.cycle.step(direction);
        info!(
            "Window cycling started: {} candidates, selected {:?}",
            self.cycle.candidates.len(),
            self.cycle.selection()
        );
        self.rebuild_cycle_osds();
        Ok(())
    }

    /// Advance the selection. Only the highlight changes on screen.
    pub fn cycle_step(&mut self, direction: CycleDirection) -> Result<(), PlacementError> {
        if self.modes.mode() != InputMode::Cycle || !self.cycle.is_active() {
            return Err(PlacementError::InvalidTransition { current: self.modes.mode(), requested: InputMode::Cycle });
        }
        self.cycle.step(direction);
        debug!("Cycle selection {:?}", self.cycle.selection());
        if self.config.cycle.show_osd {
            for osd in &self.cycle.osds {
                self.presenter.highlight_cycle_osd(osd.output, self.cycle.selected);
            }
        }
        Ok(())
    }

    /// End the session, focusing and raising the selection with `switch_focus`.
    pub fn cycle_finish(&mut self, switch_focus: bool) -> Result<(), PlacementError> {
        if self.modes.mode() != InputMode::Cycle {
            return Err(PlacementError::InvalidTransition {
                current: self.modes.mode(),
                requested: InputMode::Passthrough,
            });
        }
        let selection = self.cycle.selection();
        self.destroy_cycle_osds();
        self.modes.focus_override_end(&mut self.seat, !switch_focus);

        if switch_focus {
            if let Some(view) = selection {
                self.focus_view(view)?;
            }
        }
        info!("Window cycling finished (switch={}, selection={:?})", switch_focus, selection);
        Ok(())
    }

    /// Pointer press while cycling: pick the entry under the cursor.
    pub(crate) fn cycle_click(&mut self, p: Point) -> bool {
        let hit = self.cycle.osds.iter().find_map(|osd| osd.item_at(p));
        let Some(index) = hit else {
            return false;
        };
        self.cycle.selected = index;
        let result = self.cycle_finish(true);
        self.error_tracker.absorb(result, "cycle click").is_some()
    }

    pub(crate) fn cycle_view_destroyed(&mut self, view: ViewId) {
        if !self.cycle.remove(view) {
            return;
        }
        if !self.cycle.is_active() {
            info!("Last cycle candidate destroyed, aborting");
            self.destroy_cycle_osds();
            self.modes.focus_override_end(&mut self.seat, true);
            return;
        }
        // The candidate set changed: redraw everything, not just the highlight.
        self.rebuild_cycle_osds();
    }

    pub(crate) fn cycle_output_removed(&mut self, output: OutputId) {
        let before = self.cycle.osds.len();
        self.cycle.osds.retain(|osd| osd.output != output);
        if self.cycle.osds.len() != before && self.config.cycle.show_osd {
            self.presenter.destroy_cycle_osd(output);
        }
    }

    pub(crate) fn cycle_outputs_changed(&mut self) {
        if self.cycle.is_active() {
            self.rebuild_cycle_osds();
        }
    }

    fn destroy_cycle_osds(&mut self) {
        for osd in self.cycle.clear() {
            if self.config.cycle.show_osd {
                self.presenter.destroy_cycle_osd(osd.output);
            }
        }
    }

    /// Lay out one panel per usable output, replacing any shown before.
    fn rebuild_cycle_osds(&mut self) {
        let entries: Vec<(ViewId, String)> = self
            .cycle
            .candidates
            .iter()
            .filter_map(|id| self.desktop.view(*id).map(|v| (*id, v.title.clone())))
            .collect();

        let old = std::mem::take(&mut self.cycle.osds);
        let show = self.config.cycle.show_osd;
        if show {
            for osd in &old {
                self.presenter.destroy_cycle_osd(osd.output);
            }
        }

        let osds: Vec<CycleOsd> = self
            .desktop
            .usable_outputs()
            .map(|(id, output)| CycleOsd::layout(id, output.usable_area, &entries, &self.config.cycle))
            .collect();
        if show {
            for osd in &osds {
                self.presenter.create_cycle_osd(osd.output, osd.panel, &osd.items, self.cycle.selected);
            }
        }
        self.cycle.osds = osds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use crate::window::view::View;

    fn ids(n: usize) -> Vec<ViewId> {
        let mut views: SlotMap<ViewId, View> = SlotMap::with_key();
        (0..n).map(|i| views.insert(View::new(format!("v{}", i), Default::default()))).collect()
    }

    #[test]
    fn test_step_wraps() {
        let views = ids(3);
        let mut cycle = CycleController::new();
        cycle.reset(views.clone(), None);
        cycle.step(CycleDirection::Backward);
        assert_eq!(cycle.selection(), Some(views[2]));
        cycle.step(CycleDirection::Forward);
        assert_eq!(cycle.selection(), Some(views[0]));
    }

    #[test]
    fn test_reset_selects_active() {
        let views = ids(3);
        let mut cycle = CycleController::new();
        cycle.reset(views.clone(), Some(views[1]));
        assert_eq!(cycle.selected_index(), Some(1));
    }

    #[test]
    fn test_remove_keeps_or_moves_to_predecessor() {
        let views = ids(4);
        let mut cycle = CycleController::new();
        cycle.reset(views.clone(), Some(views[2]));

        // Another entry before the selection goes away: same view stays selected.
        assert!(cycle.remove(views[0]));
        assert_eq!(cycle.selection(), Some(views[2]));

        // The selected view goes away: its predecessor takes over.
        assert!(cycle.remove(views[2]));
        assert_eq!(cycle.selection(), Some(views[1]));

        // Predecessor of the first entry: the first candidate.
        assert!(cycle.remove(views[1]));
        assert_eq!(cycle.selection(), Some(views[3]));

        assert!(!cycle.remove(views[1]));
        assert!(cycle.remove(views[3]));
        assert!(!cycle.is_active());
        assert_eq!(cycle.selection(), None);
    }
}
