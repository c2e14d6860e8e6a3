use std::time::Duration;

use tracing::debug;

use crate::core::{Edges, Rect};
use crate::present::{OverlayKind, OverlayTimer, Presenter};
use crate::snap::regions::RegionId;
use crate::window::output::OutputId;

/// What the snap preview currently stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Inactive,
    Region(RegionId),
    Edge { edges: Edges, output: OutputId },
}

/// The transient rectangle previewing where a dropped view would land.
///
/// Region previews appear at once. Edge previews wait for the overlay timer
/// unless their delay is zero. The timer is armed only while an edge preview
/// is pending.
#[derive(Debug)]
pub struct OverlayPreview {
    state: OverlayState,
    geometry: Rect,
    timer_armed: bool,
    visible: bool,
}

impl OverlayPreview {
    pub fn new() -> Self {
        Self { state: OverlayState::Inactive, geometry: Rect::default(), timer_armed: false, visible: false }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer_armed
    }

    /// Rectangle of the current (possibly still pending) preview.
    pub fn geometry(&self) -> Option<Rect> {
        match self.state {
            OverlayState::Inactive => None,
            _ => Some(self.geometry),
        }
    }

    pub fn hide(&mut self, presenter: &mut dyn Presenter, timer: &mut dyn OverlayTimer) {
        if self.timer_armed {
            timer.disarm();
            self.timer_armed = false;
        }
        if self.visible {
            presenter.hide_overlay();
            self.visible = false;
        }
        if self.state != OverlayState::Inactive {
            debug!("Overlay hidden ({:?})", self.state);
        }
        self.state = OverlayState::Inactive;
    }

    pub fn show_region(
        &mut self,
        region: RegionId,
        geometry: Rect,
        presenter: &mut dyn Presenter,
        timer: &mut dyn OverlayTimer,
    ) {
        if self.state == OverlayState::Region(region) {
            return;
        }
        self.hide(presenter, timer);
        self.state = OverlayState::Region(region);
        self.geometry = geometry;
        presenter.show_overlay(geometry, OverlayKind::Region);
        self.visible = true;
    }

    pub fn show_edge(
        &mut self,
        output: OutputId,
        edges: Edges,
        geometry: Rect,
        delay: Duration,
        presenter: &mut dyn Presenter,
        timer: &mut dyn OverlayTimer,
    ) {
        let state = OverlayState::Edge { edges, output };
        if self.state == state {
            return;
        }
        self.hide(presenter, timer);
        self.state = state;
        self.geometry = geometry;
        if delay.is_zero() {
            presenter.show_overlay(geometry, OverlayKind::Edge);
            self.visible = true;
        } else {
            debug!("Edge overlay {:?} pending for {:?}", edges, delay);
            timer.arm(delay);
            self.timer_armed = true;
        }
    }

    /// Timer callback. Returns whether the preview became visible; a timer
    /// that outlived its edge state does nothing.
    pub fn timer_fired(&mut self, presenter: &mut dyn Presenter) -> bool {
        if !self.timer_armed {
            return false;
        }
        self.timer_armed = false;
        match self.state {
            OverlayState::Edge { .. } if !self.visible => {
                presenter.show_overlay(self.geometry, OverlayKind::Edge);
                self.visible = true;
                true
            }
            _ => false,
        }
    }
}

impl Default for OverlayPreview {
    fn default() -> Self {
        Self::new()
    }
}
