use tracing::{debug, info};

use crate::core::{Axes, Edges, Point, Rect};
use crate::present::{OverlayTimer, Presenter};
use crate::snap::{edge_from_cursor, regions_should_snap, SnapTarget};
use crate::window::cursors::CursorImage;
use crate::window::error::PlacementError;
use crate::window::frame::resize_edges_at;
use crate::window::input_mode::InputMode;
use crate::window::manager::WindowManager;
use crate::window::output::OutputId;
use crate::window::placement::{anchor_to_cursor, center_in, resize_from_edges};
use crate::window::resistance::ResistanceGuard;
use crate::window::view::{PlacementState, ViewId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabKind {
    Move,
    Resize,
}

/// A running interactive move or resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grab {
    pub view: ViewId,
    pub kind: GrabKind,
    /// Cursor position when the grab began; deltas are measured from here.
    pub origin: Point,
    /// Geometry the deltas are applied to.
    pub baseline: Rect,
    /// Geometry and state before the grab, restored on Escape.
    pub initial: Rect,
    pub initial_placement: PlacementState,
    pub edges: Edges,
    pub output: Option<OutputId>,
    /// Floating geometry waiting for the cursor to pass the unsnap threshold.
    pub deferred_untile: Option<Rect>,
}

impl<P: Presenter, T: OverlayTimer> WindowManager<P, T> {
    fn check_grab_allowed(&self, view: ViewId, requested: InputMode) -> Result<(), PlacementError> {
        if !self.modes.is_passthrough() {
            return Err(PlacementError::InvalidTransition { current: self.modes.mode(), requested });
        }
        let target = self.desktop.view(view).ok_or(PlacementError::StaleView(view))?;
        if !target.is_movable() {
            return Err(PlacementError::NotMovable(view));
        }
        let refused = match requested {
            InputMode::Move => target.is_fullscreen(),
            _ => target.is_fullscreen() || target.placement.maximized_axes() == Axes::all(),
        };
        if refused {
            return Err(PlacementError::StateRefused { view, requested });
        }
        Ok(())
    }

    /// Floating size for a snapped view, falling back to a centred window
    /// half the size of its output when none was ever recorded.
    fn natural_geometry(&self, view: ViewId) -> Option<Rect> {
        let target = self.desktop.view(view)?;
        if !target.natural.is_empty() {
            return Some(target.natural);
        }
        let area = target
            .output
            .and_then(|o| self.desktop.output(o))
            .map(|o| o.usable_area)
            .unwrap_or(target.current);
        Some(center_in(area, area.width / 2, area.height / 2))
    }

    fn untile(&mut self, view: ViewId, geometry: Rect) {
        if let Some(target) = self.desktop.view_mut(view) {
            target.placement = PlacementState::Floating;
        }
        self.desktop.set_geometry(view, geometry);
        self.presenter.configure_view(view, geometry);
        debug!("Untiled view {} to {:?}", view, geometry);
    }

    fn apply_geometry(&mut self, view: ViewId, geometry: Rect) {
        if self.desktop.set_geometry(view, geometry) {
            self.presenter.configure_view(view, geometry);
        }
    }

    pub fn begin_move(&mut self, view: ViewId) -> Result<(), PlacementError> {
        self.check_grab_allowed(view, InputMode::Move)?;
        let target = self.desktop.view(view).ok_or(PlacementError::StaleView(view))?;
        let initial = target.current;
        let initial_placement = target.placement;
        let output = target.output;
        let snapped = target.placement.is_snapped();
        let cursor = self.seat.cursor;

        self.modes.focus_override_begin(&mut self.seat, InputMode::Move, CursorImage::Grab)?;

        let mut baseline = initial;
        let mut deferred_untile = None;
        if snapped {
            let natural = self.natural_geometry(view).unwrap_or(initial);
            let origin = anchor_to_cursor(cursor, initial, natural.width, natural.height);
            let untiled = Rect::new(origin.x, origin.y, natural.width, natural.height);
            if ResistanceGuard::from_config(&self.config.snapping).defers_untile() {
                deferred_untile = Some(untiled);
            } else {
                self.untile(view, untiled);
                baseline = untiled;
            }
        }

        self.grab = Some(Grab {
            view,
            kind: GrabKind::Move,
            origin: cursor,
            baseline,
            initial,
            initial_placement,
            edges: Edges::empty(),
            output,
            deferred_untile,
        });
        info!("Started move of view {} from {:?}", view, baseline);
        Ok(())
    }

    pub fn begin_resize(&mut self, view: ViewId, edges: Option<Edges>) -> Result<(), PlacementError> {
        self.check_grab_allowed(view, InputMode::Resize)?;
        let target = self.desktop.view(view).ok_or(PlacementError::StaleView(view))?;
        let initial = target.current;
        let initial_placement = target.placement;
        let output = target.output;
        let cursor = self.seat.cursor;
        let edges = edges
            .filter(|e| !e.is_empty() && e.is_consistent())
            .unwrap_or_else(|| resize_edges_at(initial, cursor));

        self.modes.focus_override_begin(&mut self.seat, InputMode::Resize, CursorImage::Resize(edges))?;

        if let Some(target) = self.desktop.view_mut(view) {
            target.placement = match target.placement {
                PlacementState::Maximized { axes } => {
                    let remaining = axes - edges.axes();
                    if remaining.is_empty() {
                        PlacementState::Floating
                    } else {
                        PlacementState::Maximized { axes: remaining }
                    }
                }
                PlacementState::Tiled { .. } | PlacementState::Region { .. } => PlacementState::Floating,
                other => other,
            };
        }

        self.grab = Some(Grab {
            view,
            kind: GrabKind::Resize,
            origin: cursor,
            baseline: initial,
            initial,
            initial_placement,
            edges,
            output,
            deferred_untile: None,
        });
        if self.config.resize.show_indicator {
            self.presenter.show_resize_indicator(view, initial);
        }
        info!("Started resize of view {} from {:?} ({:?})", view, initial, edges);
        Ok(())
    }

    /// Pointer motion during a grab. Returns whether anything changed.
    pub(crate) fn process_motion(&mut self) -> bool {
        let Some(grab) = self.grab.as_mut() else {
            return false;
        };
        let cursor = self.seat.cursor;
        let view = grab.view;
        let dx = cursor.x - grab.origin.x;
        let dy = cursor.y - grab.origin.y;
        let kind = grab.kind;

        match kind {
            GrabKind::Move => {
                if let Some(untiled) = grab.deferred_untile {
                    let guard = ResistanceGuard::from_config(&self.config.snapping);
                    if !guard.should_untile(grab.origin, cursor) {
                        return false;
                    }
                    grab.deferred_untile = None;
                    grab.baseline = untiled;
                    self.untile(view, untiled);
                }
                let Some(grab) = self.grab.as_mut() else {
                    return false;
                };
                let proposed = grab.baseline.with_origin(grab.baseline.origin() + Point::new(dx, dy));
                let active = self.desktop.nearest_output(cursor);
                grab.output = active;

                let current = self.desktop.view(view).map_or(proposed, |v| v.current);
                let geometry = match active.and_then(|o| self.desktop.output(o)) {
                    Some(output) => ResistanceGuard::from_config(&self.config.snapping).resist_move(
                        current,
                        proposed,
                        output.usable_area,
                    ),
                    None => proposed,
                };
                self.apply_geometry(view, geometry);
                self.update_overlay();
            }
            GrabKind::Resize => {
                let geometry = resize_from_edges(
                    grab.baseline,
                    grab.edges,
                    dx,
                    dy,
                    self.config.resize.min_width,
                    self.config.resize.min_height,
                );
                self.apply_geometry(view, geometry);
                if self.config.resize.show_indicator {
                    self.presenter.show_resize_indicator(view, geometry);
                }
            }
        }
        true
    }

    /// Where the grabbed view would land if released now. Regions take
    /// precedence: while the region modifier is held, edges are not considered.
    pub(crate) fn snap_target(&self) -> Option<SnapTarget> {
        let grab = self.grab.as_ref()?;
        if grab.kind != GrabKind::Move || grab.deferred_untile.is_some() {
            return None;
        }
        let view = self.desktop.view(grab.view)?;
        let cursor = self.seat.cursor;
        if regions_should_snap(
            &self.regions,
            self.modes.mode(),
            Some(view),
            self.seat.modifiers,
            self.config.region_modifiers,
        ) {
            return self.regions.regions_from_cursor(&self.desktop, cursor).map(SnapTarget::Region);
        }
        if !view.placement.is_floating() {
            return None;
        }
        edge_from_cursor(&self.desktop, cursor, &self.config.snapping).map(SnapTarget::Edge)
    }

    /// Bring the snap preview in line with the current cursor and modifiers.
    pub(crate) fn update_overlay(&mut self) {
        if self.modes.mode() != InputMode::Move || !self.config.snapping.overlay.enabled {
            self.overlay.hide(&mut self.presenter, &mut self.timer);
            return;
        }
        let target = self.snap_target();
        let geometry = target.and_then(|t| t.geometry(&self.desktop, &self.regions, &self.config.snapping));
        match (target, geometry) {
            (Some(SnapTarget::Region(region)), Some(geometry)) => {
                self.overlay.show_region(region, geometry, &mut self.presenter, &mut self.timer);
            }
            (Some(SnapTarget::Edge(hit)), Some(geometry)) => {
                let delay = self.config.snapping.overlay.delay(hit.inner);
                self.overlay
                    .show_edge(hit.output, hit.edges, geometry, delay, &mut self.presenter, &mut self.timer);
            }
            _ => self.overlay.hide(&mut self.presenter, &mut self.timer),
        }
    }

    fn snap(&mut self, view: ViewId, target: SnapTarget) {
        let Some(geometry) = target.geometry(&self.desktop, &self.regions, &self.config.snapping) else {
            return;
        };
        let Some(v) = self.desktop.view_mut(view) else {
            return;
        };
        v.store_natural_geometry();
        v.placement = match target {
            SnapTarget::Region(region) => PlacementState::Region { region },
            SnapTarget::Edge(hit) if hit.edges == Edges::TOP && self.config.snapping.top_maximize => {
                PlacementState::Maximized { axes: Axes::all() }
            }
            SnapTarget::Edge(hit) => PlacementState::Tiled { edges: hit.edges },
        };
        info!("Snapped view {} to {:?} at {:?}", view, v.placement, geometry);
        self.apply_geometry(view, geometry);
    }

    /// Button release: apply the snap the preview showed, then end the session.
    pub fn finish(&mut self, view: ViewId) {
        let Some(grab) = self.grab.as_ref().filter(|g| g.view == view) else {
            return;
        };
        if grab.kind == GrabKind::Move {
            if let Some(target) = self.snap_target() {
                self.snap(view, target);
            }
        }
        self.desktop.discover_output(view);
        self.cancel(view);
    }

    /// End the session on `view` without snapping. Safe to call repeatedly and
    /// for views that are not grabbed.
    pub fn cancel(&mut self, view: ViewId) {
        if !self.grab.as_ref().is_some_and(|g| g.view == view) {
            return;
        }
        let Some(grab) = self.grab.take() else {
            return;
        };
        self.overlay.hide(&mut self.presenter, &mut self.timer);
        if grab.kind == GrabKind::Resize && self.config.resize.show_indicator {
            self.presenter.hide_resize_indicator();
        }
        self.modes.focus_override_end(&mut self.seat, true);
        debug!("Ended {:?} of view {}", grab.kind, view);
    }

    /// Escape: put the view back where it was and end the session.
    pub(crate) fn abort_grab(&mut self) -> Result<(), PlacementError> {
        let grab = self.grab.clone().ok_or(PlacementError::InvalidTransition {
            current: self.modes.mode(),
            requested: InputMode::Passthrough,
        })?;
        if let Some(target) = self.desktop.view_mut(grab.view) {
            target.placement = grab.initial_placement;
        }
        self.apply_geometry(grab.view, grab.initial);
        self.cancel(grab.view);
        info!("Aborted {:?} of view {}", grab.kind, grab.view);
        Ok(())
    }
}
