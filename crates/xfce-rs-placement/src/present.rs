//! One-way presentation sink and timer facility consumed by the engine.

use std::time::Duration;

use crate::core::Rect;
use crate::window::output::OutputId;
use crate::window::view::ViewId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Region,
    Edge,
}

/// One row of the window switcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsdItem {
    pub view: ViewId,
    pub title: String,
    pub geometry: Rect,
}

/// Receives everything the engine wants drawn. Nothing is returned to the engine.
///
/// All methods default to doing nothing so a backend only implements what it shows.
pub trait Presenter {
    fn show_overlay(&mut self, _geometry: Rect, _kind: OverlayKind) {}

    fn hide_overlay(&mut self) {}

    fn show_resize_indicator(&mut self, _view: ViewId, _geometry: Rect) {}

    fn hide_resize_indicator(&mut self) {}

    fn create_cycle_osd(&mut self, _output: OutputId, _panel: Rect, _items: &[OsdItem], _selected: usize) {}

    fn highlight_cycle_osd(&mut self, _output: OutputId, _selected: usize) {}

    fn destroy_cycle_osd(&mut self, _output: OutputId) {}

    /// A view's geometry changed and should be sent to its client.
    fn configure_view(&mut self, _view: ViewId, _geometry: Rect) {}
}

/// The single one-shot timer behind the delayed edge overlay.
///
/// Arming an armed timer reschedules it; disarming an idle timer does nothing.
/// When it fires the host delivers `Event::OverlayTimeout`.
pub trait OverlayTimer {
    fn arm(&mut self, delay: Duration);

    fn disarm(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentCall {
    ShowOverlay(Rect, OverlayKind),
    HideOverlay,
    ShowResizeIndicator(ViewId, Rect),
    HideResizeIndicator,
    CreateCycleOsd { output: OutputId, panel: Rect, items: Vec<OsdItem>, selected: usize },
    HighlightCycleOsd { output: OutputId, selected: usize },
    DestroyCycleOsd(OutputId),
    ConfigureView(ViewId, Rect),
}

/// Keeps every call, for tests and for the replay tool.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    pub calls: Vec<PresentCall>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<PresentCall> {
        std::mem::take(&mut self.calls)
    }

    /// Most recent overlay call, if any.
    pub fn last_overlay(&self) -> Option<&PresentCall> {
        self.calls
            .iter()
            .rev()
            .find(|c| matches!(c, PresentCall::ShowOverlay(..) | PresentCall::HideOverlay))
    }
}

impl Presenter for RecordingPresenter {
    fn show_overlay(&mut self, geometry: Rect, kind: OverlayKind) {
        self.calls.push(PresentCall::ShowOverlay(geometry, kind));
    }

    fn hide_overlay(&mut self) {
        self.calls.push(PresentCall::HideOverlay);
    }

    fn show_resize_indicator(&mut self, view: ViewId, geometry: Rect) {
        self.calls.push(PresentCall::ShowResizeIndicator(view, geometry));
    }

    fn hide_resize_indicator(&mut self) {
        self.calls.push(PresentCall::HideResizeIndicator);
    }

    fn create_cycle_osd(&mut self, output: OutputId, panel: Rect, items: &[OsdItem], selected: usize) {
        self.calls.push(PresentCall::CreateCycleOsd { output, panel, items: items.to_vec(), selected });
    }

    fn highlight_cycle_osd(&mut self, output: OutputId, selected: usize) {
        self.calls.push(PresentCall::HighlightCycleOsd { output, selected });
    }

    fn destroy_cycle_osd(&mut self, output: OutputId) {
        self.calls.push(PresentCall::DestroyCycleOsd(output));
    }

    fn configure_view(&mut self, view: ViewId, geometry: Rect) {
        self.calls.push(PresentCall::ConfigureView(view, geometry));
    }
}

/// Timer driven by hand: records the requested delay, the host fires it.
#[derive(Debug, Default, Clone)]
pub struct ManualTimer {
    pub armed: Option<Duration>,
    pub arm_count: usize,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Expire the timer. Returns whether it was armed; the caller then
    /// delivers `Event::OverlayTimeout`.
    pub fn fire(&mut self) -> bool {
        self.armed.take().is_some()
    }
}

impl OverlayTimer for ManualTimer {
    fn arm(&mut self, delay: Duration) {
        self.armed = Some(delay);
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.armed = None;
    }
}
