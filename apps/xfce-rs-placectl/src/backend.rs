use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use xfce_rs_placement::present::OsdItem;
use xfce_rs_placement::{
    Event, OutputId, OverlayKind, OverlayTimer, Presenter, RecordingPresenter, Rect, ViewId, WindowManager,
};

use crate::scene::Step;

/// Logs every draw request and keeps a copy for the final report.
#[derive(Debug, Default)]
pub struct TracingPresenter {
    pub recorded: RecordingPresenter,
}

impl Presenter for TracingPresenter {
    fn show_overlay(&mut self, geometry: Rect, kind: OverlayKind) {
        info!("Overlay {:?} at {:?}", kind, geometry);
        self.recorded.show_overlay(geometry, kind);
    }

    fn hide_overlay(&mut self) {
        info!("Overlay hidden");
        self.recorded.hide_overlay();
    }

    fn show_resize_indicator(&mut self, view: ViewId, geometry: Rect) {
        debug!("Resize indicator for {}: {}x{}", view, geometry.width, geometry.height);
        self.recorded.show_resize_indicator(view, geometry);
    }

    fn hide_resize_indicator(&mut self) {
        debug!("Resize indicator hidden");
        self.recorded.hide_resize_indicator();
    }

    fn create_cycle_osd(&mut self, output: OutputId, panel: Rect, items: &[OsdItem], selected: usize) {
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        info!("Switcher on output {} at {:?}: {:?} (selected {})", output, panel, titles, selected);
        self.recorded.create_cycle_osd(output, panel, items, selected);
    }

    fn highlight_cycle_osd(&mut self, output: OutputId, selected: usize) {
        info!("Switcher on output {} selects {}", output, selected);
        self.recorded.highlight_cycle_osd(output, selected);
    }

    fn destroy_cycle_osd(&mut self, output: OutputId) {
        info!("Switcher on output {} closed", output);
        self.recorded.destroy_cycle_osd(output);
    }

    fn configure_view(&mut self, view: ViewId, geometry: Rect) {
        info!("Configure view {} to {:?}", view, geometry);
        self.recorded.configure_view(view, geometry);
    }
}

/// Overlay timer backed by the tokio clock. The replay loop polls
/// [`DeadlineTimer::deadline`] and delivers the timeout itself.
#[derive(Debug, Default)]
pub struct DeadlineTimer {
    deadline: Option<Instant>,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    fn expire(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}

impl OverlayTimer for DeadlineTimer {
    fn arm(&mut self, delay: Duration) {
        debug!("Overlay timer armed for {:?}", delay);
        self.deadline = Some(Instant::now() + delay);
    }

    fn disarm(&mut self) {
        if self.deadline.take().is_some() {
            debug!("Overlay timer disarmed");
        }
    }
}

pub type ReplayManager = WindowManager<TracingPresenter, DeadlineTimer>;

/// Feed every step to `wm`, sleeping through waits.
pub async fn replay(wm: &mut ReplayManager, steps: Vec<Step>) {
    for step in steps {
        match step {
            Step::Event(event) => {
                wm.handle_event(event);
            }
            Step::Wait(duration) => wait(wm, duration).await,
        }
    }
}

/// Let `duration` pass, firing the overlay timer whenever it expires first.
async fn wait(wm: &mut ReplayManager, duration: Duration) {
    let until = Instant::now() + duration;
    loop {
        let deadline = wm.timer.deadline();
        tokio::select! {
            biased;

            _ = sleep_until(deadline.unwrap_or(until)), if deadline.is_some_and(|d| d <= until) => {
                if wm.timer.expire() {
                    wm.handle_event(Event::OverlayTimeout);
                }
            }
            _ = sleep_until(until) => break,
        }
    }
}
