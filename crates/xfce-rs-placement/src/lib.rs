//! Interactive window placement: move/resize grabs, edge and region
//! snapping with a delayed preview, and Alt-Tab window cycling.
//!
//! Everything is driven through [`WindowManager::handle_event`]. Drawing and
//! timers are left to the embedder through [`Presenter`] and [`OverlayTimer`].

pub mod config;
pub mod core;
pub mod cycle;
pub mod present;
pub mod snap;
pub mod window;

pub use config::{ConfigError, PlacementConfig, RegionConfig};
pub use crate::core::{Axes, Direction, Edges, Modifiers, Point, Rect};
pub use cycle::{CycleController, CycleDirection};
pub use present::{ManualTimer, NullPresenter, OverlayKind, OverlayTimer, PresentCall, Presenter, RecordingPresenter};
pub use snap::{OverlayState, RegionId};
pub use window::desktop::Desktop;
pub use window::error::{ErrorCategory, ErrorTracker, HealthStatus, PlacementError};
pub use window::input_mode::InputMode;
pub use window::interactive::{Grab, GrabKind};
pub use window::manager::{Action, Event, WindowManager};
pub use window::output::{Output, OutputId};
pub use window::view::{PlacementState, View, ViewFlags, ViewId};
