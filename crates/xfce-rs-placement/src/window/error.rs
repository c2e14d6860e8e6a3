use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::window::input_mode::InputMode;
use crate::window::output::OutputId;
use crate::window::view::ViewId;

/// Why a placement operation did not run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("cannot enter {requested:?} while in {current:?}")]
    InvalidTransition { current: InputMode, requested: InputMode },

    #[error("view {0} cannot be moved or resized interactively")]
    NotMovable(ViewId),

    #[error("view {view} refuses {requested:?} in its current state")]
    StateRefused { view: ViewId, requested: InputMode },

    #[error("no focusable views to cycle through")]
    NoCycleCandidates,

    #[error("rejected configuration: {0}")]
    InvalidConfig(String),

    #[error("view {0} no longer exists")]
    StaleView(ViewId),

    #[error("output {0} no longer exists")]
    StaleOutput(OutputId),
}

impl PlacementError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlacementError::InvalidTransition { .. }
            | PlacementError::NotMovable(_)
            | PlacementError::StateRefused { .. }
            | PlacementError::InvalidConfig(_) => ErrorCategory::PreconditionViolation,
            PlacementError::NoCycleCandidates => ErrorCategory::ResourceUnavailable,
            PlacementError::StaleView(_) | PlacementError::StaleOutput(_) => ErrorCategory::StaleReference,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input raced with state; expected and never surfaced.
    PreconditionViolation,
    /// Nothing to operate on; the operation aborted with state unchanged.
    ResourceUnavailable,
    /// A handle outlived its target.
    StaleReference,
}

/// Counts aborted operations per category.
pub struct ErrorTracker {
    precondition: AtomicU64,
    unavailable: AtomicU64,
    stale: AtomicU64,
}

impl ErrorTracker {
    pub fn new() -> Self {
        Self {
            precondition: AtomicU64::new(0),
            unavailable: AtomicU64::new(0),
            stale: AtomicU64::new(0),
        }
    }

    pub fn record(&self, operation: &str, error: &PlacementError) {
        match error.category() {
            ErrorCategory::PreconditionViolation => {
                self.precondition.fetch_add(1, Ordering::Relaxed);
                debug!("Ignoring {}: {}", operation, error);
            }
            ErrorCategory::ResourceUnavailable => {
                self.unavailable.fetch_add(1, Ordering::Relaxed);
                info!("Aborting {}: {}", operation, error);
            }
            ErrorCategory::StaleReference => {
                self.stale.fetch_add(1, Ordering::Relaxed);
                warn!("Stale reference in {}: {}", operation, error);
            }
        }
    }

    /// Log and swallow a failed operation.
    pub fn absorb<T>(&self, result: Result<T, PlacementError>, operation: &str) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.record(operation, &e);
                None
            }
        }
    }

    pub fn health_check(&self) -> HealthStatus {
        HealthStatus {
            precondition_violations: self.precondition.load(Ordering::Relaxed),
            unavailable_resources: self.unavailable.load(Ordering::Relaxed),
            stale_references: self.stale.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub precondition_violations: u64,
    pub unavailable_resources: u64,
    pub stale_references: u64,
}

impl Default for ErrorTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ErrorTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorTracker").field("health", &self.health_check()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_counts_by_category() {
        let tracker = ErrorTracker::new();
        let failed: Result<(), _> = Err(PlacementError::NoCycleCandidates);
        assert!(tracker.absorb(failed, "cycle begin").is_none());
        let ignored: Result<(), _> = Err(PlacementError::InvalidTransition {
            current: InputMode::Move,
            requested: InputMode::Cycle,
        });
        assert!(tracker.absorb(ignored, "cycle begin").is_none());
        assert_eq!(tracker.absorb(Ok::<_, PlacementError>(7), "noop"), Some(7));

        let health = tracker.health_check();
        assert_eq!(health.unavailable_resources, 1);
        assert_eq!(health.precondition_violations, 1);
        assert_eq!(health.stale_references, 0);
    }
}
