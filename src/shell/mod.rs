//! Integration seams toward the embedding shell.
//!
//! The client core never renders anything itself. Transient notifications,
//! the busy indicator and navigation/title changes go through these traits
//! so any shell (desktop window, terminal, test harness) can plug in.

use tracing::{debug, error, warn};

/// Transient user-facing notifications.
pub trait Notifier: Send + Sync {
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Busy indicator shown while a request or transition is in flight.
///
/// `start` and `finish` are paired exactly once per operation, whatever the
/// outcome.
pub trait ProgressIndicator: Send + Sync {
    fn start(&self);
    fn finish(&self);
}

/// Navigation sink: route changes and page title updates.
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
    fn set_title(&self, title: &str);
}

/// Notifier that forwards messages to the log.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn warning(&self, message: &str) {
        warn!(message, "user notification");
    }

    fn error(&self, message: &str) {
        error!(message, "user notification");
    }
}

/// Progress indicator that does nothing.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressIndicator for NullProgress {
    fn start(&self) {}
    fn finish(&self) {}
}

/// Navigator that only records the intent in the log.
#[derive(Debug, Default)]
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn push(&self, path: &str) {
        debug!(path, "navigation requested");
    }

    fn set_title(&self, title: &str) {
        debug!(title, "page title updated");
    }
}
