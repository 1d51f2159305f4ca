//! # Notifications
//!
//! Short-lived messages (toasts) the store emits after user-visible actions.
//!
//! ## Delivery Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Notification Delivery                              │
//! │                                                                         │
//! │  ProductStore ──notify(&Notification)──► Arc<dyn NotificationSink>     │
//! │                                               │                         │
//! │              ┌────────────────────────────────┼──────────────────┐     │
//! │              ▼                                ▼                  ▼      │
//! │       NoOpNotifier                  TracingNotifier     RecordingNotifier
//! │       (disabled)                    (log lines)         (kept in memory)│
//! │                                                                         │
//! │  Fire and forget: the sink returns nothing and the store never waits   │
//! │  on it or checks that anything was shown.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

/// How long a toast stays visible unless configured otherwise.
pub const DEFAULT_VISIBILITY: Duration = Duration::from_millis(3000);

// =============================================================================
// Notification
// =============================================================================

/// Toast style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// One toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub body: Option<String>,
    pub visibility: Duration,
}

impl Notification {
    pub fn new(severity: Severity, title: impl Into<String>, body: Option<String>) -> Self {
        Notification {
            severity,
            title: title.into(),
            body,
            visibility: DEFAULT_VISIBILITY,
        }
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, Some(body.into()))
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, Some(body.into()))
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, Some(body.into()))
    }

    pub fn with_visibility(mut self, visibility: Duration) -> Self {
        self.visibility = visibility;
        self
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Somewhere to show notifications.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Drops everything. Used when notifications are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotifier;

impl NotificationSink for NoOpNotifier {
    fn notify(&self, _notification: &Notification) {}
}

/// Writes each notification as a log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, n: &Notification) {
        let body = n.body.as_deref().unwrap_or_default();
        match n.severity {
            Severity::Error => warn!(title = %n.title, body, "notification"),
            Severity::Success | Severity::Info => {
                info!(severity = ?n.severity, title = %n.title, body, "notification")
            }
        }
    }
}

/// Keeps every notification in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out everything recorded so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}
