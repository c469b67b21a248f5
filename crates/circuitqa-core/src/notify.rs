//! Toast notifications.
//!
//! A [`NotificationCenter`] holds the toasts currently on screen. Each call to
//! [`NotificationCenter::notify`] adds an independent entry; entries disappear
//! when dismissed or when their lifetime elapses (see [`NotificationCenter::expire`]).

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::UiError;

/// Default time a toast stays visible.
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(5);

/// Notification severity, which selects the toast styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn name(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Alert class suffix used by the markup (`error` renders as `danger`).
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A notification an operation asks the adapter to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    /// The notification that reports `err`.
    pub fn from_error(err: &UiError) -> Self {
        Self::new(err.severity(), err.user_message())
    }
}

/// Identifier of a notification within its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

/// A toast on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
    pub lifetime: Duration,
}

impl Notification {
    /// Whether the toast should have been dismissed automatically by `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.lifetime
    }
}

/// The set of notifications currently visible.
#[derive(Debug)]
pub struct NotificationCenter {
    next_id: u64,
    lifetime: Duration,
    active: Vec<Notification>,
}

impl NotificationCenter {
    /// Create a center using [`DEFAULT_LIFETIME`].
    pub fn new() -> Self {
        Self::with_lifetime(DEFAULT_LIFETIME)
    }

    /// Create a center with a custom auto-dismiss lifetime.
    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            next_id: 0,
            lifetime,
            active: Vec::new(),
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Show a notification created now.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.notify_at(message, severity, Instant::now())
    }

    /// Show a notification with an explicit creation time.
    pub fn notify_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        let message = message.into();
        tracing::debug!(id = id.0, %severity, "notify: {}", message);
        self.active.push(Notification {
            id,
            message,
            severity,
            created_at: now,
            lifetime: self.lifetime,
        });
        id
    }

    /// Show a [`Notice`] returned by an operation.
    pub fn show(&mut self, notice: Notice) -> NotificationId {
        self.notify(notice.message, notice.severity)
    }

    /// Dismiss a notification by hand. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        self.active.len() != before
    }

    /// Remove and return every notification whose lifetime has elapsed at `now`.
    pub fn expire(&mut self, now: Instant) -> Vec<Notification> {
        let (expired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|n| n.is_expired(now));
        self.active = kept;
        expired
    }

    /// Notifications currently visible, oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_notify_is_not_deduplicated() {
        let mut center = NotificationCenter::new();
        let a = center.notify("Saved", Severity::Success);
        let b = center.notify("Saved", Severity::Success);
        assert_ne!(a, b);
        assert_eq!(center.active().len(), 2);
    }

    #[test]
    fn test_dismiss() {
        let mut center = NotificationCenter::new();
        let id = center.notify("hello", Severity::Info);
        assert!(center.dismiss(id));
        assert!(!center.dismiss(id));
        assert!(center.is_empty());
    }

    #[test]
    fn test_expire_after_default_lifetime() {
        let mut center = NotificationCenter::new();
        let t0 = Instant::now();
        center.notify_at("first", Severity::Info, t0);
        center.notify_at("second", Severity::Warning, t0 + Duration::from_secs(3));

        assert!(center.expire(t0 + Duration::from_secs(4)).is_empty());

        let expired = center.expire(t0 + Duration::from_secs(5));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].message, "first");
        assert_eq!(center.active().len(), 1);

        let expired = center.expire(t0 + Duration::from_secs(8));
        assert_eq!(expired[0].message, "second");
        assert!(center.is_empty());
    }

    #[test]
    fn test_custom_lifetime() {
        let mut center = NotificationCenter::with_lifetime(Duration::from_millis(250));
        let t0 = Instant::now();
        center.notify_at("quick", Severity::Error, t0);
        assert_eq!(center.expire(t0 + Duration::from_millis(250)).len(), 1);
    }

    #[test]
    fn test_notice_from_error() {
        let notice = Notice::from_error(&UiError::Validation("Please enter a title".into()));
        assert_eq!(notice.severity, Severity::Warning);

        let mut center = NotificationCenter::new();
        center.show(notice);
        assert_eq!(center.active()[0].message, "Please enter a title");
    }

    #[test]
    fn test_error_severity_renders_as_danger() {
        assert_eq!(Severity::Error.css_class(), "danger");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
