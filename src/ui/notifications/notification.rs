// SPDX-License-Identifier: MPL-2.0
//! Notification data and severity levels.

use crate::config::{TOAST_LONG_SECS, TOAST_SHORT_SECS};
use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines display duration and accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Green, short duration.
    #[default]
    Success,
    /// Blue, short duration.
    Info,
    /// Orange, long duration.
    Warning,
    /// Red, stays until dismissed.
    Error,
}

impl Severity {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Returns `None` for errors (manual dismiss required).
    #[must_use]
    pub fn auto_dismiss_duration(self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(TOAST_SHORT_SECS)),
            Severity::Warning => Some(Duration::from_secs(TOAST_LONG_SECS)),
            Severity::Error => None,
        }
    }
}

/// A titled message shown as a toast.
///
/// Keys are resolved through i18n at render time, so a language switch also
/// applies to notifications already on screen.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    title_key: String,
    description_key: Option<String>,
    args: Vec<(String, String)>,
    created_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, title_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            title_key: title_key.into(),
            description_key: None,
            args: Vec::new(),
            created_at: Instant::now(),
        }
    }

    pub fn success(title_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, title_key)
    }

    pub fn info(title_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, title_key)
    }

    pub fn warning(title_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title_key)
    }

    pub fn error(title_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, title_key)
    }

    /// Adds a body line below the title.
    #[must_use]
    pub fn with_description(mut self, description_key: impl Into<String>) -> Self {
        self.description_key = Some(description_key.into());
        self
    }

    /// Adds an interpolation argument, available to both title and body.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn title_key(&self) -> &str {
        &self.title_key
    }

    #[must_use]
    pub fn description_key(&self) -> Option<&str> {
        self.description_key.as_deref()
    }

    #[must_use]
    pub fn args(&self) -> &[(String, String)] {
        &self.args
    }

    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    #[must_use]
    pub fn should_auto_dismiss(&self) -> bool {
        self.severity
            .auto_dismiss_duration()
            .is_some_and(|duration| self.age() >= duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::success("test");
        let n2 = Notification::success("test");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn error_severity_has_no_auto_dismiss() {
        assert!(Severity::Error.auto_dismiss_duration().is_none());
        assert!(!Notification::error("x").should_auto_dismiss());
    }

    #[test]
    fn warning_outlasts_success() {
        assert_eq!(
            Severity::Success.auto_dismiss_duration(),
            Severity::Info.auto_dismiss_duration()
        );
        assert!(
            Severity::Warning.auto_dismiss_duration() > Severity::Success.auto_dismiss_duration()
        );
    }

    #[test]
    fn builder_collects_description_and_args() {
        let notification = Notification::success("notification-upload-success-title")
            .with_description("notification-upload-success-description")
            .with_arg("name", "report.pdf");

        assert_eq!(notification.severity(), Severity::Success);
        assert_eq!(
            notification.description_key(),
            Some("notification-upload-success-description")
        );
        assert_eq!(
            notification.args(),
            &[("name".to_string(), "report.pdf".to_string())]
        );
    }

    #[test]
    fn fresh_success_is_not_yet_dismissed() {
        assert!(!Notification::success("x").should_auto_dismiss());
    }
}
