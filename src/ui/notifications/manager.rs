// SPDX-License-Identifier: MPL-2.0
//! Notification queue and expiry.

use super::notification::{Notification, NotificationId, Severity};
use crate::config::MAX_VISIBLE_TOASTS;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
    /// Periodic check of auto-dismiss timers.
    Tick,
}

/// Visible toasts plus a FIFO of those waiting for room.
#[derive(Debug, Default)]
pub struct Manager {
    /// Newest first.
    visible: VecDeque<Notification>,
    queue: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `notification` now if there is room, otherwise queues it.
    pub fn push(&mut self, notification: Notification) {
        match notification.severity() {
            Severity::Warning => log::warn!("Notification: {}", notification.title_key()),
            Severity::Error => log::error!("Notification: {}", notification.title_key()),
            Severity::Success | Severity::Info => {
                log::debug!("Notification: {}", notification.title_key());
            }
        }

        if self.visible.len() < MAX_VISIBLE_TOASTS {
            self.visible.push_front(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Returns `true` if the notification was found and removed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            return true;
        }

        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            return true;
        }

        false
    }

    /// Removes expired toasts.
    pub fn tick(&mut self) {
        let expired: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|n| n.should_auto_dismiss())
            .map(Notification::id)
            .collect();

        for id in expired {
            self.dismiss(id);
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick => self.tick(),
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    /// Drops pending load errors, visible or queued.
    ///
    /// Called once a document opens so an error about a previous file does
    /// not linger next to the new one.
    pub fn clear_load_errors(&mut self) {
        let is_load_error = |n: &Notification| n.title_key().starts_with("notification-load-error");
        let visible_before = self.visible.len();
        self.visible.retain(|n| !is_load_error(n));
        self.queue.retain(|n| !is_load_error(n));

        if self.visible.len() < visible_before {
            self.promote_from_queue();
        }
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE_TOASTS {
            let Some(notification) = self.queue.pop_front() else {
                break;
            };
            self.visible.push_back(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_manager_is_empty() {
        let manager = Manager::new();
        assert_eq!(manager.visible_count(), 0);
        assert!(!manager.has_notifications());
    }

    #[test]
    fn push_queues_beyond_visible_limit() {
        let mut manager = Manager::new();
        for i in 0..MAX_VISIBLE_TOASTS + 2 {
            manager.push(Notification::info(format!("n-{i}")));
        }
        assert_eq!(manager.visible_count(), MAX_VISIBLE_TOASTS);
        assert_eq!(manager.queued_count(), 2);
    }

    #[test]
    fn dismiss_promotes_oldest_queued() {
        let mut manager = Manager::new();
        for i in 0..MAX_VISIBLE_TOASTS {
            manager.push(Notification::error(format!("visible-{i}")));
        }
        manager.push(Notification::error("queued-first"));
        manager.push(Notification::error("queued-second"));

        let first_visible = manager.visible().next().expect("visible").id();
        assert!(manager.dismiss(first_visible));

        assert_eq!(manager.visible_count(), MAX_VISIBLE_TOASTS);
        assert_eq!(manager.queued_count(), 1);
        assert!(manager.visible().any(|n| n.title_key() == "queued-first"));
    }

    #[test]
    fn dismiss_unknown_returns_false() {
        let mut manager = Manager::new();
        assert!(!manager.dismiss(NotificationId::new()));
    }

    #[test]
    fn dismiss_message_removes_notification() {
        let mut manager = Manager::new();
        let notification = Notification::error("x");
        let id = notification.id();
        manager.push(notification);
        manager.handle_message(&Message::Dismiss(id));
        assert!(!manager.has_notifications());
    }

    #[test]
    fn tick_keeps_errors() {
        let mut manager = Manager::new();
        manager.push(Notification::error("x"));
        manager.handle_message(&Message::Tick);
        assert_eq!(manager.visible_count(), 1);
    }

    #[test]
    fn clear_load_errors_keeps_other_notifications() {
        let mut manager = Manager::new();
        manager.push(Notification::error("notification-load-error-title"));
        manager.push(Notification::error("notification-invalid-type-title"));
        manager.clear_load_errors();

        assert_eq!(manager.visible_count(), 1);
        assert_eq!(
            manager.visible().next().map(Notification::title_key),
            Some("notification-invalid-type-title")
        );
    }
}
