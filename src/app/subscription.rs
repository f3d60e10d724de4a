// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use crate::config::TICK_INTERVAL_MS;
use iced::{event, time, window, Event, Subscription};
use std::time::Duration;

/// Routes window drag-and-drop events.
///
/// Every dropped file is claimed here, so nothing is ever handed back to the
/// host. Whether a drop is used is decided in `update`.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window| match event {
        Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
        Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    })
}

/// Periodic tick while something animates or expires.
pub fn create_tick_subscription(is_busy: bool, has_notifications: bool) -> Subscription<Message> {
    if is_busy || has_notifications {
        time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
