// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for upload, removal and load feedback.
//!
//! ```ignore
//! use crate::ui::notifications::{Manager, Notification};
//!
//! let mut manager = Manager::new();
//! manager.push(
//!     Notification::success("notification-upload-success-title")
//!         .with_description("notification-upload-success-description")
//!         .with_arg("name", "report.pdf"),
//! );
//! let overlay = Toast::view_overlay(&manager, &i18n).map(Message::Notification);
//! ```
//!
//! Success and info toasts last 3s, warnings 5s, errors until dismissed.
//! At most three are visible; the rest wait in a queue.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
