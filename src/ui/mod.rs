// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Screens follow the "state down, messages up" pattern: each view takes a
//! borrowed context and emits its own `Message`, mapped by [`crate::app`].
//!
//! # Screens
//!
//! - [`upload`] - Drop area and "Select File" button
//! - [`document_view`] - File header, page/zoom controls and the rendered page
//!
//! # Shared Infrastructure
//!
//! - [`notifications`] - Toast notifications
//! - [`widgets`] - Canvas spinner
//! - [`styles`] - Button and container styles
//! - [`design_tokens`] - Colors, spacing, sizing
//! - [`theming`] - Light/Dark/System theme mode

pub mod design_tokens;
pub mod document_view;
pub mod notifications;
pub mod styles;
pub mod theming;
pub mod upload;
pub mod widgets;
