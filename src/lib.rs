// SPDX-License-Identifier: MPL-2.0
//! `pdf_lens` is a small PDF upload-and-view application built with the Iced
//! GUI framework.
//!
//! A document is accepted from a file dialog or a drag-and-drop onto the
//! window, kept in memory behind a session reference and rendered one page at
//! a time with page navigation and stepped zoom.

#![doc(html_root_url = "https://docs.rs/pdf_lens/0.1.0")]

pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod i18n;
pub mod ui;
