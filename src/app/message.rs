// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::document::{DocumentInfo, LoadTicket, RenderTicket, RenderedPage};
use crate::error::DocumentError;
use crate::ui::notifications;
use crate::ui::{document_view, upload};
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. Screen messages are
/// forwarded unchanged; the remaining variants come from tasks and
/// subscriptions.
#[derive(Debug, Clone)]
pub enum Message {
    Upload(upload::Message),
    Document(document_view::Message),
    Notification(notifications::NotificationMessage),
    /// Result from the "Select File" dialog (`None` if cancelled).
    OpenFileDialogResult(Option<PathBuf>),
    /// A file is dragged over the window.
    FileHovered,
    /// The drag left the window without dropping.
    FilesHoveredLeft,
    /// A file was dropped on the window. Emitted once per file.
    FileDropped(PathBuf),
    /// The renderer finished opening a document.
    DocumentLoaded {
        ticket: LoadTicket,
        result: Result<DocumentInfo, DocumentError>,
    },
    /// The renderer finished drawing a page.
    PageRendered {
        ticket: RenderTicket,
        result: Result<RenderedPage, DocumentError>,
    },
    /// Periodic tick for the spinner and toast expiry.
    Tick(Instant),
}

/// Runtime flags passed in from the launcher.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional PDF to open on startup.
    pub file_path: Option<String>,
}
