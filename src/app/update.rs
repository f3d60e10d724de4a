// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Flow of a file through the app:
//!
//! 1. Browse result or window drop → [`FileIntake::submit`](crate::document::FileIntake::submit)
//! 2. Accepted → `DocumentSession::accept` → `DocumentViewer::load` → open task
//! 3. `DocumentLoaded` → `finish_load` → render task for the current page
//! 4. `PageRendered` → `finish_render` → page shown
//!
//! Tasks carry the tickets they were issued for; the viewer drops any
//! completion that no longer matches.

use super::{App, Message, Mode};
use crate::config;
use crate::document::{IncomingFile, IntakeSource, LoadOutcome, LoadTicket, RenderOutcome};
use crate::error::DocumentError;
use crate::ui::document_view;
use crate::ui::notifications::Notification;
use crate::ui::upload;
use iced::Task;
use std::path::PathBuf;

impl App {
    pub(super) fn handle_message(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Upload(message) => self.handle_upload_message(message),
            Message::Document(message) => self.handle_document_message(message),
            Message::Notification(message) => {
                self.notifications.handle_message(&message);
                Task::none()
            }
            Message::OpenFileDialogResult(path) => self.handle_open_file_dialog_result(path),
            Message::FileHovered => {
                self.intake.file_hovered();
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.intake.hover_left();
                Task::none()
            }
            Message::FileDropped(path) => self.handle_file_dropped(path),
            Message::DocumentLoaded { ticket, result } => self.handle_document_loaded(&ticket, result),
            Message::PageRendered { ticket, result } => {
                match self.viewer.finish_render(ticket, result) {
                    RenderOutcome::Ready(page) => self.page_image = Some(page.into()),
                    RenderOutcome::Failed(err) => self.notify_document_error(&err),
                    RenderOutcome::Stale => {}
                }
                Task::none()
            }
            Message::Tick(_) => {
                self.notifications.tick();
                if self.is_busy() {
                    self.spinner.tick();
                }
                Task::none()
            }
        }
    }

    fn handle_upload_message(&mut self, message: upload::Message) -> Task<Message> {
        match message {
            upload::Message::SelectFile => self.open_file_dialog(),
            upload::Message::PointerEntered => {
                self.intake.pointer_entered();
                Task::none()
            }
            upload::Message::PointerLeft => {
                self.intake.pointer_left();
                Task::none()
            }
        }
    }

    fn handle_document_message(&mut self, message: document_view::Message) -> Task<Message> {
        let changed = match message {
            document_view::Message::PrevPage => self.viewer.prev_page(),
            document_view::Message::NextPage => self.viewer.next_page(),
            document_view::Message::ZoomIn => self.viewer.zoom_in(),
            document_view::Message::ZoomOut => self.viewer.zoom_out(),
            document_view::Message::Remove => {
                self.remove_document();
                return Task::none();
            }
        };

        if changed {
            self.request_render()
        } else {
            Task::none()
        }
    }

    fn open_file_dialog(&mut self) -> Task<Message> {
        if self.dialog_open {
            return Task::none();
        }
        self.dialog_open = true;

        let title = self.i18n.tr("file-dialog-title");
        let filter = self.i18n.tr("file-dialog-filter");
        let last_directory = self.config.upload.last_open_directory.clone();

        Task::perform(
            async move {
                let mut dialog = rfd::AsyncFileDialog::new()
                    .set_title(&title)
                    .add_filter(&filter, &["pdf", "PDF"]);

                if let Some(dir) = last_directory {
                    if dir.exists() {
                        dialog = dialog.set_directory(&dir);
                    }
                }

                dialog.pick_file().await.map(|h| h.path().to_path_buf())
            },
            Message::OpenFileDialogResult,
        )
    }

    fn handle_open_file_dialog_result(&mut self, path: Option<PathBuf>) -> Task<Message> {
        self.dialog_open = false;
        let Some(path) = path else {
            // Cancelled
            return Task::none();
        };

        self.config.upload.remember_directory_of(&path);
        if let Err(err) = config::save(&self.config) {
            log::warn!("Failed to save settings: {}", err);
            self.notifications
                .push(Notification::warning("notification-config-save-error"));
        }

        self.submit(IntakeSource::Browse, vec![IncomingFile::from_path(path)])
    }

    fn handle_file_dropped(&mut self, path: PathBuf) -> Task<Message> {
        match self.intake.file_dropped(path) {
            Some(batch) => self.submit(IntakeSource::Drop, batch),
            None => Task::none(),
        }
    }

    /// Runs a batch through the intake and, if accepted, starts loading it.
    pub(super) fn submit(&mut self, source: IntakeSource, batch: Vec<IncomingFile>) -> Task<Message> {
        let candidate = match self.intake.submit(source, batch) {
            Ok(Some(candidate)) => candidate,
            Ok(None) => return Task::none(),
            Err(err) => {
                self.notifications.push(
                    Notification::error(err.title_key())
                        .with_description(err.description_key())
                        .with_arg("name", err.file_name()),
                );
                return Task::none();
            }
        };

        let name = candidate.name().to_string();
        let reference = self.session.accept(candidate);
        self.page_image = None;
        self.spinner.reset();
        let ticket = self.viewer.load(reference);

        self.notifications.push(
            Notification::success("notification-upload-success-title")
                .with_description("notification-upload-success-description")
                .with_arg("name", name),
        );

        self.open_document(ticket)
    }

    fn open_document(&self, ticket: LoadTicket) -> Task<Message> {
        let Some(bytes) = self.session.resolve(ticket.reference()) else {
            return Task::done(Message::DocumentLoaded {
                ticket,
                result: Err(DocumentError::Released),
            });
        };
        let renderer = self.renderer.clone();

        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || renderer.open(&bytes))
                    .await
                    .map_err(|e| DocumentError::Backend(e.to_string()))?
            },
            move |result| Message::DocumentLoaded { ticket, result },
        )
    }

    fn handle_document_loaded(
        &mut self,
        ticket: &LoadTicket,
        result: Result<crate::document::DocumentInfo, DocumentError>,
    ) -> Task<Message> {
        match self.viewer.finish_load(ticket, result) {
            LoadOutcome::Ready { .. } => {
                self.notifications.clear_load_errors();
                self.request_render()
            }
            LoadOutcome::Failed(err) => {
                self.notify_document_error(&err);
                Task::none()
            }
            LoadOutcome::Stale => Task::none(),
        }
    }

    /// Starts rendering the current page at the current zoom, if needed.
    fn request_render(&mut self) -> Task<Message> {
        let Some(ticket) = self.viewer.request_render() else {
            return Task::none();
        };
        let Some(bytes) = self
            .viewer
            .reference()
            .and_then(|reference| self.session.resolve(reference))
        else {
            return Task::done(Message::PageRendered {
                ticket,
                result: Err(DocumentError::Released),
            });
        };
        let renderer = self.renderer.clone();
        let info = self.viewer.document_info();

        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    let (page, zoom) = (ticket.page_index(), ticket.zoom.value());
                    match info {
                        Some(info) => renderer.render_known_page(&bytes, &info, page, zoom),
                        None => renderer.render_page(&bytes, page, zoom),
                    }
                })
                .await
                .map_err(|e| DocumentError::Backend(e.to_string()))?
            },
            move |result| Message::PageRendered { ticket, result },
        )
    }

    fn remove_document(&mut self) {
        if self.mode() != Mode::Document {
            return;
        }
        self.session.clear();
        self.viewer.unload();
        self.page_image = None;
        self.spinner.reset();

        log::info!("Document removed");
        self.notifications.push(
            Notification::info("notification-removed-title")
                .with_description("notification-removed-description"),
        );
    }

    fn notify_document_error(&mut self, err: &DocumentError) {
        self.notifications.push(
            Notification::error(err.title_key()).with_description(err.description_key()),
        );
    }
}
