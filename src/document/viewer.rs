// SPDX-License-Identifier: MPL-2.0
//! Page and zoom state for the loaded document.
//!
//! Loading is split in two halves: [`DocumentViewer::load`] resets the view
//! synchronously and hands out a [`LoadTicket`]; the caller runs
//! [`DocumentRenderer::open`](super::renderer::DocumentRenderer::open) off the
//! update loop and reports back through [`DocumentViewer::finish_load`].
//! Every ticket carries a monotonic [`LoadRequestId`]; completions for any
//! request other than the latest are [`LoadOutcome::Stale`].
//!
//! Page rendering follows the same scheme with [`RenderTicket`]s that also
//! capture the page and zoom they were issued for.

use super::renderer::{DocumentInfo, RenderedPage};
use super::session::DocumentReference;
use super::zoom::ZoomFactor;
use crate::config::FIRST_PAGE;
use crate::error::DocumentError;
use std::sync::Arc;

/// Identifies one `load` call. Strictly increasing per viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LoadRequestId(u64);

impl LoadRequestId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Handed out by [`DocumentViewer::load`], returned with the load result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    request: LoadRequestId,
    reference: DocumentReference,
}

impl LoadTicket {
    #[must_use]
    pub fn request(&self) -> LoadRequestId {
        self.request
    }

    #[must_use]
    pub fn reference(&self) -> &DocumentReference {
        &self.reference
    }
}

/// Identifies one page rendering request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTicket {
    pub request: LoadRequestId,
    /// One-based page number.
    pub page: u32,
    pub zoom: ZoomFactor,
}

impl RenderTicket {
    /// Zero-based index as expected by renderers.
    #[must_use]
    pub fn page_index(&self) -> u32 {
        self.page.saturating_sub(FIRST_PAGE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// No document.
    #[default]
    Idle,
    /// Waiting for the renderer to open the document.
    Loading,
    /// Document open; pages can be rendered.
    Ready,
    /// Opening failed. No retry until a new reference is loaded.
    Failed,
}

/// Current page, known page count and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub page: u32,
    pub page_count: Option<u32>,
    pub zoom: ZoomFactor,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: FIRST_PAGE,
            page_count: None,
            zoom: ZoomFactor::default(),
        }
    }
}

/// Result of feeding a load completion to the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready { page_count: u32 },
    Failed(DocumentError),
    /// The completion belongs to a superseded request and was ignored.
    Stale,
}

/// Result of feeding a render completion to the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Ready(RenderedPage),
    Failed(DocumentError),
    Stale,
}

#[derive(Debug, Default)]
pub struct DocumentViewer {
    phase: LoadPhase,
    reference: Option<DocumentReference>,
    view: ViewState,
    info: Option<Arc<DocumentInfo>>,
    latest: LoadRequestId,
    pending_render: Option<RenderTicket>,
    displayed: Option<RenderTicket>,
    failed_render: Option<RenderTicket>,
}

impl DocumentViewer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts loading `reference`, superseding any load in flight.
    ///
    /// Resets the view to page 1 at zoom 1.0 with an unknown page count.
    pub fn load(&mut self, reference: DocumentReference) -> LoadTicket {
        self.latest = LoadRequestId(self.latest.0 + 1);
        self.phase = LoadPhase::Loading;
        self.view = ViewState::default();
        self.info = None;
        self.pending_render = None;
        self.displayed = None;
        self.failed_render = None;
        self.reference = Some(reference.clone());

        log::debug!("Load request {} for {}", self.latest.0, reference);
        LoadTicket {
            request: self.latest,
            reference,
        }
    }

    /// Applies the renderer's answer to a [`load`](Self::load) call.
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<DocumentInfo, DocumentError>,
    ) -> LoadOutcome {
        if ticket.request != self.latest || self.phase != LoadPhase::Loading {
            log::debug!(
                "Discarding stale load completion {} (latest is {})",
                ticket.request.0,
                self.latest.0
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(info) => {
                let page_count = info.page_count();
                self.view.page_count = Some(page_count);
                self.info = Some(Arc::new(info));
                self.phase = LoadPhase::Ready;
                log::info!("{} opened with {} page(s)", ticket.reference, page_count);
                LoadOutcome::Ready { page_count }
            }
            Err(err) => {
                self.phase = LoadPhase::Failed;
                log::error!("Failed to open {}: {}", ticket.reference, err);
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Drops the document and its view state.
    ///
    /// Any load or render still in flight becomes stale.
    pub fn unload(&mut self) {
        self.latest = LoadRequestId(self.latest.0 + 1);
        self.phase = LoadPhase::Idle;
        self.reference = None;
        self.view = ViewState::default();
        self.info = None;
        self.pending_render = None;
        self.displayed = None;
        self.failed_render = None;
    }

    /// Moves to the next page. Returns `false` on the last page or while the
    /// page count is unknown.
    pub fn next_page(&mut self) -> bool {
        if !self.can_next_page() {
            return false;
        }
        self.view.page += 1;
        true
    }

    /// Moves to the previous page. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        if !self.can_prev_page() {
            return false;
        }
        self.view.page -= 1;
        true
    }

    /// Zooms in by one step. Returns `false` at the maximum.
    pub fn zoom_in(&mut self) -> bool {
        if !self.can_zoom_in() {
            return false;
        }
        self.view.zoom = self.view.zoom.zoom_in();
        true
    }

    /// Zooms out by one step. Returns `false` at the minimum.
    pub fn zoom_out(&mut self) -> bool {
        if !self.can_zoom_out() {
            return false;
        }
        self.view.zoom = self.view.zoom.zoom_out();
        true
    }

    #[must_use]
    pub fn can_next_page(&self) -> bool {
        self.reference.is_some()
            && self
                .view
                .page_count
                .is_some_and(|count| self.view.page < count)
    }

    #[must_use]
    pub fn can_prev_page(&self) -> bool {
        self.reference.is_some() && self.view.page > FIRST_PAGE
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.reference.is_some() && !self.view.zoom.is_max()
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.reference.is_some() && !self.view.zoom.is_min()
    }

    /// The ticket describing what should currently be on screen.
    #[must_use]
    pub fn current_ticket(&self) -> RenderTicket {
        RenderTicket {
            request: self.latest,
            page: self.view.page,
            zoom: self.view.zoom,
        }
    }

    /// Issues a render ticket if the current page at the current zoom is
    /// not displayed, pending, or already failed.
    pub fn request_render(&mut self) -> Option<RenderTicket> {
        if self.phase != LoadPhase::Ready {
            return None;
        }
        let ticket = self.current_ticket();
        if [self.displayed, self.pending_render, self.failed_render].contains(&Some(ticket)) {
            return None;
        }
        self.pending_render = Some(ticket);
        Some(ticket)
    }

    /// Applies a render completion; only the current ticket is accepted.
    pub fn finish_render(
        &mut self,
        ticket: RenderTicket,
        result: Result<RenderedPage, DocumentError>,
    ) -> RenderOutcome {
        if self.phase != LoadPhase::Ready || ticket != self.current_ticket() {
            log::debug!(
                "Discarding stale render of page {} at {}",
                ticket.page,
                ticket.zoom
            );
            return RenderOutcome::Stale;
        }

        self.pending_render = None;
        match result {
            Ok(page) => {
                self.displayed = Some(ticket);
                RenderOutcome::Ready(page)
            }
            Err(err) => {
                self.failed_render = Some(ticket);
                log::error!("Failed to render page {}: {}", ticket.page, err);
                RenderOutcome::Failed(err)
            }
        }
    }

    /// A render for the current page and zoom is in flight.
    #[must_use]
    pub fn is_rendering(&self) -> bool {
        self.phase == LoadPhase::Ready && self.pending_render == Some(self.current_ticket())
    }

    /// The current page at the current zoom could not be drawn.
    #[must_use]
    pub fn render_failed(&self) -> bool {
        self.phase == LoadPhase::Ready && self.failed_render == Some(self.current_ticket())
    }

    /// The current page at the current zoom is on screen.
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.phase == LoadPhase::Ready && self.displayed == Some(self.current_ticket())
    }

    /// What the renderer reported when the document was opened.
    #[must_use]
    pub fn document_info(&self) -> Option<Arc<DocumentInfo>> {
        self.info.clone()
    }

    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.view.page
    }

    #[must_use]
    pub fn page_count(&self) -> Option<u32> {
        self.view.page_count
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomFactor {
        self.view.zoom
    }

    #[must_use]
    pub fn reference(&self) -> Option<&DocumentReference> {
        self.reference.as_ref()
    }

    #[must_use]
    pub fn latest_request(&self) -> LoadRequestId {
        self.latest
    }

    /// Ticket of the load currently in flight, if any.
    #[must_use]
    pub fn pending_load(&self) -> Option<LoadTicket> {
        if self.phase != LoadPhase::Loading {
            return None;
        }
        self.reference.clone().map(|reference| LoadTicket {
            request: self.latest,
            reference,
        })
    }

    /// `"{page} / {count}"`, with `?` while the count is unknown.
    #[must_use]
    pub fn page_label(&self) -> String {
        match self.view.page_count {
            Some(count) => format!("{} / {}", self.view.page, count),
            None => format!("{} / ?", self.view.page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::intake::{FileIntake, IncomingFile, IntakeSource, PDF_MEDIA_TYPE};
    use crate::document::renderer::PageSize;
    use crate::document::session::DocumentSession;

    fn info(pages: usize) -> DocumentInfo {
        DocumentInfo {
            page_sizes: vec![
                PageSize {
                    width_pt: 100.0,
                    height_pt: 100.0
                };
                pages
            ],
        }
    }

    fn reference(session: &mut DocumentSession, name: &str) -> DocumentReference {
        let candidate = FileIntake::new()
            .submit(
                IntakeSource::Drop,
                vec![IncomingFile::from_bytes(name, PDF_MEDIA_TYPE, vec![0_u8; 8])],
            )
            .expect("accepted")
            .expect("present");
        session.accept(candidate)
    }

    fn ready_viewer(pages: usize) -> DocumentViewer {
        let mut session = DocumentSession::new();
        let mut viewer = DocumentViewer::new();
        let ticket = viewer.load(reference(&mut session, "doc.pdf"));
        viewer.finish_load(&ticket, Ok(info(pages)));
        viewer
    }

    #[test]
    fn pending_load_tracks_the_latest_request() {
        let mut session = DocumentSession::new();
        let mut viewer = DocumentViewer::new();
        assert!(viewer.pending_load().is_none());

        let ticket = viewer.load(reference(&mut session, "doc.pdf"));
        assert_eq!(viewer.pending_load(), Some(ticket.clone()));

        viewer.finish_load(&ticket, Ok(info(2)));
        assert!(viewer.pending_load().is_none());
    }

    #[test]
    fn load_resets_view_and_enters_loading() {
        let mut viewer = ready_viewer(5);
        viewer.next_page();
        viewer.zoom_in();

        let mut session = DocumentSession::new();
        viewer.load(reference(&mut session, "other.pdf"));

        assert!(viewer.is_loading());
        assert_eq!(viewer.view(), ViewState::default());
        assert_eq!(viewer.page_label(), "1 / ?");
    }

    #[test]
    fn successful_load_records_page_count() {
        let viewer = ready_viewer(10);
        assert_eq!(viewer.phase(), LoadPhase::Ready);
        assert_eq!(viewer.page_count(), Some(10));
        assert_eq!(viewer.page_label(), "1 / 10");
    }

    #[test]
    fn failed_load_enters_failed() {
        let mut session = DocumentSession::new();
        let mut viewer = DocumentViewer::new();
        let ticket = viewer.load(reference(&mut session, "bad.pdf"));
        let outcome = viewer.finish_load(&ticket, Err(DocumentError::Malformed("eof".into())));

        assert_eq!(outcome, LoadOutcome::Failed(DocumentError::Malformed("eof".into())));
        assert_eq!(viewer.phase(), LoadPhase::Failed);
        assert!(!viewer.is_loading());
        assert!(viewer.request_render().is_none());
    }

    #[test]
    fn stale_load_completion_is_discarded() {
        let mut session = DocumentSession::new();
        let mut viewer = DocumentViewer::new();
        let first = viewer.load(reference(&mut session, "a.pdf"));
        let second = viewer.load(reference(&mut session, "b.pdf"));

        assert_eq!(viewer.finish_load(&first, Ok(info(3))), LoadOutcome::Stale);
        assert!(viewer.is_loading());
        assert_eq!(viewer.page_count(), None);

        assert_eq!(
            viewer.finish_load(&second, Ok(info(7))),
            LoadOutcome::Ready { page_count: 7 }
        );
        assert_eq!(viewer.page_count(), Some(7));
    }

    #[test]
    fn duplicate_completion_is_stale() {
        let mut session = DocumentSession::new();
        let mut viewer = DocumentViewer::new();
        let ticket = viewer.load(reference(&mut session, "a.pdf"));
        viewer.finish_load(&ticket, Ok(info(3)));
        assert_eq!(viewer.finish_load(&ticket, Ok(info(9))), LoadOutcome::Stale);
        assert_eq!(viewer.page_count(), Some(3));
    }

    #[test]
    fn completion_after_unload_is_stale() {
        let mut session = DocumentSession::new();
        let mut viewer = DocumentViewer::new();
        let ticket = viewer.load(reference(&mut session, "a.pdf"));
        viewer.unload();
        assert_eq!(viewer.finish_load(&ticket, Ok(info(3))), LoadOutcome::Stale);
        assert_eq!(viewer.phase(), LoadPhase::Idle);
    }

    #[test]
    fn next_page_stops_at_last_page() {
        let mut viewer = ready_viewer(5);
        for _ in 0..4 {
            assert!(viewer.next_page());
        }
        assert_eq!(viewer.page(), 5);
        assert!(!viewer.can_next_page());
        assert!(!viewer.next_page());
        assert_eq!(viewer.page(), 5);
    }

    #[test]
    fn prev_page_stops_at_first_page() {
        let mut viewer = ready_viewer(5);
        assert!(!viewer.can_prev_page());
        assert!(!viewer.prev_page());
        assert_eq!(viewer.page(), 1);
    }

    #[test]
    fn next_page_is_disabled_while_count_unknown() {
        let mut session = DocumentSession::new();
        let mut viewer = DocumentViewer::new();
        viewer.load(reference(&mut session, "a.pdf"));
        assert!(!viewer.can_next_page());
        assert!(!viewer.next_page());
        assert_eq!(viewer.page(), 1);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut viewer = ready_viewer(1);
        while viewer.zoom_in() {}
        assert_eq!(viewer.zoom(), ZoomFactor::max());
        assert!(!viewer.can_zoom_in());
        while viewer.zoom_out() {}
        assert_eq!(viewer.zoom(), ZoomFactor::min());
        assert!(!viewer.can_zoom_out());
    }

    #[test]
    fn idle_viewer_allows_nothing() {
        let mut viewer = DocumentViewer::new();
        assert!(!viewer.can_zoom_in());
        assert!(!viewer.zoom_in());
        assert!(!viewer.can_prev_page());
        assert!(viewer.request_render().is_none());
    }

    #[test]
    fn render_ticket_issued_once_per_page_and_zoom() {
        let mut viewer = ready_viewer(3);
        let ticket = viewer.request_render().expect("first render");
        assert_eq!(ticket.page_index(), 0);
        assert!(viewer.request_render().is_none(), "already pending");

        let page = RenderedPage {
            width: 1,
            height: 1,
            pixels: vec![0; 4],
        };
        assert!(matches!(
            viewer.finish_render(ticket, Ok(page)),
            RenderOutcome::Ready(_)
        ));
        assert!(viewer.request_render().is_none(), "already displayed");

        viewer.next_page();
        let next = viewer.request_render().expect("new page");
        assert_eq!(next.page, 2);
    }

    #[test]
    fn render_for_previous_page_is_stale() {
        let mut viewer = ready_viewer(3);
        let ticket = viewer.request_render().expect("render");
        viewer.next_page();

        let page = RenderedPage {
            width: 1,
            height: 1,
            pixels: vec![0; 4],
        };
        assert_eq!(viewer.finish_render(ticket, Ok(page)), RenderOutcome::Stale);
    }

    #[test]
    fn failed_render_is_not_requested_again_until_view_changes() {
        let mut viewer = ready_viewer(3);
        let ticket = viewer.request_render().expect("render");
        let outcome = viewer.finish_render(ticket, Err(DocumentError::Backend("boom".into())));
        assert!(matches!(outcome, RenderOutcome::Failed(_)));
        assert!(viewer.request_render().is_none());

        viewer.zoom_in();
        assert!(viewer.request_render().is_some());
    }

    #[test]
    fn render_state_follows_the_current_ticket() {
        let mut viewer = ready_viewer(3);
        assert!(!viewer.is_rendering());

        let first = viewer.request_render().expect("render");
        assert!(viewer.is_rendering());
        viewer.finish_render(first, Err(DocumentError::Backend("boom".into())));
        assert!(viewer.render_failed());
        assert!(!viewer.is_rendering());
        assert!(!viewer.is_displayed());

        viewer.next_page();
        assert!(!viewer.render_failed());
        let second = viewer.request_render().expect("render");
        assert!(viewer.is_rendering());
        viewer.finish_render(
            second,
            Ok(RenderedPage {
                width: 1,
                height: 1,
                pixels: vec![0; 4],
            }),
        );
        assert!(viewer.is_displayed());
        assert!(!viewer.is_rendering());

        // A zoom change leaves the old bitmap displayed but not current.
        viewer.zoom_in();
        viewer.request_render();
        assert!(viewer.is_rendering());
        assert!(!viewer.is_displayed());
    }

    #[test]
    fn document_info_is_kept_until_the_next_load() {
        let mut viewer = ready_viewer(4);
        assert_eq!(viewer.document_info().map(|info| info.page_count()), Some(4));

        let mut session = DocumentSession::new();
        viewer.load(reference(&mut session, "other.pdf"));
        assert!(viewer.document_info().is_none());

        let mut viewer = ready_viewer(2);
        viewer.unload();
        assert!(viewer.document_info().is_none());
    }
}
