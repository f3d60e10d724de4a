// SPDX-License-Identifier: MPL-2.0
//! File intake: validation of browsed or dropped files.
//!
//! Both entry points (file dialog and window drop) funnel into
//! [`FileIntake::submit`]. Only the first file of a batch is inspected; a
//! batch whose first file is not declared as `application/pdf` is rejected as
//! a whole.

use crate::error::IntakeError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The only media type accepted by the intake.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Media type declared for files whose extension is not recognized.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Where a submitted batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeSource {
    /// Picked through the "Select File" dialog.
    Browse,
    /// Released onto the window.
    Drop,
}

/// Backing storage of an incoming file.
#[derive(Clone)]
pub enum FileContents {
    /// Contents still on disk; read only once the file passes validation.
    Path(PathBuf),
    /// Contents already in memory.
    Bytes(Arc<[u8]>),
}

impl fmt::Debug for FileContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileContents::Path(path) => f.debug_tuple("Path").field(path).finish(),
            FileContents::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

/// A file offered to the intake, before validation.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    name: String,
    media_type: String,
    contents: FileContents,
}

impl IncomingFile {
    /// Describes a file on disk, declaring its media type from the extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            media_type: media_type_for_path(&path).to_string(),
            contents: FileContents::Path(path),
        }
    }

    /// Describes an in-memory file with an explicitly declared media type.
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            contents: FileContents::Bytes(bytes.into()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }

    fn into_candidate(self) -> Result<CandidateFile, IntakeError> {
        let bytes: Arc<[u8]> = match self.contents {
            FileContents::Bytes(bytes) => bytes,
            FileContents::Path(path) => std::fs::read(&path)
                .map_err(|err| IntakeError::Unreadable {
                    name: self.name.clone(),
                    reason: err.to_string(),
                })?
                .into(),
        };
        Ok(CandidateFile {
            size: bytes.len() as u64,
            name: self.name,
            media_type: self.media_type,
            bytes,
        })
    }
}

/// A validated PDF held in memory, ready to be handed to the session.
#[derive(Clone, PartialEq, Eq)]
pub struct CandidateFile {
    name: String,
    media_type: String,
    size: u64,
    bytes: Arc<[u8]>,
}

impl fmt::Debug for CandidateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size", &self.size)
            .finish()
    }
}

impl CandidateFile {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Size formatted as megabytes with two decimals (e.g. `"1.25"`).
    #[must_use]
    pub fn size_megabytes(&self) -> String {
        format!("{:.2}", self.size as f64 / BYTES_PER_MEGABYTE)
    }

    /// Shared handle to the file contents.
    #[must_use]
    pub fn bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }
}

/// Presentational drag/hover state of the upload area.
///
/// None of these flags influence validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    /// Pointer is over the upload area.
    hovering: bool,
    /// A file drag is in progress over the window.
    dragging: bool,
    /// The current drag gesture already delivered its first file.
    gesture_consumed: bool,
}

impl DragState {
    /// Whether the upload area should be drawn highlighted.
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.hovering || self.dragging
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
}

/// Accepts files from the browse dialog or window drops.
#[derive(Debug, Clone, Default)]
pub struct FileIntake {
    drag: DragState,
}

impl FileIntake {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Validates a batch and materializes its first file.
    ///
    /// Returns `Ok(None)` for an empty batch. Files after the first are never
    /// inspected.
    pub fn submit(
        &self,
        source: IntakeSource,
        batch: impl IntoIterator<Item = IncomingFile>,
    ) -> Result<Option<CandidateFile>, IntakeError> {
        let Some(file) = batch.into_iter().next() else {
            log::debug!("{:?} intake received an empty batch", source);
            return Ok(None);
        };

        if !file.is_pdf() {
            log::warn!(
                "Rejected {} from {:?}: declared type {}",
                file.name(),
                source,
                file.media_type()
            );
            return Err(IntakeError::InvalidFileType {
                name: file.name,
                media_type: file.media_type,
            });
        }

        let candidate = file.into_candidate()?;
        log::info!(
            "Accepted {} ({} bytes) from {:?}",
            candidate.name(),
            candidate.size(),
            source
        );
        Ok(Some(candidate))
    }

    /// Pointer entered the upload area.
    pub fn pointer_entered(&mut self) {
        self.drag.hovering = true;
        self.drag.gesture_consumed = false;
    }

    /// Pointer left the upload area.
    pub fn pointer_left(&mut self) {
        self.drag.hovering = false;
    }

    /// A file is being dragged over the window.
    ///
    /// The host reports one hover per dragged file; the first one starts a
    /// new gesture.
    pub fn file_hovered(&mut self) {
        if !self.drag.dragging {
            self.drag.dragging = true;
            self.drag.gesture_consumed = false;
        }
    }

    /// The drag left the window without dropping.
    pub fn hover_left(&mut self) {
        self.drag.dragging = false;
    }

    /// A file was released onto the window.
    ///
    /// The host reports one drop per file; only the first drop of a gesture
    /// yields a batch, the others are discarded.
    pub fn file_dropped(&mut self, path: PathBuf) -> Option<Vec<IncomingFile>> {
        self.drag.dragging = false;
        if self.drag.gesture_consumed {
            log::debug!("Discarding extra dropped file {}", path.display());
            return None;
        }
        self.drag.gesture_consumed = true;
        Some(vec![IncomingFile::from_path(path)])
    }
}

/// Declares a media type from the file extension, the way a host file picker does.
#[must_use]
pub fn media_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => PDF_MEDIA_TYPE,
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("txt") => "text/plain",
        Some("html" | "htm") => "text/html",
        Some("json") => "application/json",
        Some("zip") => "application/zip",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => UNKNOWN_MEDIA_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn pdf(name: &str, len: usize) -> IncomingFile {
        IncomingFile::from_bytes(name, PDF_MEDIA_TYPE, vec![b'%'; len])
    }

    #[test]
    fn empty_batch_is_a_silent_no_op() {
        let intake = FileIntake::new();
        let result = intake.submit(IntakeSource::Browse, Vec::new());
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn pdf_yields_candidate_with_matching_name_and_size() {
        let intake = FileIntake::new();
        let candidate = intake
            .submit(IntakeSource::Drop, vec![pdf("report.pdf", 2048)])
            .expect("pdf should be accepted")
            .expect("batch is not empty");

        assert_eq!(candidate.name(), "report.pdf");
        assert_eq!(candidate.size(), 2048);
        assert_eq!(candidate.media_type(), PDF_MEDIA_TYPE);
    }

    #[test]
    fn non_pdf_types_are_rejected() {
        let intake = FileIntake::new();
        for media_type in ["image/png", "text/plain", "", "application/pdf+zip", "APPLICATION/PDF"] {
            let file = IncomingFile::from_bytes("file", media_type, vec![0_u8; 4]);
            let result = intake.submit(IntakeSource::Browse, vec![file]);
            assert!(
                matches!(result, Err(IntakeError::InvalidFileType { .. })),
                "{media_type:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejection_of_first_file_ignores_later_pdfs() {
        let intake = FileIntake::new();
        let batch = vec![
            IncomingFile::from_bytes("image.png", "image/png", vec![0_u8; 4]),
            pdf("report.pdf", 10),
        ];
        let result = intake.submit(IntakeSource::Drop, batch);
        assert_eq!(
            result,
            Err(IntakeError::InvalidFileType {
                name: "image.png".into(),
                media_type: "image/png".into(),
            })
        );
    }

    #[test]
    fn only_first_file_of_batch_is_accepted() {
        let intake = FileIntake::new();
        let candidate = intake
            .submit(IntakeSource::Drop, vec![pdf("a.pdf", 1), pdf("b.pdf", 2)])
            .expect("accepted")
            .expect("present");
        assert_eq!(candidate.name(), "a.pdf");
    }

    #[test]
    fn path_files_are_read_after_validation() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("Scan.PDF");
        std::fs::write(&path, b"%PDF-1.4 test").expect("write");

        let intake = FileIntake::new();
        let candidate = intake
            .submit(IntakeSource::Browse, vec![IncomingFile::from_path(&path)])
            .expect("accepted")
            .expect("present");
        assert_eq!(candidate.name(), "Scan.PDF");
        assert_eq!(candidate.size(), 13);
        assert_eq!(&*candidate.bytes(), b"%PDF-1.4 test");
    }

    #[test]
    fn missing_pdf_on_disk_is_unreadable() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("gone.pdf");

        let intake = FileIntake::new();
        let result = intake.submit(IntakeSource::Browse, vec![IncomingFile::from_path(&path)]);
        assert!(matches!(result, Err(IntakeError::Unreadable { name, .. }) if name == "gone.pdf"));
    }

    #[test]
    fn media_type_follows_extension() {
        assert_eq!(media_type_for_path(Path::new("a.pdf")), PDF_MEDIA_TYPE);
        assert_eq!(media_type_for_path(Path::new("a.Pdf")), PDF_MEDIA_TYPE);
        assert_eq!(media_type_for_path(Path::new("image.png")), "image/png");
        assert_eq!(media_type_for_path(Path::new("noext")), UNKNOWN_MEDIA_TYPE);
    }

    #[test]
    fn size_megabytes_has_two_decimals() {
        let intake = FileIntake::new();
        let candidate = intake
            .submit(IntakeSource::Browse, vec![pdf("big.pdf", 1024 * 1024 + 512 * 1024)])
            .expect("accepted")
            .expect("present");
        assert_eq!(candidate.size_megabytes(), "1.50");
    }

    #[test]
    fn drag_gesture_delivers_only_first_drop() {
        let mut intake = FileIntake::new();
        intake.file_hovered();
        intake.file_hovered();
        assert!(intake.drag_state().is_dragging());
        assert!(intake.drag_state().is_highlighted());

        let first = intake.file_dropped(PathBuf::from("a.pdf"));
        let second = intake.file_dropped(PathBuf::from("b.pdf"));
        assert_eq!(first.map(|b| b[0].name().to_string()), Some("a.pdf".into()));
        assert!(second.is_none());
        assert!(!intake.drag_state().is_dragging());

        // A new gesture delivers again.
        intake.file_hovered();
        assert!(intake.file_dropped(PathBuf::from("c.pdf")).is_some());
    }

    #[test]
    fn hover_left_clears_dragging() {
        let mut intake = FileIntake::new();
        intake.file_hovered();
        intake.hover_left();
        assert!(!intake.drag_state().is_highlighted());
    }

    #[test]
    fn pointer_hover_highlights_without_drag() {
        let mut intake = FileIntake::new();
        intake.pointer_entered();
        assert!(intake.drag_state().is_hovering());
        assert!(intake.drag_state().is_highlighted());
        intake.pointer_left();
        assert!(!intake.drag_state().is_highlighted());
    }
}
