// SPDX-License-Identifier: MPL-2.0
//! Ownership of the single live document reference.
//!
//! A [`DocumentReference`] is a revocable locator for the bytes of an accepted
//! [`CandidateFile`]. The session hands out at most one live reference at a
//! time and releases it on supersession, on [`DocumentSession::clear`] and
//! when the session is dropped.

use super::intake::CandidateFile;
use std::fmt;
use std::sync::Arc;

const REFERENCE_SCHEME: &str = "blob:pdf-lens";

/// Revocable handle addressing an accepted file's bytes.
///
/// Equality is by id: two references are the same only if issued by the same
/// `accept` call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentReference {
    id: u64,
    locator: String,
}

impl DocumentReference {
    fn new(id: u64) -> Self {
        Self {
            id,
            locator: format!("{}/{}", REFERENCE_SCHEME, id),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Opaque locator string (`blob:pdf-lens/<id>`).
    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }
}

impl fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.locator)
    }
}

/// Issue/release counters, used to check that no reference leaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub issued: u64,
    pub released: u64,
}

impl SessionStats {
    /// Number of references currently live (0 or 1).
    #[must_use]
    pub fn live(&self) -> u64 {
        self.issued - self.released
    }
}

#[derive(Debug)]
struct LiveDocument {
    reference: DocumentReference,
    file: CandidateFile,
}

#[derive(Debug, Default)]
pub struct DocumentSession {
    live: Option<LiveDocument>,
    next_id: u64,
    stats: SessionStats,
}

impl DocumentSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `file` to a fresh reference, releasing the previous one first.
    pub fn accept(&mut self, file: CandidateFile) -> DocumentReference {
        self.release_live();

        self.next_id += 1;
        let reference = DocumentReference::new(self.next_id);
        self.stats.issued += 1;
        log::debug!("Issued {} for {}", reference, file.name());

        self.live = Some(LiveDocument {
            reference: reference.clone(),
            file,
        });
        reference
    }

    /// Releases `reference` if it is the live one.
    ///
    /// Returns `false` when the reference was already released or never
    /// issued by this session.
    pub fn release(&mut self, reference: &DocumentReference) -> bool {
        if self.is_live(reference) {
            self.release_live();
            true
        } else {
            log::debug!("Ignoring release of stale {}", reference);
            false
        }
    }

    /// Releases the live reference, if any.
    pub fn clear(&mut self) {
        self.release_live();
    }

    /// Bytes addressed by `reference`, or `None` once it has been released.
    #[must_use]
    pub fn resolve(&self, reference: &DocumentReference) -> Option<Arc<[u8]>> {
        self.live
            .as_ref()
            .filter(|live| live.reference == *reference)
            .map(|live| live.file.bytes())
    }

    #[must_use]
    pub fn is_live(&self, reference: &DocumentReference) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| live.reference == *reference)
    }

    #[must_use]
    pub fn live_reference(&self) -> Option<&DocumentReference> {
        self.live.as_ref().map(|live| &live.reference)
    }

    /// The file behind the live reference.
    #[must_use]
    pub fn current_file(&self) -> Option<&CandidateFile> {
        self.live.as_ref().map(|live| &live.file)
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    fn release_live(&mut self) {
        if let Some(live) = self.live.take() {
            self.stats.released += 1;
            log::debug!("Released {} ({})", live.reference, live.file.name());
        }
    }
}

impl Drop for DocumentSession {
    fn drop(&mut self) {
        self.release_live();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::intake::{FileIntake, IncomingFile, IntakeSource, PDF_MEDIA_TYPE};

    fn candidate(name: &str) -> CandidateFile {
        FileIntake::new()
            .submit(
                IntakeSource::Browse,
                vec![IncomingFile::from_bytes(name, PDF_MEDIA_TYPE, name.as_bytes().to_vec())],
            )
            .expect("accepted")
            .expect("present")
    }

    #[test]
    fn accept_issues_resolvable_reference() {
        let mut session = DocumentSession::new();
        let reference = session.accept(candidate("a.pdf"));

        assert!(reference.locator().starts_with("blob:pdf-lens/"));
        assert_eq!(session.live_reference(), Some(&reference));
        assert_eq!(session.resolve(&reference).as_deref(), Some(&b"a.pdf"[..]));
        assert_eq!(session.current_file().map(CandidateFile::name), Some("a.pdf"));
    }

    #[test]
    fn accept_releases_previous_reference_first() {
        let mut session = DocumentSession::new();
        let first = session.accept(candidate("a.pdf"));
        let second = session.accept(candidate("b.pdf"));

        assert_ne!(first, second);
        assert!(session.resolve(&first).is_none());
        assert!(session.resolve(&second).is_some());
        assert_eq!(session.stats(), SessionStats { issued: 2, released: 1 });
        assert_eq!(session.stats().live(), 1);
    }

    #[test]
    fn two_accepts_then_clear_release_exactly_two() {
        let mut session = DocumentSession::new();
        session.accept(candidate("a.pdf"));
        session.accept(candidate("b.pdf"));
        session.clear();

        assert_eq!(session.stats(), SessionStats { issued: 2, released: 2 });
        assert!(session.live_reference().is_none());
        assert!(session.current_file().is_none());
    }

    #[test]
    fn releasing_twice_is_a_no_op() {
        let mut session = DocumentSession::new();
        let reference = session.accept(candidate("a.pdf"));

        assert!(session.release(&reference));
        assert!(!session.release(&reference));
        assert_eq!(session.stats().released, 1);
    }

    #[test]
    fn releasing_superseded_reference_keeps_live_one() {
        let mut session = DocumentSession::new();
        let old = session.accept(candidate("a.pdf"));
        let new = session.accept(candidate("b.pdf"));

        assert!(!session.release(&old));
        assert!(session.is_live(&new));
    }

    #[test]
    fn clear_on_empty_session_does_nothing() {
        let mut session = DocumentSession::new();
        session.clear();
        assert_eq!(session.stats(), SessionStats::default());
    }

    #[test]
    fn ids_are_monotonic() {
        let mut session = DocumentSession::new();
        let ids: Vec<u64> = (0..4)
            .map(|i| session.accept(candidate(&format!("{i}.pdf"))).id())
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
