// SPDX-License-Identifier: MPL-2.0
//! Document domain: intake, reference lifecycle, viewing and rendering.
//!
//! The pieces are toolkit-agnostic and composed by [`crate::app`]:
//!
//! ```text
//! IncomingFile ──FileIntake::submit──▶ CandidateFile
//!              ──DocumentSession::accept──▶ DocumentReference
//!              ──DocumentViewer::load──▶ LoadTicket ──renderer──▶ finish_load
//! ```

pub mod intake;
pub mod renderer;
pub mod session;
pub mod viewer;
pub mod zoom;

pub use intake::{CandidateFile, DragState, FileIntake, IncomingFile, IntakeSource};
pub use renderer::{default_renderer, DocumentInfo, DocumentRenderer, LopdfRenderer, RenderedPage};
pub use session::{DocumentReference, DocumentSession, SessionStats};
pub use viewer::{
    DocumentViewer, LoadOutcome, LoadPhase, LoadTicket, RenderOutcome, RenderTicket, ViewState,
};
pub use zoom::ZoomFactor;
