// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Intake(IntakeError),
    Document(DocumentError),
}

/// Reasons a submitted file is turned away before it reaches the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    /// The first file of the batch is not declared as `application/pdf`.
    InvalidFileType { name: String, media_type: String },

    /// The file passed validation but its contents could not be read.
    Unreadable { name: String, reason: String },
}

impl IntakeError {
    /// Returns the i18n key for the notification title.
    pub fn title_key(&self) -> &'static str {
        match self {
            IntakeError::InvalidFileType { .. } => "notification-invalid-type-title",
            IntakeError::Unreadable { .. } => "notification-unreadable-title",
        }
    }

    /// Returns the i18n key for the notification body.
    pub fn description_key(&self) -> &'static str {
        match self {
            IntakeError::InvalidFileType { .. } => "notification-invalid-type-description",
            IntakeError::Unreadable { .. } => "notification-unreadable-description",
        }
    }

    /// Name of the file that was turned away.
    pub fn file_name(&self) -> &str {
        match self {
            IntakeError::InvalidFileType { name, .. } | IntakeError::Unreadable { name, .. } => {
                name
            }
        }
    }
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeError::InvalidFileType { name, media_type } => {
                write!(f, "{} is not a PDF (declared type: {})", name, media_type)
            }
            IntakeError::Unreadable { name, reason } => {
                write!(f, "Cannot read {}: {}", name, reason)
            }
        }
    }
}

impl std::error::Error for IntakeError {}

/// Failures reported by a document renderer while opening or drawing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The bytes could not be parsed as a PDF document.
    Malformed(String),

    /// The document parsed but contains no pages.
    Empty,

    /// The document is encrypted and the backend cannot open it.
    Encrypted,

    /// A page outside `0..page_count` was requested.
    PageOutOfRange { page: u32, page_count: u32 },

    /// The reference handed to the renderer no longer resolves to any bytes.
    Released,

    /// Backend-specific failure (library binding, rasterization).
    Backend(String),
}

impl DocumentError {
    /// Returns the i18n key for the notification title.
    pub fn title_key(&self) -> &'static str {
        "notification-load-error-title"
    }

    /// Returns the i18n key for the notification body.
    pub fn description_key(&self) -> &'static str {
        match self {
            DocumentError::Encrypted => "notification-load-error-encrypted",
            _ => "notification-load-error-description",
        }
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Malformed(msg) => write!(f, "Malformed PDF: {}", msg),
            DocumentError::Empty => write!(f, "Document has no pages"),
            DocumentError::Encrypted => write!(f, "Encrypted PDFs are not supported"),
            DocumentError::PageOutOfRange { page, page_count } => {
                write!(f, "Page {} out of range (page_count={})", page, page_count)
            }
            DocumentError::Released => write!(f, "Document reference was released"),
            DocumentError::Backend(msg) => write!(f, "Renderer error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<lopdf::Error> for DocumentError {
    fn from(err: lopdf::Error) -> Self {
        DocumentError::Malformed(err.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Intake(e) => write!(f, "Intake Error: {}", e),
            Error::Document(e) => write!(f, "Document Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<IntakeError> for Error {
    fn from(err: IntakeError) -> Self {
        Error::Intake(err)
    }
}

impl From<DocumentError> for Error {
    fn from(err: DocumentError) -> Self {
        Error::Document(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
