//! Error types and exit status mapping.
//!
//! Every failure the pipeline can raise is a [`ReadableError`] variant, and
//! each variant maps onto exactly one sysexits-style [`ExitCode`] through
//! [`ReadableError::exit_code`]. The binary never picks exit codes on its own.
//!
//! # Example
//!
//! ```rust
//! use readable_core::{ExitCode, ReadableError};
//!
//! let err = ReadableError::InputNotFound("missing.html".into());
//! assert_eq!(err.exit_code(), ExitCode::NoInput);
//! assert_eq!(err.exit_code() as u8, 66);
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Process exit status, using the BSD `sysexits.h` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Successful completion, possibly with warnings.
    Ok = 0,
    /// Command line usage error.
    Usage = 64,
    /// The input or the extraction result was unusable.
    DataErr = 65,
    /// The input file does not exist.
    NoInput = 66,
    /// The remote host could not be reached or answered with an error.
    NoHost = 68,
    /// Internal failure, e.g. the readability engine crashed.
    Software = 70,
    /// The output file could not be created.
    CantCreate = 73,
    /// Any other I/O failure while reading or writing.
    IoErr = 74,
    /// Permission denied on the input or output file.
    NoPerm = 77,
}

impl From<ExitCode> for u8 {
    fn from(code: ExitCode) -> Self {
        code as u8
    }
}

/// Main error type for readable operations.
#[derive(Error, Debug)]
pub enum ReadableError {
    /// Contradictory or invalid options.
    #[error("{0}")]
    Usage(String),

    /// No source argument was given while standard input is a terminal.
    #[error("no input provided; pass a file, a URL or pipe a document into standard input")]
    NoInputTerminal,

    /// Unknown `--low-confidence` mode.
    #[error("unknown low-confidence mode `{0}` (expected keep, force or exit)")]
    UnknownPolicy(String),

    /// Unknown property name.
    #[error("unknown property `{0}`")]
    UnknownProperty(String),

    /// The source URL or the base URL could not be parsed.
    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The remote host could not be resolved or connected to.
    #[error("could not connect to host for {url}: {reason}")]
    HostUnreachable { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("request to {url} failed with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Request timeout.
    #[error("request to {url} timed out after {timeout} seconds")]
    Timeout { url: String, timeout: u64 },

    /// Network failure not covered by a more specific variant (TLS, body decoding).
    #[error("network error while loading {url}: {reason}")]
    Network { url: String, reason: String },

    /// Local input file does not exist.
    #[error("file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Local file is unreadable, or the output path is unwritable.
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// The output file could not be created.
    #[error("cannot create output file {}", path.display())]
    CantCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Other I/O failures.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The confidence heuristic rejected the document under the `exit` policy.
    #[error("the document does not look readable; refusing to extract")]
    NotReadable,

    /// Extraction was skipped, yet JSON or property output was requested.
    #[error("the document does not look readable, so {0} cannot be produced; use --low-confidence force")]
    PassthroughIncompatible(&'static str),

    /// Extraction ran but found no article, and the policy forbids falling back.
    #[error("no readable content could be extracted from the document")]
    NoArticle,

    /// The readability engine failed in an unexpected way.
    #[error("readability engine failed: {0}")]
    Engine(String),

    /// JSON serialization errors.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReadableError {
    /// Classifies the error into its process exit status.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Usage(_) | Self::NoInputTerminal | Self::UnknownPolicy(_) | Self::UnknownProperty(_) => {
                ExitCode::Usage
            }
            Self::InvalidUrl { .. }
            | Self::NotReadable
            | Self::PassthroughIncompatible(_)
            | Self::NoArticle => ExitCode::DataErr,
            Self::InputNotFound(_) => ExitCode::NoInput,
            Self::HostUnreachable { .. } | Self::HttpStatus { .. } | Self::Timeout { .. } | Self::Network { .. } => {
                ExitCode::NoHost
            }
            Self::PermissionDenied(_) => ExitCode::NoPerm,
            Self::CantCreate { .. } => ExitCode::CantCreate,
            Self::Io(_) => ExitCode::IoErr,
            Self::Engine(_) | Self::Json(_) => ExitCode::Software,
        }
    }

    /// Maps an I/O error on `path` to the most specific variant.
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::InputNotFound(path.into()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.into()),
            _ => Self::Io(err),
        }
    }
}

/// Result type alias for ReadableError.
pub type Result<T> = std::result::Result<T, ReadableError>;
