//! Error types for the md2html-inline library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Md2HtmlError`] — **Fatal**: the conversion cannot proceed at all
//!   (document, template or stylesheet missing, undecodable text, output
//!   not writable). Returned as `Err(Md2HtmlError)` from the top-level
//!   `convert*` functions.
//!
//! * [`ImageError`] — **Non-fatal**: a single referenced image could not be
//!   read. The reference is left as written and the error is stored in
//!   [`crate::output::ConversionReport`] so callers can inspect it after
//!   the run instead of losing the whole document to one bad image.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which input a file-level error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileRole {
    /// The Markdown document being converted.
    Document,
    /// The HTML template with placeholders.
    Template,
    /// The mandatory base stylesheet.
    Stylesheet,
    /// The optional dark-mode stylesheet.
    DarkStylesheet,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileRole::Document => "Markdown document",
            FileRole::Template => "HTML template",
            FileRole::Stylesheet => "stylesheet",
            FileRole::DarkStylesheet => "dark-mode stylesheet",
        };
        f.write_str(name)
    }
}

/// All fatal errors returned by the md2html-inline library.
///
/// Per-image failures use [`ImageError`] and are stored in
/// [`crate::output::ConversionReport`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Md2HtmlError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// A required input file was not found.
    #[error("The {role} '{path}' was not found\nCheck the path exists and is readable.")]
    FileNotFound { role: FileRole, path: PathBuf },

    /// Process does not have read permission on an input file.
    #[error("Permission denied reading the {role} '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { role: FileRole, path: PathBuf },

    /// Any other I/O failure while reading an input file.
    #[error("Failed to read the {role} '{path}': {source}")]
    ReadFailed {
        role: FileRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Encoding errors ───────────────────────────────────────────────────
    /// The configured encoding label is not known.
    #[error("Unknown text encoding '{label}'\nUse a WHATWG label such as utf-8, windows-1252 or shift_jis.")]
    UnknownEncoding { label: String },

    /// An input file is not valid text under the configured encoding.
    #[error("Unable to decode the file '{path}' using encoding '{encoding}'")]
    DecodeFailed { path: PathBuf, encoding: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The overwrite confirmation could not be read from the operator.
    #[error("Failed to ask for overwrite confirmation of '{path}': {source}")]
    PromptFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Md2HtmlError {
    /// Classify an I/O error raised while reading an input file.
    pub(crate) fn from_read(role: FileRole, path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Md2HtmlError::FileNotFound { role, path },
            std::io::ErrorKind::PermissionDenied => Md2HtmlError::PermissionDenied { role, path },
            _ => Md2HtmlError::ReadFailed {
                role,
                path,
                source: err,
            },
        }
    }

    /// True when the error means a required file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Md2HtmlError::FileNotFound { .. })
    }
}

/// A non-fatal error for a single image reference.
///
/// The reference stays in the document exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ImageError {
    /// The image file could not be read.
    #[error("Error converting image {path} to base64: {detail}")]
    ReadFailed { path: String, detail: String },
}

impl ImageError {
    /// The path as written in the document.
    pub fn path(&self) -> &str {
        match self {
            ImageError::ReadFailed { path, .. } => path,
        }
    }
}
