//! Result types returned by the conversion entry points.

use crate::error::ImageError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Whether the dark-mode stylesheet ended up in the composed CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DarkModeStatus {
    /// Dark mode was not requested. (default)
    #[default]
    Disabled,
    /// Dark mode was requested and its stylesheet was appended.
    Applied,
    /// Dark mode was requested but no stylesheet could be loaded.
    Unavailable,
}

/// What happened during one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Image references found in the document (both syntaxes, all occurrences).
    pub references_found: usize,
    /// References replaced by a data URI.
    pub images_inlined: usize,
    /// References left alone because the path is not a raster image.
    pub references_skipped: usize,
    /// References whose file could not be read.
    pub image_errors: Vec<ImageError>,
    /// Outcome of the dark-mode stylesheet lookup.
    pub dark_mode: DarkModeStatus,
    /// Byte length of the final HTML (before output encoding).
    pub html_bytes: usize,
    /// Wall-clock time of the run in milliseconds.
    pub duration_ms: u64,
}

impl ConversionReport {
    /// True when every image reference and the dark stylesheet were handled without fallback.
    pub fn is_clean(&self) -> bool {
        self.image_errors.is_empty() && self.dark_mode != DarkModeStatus::Unavailable
    }
}

/// In-memory result of [`crate::convert::render_document`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The complete HTML page.
    pub html: String,
    /// Run statistics and recoverable failures.
    pub report: ConversionReport,
}

/// Final outcome of [`crate::convert::convert_to_file`].
///
/// A declined overwrite is a normal outcome, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConversionOutcome {
    /// The HTML file was written.
    Written {
        path: PathBuf,
        report: ConversionReport,
    },
    /// The output file already existed and the operator declined to overwrite it.
    Declined { path: PathBuf },
}

impl ConversionOutcome {
    /// The output path, whether or not it was written.
    pub fn path(&self) -> &Path {
        match self {
            ConversionOutcome::Written { path, .. } => path,
            ConversionOutcome::Declined { path } => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, ConversionOutcome::Written { .. })
    }
}
