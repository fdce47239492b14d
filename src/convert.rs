//! Conversion entry points.
//!
//! [`render_document`] runs every stage except the output write and returns
//! the page in memory. [`convert_to_file`] adds the guarded write next to the
//! input document. Both read every required input before anything is
//! written, so a missing template or stylesheet never leaves a partial file.

use crate::config::ConversionConfig;
use crate::error::{FileRole, Md2HtmlError};
use crate::output::{ConversionOutcome, ConversionOutput, ConversionReport, DarkModeStatus};
use crate::pipeline::inline::{inline_images_with, InlineOptions};
use crate::pipeline::write::{output_path_for, write_output, ConsolePrompt, OverwriteGuard, WriteOutcome};
use crate::pipeline::{input, markdown, styles, template};
use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert a Markdown file to a standalone HTML page in memory.
///
/// # Errors
/// Returns `Err(Md2HtmlError)` only for fatal errors:
/// - document, template or stylesheet missing or unreadable
/// - unknown encoding label, or an input that does not decode
///
/// Unreadable images and a missing dark stylesheet are reported in
/// [`ConversionReport`] instead.
pub fn render_document(
    document: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2HtmlError> {
    render_document_at(document.as_ref(), config, Utc::now())
}

/// Like [`render_document`] with an explicit generation time.
pub fn render_document_at(
    document: &Path,
    config: &ConversionConfig,
    now: DateTime<Utc>,
) -> Result<ConversionOutput, Md2HtmlError> {
    let start = Instant::now();
    let encoding = input::resolve_encoding(&config.encoding)?;
    info!("Starting conversion: {}", document.display());

    // ── Step 1: Read the document ────────────────────────────────────────
    let source = input::read_text(document, FileRole::Document, encoding)?;
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(document);
    }

    // ── Step 2: Inline images ────────────────────────────────────────────
    let inlined = inline_images_with(
        &source,
        &InlineOptions {
            enabled: config.inline_images,
            image_root: config.image_root.as_deref(),
        },
    );
    debug!(
        "Image references: {} found, {} rewritten, {} skipped, {} failed",
        inlined.references_found,
        inlined.references_rewritten,
        inlined.references_skipped,
        inlined.errors.len()
    );
    if let Some(ref cb) = config.progress_callback {
        for img in &inlined.inlined {
            cb.on_image_inlined(&img.path, img.bytes);
        }
        for err in &inlined.errors {
            cb.on_image_failed(err);
        }
    }

    // ── Step 3: Render Markdown ──────────────────────────────────────────
    let fragment = markdown::render(&inlined.text);

    // ── Step 4: Load template and styles ─────────────────────────────────
    let template_text = input::read_text(&config.template_path, FileRole::Template, encoding)?;
    let base_css = input::read_text(&config.css_path, FileRole::Stylesheet, encoding)?;
    let dark_css = if config.dark_mode {
        load_dark_css(config, encoding)
    } else {
        None
    };
    let bundle = styles::compose_styles(&base_css, config.dark_mode, dark_css.as_deref());
    if bundle.dark_mode == DarkModeStatus::Unavailable {
        if let Some(ref cb) = config.progress_callback {
            cb.on_dark_mode_unavailable();
        }
    }

    // ── Step 5: Fill the template ────────────────────────────────────────
    let html = template::compose(&template_text, &fragment, &bundle.css, now);

    let report = ConversionReport {
        references_found: inlined.references_found,
        images_inlined: inlined.references_rewritten,
        references_skipped: inlined.references_skipped,
        image_errors: inlined.errors,
        dark_mode: bundle.dark_mode,
        html_bytes: html.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(&report);
    }

    Ok(ConversionOutput { html, report })
}

/// Convert a Markdown file and write `<stem>.html` next to it.
///
/// When the output already exists, `guard` decides whether to replace it;
/// a refusal yields [`ConversionOutcome::Declined`] and the existing file is
/// left byte-for-byte unchanged.
pub fn convert_to_file(
    document: impl AsRef<Path>,
    config: &ConversionConfig,
    guard: &mut dyn OverwriteGuard,
) -> Result<ConversionOutcome, Md2HtmlError> {
    let document = document.as_ref();
    let output = render_document(document, config)?;
    let encoding = input::resolve_encoding(&config.encoding)?;

    let path = output_path_for(document);
    match write_output(&path, &output.html, encoding, guard)? {
        WriteOutcome::Written(path) => {
            info!(
                "Conversion complete: {} images inlined, {}ms",
                output.report.images_inlined, output.report.duration_ms
            );
            Ok(ConversionOutcome::Written {
                path,
                report: output.report,
            })
        }
        WriteOutcome::Declined(path) => Ok(ConversionOutcome::Declined { path }),
    }
}

/// Convert a Markdown file, asking on the terminal before overwriting.
pub fn convert(
    document: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutcome, Md2HtmlError> {
    convert_to_file(document, config, &mut ConsolePrompt::stdio())
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Any failure to load the dark stylesheet degrades to the base CSS.
fn load_dark_css(config: &ConversionConfig, encoding: &'static Encoding) -> Option<String> {
    let path = config.dark_mode_css_path.as_deref()?;
    match input::read_text(path, FileRole::DarkStylesheet, encoding) {
        Ok(css) => Some(css),
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}
