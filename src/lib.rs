//! # md2html-inline
//!
//! Convert a Markdown document into a single, self-contained HTML page.
//!
//! Local PNG, JPEG and GIF images referenced from the document are embedded as
//! base64 data URIs, the stylesheet is inlined into a `<style>` element, and
//! the result is written next to the source as `<name>.html`. The page can be
//! mailed, archived or opened offline without any companion files.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Input     read + decode (utf-8 or any WHATWG encoding)
//!  ├─ 2. Inline    ![alt](img.png) / <img src="img.png"> → data:image/png;base64,…
//!  ├─ 3. Render    CommonMark → HTML, fenced code highlighted by class
//!  ├─ 4. Styles    styles.css (+ dark-mode.css when requested)
//!  ├─ 5. Template  {{ content }}  {{ styles }}  {{ generated_at }}
//!  └─ 6. Write     <name>.html, asking before an overwrite
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2html_inline::{convert_to_file, AlwaysOverwrite, ConversionConfig, ConversionOutcome};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .template_path("template.html")
//!         .css_path("styles.css")
//!         .build()?;
//!
//!     match convert_to_file("README.md", &config, &mut AlwaysOverwrite)? {
//!         ConversionOutcome::Written { path, report } => {
//!             eprintln!("{} ({} images inlined)", path.display(), report.images_inlined);
//!         }
//!         ConversionOutcome::Declined { .. } => unreachable!(),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2html` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! md2html-inline = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_to_file, render_document, render_document_at};
pub use error::{FileRole, ImageError, Md2HtmlError};
pub use output::{ConversionOutcome, ConversionOutput, ConversionReport, DarkModeStatus};
pub use pipeline::write::{AlwaysOverwrite, ConsolePrompt, NeverOverwrite, OverwriteGuard};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
