//! Pipeline stages for Markdown-to-HTML conversion.
//!
//! Each submodule implements exactly one transformation step so each can be
//! tested on its own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ inline ──▶ markdown ──▶ styles ──▶ template ──▶ write
//! (decode)  (data URIs) (HTML)      (CSS)      (tokens)     (guarded)
//! ```
//!
//! 1. [`input`]    — read a text file and decode it under the configured encoding
//! 2. [`inline`]   — find image references and rewrite them to data URIs,
//!    using [`encode`] for the file → base64 step
//! 3. [`markdown`] — render Markdown to an HTML fragment, highlighting fenced code
//! 4. [`styles`]   — base stylesheet plus the optional dark-mode stylesheet
//! 5. [`template`] — substitute fragment, styles and timestamp into the template
//! 6. [`write`]    — derive the output path, ask before overwriting, write atomically

pub mod encode;
pub mod inline;
pub mod input;
pub mod markdown;
pub mod styles;
pub mod template;
pub mod write;
