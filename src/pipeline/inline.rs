//! Image inlining: rewrite local image references as base64 data URIs.
//!
//! References are found with two independent patterns over the whole text:
//! Markdown `![alt](path "title")` and embedded HTML `<img ... src="path">`
//! (any attribute order, single or double quotes). Only the byte span of the
//! captured path is rewritten, never other occurrences of the same string,
//! so one path being a substring of another cannot corrupt the document and
//! the result does not depend on processing order.

use crate::error::ImageError;
use crate::pipeline::encode::{encode_file, image_extension};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Which syntax a reference was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSyntax {
    /// `![alt](path)`
    Markdown,
    /// `<img src="path">`
    Html,
}

/// One image reference found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// The path exactly as written.
    pub path: String,
    pub syntax: ImageSyntax,
    /// Byte range of `path` inside the source text.
    pub span: Range<usize>,
}

/// How to inline images for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineOptions<'a> {
    pub enabled: bool,
    /// Directory relative paths resolve against; the working directory if None.
    pub image_root: Option<&'a Path>,
}

/// An image that was embedded, reported once per distinct path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinedImage {
    pub path: String,
    pub bytes: usize,
}

/// The rewritten text and what happened to each reference.
#[derive(Debug, Clone, Default)]
pub struct InlineResult {
    pub text: String,
    pub references_found: usize,
    pub references_rewritten: usize,
    pub references_skipped: usize,
    pub inlined: Vec<InlinedImage>,
    pub errors: Vec<ImageError>,
}

static RE_MARKDOWN_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"!\[(?:[^\[\]]|\[[^\]]*\])*\]\(\s*(?:<([^>\n]+)>|([^)\s]+))(?:\s+(?:"[^"]*"|'[^']*'))?\s*\)"#)
        .unwrap()
});

static RE_HTML_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img\s(?:[^>]*?\s)?src\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Find every image reference, Markdown matches first, then HTML matches.
pub fn extract_references(source: &str) -> Vec<ImageReference> {
    let mut refs = Vec::new();
    collect(&RE_MARKDOWN_IMAGE, ImageSyntax::Markdown, source, &mut refs);
    collect(&RE_HTML_IMAGE, ImageSyntax::Html, source, &mut refs);
    refs
}

fn collect(re: &Regex, syntax: ImageSyntax, source: &str, out: &mut Vec<ImageReference>) {
    for caps in re.captures_iter(source) {
        if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
            out.push(ImageReference {
                path: m.as_str().to_string(),
                syntax,
                span: m.range(),
            });
        }
    }
}

/// Inline images relative to the working directory.
///
/// Returns `source` unchanged when `enabled` is false.
pub fn inline_images(source: &str, enabled: bool) -> String {
    inline_images_with(
        source,
        &InlineOptions {
            enabled,
            image_root: None,
        },
    )
    .text
}

/// Inline images and report what happened to each reference.
///
/// Unreadable images are logged, recorded in [`InlineResult::errors`] and
/// left as written; they never abort the run.
pub fn inline_images_with(source: &str, opts: &InlineOptions<'_>) -> InlineResult {
    if !opts.enabled {
        return InlineResult {
            text: source.to_string(),
            ..Default::default()
        };
    }

    let refs = extract_references(source);
    let mut result = InlineResult {
        references_found: refs.len(),
        ..Default::default()
    };

    // distinct path -> index into `uris`, or None if it failed to load
    let mut cache: HashMap<&str, Option<usize>> = HashMap::new();
    let mut uris: Vec<String> = Vec::new();
    let mut edits: Vec<(Range<usize>, usize)> = Vec::new();

    for r in &refs {
        let Some(ext) = image_extension(&r.path) else {
            debug!("Skipping non-image reference: {}", r.path);
            result.references_skipped += 1;
            continue;
        };

        let slot = *cache.entry(r.path.as_str()).or_insert_with(|| {
            let file = resolve(&r.path, opts.image_root);
            match encode_file(&file, ext) {
                Ok(img) => {
                    debug!("Inlined {} ({} bytes)", r.path, img.original_len);
                    result.inlined.push(InlinedImage {
                        path: r.path.clone(),
                        bytes: img.original_len,
                    });
                    uris.push(img.data_uri());
                    Some(uris.len() - 1)
                }
                Err(e) => {
                    warn!("Error converting image {} to base64: {}", r.path, e);
                    result.errors.push(ImageError::ReadFailed {
                        path: r.path.clone(),
                        detail: e.to_string(),
                    });
                    None
                }
            }
        });

        if let Some(idx) = slot {
            edits.push((r.span.clone(), idx));
        }
    }

    edits.sort_by_key(|(span, _)| span.start);

    let mut text = String::with_capacity(source.len() + uris.iter().map(String::len).sum::<usize>());
    let mut cursor = 0;
    for (span, idx) in edits {
        // both patterns can capture the same span
        if span.start < cursor {
            continue;
        }
        text.push_str(&source[cursor..span.start]);
        text.push_str(&uris[idx]);
        cursor = span.end;
        result.references_rewritten += 1;
    }
    text.push_str(&source[cursor..]);

    result.text = text;
    result
}

fn resolve(path: &str, root: Option<&Path>) -> PathBuf {
    match root {
        Some(root) => root.join(path),
        None => PathBuf::from(path),
    }
}
