//! Template composition: fill `{{ content }}`, `{{ generated_at }}` and
//! `{{ styles }}` in the HTML template.
//!
//! Tokens are matched by exact literal text and every occurrence is replaced.
//! Substitution is a single pass over the template, so a token that appears
//! inside the rendered content (for example in a code sample) is left alone.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const CONTENT_TOKEN: &str = "{{ content }}";
pub const GENERATED_AT_TOKEN: &str = "{{ generated_at }}";
pub const STYLES_TOKEN: &str = "{{ styles }}";

static RE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{ (content|generated_at|styles) \}\}").unwrap());

/// RFC 850-style UTC timestamp, e.g. `Friday, 16-Oct-26 09:30:00 UTC`.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%A, %d-%b-%y %H:%M:%S UTC").to_string()
}

/// Substitute the fragment, styles and generation time into `template`.
///
/// A template without some (or all) tokens is returned with only the
/// substitutions it asks for.
pub fn compose(template: &str, html_fragment: &str, css: &str, now: DateTime<Utc>) -> String {
    let generated_at = format!("Generated at {}", format_timestamp(now));
    let styles = format!("<style>{css}</style>");

    RE_TOKEN
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "content" => html_fragment.to_string(),
            "generated_at" => generated_at.clone(),
            _ => styles.clone(),
        })
        .into_owned()
}
