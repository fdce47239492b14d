//! Markdown rendering: CommonMark text → HTML fragment.
//!
//! Code blocks are pulled out of the `pulldown-cmark` event stream and
//! rendered as `<div class="codehilite"><pre><code>…</code></pre></div>`.
//! When a fenced block names a language syntect knows, its tokens are wrapped
//! in class-based spans (`<span class="source rust">`), so the page
//! stylesheet decides the colours. Anything else is HTML-escaped verbatim.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::warn;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Render Markdown to an HTML fragment.
///
/// Pure: the same input always yields the same output.
pub fn render(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());

    let mut events: Vec<Event<'_>> = Vec::new();
    // (language, accumulated code) while inside a code block
    let mut code: Option<(Option<String>, String)> = None;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info),
                    CodeBlockKind::Indented => None,
                };
                code = Some((lang, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((lang, body)) = code.take() {
                    events.push(Event::Html(CowStr::from(render_code_block(
                        lang.as_deref(),
                        &body,
                    ))));
                }
            }
            Event::Text(text) if code.is_some() => {
                if let Some((_, body)) = code.as_mut() {
                    body.push_str(&text);
                }
            }
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// First word of a fence info string: "rust,ignore" and "rust title" → "rust".
fn fence_language(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn render_code_block(lang: Option<&str>, code: &str) -> String {
    let body = match lang.and_then(|l| SYNTAX_SET.find_syntax_by_token(l)) {
        Some(syntax) => highlight(code, syntax).unwrap_or_else(|e| {
            warn!("Highlighting failed for {:?} block, emitting plain text: {}", lang, e);
            html_escape::encode_text(code).into_owned()
        }),
        None => html_escape::encode_text(code).into_owned(),
    };

    match lang {
        Some(l) => format!(
            "<div class=\"codehilite\"><pre><code class=\"language-{}\">{}</code></pre></div>\n",
            html_escape::encode_double_quoted_attribute(l),
            body
        ),
        None => format!("<div class=\"codehilite\"><pre><code>{body}</code></pre></div>\n"),
    }
}

fn highlight(code: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}
