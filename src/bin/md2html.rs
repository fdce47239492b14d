//! CLI binary for md2html-inline.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use md2html_inline::{
    convert_to_file, AlwaysOverwrite, ConsolePrompt, ConversionConfig,
    ConversionOutcome, ConversionProgressCallback, ImageError, OverwriteGuard, ProgressCallback,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}

// ── CLI progress callback ────────────────────────────────────────────────────

/// Prints one line per image and a notice when dark mode falls back.
struct CliProgressCallback;

impl ConversionProgressCallback for CliProgressCallback {
    fn on_image_inlined(&self, path: &str, bytes: usize) {
        eprintln!("  {} {}  {}", green("✓"), path, dim(&format!("{bytes} bytes")));
    }

    fn on_image_failed(&self, error: &ImageError) {
        eprintln!("  {} {}", red("✗"), red(&error.to_string()));
    }

    fn on_dark_mode_unavailable(&self) {
        eprintln!(
            "  {} Warning: Dark mode enabled but no dark mode CSS file provided.",
            yellow("⚠")
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert with template.html and styles.css from the current directory
  md2html --md-path notes.md

  # Custom template and stylesheet, append the dark theme
  md2html --md-path notes.md --template-path site/page.html \
          --css-path site/base.css --use-dark-mode 1 --dark-mode-css site/dark.css

  # Keep image paths as links instead of embedding them
  md2html --md-path notes.md --image-to-base64 0

  # Legacy input encoding, overwrite without asking
  md2html --md-path notes.md --encoding windows-1252 --yes

TEMPLATE PLACEHOLDERS:
  {{ content }}        rendered Markdown
  {{ styles }}         <style>…</style> with the composed CSS
  {{ generated_at }}   "Generated at Friday, 16-Oct-26 09:30:00 UTC"

ENVIRONMENT VARIABLES:
  MD2HTML_TEMPLATE     Default for --template-path
  MD2HTML_CSS          Default for --css-path
  MD2HTML_DARK_CSS     Default for --dark-mode-css
  MD2HTML_ENCODING     Default for --encoding
  RUST_LOG             Override log filtering (e.g. md2html_inline=debug)
"#;

/// Convert a Markdown file to a standalone HTML page with inlined images.
#[derive(Parser, Debug)]
#[command(
    name = "md2html",
    version,
    about = "Convert Markdown to HTML with optional template and CSS",
    long_about = "Convert a Markdown document into a single self-contained HTML file. \
Local PNG/JPEG/GIF images are embedded as base64 data URIs and the stylesheet is \
inlined, so the page works without any companion files.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the Markdown file.
    #[arg(long)]
    md_path: PathBuf,

    /// Path to the HTML template file.
    #[arg(long, env = "MD2HTML_TEMPLATE", default_value = "template.html")]
    template_path: PathBuf,

    /// Path to the CSS file.
    #[arg(long, env = "MD2HTML_CSS", default_value = "styles.css")]
    css_path: PathBuf,

    /// Encoding of the files.
    #[arg(long, env = "MD2HTML_ENCODING", default_value = "utf-8")]
    encoding: String,

    /// Convert images to base64 in HTML.
    #[arg(long, default_value = "1", value_parser = parse_switch)]
    image_to_base64: bool,

    /// Use dark mode in HTML.
    #[arg(long, default_value = "0", value_parser = parse_switch)]
    use_dark_mode: bool,

    /// Path to optional CSS file for dark mode.
    #[arg(long, env = "MD2HTML_DARK_CSS", default_value = "dark-mode.css")]
    dark_mode_css: PathBuf,

    /// Overwrite an existing HTML file without asking.
    #[arg(short, long)]
    yes: bool,

    /// Print the run report as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Accepts the same spellings as the original flags: 1/true/True and 0/false/False.
fn parse_switch(s: &str) -> Result<bool, String> {
    match s {
        "1" | "true" | "True" => Ok(true),
        "0" | "false" | "False" => Ok(false),
        other => Err(format!(
            "invalid value '{other}' (expected one of 1, true, True, 0, false, False)"
        )),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress callback reports images and dark-mode fallbacks, so
    // library warnings are only shown in verbose mode or via RUST_LOG.
    let filter = if cli.verbose { "debug" } else { "error" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress_cb: Option<ProgressCallback> = if cli.quiet {
        None
    } else {
        Some(Arc::new(CliProgressCallback) as Arc<dyn ConversionProgressCallback>)
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let mut guard: Box<dyn OverwriteGuard> = if cli.yes {
        Box::new(AlwaysOverwrite)
    } else {
        Box::new(ConsolePrompt::stdio())
    };

    let outcome = convert_to_file(&cli.md_path, &config, guard.as_mut())
        .context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&outcome).context("Failed to serialise report")?;
        println!("{json}");
    }

    match outcome {
        ConversionOutcome::Written { path, report } => {
            if !cli.quiet {
                eprintln!(
                    "{} The Markdown file '{}' was converted to HTML and saved as '{}'",
                    green("✔"),
                    cli.md_path.display(),
                    path.display()
                );
                if !report.is_clean() {
                    eprintln!(
                        "   {}",
                        dim(&format!(
                            "{} image(s) left as links, dark mode: {:?}",
                            report.image_errors.len(),
                            report.dark_mode
                        ))
                    );
                }
            }
        }
        ConversionOutcome::Declined { .. } => {
            if !cli.quiet {
                eprintln!("Conversion aborted. HTML file was not overwritten.");
            }
        }
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .template_path(&cli.template_path)
        .css_path(&cli.css_path)
        .dark_mode_css_path(&cli.dark_mode_css)
        .encoding(&cli.encoding)
        .inline_images(cli.image_to_base64)
        .dark_mode(cli.use_dark_mode);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
