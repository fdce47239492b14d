//! Output writing: derive the output path, ask before overwriting, persist.
//!
//! Whether a file exists and whether it may be replaced are both answered by
//! an [`OverwriteGuard`], so the pipeline never talks to a terminal directly.
//! The binary uses [`ConsolePrompt`] on stdin/stderr; tests script the answer.

use crate::error::Md2HtmlError;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Decides what to do when the output file already exists.
pub trait OverwriteGuard {
    /// Whether `path` already exists.
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Ask whether the existing file at `path` may be replaced.
    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool>;
}

/// Replace existing files without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOverwrite;

impl OverwriteGuard for AlwaysOverwrite {
    fn confirm_overwrite(&mut self, _path: &Path) -> io::Result<bool> {
        Ok(true)
    }
}

/// Never replace an existing file.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverOverwrite;

impl OverwriteGuard for NeverOverwrite {
    fn confirm_overwrite(&mut self, _path: &Path) -> io::Result<bool> {
        Ok(false)
    }
}

/// Interactive y/n prompt over any line reader and writer.
///
/// Only `y` or `Y` confirms; anything else, including end of input, declines.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr and read the answer from stdin.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> OverwriteGuard for ConsolePrompt<R, W> {
    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool> {
        write!(
            self.output,
            "The HTML file '{}' already exists. Do you want to override it? (y/n): ",
            path.display()
        )?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }
}

fn is_affirmative(answer: &str) -> bool {
    answer
        .trim_end_matches(['\r', '\n'])
        .eq_ignore_ascii_case("y")
}

/// Outcome of [`write_output`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// The file existed and the guard declined; nothing was touched.
    Declined(PathBuf),
}

/// `notes/today.md` → `notes/today.html`.
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension("html")
}

/// Write `html` to `path` in `encoding`, consulting `guard` if the file exists.
///
/// The bytes go to a uniquely named temporary file in the same directory
/// which is then persisted over `path`, so a failed write never leaves a
/// truncated page behind. A replaced file keeps its permissions. Characters
/// the encoding cannot represent become HTML numeric character references.
pub fn write_output(
    path: &Path,
    html: &str,
    encoding: &'static Encoding,
    guard: &mut dyn OverwriteGuard,
) -> Result<WriteOutcome, Md2HtmlError> {
    let existing = if guard.exists(path) {
        let confirmed = guard
            .confirm_overwrite(path)
            .map_err(|e| Md2HtmlError::PromptFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
        if !confirmed {
            info!("Conversion aborted. HTML file was not overwritten.");
            return Ok(WriteOutcome::Declined(path.to_path_buf()));
        }
        std::fs::metadata(path).ok().map(|m| m.permissions())
    } else {
        None
    };

    let bytes = encode_html(html, encoding);

    let write_failed = |e: io::Error| Md2HtmlError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = temp_builder(existing.is_none())
        .prefix(".md2html-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_failed)?;
    tmp.write_all(&bytes).map_err(write_failed)?;
    if let Some(perms) = existing {
        tmp.as_file().set_permissions(perms).map_err(write_failed)?;
    }
    // a failed persist drops the temporary file
    tmp.persist(path).map_err(|e| write_failed(e.error))?;

    info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(WriteOutcome::Written(path.to_path_buf()))
}

/// Encode `html` for output in exactly the encoding the inputs were read in.
///
/// `Encoding::encode` falls back to UTF-8 for UTF-16 labels, so those are
/// serialised here.
fn encode_html<'a>(html: &'a str, encoding: &'static Encoding) -> Cow<'a, [u8]> {
    if encoding == UTF_16LE {
        return Cow::Owned(html.encode_utf16().flat_map(u16::to_le_bytes).collect());
    }
    if encoding == UTF_16BE {
        return Cow::Owned(html.encode_utf16().flat_map(u16::to_be_bytes).collect());
    }

    let (bytes, _, replaced) = encoding.encode(html);
    if replaced {
        debug!(
            "Characters outside {} written as numeric character references",
            encoding.name()
        );
    }
    bytes
}

/// New output files get the usual `0o666 & !umask` mode rather than the
/// private mode temporary files are created with.
#[cfg(unix)]
fn temp_builder(new_file: bool) -> tempfile::Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = tempfile::Builder::new();
    if new_file {
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder
}

#[cfg(not(unix))]
fn temp_builder(_new_file: bool) -> tempfile::Builder<'static, 'static> {
    tempfile::Builder::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn output_path_replaces_extension() {
        assert_eq!(output_path_for(Path::new("docs/readme.md")), PathBuf::from("docs/readme.html"));
        assert_eq!(output_path_for(Path::new("a.b.markdown")), PathBuf::from("a.b.html"));
        assert_eq!(output_path_for(Path::new("notes")), PathBuf::from("notes.html"));
    }

    #[test]
    fn only_y_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("Y\r\n"));
        assert!(is_affirmative("y"));
        assert!(!is_affirmative("yes\n"));
        assert!(!is_affirmative("n\n"));
        assert!(!is_affirmative(" y\n"));
        assert!(!is_affirmative(""));
    }

    #[test]
    fn console_prompt_reads_answer_and_prints_question() {
        let mut out = Vec::new();
        let mut prompt = ConsolePrompt::new(Cursor::new("Y\n"), &mut out);
        assert!(prompt.confirm_overwrite(Path::new("page.html")).unwrap());
        drop(prompt);
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("'page.html' already exists"), "got: {shown}");
    }

    #[test]
    fn console_prompt_declines_on_eof() {
        let mut prompt = ConsolePrompt::new(Cursor::new(""), io::sink());
        assert!(!prompt.confirm_overwrite(Path::new("page.html")).unwrap());
    }

    #[test]
    fn writes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");

        let outcome = write_output(&path, "<p>é</p>", encoding_rs::UTF_8, &mut NeverOverwrite).unwrap();
        assert_eq!(outcome, WriteOutcome::Written(path.clone()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>é</p>");
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.html")]);
    }

    #[test]
    fn sibling_tmp_file_is_not_clobbered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        let user_file = dir.path().join("out.html.tmp");
        std::fs::write(&user_file, b"keep me").unwrap();

        write_output(&path, "<p>x</p>", encoding_rs::UTF_8, &mut AlwaysOverwrite).unwrap();
        assert_eq!(std::fs::read(&user_file).unwrap(), b"keep me");
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        std::fs::write(&path, b"old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        write_output(&path, "new", encoding_rs::UTF_8, &mut AlwaysOverwrite).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn new_file_gets_default_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        let plain = dir.path().join("plain.html");
        std::fs::write(&plain, b"x").unwrap();

        write_output(&path, "x", encoding_rs::UTF_8, &mut NeverOverwrite).unwrap();
        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }

    #[test]
    fn declined_overwrite_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        std::fs::write(&path, b"original bytes").unwrap();

        let mut prompt = ConsolePrompt::new(Cursor::new("n\n"), io::sink());
        let outcome = write_output(&path, "<p>new</p>", encoding_rs::UTF_8, &mut prompt).unwrap();
        assert_eq!(outcome, WriteOutcome::Declined(path.clone()));
        assert_eq!(std::fs::read(&path).unwrap(), b"original bytes");
    }

    #[test]
    fn confirmed_overwrite_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        std::fs::write(&path, b"old").unwrap();

        let outcome = write_output(&path, "new", encoding_rs::UTF_8, &mut AlwaysOverwrite).unwrap();
        assert!(matches!(outcome, WriteOutcome::Written(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn legacy_encoding_uses_character_references() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        let enc = Encoding::for_label(b"windows-1252").unwrap();

        write_output(&path, "café ☃", enc, &mut AlwaysOverwrite).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"caf\xe9 &#9731;");
    }

    #[test]
    fn utf16_output_matches_input_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");

        write_output(&path, "<p>hi</p>", encoding_rs::UTF_16LE, &mut AlwaysOverwrite).unwrap();
        let le = std::fs::read(&path).unwrap();
        assert_eq!(&le[..6], &[b'<', 0, b'p', 0, b'>', 0]);
        assert_eq!(le.len(), 18);

        write_output(&path, "é", encoding_rs::UTF_16BE, &mut AlwaysOverwrite).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x00, 0xe9]);
    }

    #[test]
    fn prompt_io_failure_is_fatal() {
        struct Broken;
        impl OverwriteGuard for Broken {
            fn exists(&self, _path: &Path) -> bool {
                true
            }
            fn confirm_overwrite(&mut self, _path: &Path) -> io::Result<bool> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let err = write_output(&dir.path().join("x.html"), "", encoding_rs::UTF_8, &mut Broken).unwrap_err();
        assert!(matches!(err, Md2HtmlError::PromptFailed { .. }));
    }
}
