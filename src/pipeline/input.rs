//! Input loading: read a text file and decode it under the configured encoding.
//!
//! Encodings are looked up by WHATWG label through `encoding_rs`, so `utf-8`,
//! `UTF8`, `latin1` and `windows-1252` all resolve. Decoding is strict:
//! malformed input is an error rather than being patched with U+FFFD, and a
//! byte-order mark is kept as part of the text.

use crate::error::{FileRole, Md2HtmlError};
use encoding_rs::Encoding;
use std::path::Path;
use tracing::debug;

/// Resolve an encoding label.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, Md2HtmlError> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| Md2HtmlError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// Decode `bytes` strictly; `None` if they are malformed for `encoding`.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

/// Read and decode a required input file.
pub fn read_text(
    path: &Path,
    role: FileRole,
    encoding: &'static Encoding,
) -> Result<String, Md2HtmlError> {
    let bytes = std::fs::read(path).map_err(|e| Md2HtmlError::from_read(role, path, e))?;
    let text = decode(&bytes, encoding).ok_or_else(|| Md2HtmlError::DecodeFailed {
        path: path.to_path_buf(),
        encoding: encoding.name().to_string(),
    })?;
    debug!("Read {} '{}' ({} bytes)", role, path.display(), bytes.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_common_labels() {
        assert_eq!(resolve_encoding("utf-8").unwrap().name(), "UTF-8");
        assert_eq!(resolve_encoding(" UTF8 ").unwrap().name(), "UTF-8");
        assert_eq!(resolve_encoding("latin1").unwrap().name(), "windows-1252");
        assert!(matches!(
            resolve_encoding("nope"),
            Err(Md2HtmlError::UnknownEncoding { .. })
        ));
    }

    #[test]
    fn reads_utf8_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Café\n").unwrap();

        let text = read_text(&path, FileRole::Document, encoding_rs::UTF_8).unwrap();
        assert_eq!(text, "# Café\n");
    }

    #[test]
    fn decodes_legacy_encodings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, b"caf\xe9").unwrap();

        let enc = resolve_encoding("windows-1252").unwrap();
        assert_eq!(read_text(&path, FileRole::Document, enc).unwrap(), "café");
    }

    #[test]
    fn malformed_bytes_fail_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, b"caf\xe9").unwrap();

        let err = read_text(&path, FileRole::Document, encoding_rs::UTF_8).unwrap_err();
        assert!(matches!(err, Md2HtmlError::DecodeFailed { .. }), "got: {err}");
    }

    #[test]
    fn missing_file_reports_its_role() {
        let err = read_text(
            Path::new("/definitely/not/template.html"),
            FileRole::Template,
            encoding_rs::UTF_8,
        )
        .unwrap_err();
        match err {
            Md2HtmlError::FileNotFound { role, .. } => assert_eq!(role, FileRole::Template),
            other => panic!("unexpected error: {other}"),
        }
    }
}
