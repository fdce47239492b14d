//! Image encoding: raw image file → base64 data URI.
//!
//! The bytes are embedded exactly as read; nothing is decoded, resized or
//! recompressed. The MIME subtype is the file extension verbatim, so
//! `photo.JPG` becomes `data:image/JPG;base64,…`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use tracing::debug;

/// Extensions (lower-cased) treated as inlinable raster images.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// A referenced image ready to be embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// MIME subtype, taken verbatim from the file extension.
    pub subtype: String,
    /// Standard base64 (with padding) of the file contents.
    pub base64: String,
    /// Size of the file before encoding.
    pub original_len: usize,
}

impl EncodedImage {
    /// Render as `data:image/<subtype>;base64,<data>`.
    pub fn data_uri(&self) -> String {
        format!("data:image/{};base64,{}", self.subtype, self.base64)
    }
}

/// The extension of `path` as written, if it names a supported raster image.
pub fn image_extension(path: &str) -> Option<&str> {
    let ext = Path::new(path).extension()?.to_str()?;
    IMAGE_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
        .then_some(ext)
}

/// Encode already-read image bytes for the extension `subtype`.
pub fn encode_bytes(bytes: &[u8], subtype: &str) -> EncodedImage {
    let b64 = STANDARD.encode(bytes);
    debug!("Encoded image → {} bytes base64", b64.len());
    EncodedImage {
        subtype: subtype.to_string(),
        base64: b64,
        original_len: bytes.len(),
    }
}

/// Read the file at `path` and encode it.
///
/// `subtype` is the extension as written in the document reference.
pub fn encode_file(path: &Path, subtype: &str) -> std::io::Result<EncodedImage> {
    let bytes = std::fs::read(path)?;
    Ok(encode_bytes(&bytes, subtype))
}
