//! Configuration types for Markdown-to-HTML conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Default file locations are resolved
//! here, once, so the pipeline stages never consult global state.

use crate::error::Md2HtmlError;
use crate::progress::{ConversionProgressCallback, ProgressCallback};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default HTML template, relative to the working directory.
pub const DEFAULT_TEMPLATE_PATH: &str = "template.html";
/// Default base stylesheet, relative to the working directory.
pub const DEFAULT_CSS_PATH: &str = "styles.css";
/// Default dark-mode stylesheet, relative to the working directory.
pub const DEFAULT_DARK_MODE_CSS_PATH: &str = "dark-mode.css";
/// Default encoding label for every text file read or written.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Configuration for a Markdown-to-HTML conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use md2html_inline::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .template_path("site/template.html")
///     .dark_mode(true)
///     .build()
///     .unwrap();
/// assert!(config.dark_mode);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// HTML template containing `{{ content }}`, `{{ generated_at }}` and
    /// `{{ styles }}` placeholders. Default: `template.html`.
    pub template_path: PathBuf,

    /// Base stylesheet, always embedded. Default: `styles.css`.
    pub css_path: PathBuf,

    /// Stylesheet appended when [`Self::dark_mode`] is on. Default: `dark-mode.css`.
    ///
    /// `None`, a missing file, or an unreadable file all degrade to the base
    /// stylesheet with a warning.
    pub dark_mode_css_path: Option<PathBuf>,

    /// WHATWG encoding label used to decode every input and encode the output.
    /// Default: `utf-8`.
    pub encoding: String,

    /// Replace local raster image references with base64 data URIs. Default: true.
    pub inline_images: bool,

    /// Append the dark-mode stylesheet. Default: false.
    pub dark_mode: bool,

    /// Directory relative image paths are resolved against.
    /// If None, paths resolve against the process working directory.
    pub image_root: Option<PathBuf>,

    /// Optional progress callback for per-image and stylesheet events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            css_path: PathBuf::from(DEFAULT_CSS_PATH),
            dark_mode_css_path: Some(PathBuf::from(DEFAULT_DARK_MODE_CSS_PATH)),
            encoding: DEFAULT_ENCODING.to_string(),
            inline_images: true,
            dark_mode: false,
            image_root: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("template_path", &self.template_path)
            .field("css_path", &self.css_path)
            .field("dark_mode_css_path", &self.dark_mode_css_path)
            .field("encoding", &self.encoding)
            .field("inline_images", &self.inline_images)
            .field("dark_mode", &self.dark_mode)
            .field("image_root", &self.image_root)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.template_path = path.into();
        self
    }

    pub fn css_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.css_path = path.into();
        self
    }

    pub fn dark_mode_css_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.dark_mode_css_path = Some(path.into());
        self
    }

    /// Forget the dark-mode stylesheet; dark mode will then fall back to the base CSS.
    pub fn no_dark_mode_css(mut self) -> Self {
        self.config.dark_mode_css_path = None;
        self
    }

    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.config.encoding = label.into();
        self
    }

    pub fn inline_images(mut self, v: bool) -> Self {
        self.config.inline_images = v;
        self
    }

    pub fn dark_mode(mut self, v: bool) -> Self {
        self.config.dark_mode = v;
        self
    }

    pub fn image_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.image_root = Some(dir.into());
        self
    }

    pub fn progress_callback(mut self, cb: Arc<dyn ConversionProgressCallback>) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2HtmlError> {
        let c = &self.config;
        if c.template_path.as_os_str().is_empty() {
            return Err(Md2HtmlError::InvalidConfig(
                "Template path must not be empty".into(),
            ));
        }
        if c.css_path.as_os_str().is_empty() {
            return Err(Md2HtmlError::InvalidConfig(
                "Stylesheet path must not be empty".into(),
            ));
        }
        if encoding_rs::Encoding::for_label(c.encoding.trim().as_bytes()).is_none() {
            return Err(Md2HtmlError::UnknownEncoding {
                label: c.encoding.clone(),
            });
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_paths() {
        let c = ConversionConfig::default();
        assert_eq!(c.template_path, PathBuf::from("template.html"));
        assert_eq!(c.css_path, PathBuf::from("styles.css"));
        assert_eq!(c.dark_mode_css_path, Some(PathBuf::from("dark-mode.css")));
        assert_eq!(c.encoding, "utf-8");
        assert!(c.inline_images);
        assert!(!c.dark_mode);
        assert!(c.image_root.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let c = ConversionConfig::builder()
            .template_path("t.html")
            .css_path("s.css")
            .no_dark_mode_css()
            .encoding("windows-1252")
            .inline_images(false)
            .dark_mode(true)
            .image_root("/srv/images")
            .build()
            .unwrap();
        assert_eq!(c.template_path, PathBuf::from("t.html"));
        assert_eq!(c.css_path, PathBuf::from("s.css"));
        assert!(c.dark_mode_css_path.is_none());
        assert_eq!(c.encoding, "windows-1252");
        assert!(!c.inline_images);
        assert!(c.dark_mode);
        assert_eq!(c.image_root, Some(PathBuf::from("/srv/images")));
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let err = ConversionConfig::builder()
            .encoding("klingon-8")
            .build()
            .unwrap_err();
        assert!(matches!(err, Md2HtmlError::UnknownEncoding { .. }));
    }

    #[test]
    fn empty_template_path_is_rejected() {
        let err = ConversionConfig::builder()
            .template_path("")
            .build()
            .unwrap_err();
        assert!(matches!(err, Md2HtmlError::InvalidConfig(_)));
    }

    #[test]
    fn debug_hides_callback() {
        let c = ConversionConfig::builder()
            .progress_callback(Arc::new(crate::progress::NoopProgressCallback))
            .build()
            .unwrap();
        let dbg = format!("{c:?}");
        assert!(dbg.contains("<dyn ConversionProgressCallback>"));
    }
}
