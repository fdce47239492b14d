//! Progress-callback trait for conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to observe
//! what the pipeline does with each image reference and whether the dark-mode
//! stylesheet was applied. Degraded conditions (an unreadable image, a missing
//! dark stylesheet) are logged with `tracing` *and* reported here, so callers
//! that do not install a subscriber can still react to them.
//!
//! # Example
//!
//! ```rust
//! use md2html_inline::{ConversionConfig, ConversionProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     inlined: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_image_inlined(&self, path: &str, bytes: usize) {
//!         self.inlined.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("inlined {path} ({bytes} bytes)");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { inlined: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::error::ImageError;
use crate::output::ConversionReport;
use std::path::Path;
use std::sync::Arc;

/// Called by the conversion pipeline as it works through a document.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. The trait is `Send + Sync` so a configuration holding
/// a callback can be shared between threads.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the document has been read and decoded.
    fn on_conversion_start(&self, document: &Path) {
        let _ = document;
    }

    /// Called when an image reference was replaced by a data URI.
    ///
    /// # Arguments
    /// * `path`  — the path as written in the document
    /// * `bytes` — size of the image file before encoding
    fn on_image_inlined(&self, path: &str, bytes: usize) {
        let _ = (path, bytes);
    }

    /// Called when an image could not be read; the reference is left as written.
    fn on_image_failed(&self, error: &ImageError) {
        let _ = error;
    }

    /// Called when dark mode was requested but no stylesheet could be loaded.
    fn on_dark_mode_unavailable(&self) {}

    /// Called once the final HTML has been assembled, before it is written.
    fn on_conversion_complete(&self, report: &ConversionReport) {
        let _ = report;
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        inlined: AtomicUsize,
        failed: AtomicUsize,
        dark_missing: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_image_inlined(&self, _path: &str, _bytes: usize) {
            self.inlined.fetch_add(1, Ordering::SeqCst);
        }

        fn on_image_failed(&self, _error: &ImageError) {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }

        fn on_dark_mode_unavailable(&self) {
            self.dark_missing.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(Path::new("doc.md"));
        cb.on_image_inlined("a.png", 42);
        cb.on_image_failed(&ImageError::ReadFailed {
            path: "b.png".into(),
            detail: "missing".into(),
        });
        cb.on_dark_mode_unavailable();
        cb.on_conversion_complete(&ConversionReport::default());
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_image_inlined("a.png", 10);
        tracker.on_image_inlined("b.gif", 20);
        tracker.on_image_failed(&ImageError::ReadFailed {
            path: "c.jpg".into(),
            detail: "permission denied".into(),
        });
        tracker.on_dark_mode_unavailable();

        assert_eq!(tracker.inlined.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.failed.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.dark_missing.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_conversion_start(Path::new("notes.md"));
        cb.on_image_inlined("x.jpeg", 512);
    }
}
