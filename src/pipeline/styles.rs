//! Style composition: base stylesheet plus the optional dark-mode stylesheet.
//!
//! The dark stylesheet is appended verbatim. There is no merging; later rules
//! win through the normal CSS cascade.

use crate::output::DarkModeStatus;
use tracing::warn;

/// Combined CSS for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBundle {
    pub css: String,
    pub dark_mode: DarkModeStatus,
}

/// Compose the stylesheet text embedded in the page.
///
/// With dark mode on but no dark stylesheet text, a warning is logged and the
/// base CSS is returned unchanged with [`DarkModeStatus::Unavailable`].
pub fn compose_styles(base_css: &str, dark_mode: bool, dark_css: Option<&str>) -> StyleBundle {
    if !dark_mode {
        return StyleBundle {
            css: base_css.to_string(),
            dark_mode: DarkModeStatus::Disabled,
        };
    }

    match dark_css {
        Some(dark) => StyleBundle {
            css: format!("{base_css}{dark}"),
            dark_mode: DarkModeStatus::Applied,
        },
        None => {
            warn!("Dark mode requested but no stylesheet available; using the base stylesheet only");
            StyleBundle {
                css: base_css.to_string(),
                dark_mode: DarkModeStatus::Unavailable,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "body { color: black; }\n";
    const DARK: &str = "body { color: white; }\n";

    #[test]
    fn disabled_ignores_dark_css() {
        let bundle = compose_styles(BASE, false, Some(DARK));
        assert_eq!(bundle.css, BASE);
        assert_eq!(bundle.dark_mode, DarkModeStatus::Disabled);
    }

    #[test]
    fn enabled_appends_dark_css_verbatim() {
        let bundle = compose_styles(BASE, true, Some(DARK));
        assert_eq!(bundle.css, format!("{BASE}{DARK}"));
        assert_eq!(bundle.dark_mode, DarkModeStatus::Applied);
    }

    #[test]
    fn no_separator_is_inserted() {
        let bundle = compose_styles("a{}", true, Some("b{}"));
        assert_eq!(bundle.css, "a{}b{}");
    }

    #[test]
    fn enabled_without_dark_css_falls_back_to_base() {
        let bundle = compose_styles(BASE, true, None);
        assert_eq!(bundle.css, BASE);
        assert_eq!(bundle.dark_mode, DarkModeStatus::Unavailable);
    }
}
