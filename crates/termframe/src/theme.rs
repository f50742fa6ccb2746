//! Glyph sets and styling configuration
//!
//! All rendering goes through a [`Theme`]: a glyph set picked once at
//! process start plus an explicit table of [`console::Style`] values.
//! Renderers take the theme as a parameter, so headless callers and tests
//! can use [`Theme::plain`] to produce frames without color codes.

use console::Style;
use std::sync::{OnceLock, PoisonError, RwLock};
use std::time::Duration;

/// Fixed symbol set for borders, markers, and the spinner animation.
#[derive(Debug, Clone, Copy)]
pub struct GlyphSet {
    pub step_active: &'static str,
    pub step_cancel: &'static str,
    pub step_error: &'static str,
    pub step_submit: &'static str,

    pub bar_start: &'static str,
    pub bar: &'static str,
    pub bar_end: &'static str,
    pub bar_h: &'static str,
    pub corner_top_right: &'static str,
    pub connect_left: &'static str,
    pub corner_bottom_right: &'static str,

    pub radio_active: &'static str,
    pub radio_inactive: &'static str,
    pub checkbox_active: &'static str,
    pub checkbox_selected: &'static str,
    pub checkbox_inactive: &'static str,
    pub password_mask: &'static str,

    pub info: &'static str,
    pub success: &'static str,
    pub warn: &'static str,
    pub error: &'static str,

    pub spinner_frames: &'static [&'static str],
    pub spinner_interval: Duration,
}

impl GlyphSet {
    /// Box-drawing and block glyphs for terminals with Unicode support.
    pub fn unicode() -> Self {
        Self {
            step_active: "◇",
            step_cancel: "■",
            step_error: "▲",
            step_submit: "◆",

            bar_start: "┌",
            bar: "│",
            bar_end: "└",
            bar_h: "─",
            corner_top_right: "╮",
            connect_left: "├",
            corner_bottom_right: "╯",

            radio_active: "●",
            radio_inactive: "○",
            checkbox_active: "◻",
            checkbox_selected: "◼",
            checkbox_inactive: "◻",
            password_mask: "▪",

            info: "●",
            success: "◆",
            warn: "▲",
            error: "■",

            spinner_frames: &["◒", "◐", "◓", "◑"],
            spinner_interval: Duration::from_millis(80),
        }
    }

    /// Plain-ASCII fallbacks for terminals without Unicode support.
    pub fn ascii() -> Self {
        Self {
            step_active: "*",
            step_cancel: "x",
            step_error: "x",
            step_submit: "o",

            bar_start: "T",
            bar: "|",
            bar_end: "—",
            bar_h: "-",
            corner_top_right: "+",
            connect_left: "+",
            corner_bottom_right: "+",

            radio_active: ">",
            radio_inactive: " ",
            checkbox_active: "[•]",
            checkbox_selected: "[+]",
            checkbox_inactive: "[ ]",
            password_mask: "•",

            info: "•",
            success: "*",
            warn: "!",
            error: "x",

            spinner_frames: &["•", "o", "O", "0"],
            spinner_interval: Duration::from_millis(120),
        }
    }

    /// Pick the glyph set matching the terminal's Unicode support.
    pub fn detect() -> Self {
        if unicode_supported() {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }
}

/// Probe the environment for Unicode support, once per process.
fn unicode_supported() -> bool {
    static SUPPORTED: OnceLock<bool> = OnceLock::new();
    *SUPPORTED.get_or_init(|| {
        if cfg!(windows) {
            std::env::var_os("WT_SESSION").is_some()
                || std::env::var("TERM_PROGRAM").is_ok_and(|v| v == "vscode")
                || std::env::var("TERM").is_ok_and(|v| v == "xterm-256color")
        } else {
            // The bare Linux console is the only common non-Unicode case.
            std::env::var("TERM").map(|term| term != "linux").unwrap_or(true)
        }
    })
}

/// Styling configuration passed into the rendering layer.
#[derive(Debug, Clone)]
pub struct Theme {
    pub glyphs: GlyphSet,

    /// Primary actions and active elements.
    pub primary: Style,
    /// Secondary elements, e.g. the spinner animation.
    pub secondary: Style,
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub info: Style,
    /// Borders and separators.
    pub structural: Style,
    pub white: Style,
    pub bg_white: Style,
    pub dim: Style,
    /// Struck-through rendering for cancelled values.
    pub disabled: Style,
    pub inverse: Style,
    pub hidden: Style,
}

impl Theme {
    /// Default color table over the given glyph set.
    pub fn with_glyphs(glyphs: GlyphSet) -> Self {
        Self {
            glyphs,
            primary: Style::new().cyan(),
            secondary: Style::new().magenta(),
            success: Style::new().green(),
            error: Style::new().red(),
            warning: Style::new().yellow(),
            info: Style::new().blue(),
            structural: Style::new().black().bright(),
            white: Style::new().white(),
            bg_white: Style::new().on_white(),
            dim: Style::new().dim(),
            disabled: Style::new().strikethrough(),
            inverse: Style::new().reverse(),
            hidden: Style::new().hidden(),
        }
    }

    /// Unstyled theme over ASCII glyphs, for headless rendering and tests.
    pub fn plain() -> Self {
        Self {
            glyphs: GlyphSet::ascii(),
            primary: Style::new(),
            secondary: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warning: Style::new(),
            info: Style::new(),
            structural: Style::new(),
            white: Style::new(),
            bg_white: Style::new(),
            dim: Style::new(),
            disabled: Style::new(),
            inverse: Style::new(),
            hidden: Style::new(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::with_glyphs(GlyphSet::detect())
    }
}

static ACTIVE: RwLock<Option<Theme>> = RwLock::new(None);

/// Replace the process-default theme used by the convenience entry points.
pub fn set_theme(theme: Theme) {
    *ACTIVE.write().unwrap_or_else(PoisonError::into_inner) = Some(theme);
}

/// The process-default theme.
pub(crate) fn active_theme() -> Theme {
    ACTIVE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_sets_differ() {
        let unicode = GlyphSet::unicode();
        let ascii = GlyphSet::ascii();

        assert_eq!(unicode.bar, "│");
        assert_eq!(ascii.bar, "|");
        assert_ne!(unicode.step_submit, ascii.step_submit);
    }

    #[test]
    fn test_ascii_spinner_is_slower() {
        assert!(GlyphSet::ascii().spinner_interval > GlyphSet::unicode().spinner_interval);
        assert_eq!(GlyphSet::unicode().spinner_frames.len(), 4);
        assert_eq!(GlyphSet::ascii().spinner_frames.len(), 4);
    }

    #[test]
    fn test_plain_theme_does_not_style() {
        let theme = Theme::plain();
        assert_eq!(theme.error.apply_to("boom").to_string(), "boom");
        assert_eq!(theme.dim.apply_to("quiet").to_string(), "quiet");
    }
}
