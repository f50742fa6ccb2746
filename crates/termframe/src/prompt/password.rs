//! Password prompt
//!
//! Same frame shape as the text prompt, but the value is masked with the
//! glyph set's mask character and the cursor is drawn over the mask.

use super::{title, Outcome, PromptEngine, PromptSnapshot, State};
use crate::theme::{self, Theme};
use anyhow::Result;

/// Snapshot of a password prompt's lifecycle.
#[derive(Debug, Clone)]
pub struct PasswordSnapshot {
    pub state: State,
    /// Raw value collected so far. Only ever rendered masked.
    pub value: String,
    /// Cursor position within the value, in characters.
    pub cursor: usize,
    /// Validation error shown in the `Error` state.
    pub error: String,
}

impl PromptSnapshot for PasswordSnapshot {
    fn state(&self) -> State {
        self.state
    }
}

/// Start building a password prompt.
pub fn password(message: impl Into<String>) -> PasswordPrompt {
    PasswordPrompt::new(message)
}

/// Password prompt renderer and driver.
#[derive(Debug, Clone)]
pub struct PasswordPrompt {
    message: String,
    mask: Option<String>,
    theme: Theme,
}

impl PasswordPrompt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            mask: None,
            theme: theme::active_theme(),
        }
    }

    /// Replace the glyph set's mask character.
    pub fn mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    /// Override the styling configuration.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn mask_glyph(&self) -> &str {
        self.mask
            .as_deref()
            .unwrap_or(self.theme.glyphs.password_mask)
    }

    fn masked(&self, value: &str) -> String {
        self.mask_glyph().repeat(value.chars().count())
    }

    /// Masked value with the cursor drawn in: an inverted mask character
    /// under the cursor, or an inverted block appended at the end.
    fn masked_with_cursor(&self, value: &str, cursor: usize) -> String {
        let theme = &self.theme;
        let mask = self.mask_glyph();
        let count = value.chars().count();
        if cursor >= count {
            format!(
                "{}{}",
                mask.repeat(count),
                theme
                    .inverse
                    .apply_to(theme.hidden.apply_to("_").to_string())
            )
        } else {
            format!(
                "{}{}{}",
                mask.repeat(cursor),
                theme.inverse.apply_to(mask),
                mask.repeat(count - cursor - 1),
            )
        }
    }

    /// Render one frame for `snapshot`.
    pub fn render(&self, snapshot: &PasswordSnapshot) -> String {
        let theme = &self.theme;
        let glyphs = &theme.glyphs;
        let title = title(snapshot.state, &self.message, theme);
        let masked = self.masked(&snapshot.value);

        match snapshot.state {
            State::Error => format!(
                "{}\n{}  {}\n{}  {}\n",
                title.trim(),
                theme.error.apply_to(glyphs.bar),
                masked,
                theme.error.apply_to(glyphs.bar_end),
                theme.error.apply_to(&snapshot.error),
            ),
            State::Submit => format!(
                "{}{}  {}",
                title,
                theme.structural.apply_to(glyphs.bar),
                theme.dim.apply_to(&masked),
            ),
            State::Cancel => {
                let struck = theme
                    .disabled
                    .apply_to(theme.dim.apply_to(&masked).to_string());
                let trailing_bar = if masked.is_empty() {
                    String::new()
                } else {
                    format!("\n{}", theme.structural.apply_to(glyphs.bar))
                };
                format!(
                    "{}{}  {}{}",
                    title,
                    theme.structural.apply_to(glyphs.bar),
                    struck,
                    trailing_bar,
                )
            }
            State::Initial | State::Active => format!(
                "{}{}  {}\n{}\n",
                title,
                theme.primary.apply_to(glyphs.bar),
                self.masked_with_cursor(&snapshot.value, snapshot.cursor),
                theme.primary.apply_to(glyphs.bar_end),
            ),
        }
    }

    /// Drive the prompt with `engine` until it resolves or is cancelled.
    pub fn interact_with<E>(&self, engine: &mut E) -> Result<Outcome<String>>
    where
        E: PromptEngine<Snapshot = PasswordSnapshot>,
    {
        super::interact(
            engine,
            |snapshot, _rows| self.render(snapshot),
            |snapshot| match snapshot.state {
                State::Submit => Outcome::Submitted(snapshot.value.clone()),
                _ => Outcome::Cancelled,
            },
        )
    }
}
