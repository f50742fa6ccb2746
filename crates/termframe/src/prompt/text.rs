//! Free-text prompt

use super::{title, Outcome, PromptEngine, PromptSnapshot, State};
use crate::theme::{self, Theme};
use anyhow::Result;

/// Snapshot of a text prompt's lifecycle.
#[derive(Debug, Clone)]
pub struct TextSnapshot {
    pub state: State,
    /// Raw value collected so far.
    pub value: String,
    /// Cursor-decorated presentation of the value shown while editing.
    pub presentation: String,
    /// Validation error shown in the `Error` state.
    pub error: String,
}

impl PromptSnapshot for TextSnapshot {
    fn state(&self) -> State {
        self.state
    }
}

/// Start building a free-text prompt.
pub fn text(message: impl Into<String>) -> TextPrompt {
    TextPrompt::new(message)
}

/// Free-text prompt renderer and driver.
#[derive(Debug, Clone)]
pub struct TextPrompt {
    message: String,
    placeholder: Option<String>,
    theme: Theme,
}

impl TextPrompt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            placeholder: None,
            theme: theme::active_theme(),
        }
    }

    /// Ghost text shown while the value is empty.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Override the styling configuration.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Placeholder presentation: first character inverted, rest dimmed.
    /// Without a placeholder, an inverted hidden underscore marks the
    /// cursor position.
    fn placeholder_view(&self) -> String {
        let theme = &self.theme;
        let mut chars = self
            .placeholder
            .as_deref()
            .unwrap_or_default()
            .chars();
        match chars.next() {
            Some(first) => format!(
                "{}{}",
                theme.inverse.apply_to(first),
                theme.dim.apply_to(chars.as_str())
            ),
            None => theme
                .inverse
                .apply_to(theme.hidden.apply_to("_").to_string())
                .to_string(),
        }
    }

    /// Render one frame for `snapshot`.
    pub fn render(&self, snapshot: &TextSnapshot) -> String {
        let theme = &self.theme;
        let glyphs = &theme.glyphs;
        let title = title(snapshot.state, &self.message, theme);
        let shown = if snapshot.value.is_empty() {
            self.placeholder_view()
        } else {
            snapshot.presentation.clone()
        };

        match snapshot.state {
            State::Error => format!(
                "{}\n{}  {}\n{}  {}\n",
                title.trim(),
                theme.error.apply_to(glyphs.bar),
                shown,
                theme.error.apply_to(glyphs.bar_end),
                theme.error.apply_to(&snapshot.error),
            ),
            State::Submit => {
                let final_value = if snapshot.value.is_empty() {
                    self.placeholder.clone().unwrap_or_default()
                } else {
                    snapshot.value.clone()
                };
                format!(
                    "{}{}  {}",
                    title,
                    theme.structural.apply_to(glyphs.bar),
                    theme.dim.apply_to(final_value),
                )
            }
            State::Cancel => {
                let struck = theme
                    .disabled
                    .apply_to(theme.dim.apply_to(&snapshot.value).to_string());
                let trailing_bar = if snapshot.value.trim().is_empty() {
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
                shown,
                theme.primary.apply_to(glyphs.bar_end),
            ),
        }
    }

    /// Drive the prompt with `engine` until it resolves or is cancelled.
    pub fn interact_with<E>(&self, engine: &mut E) -> Result<Outcome<String>>
    where
        E: PromptEngine<Snapshot = TextSnapshot>,
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
