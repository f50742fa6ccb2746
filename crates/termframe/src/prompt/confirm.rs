//! Yes/no confirmation prompt

use super::{title, Outcome, PromptEngine, PromptSnapshot, State};
use crate::theme::{self, Theme};
use anyhow::Result;

/// Snapshot of a confirmation prompt's lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmSnapshot {
    pub state: State,
    /// Currently highlighted choice.
    pub value: bool,
}

impl PromptSnapshot for ConfirmSnapshot {
    fn state(&self) -> State {
        self.state
    }
}

/// Start building a confirmation prompt.
pub fn confirm(message: impl Into<String>) -> ConfirmPrompt {
    ConfirmPrompt::new(message)
}

/// Confirmation prompt renderer and driver.
#[derive(Debug, Clone)]
pub struct ConfirmPrompt {
    message: String,
    active_label: String,
    inactive_label: String,
    initial_value: bool,
    theme: Theme,
}

impl ConfirmPrompt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            active_label: "Yes".to_string(),
            inactive_label: "No".to_string(),
            initial_value: true,
            theme: theme::active_theme(),
        }
    }

    /// Label for the affirmative choice.
    pub fn active(mut self, label: impl Into<String>) -> Self {
        self.active_label = label.into();
        self
    }

    /// Label for the negative choice.
    pub fn inactive(mut self, label: impl Into<String>) -> Self {
        self.inactive_label = label.into();
        self
    }

    /// Choice highlighted when the prompt opens; read by the engine.
    pub fn initial_value(mut self, value: bool) -> Self {
        self.initial_value = value;
        self
    }

    pub fn initial(&self) -> bool {
        self.initial_value
    }

    /// Override the styling configuration.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn choice(&self, label: &str, chosen: bool) -> String {
        let theme = &self.theme;
        let glyphs = &theme.glyphs;
        if chosen {
            format!("{} {}", theme.primary.apply_to(glyphs.radio_active), label)
        } else {
            format!(
                "{} {}",
                theme.dim.apply_to(glyphs.radio_inactive),
                theme.dim.apply_to(label)
            )
        }
    }

    /// Render one frame for `snapshot`.
    pub fn render(&self, snapshot: &ConfirmSnapshot) -> String {
        let theme = &self.theme;
        let glyphs = &theme.glyphs;
        let title = title(snapshot.state, &self.message, theme);
        let chosen_label = if snapshot.value {
            &self.active_label
        } else {
            &self.inactive_label
        };

        match snapshot.state {
            State::Submit => format!(
                "{}{}  {}",
                title,
                theme.structural.apply_to(glyphs.bar),
                theme.dim.apply_to(chosen_label),
            ),
            State::Cancel => format!(
                "{}{}  {}\n{}",
                title,
                theme.structural.apply_to(glyphs.bar),
                theme
                    .disabled
                    .apply_to(theme.dim.apply_to(chosen_label).to_string()),
                theme.structural.apply_to(glyphs.bar),
            ),
            State::Initial | State::Active | State::Error => format!(
                "{}{}  {} {} {}\n{}\n",
                title,
                theme.primary.apply_to(glyphs.bar),
                self.choice(&self.active_label, snapshot.value),
                theme.dim.apply_to("/"),
                self.choice(&self.inactive_label, !snapshot.value),
                theme.primary.apply_to(glyphs.bar_end),
            ),
        }
    }

    /// Drive the prompt with `engine` until it resolves or is cancelled.
    pub fn interact_with<E>(&self, engine: &mut E) -> Result<Outcome<bool>>
    where
        E: PromptEngine<Snapshot = ConfirmSnapshot>,
    {
        super::interact(
            engine,
            |snapshot, _rows| self.render(snapshot),
            |snapshot| match snapshot.state {
                State::Submit => Outcome::Submitted(snapshot.value),
                _ => Outcome::Cancelled,
            },
        )
    }
}
