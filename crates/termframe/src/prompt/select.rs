//! Single-choice select prompt

use super::{title, windowed_rows, Item, Outcome, PromptEngine, PromptSnapshot, State};
use crate::theme::{self, Theme};
use anyhow::Result;
use std::fmt::Display;

/// Snapshot of a select prompt's lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct SelectSnapshot {
    pub state: State,
    /// Index of the highlighted option.
    pub cursor: usize,
}

impl PromptSnapshot for SelectSnapshot {
    fn state(&self) -> State {
        self.state
    }
}

/// Start building a single-choice select prompt.
pub fn select<V>(message: impl Into<String>) -> SelectPrompt<V>
where
    V: Display + Clone + PartialEq,
{
    SelectPrompt::new(message)
}

enum Row {
    Inactive,
    Active,
    Selected,
    Cancelled,
}

/// Single-choice select prompt renderer and driver.
#[derive(Debug, Clone)]
pub struct SelectPrompt<V> {
    message: String,
    items: Vec<Item<V>>,
    max_items: Option<usize>,
    initial_value: Option<V>,
    theme: Theme,
}

impl<V> SelectPrompt<V>
where
    V: Display + Clone + PartialEq,
{
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            items: Vec::new(),
            max_items: None,
            initial_value: None,
            theme: theme::active_theme(),
        }
    }

    /// Append an option. An empty label falls back to the value's display
    /// form; an empty hint is omitted.
    pub fn item(mut self, value: V, label: impl Display, hint: impl Display) -> Self {
        let label = label.to_string();
        let hint = hint.to_string();
        self.items.push(Item {
            value,
            label: (!label.is_empty()).then_some(label),
            hint: (!hint.is_empty()).then_some(hint),
        });
        self
    }

    /// Upper bound on visible options; the terminal height still applies.
    pub fn max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Option highlighted when the prompt opens; read by the engine.
    pub fn initial_value(mut self, value: V) -> Self {
        self.initial_value = Some(value);
        self
    }

    /// Cursor index matching the configured initial value.
    pub fn initial_cursor(&self) -> usize {
        self.initial_value
            .as_ref()
            .and_then(|value| self.items.iter().position(|item| item.value == *value))
            .unwrap_or(0)
    }

    pub fn items(&self) -> &[Item<V>] {
        &self.items
    }

    /// Override the styling configuration.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn styled_item(&self, item: &Item<V>, row: Row) -> String {
        let theme = &self.theme;
        let glyphs = &theme.glyphs;
        let label = item.display_label();
        match row {
            Row::Selected => theme.primary.apply_to(label).to_string(),
            Row::Active => {
                let hint = item
                    .hint
                    .as_ref()
                    .map(|hint| theme.dim.apply_to(format!("({hint})")).to_string())
                    .unwrap_or_default();
                format!(
                    "{} {} {}",
                    theme.dim.apply_to(glyphs.radio_active),
                    label,
                    hint
                )
            }
            Row::Cancelled => theme
                .disabled
                .apply_to(theme.dim.apply_to(label).to_string())
                .to_string(),
            Row::Inactive => format!(
                "{} {}",
                theme.dim.apply_to(glyphs.radio_inactive),
                theme.dim.apply_to(label)
            ),
        }
    }

    /// Render one frame for `snapshot`. `term_rows` bounds the option
    /// window.
    pub fn render(&self, snapshot: &SelectSnapshot, term_rows: usize) -> String {
        let theme = &self.theme;
        let glyphs = &theme.glyphs;
        let title = title(snapshot.state, &self.message, theme);
        let at_cursor = self.items.get(snapshot.cursor);

        match snapshot.state {
            State::Submit => format!(
                "{}{}  {}",
                title,
                theme.structural.apply_to(glyphs.bar),
                at_cursor
                    .map(|item| self.styled_item(item, Row::Selected))
                    .unwrap_or_default(),
            ),
            State::Cancel => format!(
                "{}{}  {}\n{}",
                title,
                theme.structural.apply_to(glyphs.bar),
                at_cursor
                    .map(|item| self.styled_item(item, Row::Cancelled))
                    .unwrap_or_default(),
                theme.structural.apply_to(glyphs.bar),
            ),
            State::Initial | State::Active | State::Error => {
                let bar = theme.primary.apply_to(glyphs.bar).to_string();
                let rows = windowed_rows(
                    &self.items,
                    snapshot.cursor,
                    self.max_items,
                    term_rows,
                    theme,
                    |item, active| {
                        self.styled_item(item, if active { Row::Active } else { Row::Inactive })
                    },
                );
                format!(
                    "{}{}  {}\n{}\n",
                    title,
                    bar,
                    rows.join(&format!("\n{bar}  ")),
                    theme.primary.apply_to(glyphs.bar_end),
                )
            }
        }
    }

    /// Drive the prompt with `engine` until it resolves or is cancelled.
    pub fn interact_with<E>(&self, engine: &mut E) -> Result<Outcome<V>>
    where
        E: PromptEngine<Snapshot = SelectSnapshot>,
    {
        super::interact(
            engine,
            |snapshot, rows| self.render(snapshot, rows),
            |snapshot| match (snapshot.state, self.items.get(snapshot.cursor)) {
                (State::Submit, Some(item)) => Outcome::Submitted(item.value.clone()),
                _ => Outcome::Cancelled,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: usize = 24;

    fn plain() -> SelectPrompt<&'static str> {
        select("Pick a template")
            .with_theme(Theme::plain())
            .item("quickstart", "Quickstart", "recommended")
            .item("minimal", "Minimal", "")
            .item("full", "", "")
    }

    #[test]
    fn test_active_frame_lists_options() {
        let frame = plain().render(
            &SelectSnapshot {
                state: State::Active,
                cursor: 0,
            },
            ROWS,
        );
        assert!(frame.contains("> Quickstart (recommended)"));
        assert!(frame.contains("  Minimal"));
        // Label falls back to the value.
        assert!(frame.contains("full"));
    }

    #[test]
    fn test_submit_frame_shows_selected_label_only() {
        let frame = plain().render(
            &SelectSnapshot {
                state: State::Submit,
                cursor: 1,
            },
            ROWS,
        );
        assert_eq!(frame, "|\no  Pick a template\n|  Minimal");
    }

    #[test]
    fn test_cancel_frame_shows_cursor_option() {
        let frame = plain().render(
            &SelectSnapshot {
                state: State::Cancel,
                cursor: 0,
            },
            ROWS,
        );
        assert!(frame.ends_with("Quickstart\n|"));
    }

    #[test]
    fn test_long_lists_are_windowed() {
        let mut prompt: SelectPrompt<usize> =
            select("Pick a number").with_theme(Theme::plain());
        for i in 0..30 {
            prompt = prompt.item(i, format!("number {i}"), "");
        }
        let frame = prompt.max_items(5).render(
            &SelectSnapshot {
                state: State::Active,
                cursor: 15,
            },
            ROWS,
        );
        assert!(frame.contains("..."));
        assert!(frame.contains("> number 15"));
        assert!(!frame.contains("number 0\n"));
        assert!(!frame.contains("number 29"));
    }

    #[test]
    fn test_initial_cursor_resolves_value() {
        let prompt = plain().initial_value("minimal");
        assert_eq!(prompt.initial_cursor(), 1);

        let prompt = plain().initial_value("missing");
        assert_eq!(prompt.initial_cursor(), 0);
    }

    struct Scripted {
        steps: Vec<SelectSnapshot>,
        index: usize,
    }

    impl PromptEngine for Scripted {
        type Snapshot = SelectSnapshot;

        fn snapshot(&self) -> SelectSnapshot {
            self.steps[self.index]
        }

        fn advance(&mut self) -> Result<()> {
            self.index += 1;
            Ok(())
        }
    }

    #[test]
    fn test_interact_resolves_cursor_value() {
        let mut engine = Scripted {
            steps: vec![
                SelectSnapshot {
                    state: State::Active,
                    cursor: 0,
                },
                SelectSnapshot {
                    state: State::Submit,
                    cursor: 2,
                },
            ],
            index: 0,
        };
        let outcome = plain().interact_with(&mut engine).expect("interact");
        assert_eq!(outcome, Outcome::Submitted("full"));
    }
}
