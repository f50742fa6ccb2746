//! Multiple-choice select prompt
//!
//! Selection membership is independent of the cursor, so rows have a
//! fourth visual state: active-and-selected.

use super::{title, windowed_rows, Item, Outcome, PromptEngine, PromptSnapshot, State};
use crate::theme::{self, Theme};
use anyhow::Result;
use std::fmt::Display;

/// Snapshot of a multi-select prompt's lifecycle.
#[derive(Debug, Clone)]
pub struct MultiSelectSnapshot<V> {
    pub state: State,
    /// Index of the highlighted option.
    pub cursor: usize,
    /// Values toggled on so far.
    pub selected: Vec<V>,
    /// Validation error shown in the `Error` state.
    pub error: String,
}

impl<V> PromptSnapshot for MultiSelectSnapshot<V> {
    fn state(&self) -> State {
        self.state
    }
}

/// Start building a multiple-choice select prompt.
pub fn multiselect<V>(message: impl Into<String>) -> MultiSelectPrompt<V>
where
    V: Display + Clone + PartialEq,
{
    MultiSelectPrompt::new(message)
}

enum Row {
    Inactive,
    Active,
    Selected,
    ActiveSelected,
    Submitted,
    Cancelled,
}

/// Multiple-choice select prompt renderer and driver.
#[derive(Debug, Clone)]
pub struct MultiSelectPrompt<V> {
    message: String,
    items: Vec<Item<V>>,
    max_items: Option<usize>,
    initial_values: Vec<V>,
    required: bool,
    theme: Theme,
}

impl<V> MultiSelectPrompt<V>
where
    V: Display + Clone + PartialEq,
{
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            items: Vec::new(),
            max_items: None,
            initial_values: Vec::new(),
            required: true,
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

    /// Values toggled on when the prompt opens; read by the engine.
    pub fn initial_values(mut self, values: Vec<V>) -> Self {
        self.initial_values = values;
        self
    }

    pub fn initial(&self) -> &[V] {
        &self.initial_values
    }

    /// When required, submitting an empty selection is a validation error.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn items(&self) -> &[Item<V>] {
        &self.items
    }

    /// Override the styling configuration.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Styled validation error for a submit attempt, or `None` when the
    /// selection is acceptable. The engine surfaces this through its
    /// `Error` state.
    pub fn validate(&self, selected: &[V]) -> Option<String> {
        if !self.required || !selected.is_empty() {
            return None;
        }
        let theme = &self.theme;
        let key = |label: &str| {
            theme
                .structural
                .apply_to(
                    theme
                        .bg_white
                        .apply_to(theme.inverse.apply_to(label).to_string())
                        .to_string(),
                )
                .to_string()
        };
        Some(format!(
            "Please select at least one option.\n{}",
            theme.dim.apply_to(format!(
                "Press {} to select, {} to submit",
                key(" space "),
                key(" enter ")
            ))
        ))
    }

    fn styled_item(&self, item: &Item<V>, row: Row) -> String {
        let theme = &self.theme;
        let glyphs = &theme.glyphs;
        let label = item.display_label();
        let hint = || {
            item.hint
                .as_ref()
                .map(|hint| theme.dim.apply_to(format!("({hint})")).to_string())
                .unwrap_or_default()
        };
        match row {
            Row::Active => format!(
                "{} {} {}",
                theme.primary.apply_to(glyphs.checkbox_active),
                label,
                hint()
            ),
            Row::ActiveSelected => format!(
                "{} {} {}",
                theme.primary.apply_to(glyphs.checkbox_selected),
                label,
                hint()
            ),
            Row::Selected => format!(
                "{} {}",
                theme.primary.apply_to(glyphs.checkbox_selected),
                theme.dim.apply_to(label)
            ),
            Row::Submitted => theme.dim.apply_to(label).to_string(),
            Row::Cancelled => theme
                .disabled
                .apply_to(theme.dim.apply_to(label).to_string())
                .to_string(),
            Row::Inactive => format!(
                "{} {}",
                theme.dim.apply_to(glyphs.checkbox_inactive),
                theme.dim.apply_to(label)
            ),
        }
    }

    /// Labels of the selected options, in list order, each styled with
    /// `row`, joined with a dim comma.
    fn joined_selection(&self, selected: &[V], row: impl Fn() -> Row) -> String {
        let theme = &self.theme;
        self.items
            .iter()
            .filter(|item| selected.contains(&item.value))
            .map(|item| self.styled_item(item, row()))
            .collect::<Vec<_>>()
            .join(&theme.dim.apply_to(", ").to_string())
    }

    /// Render one frame for `snapshot`. `term_rows` bounds the option
    /// window.
    pub fn render(&self, snapshot: &MultiSelectSnapshot<V>, term_rows: usize) -> String {
        let theme = &self.theme;
        let glyphs = &theme.glyphs;
        let title = title(snapshot.state, &self.message, theme);

        let body_rows = |bar: &str| {
            windowed_rows(
                &self.items,
                snapshot.cursor,
                self.max_items,
                term_rows,
                theme,
                |item, active| {
                    let selected = snapshot.selected.contains(&item.value);
                    let row = match (active, selected) {
                        (true, true) => Row::ActiveSelected,
                        (true, false) => Row::Active,
                        (false, true) => Row::Selected,
                        (false, false) => Row::Inactive,
                    };
                    self.styled_item(item, row)
                },
            )
            .join(&format!("\n{bar}  "))
        };

        match snapshot.state {
            State::Submit => {
                let joined = self.joined_selection(&snapshot.selected, || Row::Submitted);
                let shown = if joined.is_empty() {
                    theme.dim.apply_to("none").to_string()
                } else {
                    joined
                };
                format!(
                    "{}{}  {}",
                    title,
                    theme.structural.apply_to(glyphs.bar),
                    shown,
                )
            }
            State::Cancel => {
                let joined = self.joined_selection(&snapshot.selected, || Row::Cancelled);
                let shown = if joined.trim().is_empty() {
                    String::new()
                } else {
                    format!("{}\n{}", joined, theme.structural.apply_to(glyphs.bar))
                };
                format!(
                    "{}{}  {}",
                    title,
                    theme.structural.apply_to(glyphs.bar),
                    shown,
                )
            }
            State::Error => {
                let bar = theme.error.apply_to(glyphs.bar).to_string();
                let footer = snapshot
                    .error
                    .split('\n')
                    .enumerate()
                    .map(|(i, line)| {
                        if i == 0 {
                            format!(
                                "{}  {}",
                                theme.error.apply_to(glyphs.bar_end),
                                theme.error.apply_to(line)
                            )
                        } else {
                            format!("   {line}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{}{}  {}\n{}\n", title, bar, body_rows(&bar), footer)
            }
            State::Initial | State::Active => {
                let bar = theme.primary.apply_to(glyphs.bar).to_string();
                format!(
                    "{}{}  {}\n{}\n",
                    title,
                    bar,
                    body_rows(&bar),
                    theme.primary.apply_to(glyphs.bar_end),
                )
            }
        }
    }

    /// Drive the prompt with `engine` until it resolves or is cancelled.
    pub fn interact_with<E>(&self, engine: &mut E) -> Result<Outcome<Vec<V>>>
    where
        E: PromptEngine<Snapshot = MultiSelectSnapshot<V>>,
    {
        super::interact(
            engine,
            |snapshot, rows| self.render(snapshot, rows),
            |snapshot| match snapshot.state {
                State::Submit => Outcome::Submitted(snapshot.selected.clone()),
                _ => Outcome::Cancelled,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: usize = 24;

    fn plain() -> MultiSelectPrompt<&'static str> {
        multiselect("Select your tool(s)")
            .with_theme(Theme::plain())
            .item("typescript", "TypeScript", "")
            .item("eslint", "ESLint", "")
            .item("prettier", "Prettier", "")
    }

    fn snapshot(state: State, cursor: usize, selected: &[&'static str]) -> MultiSelectSnapshot<&'static str> {
        MultiSelectSnapshot {
            state,
            cursor,
            selected: selected.to_vec(),
            error: String::new(),
        }
    }

    #[test]
    fn test_required_empty_selection_fails_validation() {
        let message = plain().validate(&[]).expect("validation error");
        assert!(message.contains("at least one option"));
        assert!(message.contains("space"));
        assert!(message.contains("enter"));
        assert!(message.contains("to submit"));
    }

    #[test]
    fn test_optional_empty_selection_passes_validation() {
        assert!(plain().required(false).validate(&[]).is_none());
        assert!(plain().validate(&["eslint"]).is_none());
    }

    #[test]
    fn test_active_frame_distinguishes_row_states() {
        let frame = plain().render(&snapshot(State::Active, 0, &["typescript", "prettier"]), ROWS);
        // Cursor on a selected row.
        assert!(frame.contains("[+] TypeScript"));
        // Unselected, not under the cursor.
        assert!(frame.contains("[ ] ESLint"));
        // Selected, not under the cursor.
        assert!(frame.contains("[+] Prettier"));

        let frame = plain().render(&snapshot(State::Active, 1, &[]), ROWS);
        // Cursor on an unselected row.
        assert!(frame.contains("[•] ESLint"));
    }

    #[test]
    fn test_error_frame_wraps_validation_message() {
        let prompt = plain();
        let mut snap = snapshot(State::Error, 0, &[]);
        snap.error = prompt.validate(&[]).expect("validation error");
        let frame = prompt.render(&snap, ROWS);
        assert!(frame.contains("—  Please select at least one option."));
        assert!(frame.contains("   Press"));
    }

    #[test]
    fn test_submit_joins_selected_labels() {
        let frame = plain().render(&snapshot(State::Submit, 0, &["typescript", "eslint"]), ROWS);
        assert!(frame.ends_with("|  TypeScript, ESLint"));
    }

    #[test]
    fn test_submit_with_empty_selection_says_none() {
        let frame = plain().render(&snapshot(State::Submit, 0, &[]), ROWS);
        assert!(frame.ends_with("|  none"));
    }

    #[test]
    fn test_cancel_with_empty_selection_has_no_trailing_bar() {
        let frame = plain().render(&snapshot(State::Cancel, 0, &[]), ROWS);
        assert!(frame.ends_with("|  "));

        let frame = plain().render(&snapshot(State::Cancel, 0, &["eslint"]), ROWS);
        assert!(frame.ends_with("ESLint\n|"));
    }

    struct Scripted {
        steps: Vec<MultiSelectSnapshot<&'static str>>,
        index: usize,
    }

    impl PromptEngine for Scripted {
        type Snapshot = MultiSelectSnapshot<&'static str>;

        fn snapshot(&self) -> Self::Snapshot {
            self.steps[self.index].clone()
        }

        fn advance(&mut self) -> Result<()> {
            self.index += 1;
            Ok(())
        }
    }

    #[test]
    fn test_interact_resolves_selection() {
        let prompt = plain().required(true);
        let error = prompt.validate(&[]).expect("validation error");

        let mut rejected = snapshot(State::Error, 0, &[]);
        rejected.error = error;

        let mut engine = Scripted {
            steps: vec![
                snapshot(State::Active, 0, &[]),
                rejected,
                snapshot(State::Active, 0, &["typescript"]),
                snapshot(State::Submit, 0, &["typescript"]),
            ],
            index: 0,
        };
        let outcome = prompt.interact_with(&mut engine).expect("interact");
        assert_eq!(outcome, Outcome::Submitted(vec!["typescript"]));
    }
}
