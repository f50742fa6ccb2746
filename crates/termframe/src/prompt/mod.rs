//! Interactive prompt rendering
//!
//! Keystroke handling, value collection, and validation live outside this
//! crate: each prompt kind is driven by a [`PromptEngine`] implementation
//! that reports lifecycle snapshots, and the renderers here turn those
//! snapshots into redrawable terminal frames. A prompt resolves to an
//! [`Outcome`]: the submitted value or a cancellation marker.

mod confirm;
mod multiselect;
mod password;
mod select;
mod text;

pub use confirm::{confirm, ConfirmPrompt, ConfirmSnapshot};
pub use multiselect::{multiselect, MultiSelectPrompt, MultiSelectSnapshot};
pub use password::{password, PasswordPrompt, PasswordSnapshot};
pub use select::{select, SelectPrompt, SelectSnapshot};
pub use text::{text, TextPrompt, TextSnapshot};

use crate::term::{self, FrameWriter};
use crate::theme::Theme;
use crate::window::visible_window;
use anyhow::Result;
use std::fmt;

/// Lifecycle state of a prompt, as reported by its engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Initial,
    Active,
    Error,
    Submit,
    Cancel,
}

impl State {
    /// Terminal states freeze the prompt into a single summary line.
    pub fn is_terminal(self) -> bool {
        matches!(self, State::Submit | State::Cancel)
    }
}

/// Final result of an interactive prompt. Cancellation is a value, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T> {
    Submitted(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// The submitted value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Outcome::Submitted(value) => Some(value),
            Outcome::Cancelled => None,
        }
    }
}

/// External collaborator that owns keystroke handling, value collection,
/// and validation for one prompt.
pub trait PromptEngine {
    /// Per-kind view of the current prompt state.
    type Snapshot: PromptSnapshot;

    /// Snapshot used to render the next frame.
    fn snapshot(&self) -> Self::Snapshot;

    /// Block until the prompt state changes. Only invoked while the
    /// current state is non-terminal.
    fn advance(&mut self) -> Result<()>;
}

/// Accessor every snapshot kind shares.
pub trait PromptSnapshot {
    fn state(&self) -> State;
}

/// A selectable option: a value plus optional display label and hint.
#[derive(Debug, Clone)]
pub struct Item<V> {
    pub value: V,
    pub label: Option<String>,
    pub hint: Option<String>,
}

impl<V: fmt::Display> Item<V> {
    pub fn new(value: V) -> Self {
        Self {
            value,
            label: None,
            hint: None,
        }
    }

    /// Display label, falling back to the rendered value.
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.value.to_string())
    }
}

/// Step marker for the header line of every prompt frame.
pub(crate) fn symbol(state: State, theme: &Theme) -> String {
    let glyphs = &theme.glyphs;
    match state {
        State::Initial | State::Active => theme.white.apply_to(glyphs.step_active).to_string(),
        State::Cancel => theme.warning.apply_to(glyphs.step_cancel).to_string(),
        State::Error => theme.error.apply_to(glyphs.step_error).to_string(),
        State::Submit => theme.primary.apply_to(glyphs.step_submit).to_string(),
    }
}

/// Bar-prefixed header shared by every prompt frame.
pub(crate) fn title(state: State, message: &str, theme: &Theme) -> String {
    format!(
        "{}\n{}  {}\n",
        theme.structural.apply_to(theme.glyphs.bar),
        symbol(state, theme),
        message
    )
}

/// Style the visible rows of an option list, substituting a dim ellipsis
/// for cut-off edges.
pub(crate) fn windowed_rows<T>(
    items: &[T],
    cursor: usize,
    max_items: Option<usize>,
    term_rows: usize,
    theme: &Theme,
    mut style: impl FnMut(&T, bool) -> String,
) -> Vec<String> {
    let window = visible_window(items.len(), cursor, max_items, term_rows);
    items[window.start..window.end]
        .iter()
        .enumerate()
        .map(|(offset, item)| {
            let index = window.start + offset;
            let cut_top = index == window.start && window.ellipsis_top;
            let cut_bottom = index + 1 == window.end && window.ellipsis_bottom;
            if cut_top || cut_bottom {
                theme.dim.apply_to("...").to_string()
            } else {
                style(item, index == cursor)
            }
        })
        .collect()
}

/// Drive one prompt to completion: render each snapshot, replace the frame
/// in place, and freeze the final frame once a terminal state is reached.
pub(crate) fn interact<E, T>(
    engine: &mut E,
    mut render: impl FnMut(&E::Snapshot, usize) -> String,
    finish: impl FnOnce(&E::Snapshot) -> Outcome<T>,
) -> Result<Outcome<T>>
where
    E: PromptEngine,
{
    let _output = term::acquire_output();
    let mut writer = FrameWriter::stdout();
    loop {
        let snapshot = engine.snapshot();
        let frame = render(&snapshot, term::terminal_rows());
        if snapshot.state().is_terminal() {
            writer.finish(&frame)?;
            return Ok(finish(&snapshot));
        }
        writer.redraw(&frame)?;
        engine.advance()?;
    }
}
