//! One-shot framed status lines
//!
//! Non-interactive output: session borders (`intro`/`outro`), boxed panels
//! (`note`), and leveled log blocks. Each helper holds the output gate for
//! exactly one write, so it can never interleave with a live spinner's
//! frame.

use crate::ansi::visible_width;
use crate::term;
use crate::theme::{self, Theme};
use anyhow::Result;
use console::Term;
use std::fmt::Display;

fn write_block(block: String) -> Result<()> {
    let _output = term::acquire_output();
    Term::stdout().write_line(&block)?;
    Ok(())
}

/// Top border opening a framed session.
pub fn intro(title: impl Display) -> Result<()> {
    write_block(format_intro(&title.to_string(), &theme::active_theme()))
}

pub(crate) fn format_intro(title: &str, theme: &Theme) -> String {
    format!(
        "{}  {}",
        theme.structural.apply_to(theme.glyphs.bar_start),
        title
    )
}

/// Bottom border closing a framed session.
pub fn outro(message: impl Display) -> Result<()> {
    write_block(format_outro(&message.to_string(), &theme::active_theme()))
}

pub(crate) fn format_outro(message: &str, theme: &Theme) -> String {
    format!(
        "{}\n{}  {}\n",
        theme.structural.apply_to(theme.glyphs.bar),
        theme.structural.apply_to(theme.glyphs.bar_end),
        message
    )
}

/// Bottom border closing an aborted session.
pub fn cancel(message: impl Display) -> Result<()> {
    let theme = theme::active_theme();
    write_block(format!(
        "{}  {}\n",
        theme.structural.apply_to(theme.glyphs.bar_end),
        theme.warning.apply_to(message.to_string()),
    ))
}

/// Boxed informational panel with a title inset into the top border.
pub fn note(message: impl Display, title: impl Display) -> Result<()> {
    write_block(format_note(
        &message.to_string(),
        &title.to_string(),
        &theme::active_theme(),
    ))
}

pub(crate) fn format_note(message: &str, title: &str, theme: &Theme) -> String {
    let glyphs = &theme.glyphs;
    // A blank line above and below the message body.
    let padded = format!("\n{message}\n");
    let lines: Vec<&str> = padded.split('\n').collect();

    let title_width = visible_width(title);
    let width = lines
        .iter()
        .map(|line| visible_width(line))
        .max()
        .unwrap_or(0)
        .max(title_width)
        + 2;

    let body = lines
        .iter()
        .map(|line| {
            format!(
                "{}  {}{}{}",
                theme.structural.apply_to(glyphs.bar),
                theme.dim.apply_to(*line),
                " ".repeat(width - visible_width(line)),
                theme.structural.apply_to(glyphs.bar),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n{}  {} {}\n{}\n{}",
        theme.structural.apply_to(glyphs.bar),
        theme.primary.apply_to(glyphs.step_submit),
        title,
        theme.structural.apply_to(format!(
            "{}{}",
            glyphs.bar_h.repeat(width.saturating_sub(title_width + 1).max(1)),
            glyphs.corner_top_right
        )),
        body,
        theme.structural.apply_to(format!(
            "{}{}{}",
            glyphs.connect_left,
            glyphs.bar_h.repeat(width + 2),
            glyphs.corner_bottom_right
        )),
    )
}

/// Framed log block: `symbol` marks the first line, continuation lines
/// carry the plain bar. An empty message emits only the bar.
pub(crate) fn format_message(message: &str, symbol: &str, theme: &Theme) -> String {
    let bar = theme.structural.apply_to(theme.glyphs.bar).to_string();
    let mut parts = vec![bar.clone()];
    if !message.is_empty() {
        let mut lines = message.split('\n');
        if let Some(first) = lines.next() {
            parts.push(format!("{symbol}  {first}"));
        }
        parts.extend(lines.map(|line| format!("{bar}  {line}")));
    }
    parts.join("\n")
}

/// Log block with the plain bar as its marker.
pub fn message(message: impl Display) -> Result<()> {
    let theme = theme::active_theme();
    let bar = theme.structural.apply_to(theme.glyphs.bar).to_string();
    write_block(format_message(&message.to_string(), &bar, &theme))
}

pub fn info(message: impl Display) -> Result<()> {
    let theme = theme::active_theme();
    let symbol = theme.info.apply_to(theme.glyphs.info).to_string();
    write_block(format_message(&message.to_string(), &symbol, &theme))
}

pub fn success(message: impl Display) -> Result<()> {
    let theme = theme::active_theme();
    let symbol = theme.success.apply_to(theme.glyphs.success).to_string();
    write_block(format_message(&message.to_string(), &symbol, &theme))
}

pub fn step(message: impl Display) -> Result<()> {
    let theme = theme::active_theme();
    let symbol = theme.primary.apply_to(theme.glyphs.step_submit).to_string();
    write_block(format_message(&message.to_string(), &symbol, &theme))
}

pub fn warn(message: impl Display) -> Result<()> {
    let theme = theme::active_theme();
    let symbol = theme.warning.apply_to(theme.glyphs.warn).to_string();
    write_block(format_message(&message.to_string(), &symbol, &theme))
}

/// Alias for [`warn`].
pub fn warning(message: impl Display) -> Result<()> {
    warn(message)
}

pub fn error(message: impl Display) -> Result<()> {
    let theme = theme::active_theme();
    let symbol = theme.error.apply_to(theme.glyphs.error).to_string();
    write_block(format_message(&message.to_string(), &symbol, &theme))
}
