//! Termframe - Charm-style terminal prompts, spinners, and status lines
//!
//! This library renders interactive prompt state as redrawable terminal
//! frames. It does not read keystrokes: an external input engine owns
//! value collection and validation, and reports lifecycle snapshots that
//! the renderers here turn into output.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Pure helpers** - ANSI width measurement, option windowing,
//!   glyph/style resolution
//! - **Layer 2: Frame renderers** - One renderer per prompt kind, pure
//!   functions from snapshot to frame string
//! - **Layer 3: Drivers and output** - Prompt interaction loops, status
//!   line helpers, the spinner, and the sequential task runner
//!
//! # Example Usage
//!
//! ```ignore
//! use termframe::{confirm, intro, log, outro, spinner};
//!
//! intro("Ready?")?;
//! log::info("Using remote templates")?;
//!
//! let mut spin = spinner();
//! spin.start("Loading templates...");
//! // ... do work ...
//! spin.stop("Templates loaded", 0);
//!
//! outro("Happy coding!")?;
//! ```

pub mod ansi;
pub mod hooks;
pub mod log;
pub mod prompt;
pub mod spinner;
pub mod task;
pub mod theme;
pub mod window;

mod term;

// Re-export main types for convenience
pub use log::{cancel, intro, note, outro};
pub use prompt::{
    confirm, multiselect, password, select, text, ConfirmPrompt, ConfirmSnapshot, Item,
    MultiSelectPrompt, MultiSelectSnapshot, Outcome, PasswordPrompt, PasswordSnapshot,
    PromptEngine, PromptSnapshot, SelectPrompt, SelectSnapshot, State, TextPrompt, TextSnapshot,
};
pub use spinner::{spinner, Spinner, SpinnerHandle};
pub use task::{tasks, Task, TaskError};
pub use theme::{set_theme, GlyphSet, Theme};
