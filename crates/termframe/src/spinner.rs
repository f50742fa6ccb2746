//! Long-running task indicator
//!
//! The spinner is the only component that writes without being asked, so
//! it holds the output gate for its whole active lifetime and registers
//! exit hooks so an interrupt or panic mid-animation still ends on a
//! complete final frame. Hooks are injected by the call site
//! ([`Spinner::with_hooks`]); [`spinner`] wires the process-wide default.

use crate::hooks::{ExitEvent, ExitHooks, ProcessHooks};
use crate::term::{self, OutputGuard};
use crate::theme::{self, Theme};
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

/// Create an inert spinner wired to the process-wide exit hooks.
pub fn spinner() -> Spinner {
    Spinner::with_hooks(ProcessHooks::default())
}

struct Shared {
    active: bool,
    message: String,
    frame_index: usize,
    dots: f32,
    theme: Theme,
    term: console::Term,
}

impl Shared {
    fn draw_tick(&mut self) {
        let glyphs = &self.theme.glyphs;
        let frame = self
            .theme
            .secondary
            .apply_to(glyphs.spinner_frames[self.frame_index]);
        let dots = ".".repeat((self.dots as usize).min(3));
        let _ = self.term.clear_line();
        let _ = self
            .term
            .write_str(&format!("{}  {}{}", frame, self.message, dots));

        self.frame_index = (self.frame_index + 1) % glyphs.spinner_frames.len();
        self.dots += 0.125;
        if self.dots >= glyphs.spinner_frames.len() as f32 {
            self.dots = 0.0;
        }
    }

    /// Write the final status line and go inert. Runs at most once per
    /// `start`, from `stop` or from an exit hook.
    fn finalize(&mut self, message: &str, code: i32) {
        self.active = false;
        self.message = message.to_string();
        let glyphs = &self.theme.glyphs;
        let step = match code {
            0 => self.theme.primary.apply_to(glyphs.step_submit),
            1 => self.theme.warning.apply_to(glyphs.step_cancel),
            _ => self.theme.error.apply_to(glyphs.step_error),
        };
        let _ = self.term.clear_line();
        let _ = self
            .term
            .write_line(&format!("{}  {}", step, self.message));
        let _ = self.term.show_cursor();
    }
}

fn lock(shared: &Arc<Mutex<Shared>>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Animated status line for a long-running unit of work.
pub struct Spinner {
    shared: Arc<Mutex<Shared>>,
    hooks: Box<dyn ExitHooks>,
    ticker: Option<thread::JoinHandle<()>>,
    output: Option<OutputGuard>,
}

impl Spinner {
    /// Create an inert spinner with call-site-owned exit hooks.
    pub fn with_hooks(hooks: impl ExitHooks + 'static) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                active: false,
                message: String::new(),
                frame_index: 0,
                dots: 0.0,
                theme: theme::active_theme(),
                term: console::Term::stdout(),
            })),
            hooks: Box::new(hooks),
            ticker: None,
            output: None,
        }
    }

    /// Begin animating with `message`, claiming exclusive terminal output
    /// until `stop`. Trailing dots are stripped; the animation supplies
    /// its own.
    pub fn start(&mut self, message: impl Display) {
        if self.ticker.is_some() {
            return;
        }
        self.output = Some(term::acquire_output());

        let interval = {
            let mut shared = lock(&self.shared);
            shared.active = true;
            shared.message = message.to_string().trim_end_matches('.').to_string();
            shared.frame_index = 0;
            shared.dots = 0.0;
            let _ = shared.term.hide_cursor();
            let bar = shared
                .theme
                .structural
                .apply_to(shared.theme.glyphs.bar)
                .to_string();
            let _ = shared.term.write_line(&bar);
            shared.theme.glyphs.spinner_interval
        };

        let hooked = Arc::clone(&self.shared);
        self.hooks.register(Arc::new(move |event| {
            let (message, code) = match event {
                ExitEvent::Interrupt => ("Canceled", 1),
                ExitEvent::Fault => ("Something went wrong", 2),
            };
            let mut shared = lock(&hooked);
            if shared.active {
                shared.finalize(message, code);
            }
        }));

        let ticking = Arc::clone(&self.shared);
        self.ticker = Some(thread::spawn(move || loop {
            {
                let mut shared = lock(&ticking);
                if !shared.active {
                    break;
                }
                shared.draw_tick();
            }
            thread::sleep(interval);
        }));
    }

    /// Swap the message shown on the next tick.
    pub fn message(&self, message: impl Display) {
        lock(&self.shared).message = message.to_string();
    }

    /// Cloneable handle for reporting progress from inside a unit of work.
    pub fn handle(&self) -> SpinnerHandle {
        SpinnerHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Stop the animation and print one final status line. `code` selects
    /// the glyph: 0 success, 1 cancelled, anything else an error. Safe to
    /// call again after a stop or a forced stop.
    pub fn stop(&mut self, message: impl Display, code: i32) {
        let Some(ticker) = self.ticker.take() else {
            return;
        };
        {
            let mut shared = lock(&self.shared);
            if shared.active {
                shared.finalize(&message.to_string(), code);
            }
        }
        let _ = ticker.join();
        self.hooks.release();
        self.output = None;
    }
}

impl Drop for Spinner {
    /// A dropped live spinner stops its ticker and releases its hooks and
    /// the output gate, without printing a final line.
    fn drop(&mut self) {
        if self.ticker.is_some() {
            lock(&self.shared).active = false;
            if let Some(ticker) = self.ticker.take() {
                let _ = ticker.join();
            }
            let _ = lock(&self.shared).term.show_cursor();
            self.hooks.release();
            self.output = None;
        }
    }
}

/// Cloneable progress reporter for a running spinner.
#[derive(Clone)]
pub struct SpinnerHandle {
    shared: Arc<Mutex<Shared>>,
}

impl SpinnerHandle {
    /// Swap the message shown on the next tick.
    pub fn message(&self, message: impl Display) {
        lock(&self.shared).message = message.to_string();
    }
}
