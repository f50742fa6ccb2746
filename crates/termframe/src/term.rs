//! Frame replacement and the exclusive output gate
//!
//! Everything this crate prints is a complete frame. The gate serializes
//! frame writers so a spinner tick can never land in the middle of another
//! component's output; a spinner holds the gate for its whole active
//! lifetime, status-line helpers only for a single write.

use anyhow::Result;
use console::Term;
use std::sync::{Condvar, Mutex, PoisonError};

static GATE: Mutex<bool> = Mutex::new(false);
static GATE_FREED: Condvar = Condvar::new();

/// Exclusive hold on terminal output, released on drop.
pub(crate) struct OutputGuard {
    _private: (),
}

/// Block until no other component holds the terminal, then claim it.
pub(crate) fn acquire_output() -> OutputGuard {
    let mut busy = GATE.lock().unwrap_or_else(PoisonError::into_inner);
    while *busy {
        busy = GATE_FREED.wait(busy).unwrap_or_else(PoisonError::into_inner);
    }
    *busy = true;
    OutputGuard { _private: () }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        *GATE.lock().unwrap_or_else(PoisonError::into_inner) = false;
        GATE_FREED.notify_all();
    }
}

/// Terminal height, for option windowing.
pub(crate) fn terminal_rows() -> usize {
    Term::stdout().size().0 as usize
}

/// Redraws prompt frames in place: move up over the previous frame, clear
/// to the end of the screen, rewrite.
pub(crate) struct FrameWriter {
    term: Term,
    prev_newlines: usize,
}

impl FrameWriter {
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
            prev_newlines: 0,
        }
    }

    /// Replace the previous frame with `frame`.
    pub fn redraw(&mut self, frame: &str) -> Result<()> {
        if self.prev_newlines > 0 {
            self.term.clear_line()?;
            self.term.move_cursor_up(self.prev_newlines)?;
            self.term.clear_to_end_of_screen()?;
        }
        self.term.write_str(frame)?;
        self.prev_newlines = frame.matches('\n').count();
        Ok(())
    }

    /// Write the final frozen frame and move past it.
    pub fn finish(&mut self, frame: &str) -> Result<()> {
        self.redraw(frame)?;
        self.term.write_str("\n")?;
        self.prev_newlines = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_gate_blocks_second_holder() {
        let guard = acquire_output();
        let entered = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&entered);
        let waiter = thread::spawn(move || {
            let _guard = acquire_output();
            flag.store(true, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(50));
        assert!(!entered.load(Ordering::SeqCst));

        drop(guard);
        waiter.join().expect("waiter thread");
        assert!(entered.load(Ordering::SeqCst));
    }
}
