//! Scoped process-exit hooks for live terminal components
//!
//! A spinner must leave a complete final frame behind even when the process
//! is interrupted or panics mid-animation. Instead of ambient per-spinner
//! process listeners, hook registration is an explicit scoped resource: the
//! call site owns an [`ExitHooks`] implementation, the spinner registers
//! its callback on `start` and releases it on `stop`. The default
//! implementation multiplexes every live registration through one `ctrlc`
//! handler and one chained panic hook, so independent spinners never
//! double-register or leak handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// Why the process is going down while a component is still live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitEvent {
    /// Interrupt or terminate signal.
    Interrupt,
    /// Unrecoverable error (panic).
    Fault,
}

/// Callback invoked with the observed exit event.
pub type ExitCallback = Arc<dyn Fn(ExitEvent) + Send + Sync>;

/// Scoped registration of a process-exit callback.
///
/// `register` and `release` are each invoked once, on spinner start and
/// stop respectively. After `release`, a later exit event must no longer
/// reach the callback.
pub trait ExitHooks: Send {
    fn register(&mut self, callback: ExitCallback);
    fn release(&mut self);
}

fn registry() -> &'static Mutex<Vec<(u64, ExitCallback)>> {
    static REGISTRY: OnceLock<Mutex<Vec<(u64, ExitCallback)>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(Vec::new()))
}

fn dispatch(event: ExitEvent) {
    let callbacks: Vec<ExitCallback> = registry()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .map(|(_, callback)| Arc::clone(callback))
        .collect();
    for callback in callbacks {
        callback(event);
    }
}

/// Install the process-wide handlers behind the registry, once.
fn install_process_handlers() {
    static INSTALLED: OnceLock<()> = OnceLock::new();
    INSTALLED.get_or_init(|| {
        // Let live components finish their frame, then report the panic as
        // usual.
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            dispatch(ExitEvent::Fault);
            default_panic(info);
        }));

        // Interrupt: finish frames, then exit with the conventional status.
        ctrlc::set_handler(|| {
            dispatch(ExitEvent::Interrupt);
            let _ = console::Term::stderr().show_cursor();
            std::process::exit(130);
        })
        .ok();
    });
}

/// Default hooks backed by the process-wide signal and panic handlers.
#[derive(Debug, Default)]
pub struct ProcessHooks {
    id: Option<u64>,
}

impl ExitHooks for ProcessHooks {
    fn register(&mut self, callback: ExitCallback) {
        install_process_handlers();
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        registry()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, callback));
        self.id = Some(id);
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            registry()
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(entry, _)| *entry != id);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Default)]
    pub(crate) struct RecordedState {
        pub callback: Option<ExitCallback>,
        pub registered: usize,
        pub released: usize,
    }

    /// Test double recording registration state and replaying events.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingHooks {
        pub state: Arc<Mutex<RecordedState>>,
    }

    impl RecordingHooks {
        /// Deliver `event` to the registered callback, if any.
        pub fn fire(&self, event: ExitEvent) {
            let callback = self.state.lock().unwrap().callback.clone();
            if let Some(callback) = callback {
                callback(event);
            }
        }

        pub fn registered(&self) -> usize {
            self.state.lock().unwrap().registered
        }

        pub fn released(&self) -> usize {
            self.state.lock().unwrap().released
        }
    }

    impl ExitHooks for RecordingHooks {
        fn register(&mut self, callback: ExitCallback) {
            let mut state = self.state.lock().unwrap();
            state.callback = Some(callback);
            state.registered += 1;
        }

        fn release(&mut self) {
            let mut state = self.state.lock().unwrap();
            state.callback = None;
            state.released += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    // Tests below dispatch through the shared registry; serialize them so
    // one test's events cannot reach another test's callbacks.
    static DISPATCH_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_process_hooks_register_and_release() {
        let _serial = DISPATCH_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        let mut hooks = ProcessHooks::default();
        hooks.register(Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert!(hooks.id.is_some());

        dispatch(ExitEvent::Interrupt);
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        hooks.release();
        assert!(hooks.id.is_none());

        dispatch(ExitEvent::Interrupt);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_without_register_is_harmless() {
        let mut hooks = ProcessHooks::default();
        hooks.release();
        assert!(hooks.id.is_none());
    }

    #[test]
    fn test_independent_registrations_do_not_collide() {
        let _serial = DISPATCH_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let first_count = Arc::new(AtomicUsize::new(0));
        let second_count = Arc::new(AtomicUsize::new(0));

        let mut first = ProcessHooks::default();
        let mut second = ProcessHooks::default();
        let counter = Arc::clone(&first_count);
        first.register(Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let counter = Arc::clone(&second_count);
        second.register(Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        first.release();
        dispatch(ExitEvent::Fault);

        assert_eq!(first_count.load(Ordering::SeqCst), 0);
        assert_eq!(second_count.load(Ordering::SeqCst), 1);
        second.release();
    }
}
