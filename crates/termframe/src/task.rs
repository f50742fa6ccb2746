//! Sequential task execution with spinner feedback
//!
//! Tasks run strictly one after another; each enabled task owns a fresh
//! spinner for its duration, so the next task's spinner can never start
//! before the previous one has fully stopped and released the terminal.

use crate::spinner::{spinner, Spinner, SpinnerHandle};
use anyhow::Result;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

type Work =
    Box<dyn FnOnce(SpinnerHandle) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send>> + Send>;

/// One named unit of work executed by [`tasks`].
pub struct Task {
    title: String,
    enabled: bool,
    work: Work,
}

impl Task {
    /// Create an enabled task. The closure receives a progress handle that
    /// updates the spinner message while the work runs; returning a status
    /// string replaces the title on the final line.
    pub fn new<F, Fut>(title: impl Into<String>, work: F) -> Self
    where
        F: FnOnce(SpinnerHandle) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Option<String>>> + Send + 'static,
    {
        Self {
            title: title.into(),
            enabled: true,
            work: Box::new(move |handle| Box::pin(work(handle))),
        }
    }

    /// Disabled tasks are skipped entirely: no spinner is created for
    /// them.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("title", &self.title)
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Error returned when a task's unit of work fails.
#[derive(Debug, thiserror::Error)]
#[error("task '{title}' failed")]
pub struct TaskError {
    /// Title of the task that failed.
    pub title: String,
    #[source]
    pub source: anyhow::Error,
}

/// Execute `list` strictly sequentially, one spinner per enabled task.
///
/// A failing task stops its spinner with an error status before the
/// failure propagates as a [`TaskError`]; later tasks do not run.
pub async fn tasks(list: Vec<Task>) -> Result<()> {
    run_tasks(list, spinner).await
}

async fn run_tasks(list: Vec<Task>, mut make_spinner: impl FnMut() -> Spinner) -> Result<()> {
    for task in list {
        if !task.enabled {
            continue;
        }
        let mut spin = make_spinner();
        spin.start(&task.title);
        match (task.work)(spin.handle()).await {
            Ok(status) => {
                let message = status
                    .filter(|status| !status.is_empty())
                    .unwrap_or_else(|| task.title.clone());
                spin.stop(message, 0);
            }
            Err(source) => {
                spin.stop(&task.title, 2);
                return Err(TaskError {
                    title: task.title,
                    source,
                }
                .into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::testing::RecordingHooks;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    type Factory = Box<dyn FnMut() -> Spinner>;

    fn counting_factory() -> (Arc<AtomicUsize>, Arc<Mutex<Vec<RecordingHooks>>>, Factory) {
        let created = Arc::new(AtomicUsize::new(0));
        let hooks = Arc::new(Mutex::new(Vec::new()));

        let counter = Arc::clone(&created);
        let registry = Arc::clone(&hooks);
        let factory = Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            let recording = RecordingHooks::default();
            registry.lock().unwrap().push(recording.clone());
            Spinner::with_hooks(recording)
        });

        (created, hooks, factory)
    }

    #[tokio::test]
    async fn test_disabled_tasks_are_skipped() {
        let ran = Arc::new(Mutex::new(Vec::new()));

        let record = |name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>| {
            let log = Arc::clone(log);
            Task::new(name, move |_| async move {
                log.lock().unwrap().push(name);
                Ok(None)
            })
        };

        let list = vec![
            record("first", &ran),
            record("second", &ran).enabled(false),
            record("third", &ran),
        ];

        let (created, _, factory) = counting_factory();
        run_tasks(list, factory).await.expect("tasks");

        assert_eq!(*ran.lock().unwrap(), vec!["first", "third"]);
        assert_eq!(created.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_every_spinner_is_stopped() {
        let list = vec![
            Task::new("one", |_| async { Ok(None) }),
            Task::new("two", |_| async { Ok(Some("done".to_string())) }),
        ];

        let (_, hooks, factory) = counting_factory();
        run_tasks(list, factory).await.expect("tasks");

        let hooks = hooks.lock().unwrap();
        assert_eq!(hooks.len(), 2);
        for recording in hooks.iter() {
            assert_eq!(recording.registered(), 1);
            assert_eq!(recording.released(), 1);
        }
    }

    #[tokio::test]
    async fn test_progress_handle_reaches_the_spinner() {
        let list = vec![Task::new("copy", |progress: SpinnerHandle| async move {
            progress.message("copy (1/2)");
            progress.message("copy (2/2)");
            Ok(Some("copied 2 files".to_string()))
        })];

        let (created, _, factory) = counting_factory();
        run_tasks(list, factory).await.expect("tasks");
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_stops_spinner_and_propagates() {
        let reached = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&reached);
        let list = vec![
            Task::new("deploy", |_| async { Err(anyhow!("network down")) }),
            Task::new("verify", move |_| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(None)
                }
            }),
        ];

        let (_, hooks, factory) = counting_factory();
        let err = run_tasks(list, factory).await.expect_err("tasks must fail");

        let task_error = err.downcast::<TaskError>().expect("TaskError");
        assert_eq!(task_error.title, "deploy");
        assert_eq!(task_error.source.to_string(), "network down");

        // The failing task's spinner was stopped, and the later task never
        // ran.
        let hooks = hooks.lock().unwrap();
        assert_eq!(hooks.len(), 1);
        assert_eq!(hooks[0].released(), 1);
        assert_eq!(reached.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_status_falls_back_to_title() {
        let list = vec![Task::new("build", |_| async { Ok(Some(String::new())) })];
        let (created, _, factory) = counting_factory();
        run_tasks(list, factory).await.expect("tasks");
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }
}
