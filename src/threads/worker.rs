//! Worker threads
//!
//! A [`Task`] bundles the work to run off the UI thread with the handlers to
//! call on the UI thread once it ends. [`WorkerThread`] turns a task into a
//! running thread and wires its three outcome channels to the main window.
//!
//! Outcome rules, applied when the target returns:
//! - `Ok(value)` with the abort flag clear: `on_complete(value)`
//! - `Ok(value)` with the abort flag set: `on_abort(value)`
//! - `Err(err)` or a panic: `on_error(message)`
//!
//! Exactly one outcome event is posted per task.

use crate::threads::error::{ThreadError, ThreadResult};
use crate::threads::events::{EventPayload, EventType, MainWindow, ThreadEvent};
use std::any::Any;
use std::convert::Infallible;
use std::fmt::Display;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};

type Target<T, E> = Box<dyn FnOnce() -> Result<T, E> + Send>;
type ValueHandler<T> = Box<dyn FnOnce(T) + Send>;
type ErrorHandler = Box<dyn FnOnce(String) + Send>;

/// Work to run on a worker thread, with its outcome handlers
pub struct Task<T, E = Infallible> {
    target: Target<T, E>,
    on_abort: Option<ValueHandler<T>>,
    on_complete: Option<ValueHandler<T>>,
    on_error: Option<ErrorHandler>,
    daemon: bool,
    name: Option<String>,
}

impl<T: Send + 'static> Task<T, Infallible> {
    /// Task whose target cannot fail (panics are still captured)
    pub fn from_fn<F>(target: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Task::new(move || Ok(target()))
    }
}

impl<T, E> Task<T, E>
where
    T: Send + 'static,
    E: Display + 'static,
{
    pub fn new<F>(target: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
    {
        Self {
            target: Box::new(target),
            on_abort: None,
            on_complete: None,
            on_error: None,
            daemon: false,
            name: None,
        }
    }

    /// Called on the UI thread with the target's value when it was aborted
    pub fn on_abort<F>(mut self, handler: F) -> Self
    where
        F: FnOnce(T) + Send + 'static,
    {
        self.on_abort = Some(Box::new(handler));
        self
    }

    /// Called on the UI thread with the target's value when it finished normally
    pub fn on_complete<F>(mut self, handler: F) -> Self
    where
        F: FnOnce(T) + Send + 'static,
    {
        self.on_complete = Some(Box::new(handler));
        self
    }

    /// Called on the UI thread with the error message when the target failed
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: FnOnce(String) + Send + 'static,
    {
        self.on_error = Some(Box::new(handler));
        self
    }

    /// Daemon workers are not waited for at shutdown
    pub fn daemon(mut self, daemon: bool) -> Self {
        self.daemon = daemon;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_daemon(&self) -> bool {
        self.daemon
    }
}

/// The three event types a worker may post, one per outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeEvents {
    pub abort: EventType,
    pub complete: EventType,
    pub error: EventType,
}

impl OutcomeEvents {
    fn new_unique() -> Self {
        Self {
            abort: EventType::new_unique(),
            complete: EventType::new_unique(),
            error: EventType::new_unique(),
        }
    }

    fn all(&self) -> [EventType; 3] {
        [self.abort, self.complete, self.error]
    }
}

/// A task prepared to run on its own thread
pub struct WorkerThread<T, E> {
    task: Task<T, E>,
    events: OutcomeEvents,
}

impl<T, E> WorkerThread<T, E>
where
    T: Send + 'static,
    E: Display + 'static,
{
    pub fn new(task: Task<T, E>) -> Self {
        Self {
            task,
            events: OutcomeEvents::new_unique(),
        }
    }

    pub fn events(&self) -> OutcomeEvents {
        self.events
    }

    pub fn is_daemon(&self) -> bool {
        self.task.daemon
    }

    pub fn name(&self) -> Option<&str> {
        self.task.name.as_deref()
    }

    /// Spawn the thread and connect the outcome handlers on `window`
    ///
    /// `registered` runs on the new thread before the target; the pool uses it
    /// to hold the worker back until its bookkeeping entry exists. `finished`
    /// runs on the UI thread when the outcome is delivered, or on the worker
    /// itself when the window is gone and the outcome cannot be posted.
    pub(crate) fn start<R, D>(
        self,
        name: String,
        window: &MainWindow,
        abort: Arc<AtomicBool>,
        registered: R,
        finished: D,
    ) -> ThreadResult<JoinHandle<()>>
    where
        R: FnOnce() + Send + 'static,
        D: Fn(ThreadId) + Clone + Send + 'static,
    {
        let WorkerThread { task, events } = self;
        let Task {
            target,
            on_abort,
            on_complete,
            on_error,
            ..
        } = task;

        let poster = window.clone();
        let undelivered = finished.clone();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                registered();
                let event = run_target(target, &abort, events);
                if let Err(e) = poster.post_event(event) {
                    log::warn!("Worker outcome could not be delivered: {}", e);
                    disconnect_all(&poster, events);
                    undelivered(thread::current().id());
                }
            })
            .map_err(|e| ThreadError::SpawnFailed {
                name,
                cause: e.to_string(),
            })?;

        let ident = handle.thread().id();
        connect_events(window, events, ident, (on_abort, on_complete, on_error), finished);

        Ok(handle)
    }
}

/// Bind the three outcome handlers of worker `ident` on `window`
fn connect_events<T, D>(
    window: &MainWindow,
    events: OutcomeEvents,
    ident: ThreadId,
    handlers: (Option<ValueHandler<T>>, Option<ValueHandler<T>>, Option<ErrorHandler>),
    finished: D,
) where
    T: Send + 'static,
    D: Fn(ThreadId) + Clone + Send + 'static,
{
    let (on_abort, on_complete, on_error) = handlers;
    connect_value(window, events, events.abort, ident, on_abort, finished.clone());
    connect_value(window, events, events.complete, ident, on_complete, finished.clone());
    connect_error(window, events, ident, on_error, finished);
}

/// Run `target` and wrap its outcome in the matching event
fn run_target<T, E>(target: Target<T, E>, abort: &AtomicBool, events: OutcomeEvents) -> ThreadEvent
where
    T: Send + 'static,
    E: Display,
{
    match catch_unwind(AssertUnwindSafe(target)) {
        Ok(Ok(value)) if abort.load(Ordering::Acquire) => ThreadEvent::new(value, events.abort),
        Ok(Ok(value)) => ThreadEvent::new(value, events.complete),
        Ok(Err(err)) => ThreadEvent::new(err.to_string(), events.error),
        Err(panic) => ThreadEvent::new(panic_message(panic.as_ref()), events.error),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker thread panicked".to_string()
    }
}

/// Disconnect every outcome of this worker; only one will ever fire
fn disconnect_all(window: &MainWindow, events: OutcomeEvents) {
    for event_type in events.all() {
        window.disconnect(event_type);
    }
}

fn connect_value<T, D>(
    window: &MainWindow,
    events: OutcomeEvents,
    event_type: EventType,
    ident: ThreadId,
    handler: Option<ValueHandler<T>>,
    finished: D,
) where
    T: Send + 'static,
    D: Fn(ThreadId) + Send + 'static,
{
    let siblings = window.clone();
    window.connect(
        event_type,
        Box::new(move |payload: EventPayload| {
            disconnect_all(&siblings, events);
            finished(ident);
            match payload.downcast::<T>() {
                Ok(value) => {
                    if let Some(handler) = handler {
                        handler(*value);
                    }
                }
                Err(_) => log::error!("Unexpected payload type for worker {:?}", ident),
            }
        }),
    );
}

fn connect_error<D>(
    window: &MainWindow,
    events: OutcomeEvents,
    ident: ThreadId,
    handler: Option<ErrorHandler>,
    finished: D,
) where
    D: Fn(ThreadId) + Send + 'static,
{
    let siblings = window.clone();
    window.connect(
        events.error,
        Box::new(move |payload: EventPayload| {
            disconnect_all(&siblings, events);
            finished(ident);
            let message = payload
                .downcast::<String>()
                .map(|m| *m)
                .unwrap_or_else(|_| "unknown error".to_string());
            match handler {
                Some(handler) => handler(message),
                None => log::error!("Worker thread {:?} failed: {}", ident, message),
            }
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> OutcomeEvents {
        OutcomeEvents::new_unique()
    }

    #[test]
    fn test_complete_when_not_aborted() {
        let events = events();
        let abort = AtomicBool::new(false);
        let event = run_target::<_, Infallible>(Box::new(|| Ok("some result")), &abort, events);

        assert_eq!(event.event_type(), events.complete);
        let data = event.into_data().downcast::<&str>().unwrap();
        assert_eq!(*data, "some result");
    }

    #[test]
    fn test_abort_when_flag_set() {
        let events = events();
        let abort = AtomicBool::new(true);
        let event = run_target::<_, Infallible>(Box::new(|| Ok("some result")), &abort, events);

        assert_eq!(event.event_type(), events.abort);
    }

    #[test]
    fn test_error_carries_message() {
        let events = events();
        let abort = AtomicBool::new(false);
        let event = run_target::<(), _>(Box::new(|| Err("Error msg")), &abort, events);

        assert_eq!(event.event_type(), events.error);
        let data = event.into_data().downcast::<String>().unwrap();
        assert_eq!(*data, "Error msg");
    }

    #[test]
    fn test_error_wins_over_abort() {
        let events = events();
        let abort = AtomicBool::new(true);
        let event = run_target::<(), _>(Box::new(|| Err("late failure")), &abort, events);

        assert_eq!(event.event_type(), events.error);
    }

    #[test]
    fn test_panic_is_captured() {
        let events = events();
        let abort = AtomicBool::new(false);
        let event = run_target(
            Box::new(|| -> Result<(), Infallible> { panic!("worker exploded") }),
            &abort,
            events,
        );

        assert_eq!(event.event_type(), events.error);
        let data = event.into_data().downcast::<String>().unwrap();
        assert_eq!(*data, "worker exploded");
    }

    #[test]
    fn test_outcome_events_are_distinct() {
        let events = events();
        assert_ne!(events.abort, events.complete);
        assert_ne!(events.complete, events.error);
        assert_ne!(events.abort, events.error);
    }

    #[test]
    fn test_task_builder_flags() {
        let task = Task::from_fn(|| 1).daemon(true).name("loader");
        assert!(task.is_daemon());

        let worker = WorkerThread::new(task);
        assert!(worker.is_daemon());
        assert_eq!(worker.name(), Some("loader"));
    }
}
