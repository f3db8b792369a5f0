//! Main-thread event posting
//!
//! The UI toolkit delivers work to its main thread through events: any thread
//! may post an event to the main window, and the UI thread later runs the
//! handler connected to that event's type as part of its event loop.
//!
//! [`MainWindow`] is the cloneable posting side, [`EventLoop`] the single
//! consumer owned by the UI thread. Handlers are one-shot: dispatching an
//! event disconnects its handler.

use crate::core::sync::recover_mutex;
use crate::threads::error::{ThreadError, ThreadResult};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Sleep between polls while waiting for events
const POLL_INTERVAL: Duration = Duration::from_millis(5);

static NEXT_EVENT_TYPE: AtomicU64 = AtomicU64::new(1);

/// Tag binding a posted event to its handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventType(u64);

impl EventType {
    /// Mint a process-wide unique event type
    pub fn new_unique() -> Self {
        Self(NEXT_EVENT_TYPE.fetch_add(1, Ordering::Relaxed))
    }
}

pub type EventPayload = Box<dyn Any + Send>;
pub type EventHandler = Box<dyn FnOnce(EventPayload) + Send>;

type Bindings = Arc<Mutex<HashMap<EventType, EventHandler>>>;

/// Event carrying arbitrary data to the main thread
pub struct ThreadEvent {
    event_type: EventType,
    data: EventPayload,
}

impl ThreadEvent {
    pub fn new<T: Send + 'static>(data: T, event_type: EventType) -> Self {
        Self {
            event_type,
            data: Box::new(data),
        }
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn into_data(self) -> EventPayload {
        self.data
    }
}

impl fmt::Debug for ThreadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadEvent")
            .field("event_type", &self.event_type)
            .finish_non_exhaustive()
    }
}

/// Posting side of the main window, safe to clone into any thread
#[derive(Clone)]
pub struct MainWindow {
    title: Arc<str>,
    sender: UnboundedSender<ThreadEvent>,
    bindings: Bindings,
}

impl MainWindow {
    /// Create a main window and the event loop that serves it
    pub fn new(title: impl Into<String>) -> (Self, EventLoop) {
        let (sender, receiver) = unbounded_channel();
        let bindings: Bindings = Arc::new(Mutex::new(HashMap::new()));
        let title: Arc<str> = Arc::from(title.into());

        let window = Self {
            title: title.clone(),
            sender,
            bindings: bindings.clone(),
        };
        let event_loop = EventLoop {
            title,
            receiver,
            bindings,
        };

        (window, event_loop)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Connect `handler` to events of `event_type`, replacing any previous one
    pub fn connect(&self, event_type: EventType, handler: EventHandler) {
        let mut bindings = recover_mutex(self.bindings.lock(), "MainWindow::connect");
        if bindings.insert(event_type, handler).is_some() {
            log::warn!("Handler for {:?} replaced an existing binding", event_type);
        }
    }

    /// Drop the handler for `event_type`. Returns whether one was connected.
    pub fn disconnect(&self, event_type: EventType) -> bool {
        recover_mutex(self.bindings.lock(), "MainWindow::disconnect")
            .remove(&event_type)
            .is_some()
    }

    pub fn is_connected(&self, event_type: EventType) -> bool {
        recover_mutex(self.bindings.lock(), "MainWindow::is_connected").contains_key(&event_type)
    }

    /// Queue `event` for the UI thread. Never blocks.
    pub fn post_event(&self, event: ThreadEvent) -> ThreadResult<()> {
        self.sender
            .send(event)
            .map_err(|_| ThreadError::WindowClosed {
                title: self.title.to_string(),
            })
    }

    /// Whether the event loop has been dropped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl fmt::Debug for MainWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainWindow")
            .field("title", &self.title)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Consumer side of the main window, drained by the UI thread
pub struct EventLoop {
    title: Arc<str>,
    receiver: UnboundedReceiver<ThreadEvent>,
    bindings: Bindings,
}

impl EventLoop {
    /// Dispatch every event queued so far. Returns how many were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.receiver.try_recv() {
            if self.dispatch(event) {
                handled += 1;
            }
        }
        handled
    }

    /// Keep dispatching until `done` returns true or `timeout` elapses
    ///
    /// Returns the final value of `done`.
    pub fn process_until<F>(&mut self, timeout: Duration, mut done: F) -> bool
    where
        F: FnMut() -> bool,
    {
        let deadline = Instant::now() + timeout;
        loop {
            self.process_pending();
            if done() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    /// Run the handler bound to the event, if any
    ///
    /// The handler is removed before it runs, so it may connect or
    /// disconnect other bindings.
    pub fn dispatch(&self, event: ThreadEvent) -> bool {
        let handler = recover_mutex(self.bindings.lock(), "EventLoop::dispatch")
            .remove(&event.event_type());

        match handler {
            Some(handler) => {
                handler(event.into_data());
                true
            }
            None => {
                log::debug!(
                    "No handler connected for {:?} on '{}'",
                    event.event_type(),
                    self.title
                );
                false
            }
        }
    }

    /// Number of handlers still waiting for their event
    pub fn pending_bindings(&self) -> usize {
        recover_mutex(self.bindings.lock(), "EventLoop::pending_bindings").len()
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        // Handlers hold clones of the window; drop them with the loop
        recover_mutex(self.bindings.lock(), "EventLoop::drop").clear();
        log::trace!("Event loop for '{}' closed", self.title);
    }
}
