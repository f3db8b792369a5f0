//! Public API for the task bridge

pub use crate::threads::error::{ThreadError, ThreadResult};
pub use crate::threads::events::{
    EventHandler, EventLoop, EventPayload, EventType, MainWindow, ThreadEvent,
};
pub use crate::threads::pool::{ShutdownReport, ThreadPool};
pub use crate::threads::worker::{OutcomeEvents, Task, WorkerThread};
