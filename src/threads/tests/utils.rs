//! Shared helpers for task bridge tests

use crate::threads::events::{EventLoop, MainWindow};
use crate::threads::pool::ThreadPool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const WAIT: Duration = Duration::from_secs(5);

pub fn pool_with_loop() -> (ThreadPool, EventLoop) {
    let (window, event_loop) = MainWindow::new("Test window");
    (ThreadPool::new(window), event_loop)
}

/// Slot filled by a handler running on the UI thread
pub fn slot<T>() -> Arc<Mutex<Option<T>>> {
    Arc::new(Mutex::new(None))
}

pub fn is_filled<T>(slot: &Arc<Mutex<Option<T>>>) -> bool {
    slot.lock().unwrap().is_some()
}

/// Spin until the pool asks the calling worker to stop
pub fn wait_for_abort(pool: &ThreadPool) {
    while !pool.query_abort().unwrap() {
        std::thread::sleep(Duration::from_millis(1));
    }
}
