//! Thread Pool
//!
//! Tracks every worker started on behalf of one main window, keyed by the
//! worker's thread identity. The pool is a cheap cloneable handle; clones
//! share the same bookkeeping.

use crate::core::sync::{handle_mutex_poison, recover_mutex};
use crate::threads::error::{ThreadError, ThreadResult};
use crate::threads::events::MainWindow;
use crate::threads::worker::{Task, WorkerThread};
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::{Duration, Instant};

const JOIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Bookkeeping for one running worker
#[derive(Debug)]
struct WorkerEntry {
    name: String,
    abort: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    daemon: bool,
}

#[derive(Debug)]
struct PoolInner {
    window: MainWindow,
    workers: Mutex<HashMap<ThreadId, WorkerEntry>>,
    spawned: AtomicUsize,
}

/// Outcome of [`ThreadPool::stop_all`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Non-daemon workers that finished within the timeout
    pub joined: usize,
    /// Daemon workers, signalled but not waited for
    pub detached: usize,
    /// Names of non-daemon workers still running at the deadline
    pub timed_out: Vec<String>,
}

impl ShutdownReport {
    pub fn is_clean(&self) -> bool {
        self.timed_out.is_empty()
    }
}

/// Registry of running workers bound to one main window
#[derive(Debug, Clone)]
pub struct ThreadPool {
    inner: Arc<PoolInner>,
}

impl ThreadPool {
    pub fn new(window: MainWindow) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                window,
                workers: Mutex::new(HashMap::new()),
                spawned: AtomicUsize::new(0),
            }),
        }
    }

    pub fn window(&self) -> &MainWindow {
        &self.inner.window
    }

    fn lock_workers(&self) -> ThreadResult<MutexGuard<'_, HashMap<ThreadId, WorkerEntry>>> {
        handle_mutex_poison(self.inner.workers.lock(), |message| ThreadError::Poisoned {
            message,
        })
    }

    /// Start `task` on a new thread and return its identity
    ///
    /// The entry is inserted before the worker's target runs, so a worker may
    /// call [`query_abort`](Self::query_abort) from its first instruction.
    pub fn submit<T, E>(&self, task: Task<T, E>) -> ThreadResult<ThreadId>
    where
        T: Send + 'static,
        E: Display + 'static,
    {
        let worker = WorkerThread::new(task);
        let serial = self.inner.spawned.fetch_add(1, Ordering::Relaxed);
        let name = worker
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("guikit-worker-{}", serial));
        let daemon = worker.is_daemon();
        let abort = Arc::new(AtomicBool::new(false));

        let gate: Weak<PoolInner> = Arc::downgrade(&self.inner);
        let registered = move || {
            // Blocks until `submit` below releases the lock
            if let Some(inner) = gate.upgrade() {
                drop(recover_mutex(inner.workers.lock(), "worker registration"));
            }
        };
        let pool: Weak<PoolInner> = Arc::downgrade(&self.inner);
        let finished = move |ident: ThreadId| {
            if let Some(inner) = pool.upgrade() {
                evict(&inner, ident);
            }
        };

        let mut workers = self.lock_workers()?;
        let handle = worker.start(name.clone(), &self.inner.window, abort.clone(), registered, finished)?;
        let ident = handle.thread().id();
        log::debug!("Started worker '{}' ({:?}, daemon: {})", name, ident, daemon);
        workers.insert(
            ident,
            WorkerEntry {
                name,
                abort,
                handle: Some(handle),
                daemon,
            },
        );

        Ok(ident)
    }

    /// Shorthand for a task without handlers
    pub fn run_thread<T, F>(&self, target: F) -> ThreadResult<ThreadId>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        self.submit(Task::<T, Infallible>::from_fn(target))
    }

    /// Start `task` as a daemon worker
    pub fn run_daemon<T, E>(&self, task: Task<T, E>) -> ThreadResult<ThreadId>
    where
        T: Send + 'static,
        E: Display + 'static,
    {
        self.submit(task.daemon(true))
    }

    /// Ask the worker `ident` to stop at its next checkpoint
    pub fn request_abort(&self, ident: ThreadId) -> ThreadResult<()> {
        let workers = self.lock_workers()?;
        match workers.get(&ident) {
            Some(entry) => {
                entry.abort.store(true, Ordering::Release);
                log::debug!("Abort requested for worker '{}'", entry.name);
                Ok(())
            }
            None => {
                let err = ThreadError::NotFound { ident };
                log::error!("{}", err);
                Err(err)
            }
        }
    }

    /// Whether the calling worker has been asked to stop
    ///
    /// Must be called from a worker thread started by this pool.
    pub fn query_abort(&self) -> ThreadResult<bool> {
        let ident = thread::current().id();
        let workers = self.lock_workers()?;
        match workers.get(&ident) {
            Some(entry) => Ok(entry.abort.load(Ordering::Acquire)),
            None => {
                let err = ThreadError::NotFound { ident };
                log::error!("{}", err);
                Err(err)
            }
        }
    }

    /// Number of workers whose outcome has not been delivered yet
    pub fn active_count(&self) -> usize {
        recover_mutex(self.inner.workers.lock(), "ThreadPool::active_count").len()
    }

    pub fn is_tracked(&self, ident: ThreadId) -> bool {
        recover_mutex(self.inner.workers.lock(), "ThreadPool::is_tracked").contains_key(&ident)
    }

    /// Wait for worker `ident` to finish running, up to `timeout`
    ///
    /// Returns whether the thread finished. The entry stays tracked until
    /// its outcome is delivered on the UI thread.
    pub fn wait_for(&self, ident: ThreadId, timeout: Duration) -> ThreadResult<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            let finished = {
                let workers = self.lock_workers()?;
                let entry = workers.get(&ident).ok_or(ThreadError::NotFound { ident })?;
                entry.handle.as_ref().map_or(true, JoinHandle::is_finished)
            };
            if finished {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            thread::sleep(JOIN_POLL_INTERVAL);
        }
    }

    /// Signal every worker to abort, then join non-daemon workers
    ///
    /// Workers that do not stop before `timeout` are left running and named
    /// in the report.
    pub fn stop_all(&self, timeout: Duration) -> ShutdownReport {
        let mut pending: Vec<(String, JoinHandle<()>)> = Vec::new();
        let mut report = ShutdownReport::default();
        {
            let mut workers = recover_mutex(self.inner.workers.lock(), "ThreadPool::stop_all");
            for entry in workers.values_mut() {
                entry.abort.store(true, Ordering::Release);
                if entry.daemon {
                    report.detached += 1;
                } else if let Some(handle) = entry.handle.take() {
                    pending.push((entry.name.clone(), handle));
                }
            }
        }

        log::info!(
            "Stopping {} worker(s), {} daemon(s)",
            pending.len(),
            report.detached
        );

        let deadline = Instant::now() + timeout;
        while !pending.is_empty() && Instant::now() < deadline {
            let (done, running): (Vec<_>, Vec<_>) =
                pending.into_iter().partition(|(_, handle)| handle.is_finished());
            for (name, handle) in done {
                if handle.join().is_err() {
                    log::warn!("Worker '{}' panicked outside its target", name);
                }
                report.joined += 1;
            }
            pending = running;
            if !pending.is_empty() {
                thread::sleep(JOIN_POLL_INTERVAL);
            }
        }

        for (name, handle) in pending {
            if handle.is_finished() {
                let _ = handle.join();
                report.joined += 1;
            } else {
                log::warn!("Worker '{}' did not stop within {:?}", name, timeout);
                report.timed_out.push(name);
            }
        }

        report
    }
}

fn evict(inner: &PoolInner, ident: ThreadId) {
    let entry = recover_mutex(inner.workers.lock(), "ThreadPool::evict").remove(&ident);
    if let Some(entry) = entry {
        log::trace!("Evicted worker '{}'", entry.name);
        if let Some(handle) = entry.handle {
            // A worker evicting itself cannot join its own handle
            if handle.thread().id() == thread::current().id() {
                return;
            }
            // The outcome is posted last, so the thread is about to exit
            if handle.join().is_err() {
                log::warn!("Worker '{}' panicked outside its target", entry.name);
            }
        }
    }
}
