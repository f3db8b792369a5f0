//! Task bridge integration tests
//!
//! Drives workers and progress reporting together, the way a plugin
//! running a long job would.

mod common;

use common::{pool_with_loop, WAIT};
use guikit::progress::api::{
    LogSink, ProgressChannel, ProgressConfig, ProgressMessage, ProgressTracker,
};
use guikit::threads::api::{Task, ThreadError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[test]
fn test_worker_reports_progress_and_completes() {
    let (pool, mut event_loop) = pool_with_loop("Progress");
    let channel = ProgressChannel::new("import");
    let mut tracker = ProgressTracker::new(
        ProgressConfig {
            title: "Import".to_string(),
            channel: Some(channel.clone()),
            maximum: 10,
            steps: Some(5),
            ..Default::default()
        },
        LogSink::new("Import"),
    );
    let result = Arc::new(Mutex::new(None));
    let sink = result.clone();

    pool.submit(
        Task::from_fn(move || {
            for step in 0..=10 {
                channel.send_update(step, "rows", None);
            }
            10u64
        })
        .on_complete(move |rows| {
            *sink.lock().unwrap() = Some(rows);
        }),
    )
    .unwrap();

    assert!(event_loop.process_until(WAIT, || result.lock().unwrap().is_some()));
    assert!(tracker.process_updates().unwrap());
    assert_eq!(tracker.every(), 2);
    assert_eq!(tracker.value(), 10);
    assert_eq!(*result.lock().unwrap(), Some(10));
}

#[test]
fn test_progress_cancel_aborts_worker() {
    let (pool, mut event_loop) = pool_with_loop("Cancel");
    let channel = ProgressChannel::new("export");
    let mut aborts = channel.subscribe();
    let outcome = Arc::new(Mutex::new(None));
    let sink = outcome.clone();
    let worker_pool = pool.clone();

    let ident = pool
        .submit(
            Task::from_fn(move || {
                let mut steps = 0u32;
                while !worker_pool.query_abort().unwrap() {
                    steps += 1;
                    std::thread::sleep(Duration::from_millis(1));
                }
                steps
            })
            .on_abort(move |steps| {
                *sink.lock().unwrap() = Some(steps);
            }),
        )
        .unwrap();

    // The display reports cancellation; the UI side turns it into an abort
    channel.broadcast_abort();
    assert_eq!(aborts.try_recv().unwrap(), ProgressMessage::Abort);
    pool.request_abort(ident).unwrap();

    assert!(event_loop.process_until(WAIT, || outcome.lock().unwrap().is_some()));
    assert!(!pool.is_tracked(ident));
    assert!(matches!(
        pool.request_abort(ident),
        Err(ThreadError::NotFound { .. })
    ));
}

#[test]
fn test_pool_clones_share_workers() {
    let (pool, mut event_loop) = pool_with_loop("Clones");
    let other = pool.clone();

    let ident = pool
        .run_thread(|| std::thread::sleep(Duration::from_millis(20)))
        .unwrap();
    assert!(other.is_tracked(ident));

    assert!(event_loop.process_until(WAIT, || other.active_count() == 0));
}
