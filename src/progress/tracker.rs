//! Progress tracker
//!
//! Throttled progress reporting for long-running processes. Updates can be
//! made directly or sent over a [`ProgressChannel`]; cancellation reported by
//! the display is broadcast back over the same channel.

use crate::progress::channel::{ProgressChannel, ProgressMessage};
use crate::progress::error::{ProgressError, ProgressResult};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Where progress is displayed
pub trait ProgressSink {
    /// Show `message` at `value` out of `range`. Returns false if the user
    /// asked to cancel.
    fn update(&mut self, value: u64, range: u64, message: &str) -> bool;

    fn is_shown(&self) -> bool;

    fn show(&mut self);

    fn hide(&mut self);
}

/// Sink writing progress to the log
#[derive(Debug, Default)]
pub struct LogSink {
    title: String,
    shown: bool,
}

impl LogSink {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            shown: false,
        }
    }
}

impl ProgressSink for LogSink {
    fn update(&mut self, _value: u64, _range: u64, message: &str) -> bool {
        log::info!("{}: {}", self.title, message);
        true
    }

    fn is_shown(&self) -> bool {
        self.shown
    }

    fn show(&mut self) {
        self.shown = true;
    }

    fn hide(&mut self) {
        self.shown = false;
    }
}

#[derive(Debug, Clone)]
pub struct ProgressConfig {
    pub title: String,
    pub message: String,
    /// Channel to listen for updates on and broadcast aborts to
    pub channel: Option<ProgressChannel>,
    pub maximum: u64,
    /// Number of steps between display updates
    pub every: u64,
    /// Total number of display updates; overrides `every` when set
    pub steps: Option<u64>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            channel: None,
            maximum: 100,
            every: 1,
            steps: None,
        }
    }
}

#[derive(Debug)]
pub struct ProgressTracker<S: ProgressSink = LogSink> {
    title: String,
    message: String,
    channel: Option<ProgressChannel>,
    updates: Option<broadcast::Receiver<ProgressMessage>>,
    range: u64,
    every: u64,
    steps: Option<u64>,
    value: u64,
    sink: S,
}

impl<S: ProgressSink> ProgressTracker<S> {
    pub fn new(config: ProgressConfig, sink: S) -> Self {
        let updates = config.channel.as_ref().map(ProgressChannel::subscribe);
        let mut tracker = Self {
            title: config.title,
            message: config.message,
            channel: config.channel,
            updates,
            range: config.maximum,
            every: config.every.max(1),
            steps: config.steps,
            value: 0,
            sink,
        };
        tracker.set_range(config.maximum);
        tracker
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> u64 {
        self.range
    }

    pub fn every(&self) -> u64 {
        self.every
    }

    /// Last value shown on the sink
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Set a new maximum, recomputing `every` when `steps` is set
    pub fn set_range(&mut self, maximum: u64) {
        self.range = maximum;
        if let Some(steps) = self.steps {
            let divisor = maximum.min(steps);
            self.every = if divisor == 0 { 1 } else { (maximum / divisor).max(1) };
        }
    }

    /// Report the current step
    ///
    /// Returns whether the process should continue. Steps that are not a
    /// multiple of `every` are not shown and always continue.
    pub fn update(&mut self, value: u64, msg: &str, maximum: Option<u64>) -> ProgressResult<bool> {
        if let Some(maximum) = maximum {
            self.set_range(maximum);
        }

        if value > self.range {
            return Err(ProgressError::OutOfRange {
                value,
                maximum: self.range,
            });
        }

        if !self.sink.is_shown() {
            self.sink.show();
        }

        if value % self.every != 0 {
            return Ok(true);
        }

        let text = if msg.is_empty() {
            format!("{}/{}", value, self.range)
        } else {
            format!("{} - {}/{}", msg, value, self.range)
        };
        self.value = value;
        let keep_going = self.sink.update(value, self.range, &text);

        if value == self.range {
            self.sink.hide();
        }

        if !keep_going {
            self.broadcast_abort();
        }

        Ok(keep_going)
    }

    /// Apply every update received on the channel so far
    ///
    /// Returns false if any of them was cancelled.
    pub fn process_updates(&mut self) -> ProgressResult<bool> {
        let mut keep_going = true;
        loop {
            let received = match self.updates.as_mut() {
                Some(updates) => updates.try_recv(),
                None => return Ok(true),
            };
            match received {
                Ok(ProgressMessage::Update {
                    value,
                    message,
                    maximum,
                }) => keep_going &= self.update(value, &message, maximum)?,
                Ok(ProgressMessage::Abort) => {}
                Err(TryRecvError::Lagged(missed)) => {
                    log::warn!("Progress '{}' skipped {} update(s)", self.title, missed);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return Ok(keep_going),
            }
        }
    }

    fn broadcast_abort(&self) {
        if let Some(channel) = &self.channel {
            channel.broadcast_abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink recording every message, cancelling at a given value
    #[derive(Debug, Default)]
    struct RecordingSink {
        shown: bool,
        messages: Vec<String>,
        cancel_at: Option<u64>,
    }

    impl ProgressSink for RecordingSink {
        fn update(&mut self, value: u64, _range: u64, message: &str) -> bool {
            self.messages.push(message.to_string());
            self.cancel_at != Some(value)
        }

        fn is_shown(&self) -> bool {
            self.shown
        }

        fn show(&mut self) {
            self.shown = true;
        }

        fn hide(&mut self) {
            self.shown = false;
        }
    }

    fn tracker(config: ProgressConfig) -> ProgressTracker<RecordingSink> {
        ProgressTracker::new(config, RecordingSink::default())
    }

    #[test]
    fn test_set_range_without_steps_keeps_every() {
        let mut dlg = tracker(ProgressConfig {
            maximum: 200,
            every: 2,
            ..Default::default()
        });
        assert_eq!(dlg.range(), 200);
        assert_eq!(dlg.every(), 2);

        dlg.set_range(300);
        assert_eq!(dlg.range(), 300);
        assert_eq!(dlg.every(), 2);
    }

    #[test]
    fn test_set_range_with_steps_recomputes_every() {
        let mut dlg = tracker(ProgressConfig {
            maximum: 200,
            steps: Some(20),
            ..Default::default()
        });
        assert_eq!(dlg.every(), 10);

        dlg.set_range(300);
        assert_eq!(dlg.range(), 300);
        assert_eq!(dlg.every(), 15);
    }

    #[test]
    fn test_more_steps_than_maximum() {
        let dlg = tracker(ProgressConfig {
            maximum: 5,
            steps: Some(20),
            ..Default::default()
        });
        assert_eq!(dlg.every(), 1);
    }

    #[test]
    fn test_zero_maximum_with_steps() {
        let dlg = tracker(ProgressConfig {
            maximum: 0,
            steps: Some(10),
            ..Default::default()
        });
        assert_eq!(dlg.every(), 1);
    }

    #[test]
    fn test_value_above_maximum_is_rejected() {
        let mut dlg = tracker(ProgressConfig::default());

        let err = dlg.update(101, "", None).unwrap_err();
        assert_eq!(err, ProgressError::OutOfRange { value: 101, maximum: 100 });
        assert_eq!(err.to_string(), "Current step larger than the maximum: 101>100");
    }

    #[test]
    fn test_new_maximum_applies_before_check() {
        let mut dlg = tracker(ProgressConfig::default());

        assert!(dlg.update(150, "", Some(200)).unwrap());
        assert_eq!(dlg.range(), 200);
        assert_eq!(dlg.value(), 150);
    }

    #[test]
    fn test_update_is_throttled_by_every() {
        let mut dlg = tracker(ProgressConfig {
            every: 2,
            ..Default::default()
        });

        assert!(dlg.update(1, "", None).unwrap());
        assert_eq!(dlg.value(), 0);
        assert!(dlg.sink().messages.is_empty());

        assert!(dlg.update(2, "", None).unwrap());
        assert_eq!(dlg.value(), 2);
        assert_eq!(dlg.sink().messages, vec!["2/100"]);
    }

    #[test]
    fn test_message_format() {
        let mut dlg = tracker(ProgressConfig::default());

        dlg.update(4, "Reading", None).unwrap();
        assert_eq!(dlg.sink().messages, vec!["Reading - 4/100"]);
    }

    #[test]
    fn test_hidden_at_maximum_and_shown_again() {
        let mut dlg = tracker(ProgressConfig {
            every: 2,
            ..Default::default()
        });

        dlg.update(2, "", None).unwrap();
        assert!(dlg.sink().is_shown());

        dlg.update(100, "", None).unwrap();
        assert_eq!(dlg.value(), 100);
        assert!(!dlg.sink().is_shown());

        dlg.update(0, "", None).unwrap();
        assert_eq!(dlg.value(), 0);
        assert!(dlg.sink().is_shown());
    }

    #[test]
    fn test_cancel_broadcasts_abort() {
        let channel = ProgressChannel::new("my_process");
        let mut listener = channel.subscribe();
        let mut dlg = ProgressTracker::new(
            ProgressConfig {
                channel: Some(channel),
                ..Default::default()
            },
            RecordingSink {
                cancel_at: Some(3),
                ..Default::default()
            },
        );

        assert!(dlg.update(2, "", None).unwrap());
        assert!(!dlg.update(3, "", None).unwrap());

        assert_eq!(listener.try_recv().unwrap(), ProgressMessage::Abort);
    }

    #[test]
    fn test_cancel_without_channel_only_returns_false() {
        let mut dlg = ProgressTracker::new(
            ProgressConfig::default(),
            RecordingSink {
                cancel_at: Some(1),
                ..Default::default()
            },
        );

        assert!(!dlg.update(1, "", None).unwrap());
    }

    #[test]
    fn test_updates_over_channel() {
        let channel = ProgressChannel::new("my_process");
        let mut dlg = tracker(ProgressConfig {
            channel: Some(channel.clone()),
            ..Default::default()
        });

        channel.send_update(0, "", Some(300));
        channel.send_update(150, "halfway", None);

        assert!(dlg.process_updates().unwrap());
        assert_eq!(dlg.range(), 300);
        assert_eq!(dlg.sink().messages, vec!["0/300", "halfway - 150/300"]);
    }

    #[test]
    fn test_out_of_range_over_channel() {
        let channel = ProgressChannel::new("my_process");
        let mut dlg = tracker(ProgressConfig {
            channel: Some(channel.clone()),
            ..Default::default()
        });

        channel.send_update(500, "", None);

        assert!(matches!(
            dlg.process_updates(),
            Err(ProgressError::OutOfRange { value: 500, .. })
        ));
    }

    #[test]
    fn test_log_sink_tracks_visibility() {
        let mut dlg = ProgressTracker::new(ProgressConfig::default(), LogSink::new("Import"));
        assert_eq!(dlg.title(), "");
        assert!(!dlg.sink().is_shown());

        assert!(dlg.update(10, "", None).unwrap());
        assert!(dlg.sink().is_shown());
    }
}
