//! Progress channels
//!
//! A named broadcast channel over which a long-running process reports its
//! progress and the progress display reports cancellation.

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressMessage {
    /// Same inputs as [`ProgressTracker::update`](crate::progress::api::ProgressTracker::update)
    Update {
        value: u64,
        message: String,
        maximum: Option<u64>,
    },
    /// The user asked for the process to stop
    Abort,
}

/// Named broadcast channel shared by a process and its progress display
#[derive(Debug, Clone)]
pub struct ProgressChannel {
    name: String,
    sender: broadcast::Sender<ProgressMessage>,
}

impl ProgressChannel {
    pub fn new(name: impl Into<String>) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            name: name.into(),
            sender,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressMessage> {
        self.sender.subscribe()
    }

    /// Report progress. Returns false when nobody is listening.
    pub fn send_update(&self, value: u64, message: impl Into<String>, maximum: Option<u64>) -> bool {
        self.send(ProgressMessage::Update {
            value,
            message: message.into(),
            maximum,
        })
    }

    pub fn broadcast_abort(&self) -> bool {
        log::debug!("Broadcasting abort on progress channel '{}'", self.name);
        self.send(ProgressMessage::Abort)
    }

    fn send(&self, message: ProgressMessage) -> bool {
        self.sender.send(message).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_update_reaches_subscribers() {
        let channel = ProgressChannel::new("my_process");
        let mut rx = channel.subscribe();

        assert!(channel.send_update(3, "loading", Some(10)));

        let received = rx.recv().await.unwrap();
        assert_eq!(
            received,
            ProgressMessage::Update {
                value: 3,
                message: "loading".to_string(),
                maximum: Some(10),
            }
        );
    }

    #[tokio::test]
    async fn test_abort_reaches_every_subscriber() {
        let channel = ProgressChannel::new("my_process");
        let mut first = channel.subscribe();
        let mut second = channel.subscribe();

        assert!(channel.broadcast_abort());

        assert_eq!(first.recv().await.unwrap(), ProgressMessage::Abort);
        assert_eq!(second.recv().await.unwrap(), ProgressMessage::Abort);
    }

    #[test]
    fn test_send_without_listeners() {
        let channel = ProgressChannel::new("nobody");
        assert_eq!(channel.name(), "nobody");
        assert!(!channel.send_update(1, "", None));
    }
}
