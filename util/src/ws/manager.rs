//! A thread-safe WebSocket manager for topic-based message broadcasting.
//!
//! Uses Tokio broadcast channels per topic. Each chat room is one topic; a
//! socket is "in" a room for as long as it holds a receiver for that topic.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// Type alias for topic name.
type Topic = String;

/// Sender for a topic's broadcast channel.
type Sender = broadcast::Sender<String>;

/// Receiver for a topic's broadcast channel.
type Receiver = broadcast::Receiver<String>;

/// Per-topic channel capacity. Receivers lagging further behind lose frames.
const TOPIC_CAPACITY: usize = 100;

/// Manages broadcast channels per topic to support real-time WebSocket communication.
///
/// - Lazily creates broadcast channels per topic on first subscription
/// - Removes topics when their subscriber count drops to zero after sending
///   or when the last subscriber leaves
#[derive(Clone, Default)]
pub struct WebSocketManager {
    /// Map of topics to broadcast senders.
    inner: Arc<RwLock<HashMap<Topic, Sender>>>,
}

impl WebSocketManager {
    /// Creates a new, empty `WebSocketManager`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to the given topic, creating it if necessary.
    pub async fn subscribe(&self, topic: &str) -> Receiver {
        let mut map = self.inner.write().await;
        map.entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0)
            .subscribe()
    }

    /// Broadcasts a message to all subscribers of `topic`.
    ///
    /// If the topic does not exist, it's a no-op.
    /// If the topic has zero subscribers after sending, it is removed.
    pub async fn broadcast<T: Into<String>>(&self, topic: &str, msg: T) {
        let mut map = self.inner.write().await;
        if let Some(sender) = map.get(topic) {
            let _ = sender.send(msg.into());
            if sender.receiver_count() == 0 {
                tracing::info!("Removing topic '{topic}' due to no subscribers.");
                map.remove(topic);
            }
        }
    }

    /// Drops `topic` if nobody is subscribed to it any more.
    ///
    /// Call after a subscriber's receiver has been dropped.
    pub async fn unsubscribe_cleanup(&self, topic: &str) {
        let mut map = self.inner.write().await;
        if map.get(topic).is_some_and(|s| s.receiver_count() == 0) {
            tracing::debug!("Removing topic '{topic}'; last subscriber left.");
            map.remove(topic);
        }
    }

    /// Number of live receivers on `topic` (0 if the topic does not exist).
    pub async fn subscriber_count(&self, topic: &str) -> usize {
        let map = self.inner.read().await;
        map.get(topic).map(|s| s.receiver_count()).unwrap_or(0)
    }

    /// Whether `topic` currently has a channel.
    pub async fn has_topic(&self, topic: &str) -> bool {
        self.inner.read().await.contains_key(topic)
    }
}
