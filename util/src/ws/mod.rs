// util/src/ws/mod.rs
pub mod axum_adapter;
pub mod handler_trait;
pub mod manager;
pub mod runtime;
pub mod serve;

pub use manager::WebSocketManager;

use chrono::Utc;
use serde::Serialize;

/// Standard event envelope sent over WebSocket topics.
#[derive(Serialize)]
pub struct EventEnvelope<'a, T> {
    #[serde(rename = "type")]
    pub r#type: &'static str,
    pub event: &'a str,
    pub topic: &'a str,
    pub payload: T,
    pub ts: String,
}

/// Serialize `payload` into an `EventEnvelope` JSON string.
pub fn envelope<T: Serialize>(topic: &str, event: &str, payload: &T) -> serde_json::Result<String> {
    serde_json::to_string(&EventEnvelope {
        r#type: "event",
        event,
        topic,
        payload,
        ts: Utc::now().to_rfc3339(),
    })
}

/// Broadcast a JSON-serialized `EventEnvelope` on `topic`.
pub async fn emit<T: Serialize>(ws: &WebSocketManager, topic: &str, event: &str, payload: &T) {
    match envelope(topic, event, payload) {
        Ok(json) => ws.broadcast(topic, json).await,
        Err(e) => tracing::error!("Failed to serialize '{event}' for '{topic}': {e}"),
    }
}
