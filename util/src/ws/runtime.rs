use crate::ws::WebSocketManager;
use axum::extract::ws::{Message, Utf8Bytes};
use serde::Serialize;
use tokio::sync::mpsc;

/// Per-connection handle given to a [`WsHandler`](super::handler_trait::WsHandler).
pub struct WsContext {
    pub topic: String,
    pub ws: WebSocketManager,
    // enqueue frames for the writer task
    out_tx: mpsc::Sender<Message>,
}

impl WsContext {
    pub fn new(topic: String, ws: WebSocketManager, out_tx: mpsc::Sender<Message>) -> Self {
        Self { topic, ws, out_tx }
    }

    /// Send a *single* text frame to this client only
    pub async fn reply_text(&self, text: impl Into<Utf8Bytes>) -> Result<(), ()> {
        self.out_tx
            .send(Message::Text(text.into()))
            .await
            .map_err(|_| ())
    }

    /// Send an enveloped event to this client only
    pub async fn reply_event<T: Serialize>(&self, event: &str, payload: &T) -> Result<(), ()> {
        let json = crate::ws::envelope(&self.topic, event, payload).map_err(|e| {
            tracing::error!("Failed to serialize '{event}' reply on '{}': {e}", self.topic);
        })?;
        self.reply_text(json).await
    }

    /// Send a WS-level pong to this client
    pub async fn reply_pong(&self, payload: bytes::Bytes) -> Result<(), ()> {
        self.out_tx
            .send(Message::Pong(payload))
            .await
            .map_err(|_| ())
    }
}
