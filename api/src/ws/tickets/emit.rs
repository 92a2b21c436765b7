// api/src/ws/tickets/emit.rs
use serde::Serialize;
use util::ws::WebSocketManager;

use crate::ws::core::{envelope, event::Event};

use super::payload::ChatMessage;
use super::topics::ticket_chat_topic;

/// A text message appended to a ticket's chat.
#[derive(Debug, Serialize)]
pub struct ChatMessageSent {
    #[serde(flatten)]
    pub payload: ChatMessage,
    #[serde(skip)]
    pub ticket_id: i64,
}
impl Event for ChatMessageSent {
    const NAME: &'static str = "message";
    fn topic_path(&self) -> String {
        ticket_chat_topic(self.ticket_id)
    }
}

/// An image stored and appended to a ticket's chat.
#[derive(Debug, Serialize)]
pub struct ChatImageSent {
    #[serde(flatten)]
    pub payload: ChatMessage,
    #[serde(skip)]
    pub ticket_id: i64,
}
impl Event for ChatImageSent {
    const NAME: &'static str = "image";
    fn topic_path(&self) -> String {
        ticket_chat_topic(self.ticket_id)
    }
}

pub async fn message_sent(ws: &WebSocketManager, ticket_id: i64, msg: ChatMessage) {
    envelope::emit(ws, &ChatMessageSent { ticket_id, payload: msg }).await;
}

pub async fn image_sent(ws: &WebSocketManager, ticket_id: i64, msg: ChatMessage) {
    envelope::emit(ws, &ChatImageSent { ticket_id, payload: msg }).await;
}
