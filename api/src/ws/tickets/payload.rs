// api/src/ws/tickets/payload.rs
use db::models::chat_message::{self, MessageType};
use serde::{Deserialize, Serialize};

/// One entry of a ticket's chat, as sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChatMessage {
    pub sender: String,
    /// Text body, or the stored file name for images.
    pub message: String,
    pub message_type: MessageType,
    pub timestamp: String, // RFC3339
}

impl From<chat_message::Model> for ChatMessage {
    fn from(m: chat_message::Model) -> Self {
        Self {
            sender: m.sender,
            message: m.message,
            message_type: m.message_type,
            timestamp: m.timestamp.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatHistory {
    pub ticket_id: i64,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatFailure {
    pub message: String,
}
