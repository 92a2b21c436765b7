use db::models::chat_message::MessageType;
use serde::Deserialize;

/// Frames a chat client may send, tagged by `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TicketIncoming {
    /// Ask for the stored history of this ticket's chat.
    #[serde(rename_all = "camelCase")]
    ChatInit {
        #[serde(default)]
        user_id: Option<i64>,
        #[serde(default)]
        admin_id: Option<i64>,
    },

    #[serde(rename_all = "camelCase")]
    ChatMessage {
        sender: String,
        message: String,
        #[serde(default)]
        message_type: MessageType,
    },

    /// `image` is a data URI (`data:image/png;base64,...`) or bare base64.
    ChatImage { sender: String, image: String },
}
