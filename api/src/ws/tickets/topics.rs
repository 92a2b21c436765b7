/// Room shared by every socket watching one ticket's chat.
pub fn ticket_chat_topic(ticket_id: i64) -> String {
    format!("tickets:{ticket_id}")
}
