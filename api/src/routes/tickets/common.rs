use db::models::tickets;
use serde::{Deserialize, Serialize};

use crate::routes::common::{AdminResponse, TicketResponse, UserResponse};
use crate::ws::tickets::payload::ChatMessage;

#[derive(Debug, Deserialize)]
pub struct ListTicketsQuery {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub email: String,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub department: String,
}

/// Who is opening the chat page; echoed back so the client knows its side.
#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub sender: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct ChatPageResponse {
    pub ticket: TicketResponse,
    pub user: UserResponse,
    pub admin: AdminResponse,
    pub chat_history: Vec<ChatMessage>,
    pub sender: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub solved: bool,
    pub admin_email: String,
}

fn esc(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Single-row CSV export of a ticket.
pub fn ticket_csv(ticket: &tickets::Model) -> String {
    format!(
        "Title,Description,Status,Priority\n{},{},{},{}\n",
        esc(&ticket.title),
        esc(&ticket.description),
        ticket.status,
        esc(&ticket.priority),
    )
}
