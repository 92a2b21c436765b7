use db::models::{admin, tickets, user};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

/// Joins every field message of a failed `validate()` into one string.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Which account table a register/login request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// `"user"` or `"admin"`; the form's `Select` placeholder and anything else is rejected.
    pub fn parse(who: &str) -> Option<Self> {
        match who {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AdminResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub department: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<admin::Model> for AdminResponse {
    fn from(admin: admin::Model) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            email: admin.email,
            department: admin.department,
            created_at: admin.created_at.to_rfc3339(),
            updated_at: admin.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TicketResponse {
    pub id: i64,
    pub email: String,
    pub user_id: i64,
    pub assigned_admin_id: Option<i64>,
    pub title: String,
    pub department: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<tickets::Model> for TicketResponse {
    fn from(ticket: tickets::Model) -> Self {
        Self {
            id: ticket.id,
            email: ticket.email,
            user_id: ticket.user_id,
            assigned_admin_id: ticket.assigned_admin_id,
            title: ticket.title,
            department: ticket.department,
            description: ticket.description,
            priority: ticket.priority,
            status: ticket.status.to_string(),
            created_at: ticket.created_at.to_rfc3339(),
            updated_at: ticket.updated_at.to_rfc3339(),
        }
    }
}

pub fn ticket_list(tickets: Vec<tickets::Model>) -> Vec<TicketResponse> {
    tickets.into_iter().map(TicketResponse::from).collect()
}
