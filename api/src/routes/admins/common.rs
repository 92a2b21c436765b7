use db::models::{admin, tickets};
use sea_orm::{DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};

use crate::routes::common::{AdminResponse, TicketResponse, ticket_list};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub email: String,
    /// Case-sensitive substring of the ticket title.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct AdminDashboardResponse {
    pub admin: AdminResponse,
    pub assigned_tickets: Vec<TicketResponse>,
}

/// The tickets assigned to `admin`, optionally narrowed to titles containing `search`.
pub async fn load_dashboard(
    db: &DatabaseConnection,
    admin: admin::Model,
    search: Option<&str>,
) -> Result<AdminDashboardResponse, DbErr> {
    let mut assigned = tickets::Model::find_by_assigned_admin(db, admin.id).await?;
    if let Some(needle) = search.filter(|s| !s.is_empty()) {
        assigned.retain(|t| t.title.contains(needle));
    }

    Ok(AdminDashboardResponse {
        admin: admin.into(),
        assigned_tickets: ticket_list(assigned),
    })
}
