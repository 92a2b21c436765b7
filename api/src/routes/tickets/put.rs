use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::{admin, tickets, tickets::TicketStatus};
use sea_orm::DbErr;
use util::state::AppState;

use super::common::UpdateStatusRequest;
use crate::response::ApiResponse;
use crate::routes::admins::common::{AdminDashboardResponse, load_dashboard};

/// PUT /tickets/{ticket_id}/status
///
/// Mark a ticket solved (`"solved": true`) or back to pending, then return the
/// acting admin's dashboard.
///
/// ### Request Body
/// ```json
/// { "solved": true, "admin_email": "alice@helpdesk.io" }
/// ```
///
/// ### Responses
///
/// - `200 OK` the admin dashboard after the change
/// - `404 Not Found` unknown ticket or admin
/// - `500 Internal Server Error`
pub async fn update_status(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> (StatusCode, Json<ApiResponse<AdminDashboardResponse>>) {
    let db = app_state.db();

    let admin = match admin::Model::find_by_email(db, &req.admin_email).await {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Admin not found")),
            );
        }
        Err(e) => {
            tracing::error!("Failed to look up admin {}: {e}", req.admin_email);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("An error occurred")),
            );
        }
    };

    let status = if req.solved {
        TicketStatus::Solved
    } else {
        TicketStatus::Pending
    };

    match tickets::Model::set_status(db, ticket_id, status).await {
        Ok(_) => tracing::info!(ticket_id, %status, admin_id = admin.id, "Ticket status updated"),
        Err(DbErr::RecordNotFound(_)) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Ticket not found")),
            );
        }
        Err(e) => {
            tracing::error!(ticket_id, "Failed to update ticket status: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("An error occurred")),
            );
        }
    }

    match load_dashboard(db, admin, None).await {
        Ok(data) => (
            StatusCode::OK,
            Json(ApiResponse::success(data, "Ticket status updated")),
        ),
        Err(e) => {
            tracing::error!("Failed to reload dashboard: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("An error occurred")),
            )
        }
    }
}
