use axum::{Json, extract::State, http::StatusCode};
use db::assignment::{AssignmentError, least_loaded_admin};
use db::models::{tickets, user};
use util::state::AppState;

use super::common::CreateTicketRequest;
use crate::response::ApiResponse;
use crate::routes::auth::common::SELECT_PLACEHOLDER;
use crate::routes::common::TicketResponse;

/// POST /tickets
///
/// File a ticket. It starts `pending` and is assigned to the admin of its
/// department with the fewest pending tickets (ties go to the earliest
/// registered admin).
///
/// ### Request Body
/// ```json
/// {
///   "email": "bob@helpdesk.io",
///   "title": "VPN down",
///   "description": "Cannot reach the intranet",
///   "priority": "High",
///   "department": "IT"
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created` the stored ticket
/// - `400 Bad Request` department left on `Select`
/// - `404 Not Found` no user with that email
/// - `422 Unprocessable Entity` the department has no admins
/// - `500 Internal Server Error`
pub async fn create_ticket(
    State(app_state): State<AppState>,
    Json(req): Json<CreateTicketRequest>,
) -> (StatusCode, Json<ApiResponse<TicketResponse>>) {
    if req.department == SELECT_PLACEHOLDER {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Select appropriate department")),
        );
    }

    let db = app_state.db();

    let user = match user::Model::find_by_email(db, &req.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!("Ticket rejected, user not found: {}", req.email);
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("User not found")),
            );
        }
        Err(e) => {
            tracing::error!("Failed to look up user {}: {e}", req.email);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    // Held across pick and insert so two creations cannot both see the same minimum.
    let _assignment = app_state.assignment_lock().lock().await;

    let admin = match least_loaded_admin(db, &req.department).await {
        Ok(admin) => admin,
        Err(e @ AssignmentError::NoAdmins(_)) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error(e.to_string())),
            );
        }
        Err(e @ AssignmentError::Db(_)) => {
            tracing::error!("{e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    let new = tickets::NewTicket {
        email: &req.email,
        title: &req.title,
        department: &req.department,
        description: &req.description,
        priority: &req.priority,
    };

    match tickets::Model::create(db, user.id, admin.id, new).await {
        Ok(ticket) => {
            tracing::info!(
                ticket_id = ticket.id,
                admin_id = admin.id,
                "Ticket created and assigned"
            );
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    TicketResponse::from(ticket),
                    "Ticket created successfully",
                )),
            )
        }
        Err(e) => {
            tracing::error!("Failed to create ticket: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}
