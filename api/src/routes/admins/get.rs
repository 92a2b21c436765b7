use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use db::models::admin;
use util::state::AppState;

use super::common::{AdminDashboardResponse, DashboardQuery, load_dashboard};
use crate::response::ApiResponse;

/// GET /admins/dashboard?email={email}&search={text}
///
/// The admin's profile and assigned tickets. With `search`, only tickets whose
/// title contains it (case-sensitive) are returned.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "admin": { "id": 1, "username": "alice", "department": "IT", ... },
///     "assigned_tickets": [ { "id": 3, "title": "VPN down", "status": "pending", ... } ]
///   },
///   "message": "Dashboard loaded"
/// }
/// ```
///
/// - `404 Not Found` unknown admin email
/// - `500 Internal Server Error`
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> (StatusCode, Json<ApiResponse<AdminDashboardResponse>>) {
    let db = app_state.db();

    let admin = match admin::Model::find_by_email(db, &query.email).await {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Admin not found")),
            );
        }
        Err(e) => {
            tracing::error!("Failed to load admin {}: {e}", query.email);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Internal Server Error")),
            );
        }
    };

    match load_dashboard(db, admin, query.search.as_deref()).await {
        Ok(data) => (
            StatusCode::OK,
            Json(ApiResponse::success(data, "Dashboard loaded")),
        ),
        Err(e) => {
            tracing::error!("Failed to load dashboard for {}: {e}", query.email);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Internal Server Error")),
            )
        }
    }
}
