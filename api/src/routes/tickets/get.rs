use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use db::models::{chat_message, tickets, user};
use util::state::AppState;

use super::common::{ChatPageResponse, ChatQuery, ListTicketsQuery, ticket_csv};
use crate::response::ApiResponse;
use crate::routes::common::{TicketResponse, ticket_list};
use crate::ws::tickets::payload::ChatMessage;

/// GET /tickets?email={email}
///
/// Every ticket filed by the user with this email.
///
/// ### Responses
///
/// - `200 OK` list of tickets
/// - `404 Not Found` no user with that email
/// - `500 Internal Server Error`
pub async fn list_tickets(
    State(app_state): State<AppState>,
    Query(query): Query<ListTicketsQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<TicketResponse>>>) {
    let db = app_state.db();

    let user = match user::Model::find_by_email(db, &query.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("User not found")),
            );
        }
        Err(e) => {
            tracing::error!("Failed to look up user {}: {e}", query.email);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    match tickets::Model::find_by_user(db, user.id).await {
        Ok(tickets) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ticket_list(tickets),
                "Tickets retrieved successfully",
            )),
        ),
        Err(e) => {
            tracing::error!("Failed to list tickets for user {}: {e}", user.id);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

/// GET /tickets/{ticket_id}/chat?sender={name}&role={user|admin}
///
/// Everything a chat page needs on open: the ticket, both participants and
/// the stored history. Live messages then flow over `/ws/tickets/{ticket_id}`.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "ticket": { "id": 3, "title": "VPN down", ... },
///     "user": { "id": 1, "username": "bob", ... },
///     "admin": { "id": 2, "username": "alice", "department": "IT", ... },
///     "chat_history": [ { "sender": "bob", "message": "hi", "message_type": "text", "timestamp": "..." } ],
///     "sender": "bob",
///     "role": "user"
///   },
///   "message": "Chat loaded"
/// }
/// ```
///
/// - `404 Not Found` unknown ticket
/// - `500 Internal Server Error` participant missing or database failure ("Error opening chat")
pub async fn get_chat(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Query(query): Query<ChatQuery>,
) -> (StatusCode, Json<ApiResponse<ChatPageResponse>>) {
    let db = app_state.db();

    let ticket = match tickets::Model::find_by_id(db, ticket_id).await {
        Ok(Some(ticket)) => ticket,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Ticket not found")),
            );
        }
        Err(e) => {
            tracing::error!(ticket_id, "Failed to load ticket: {e}");
            return error_opening_chat();
        }
    };

    let (user, admin) = match ticket.find_participants(db).await {
        Ok(Some(pair)) => pair,
        Ok(None) => {
            tracing::error!(ticket_id, "Ticket is missing its user or admin");
            return error_opening_chat();
        }
        Err(e) => {
            tracing::error!(ticket_id, "Failed to load chat participants: {e}");
            return error_opening_chat();
        }
    };

    let chat_history = match chat_message::Model::history_for_ticket(db, ticket_id).await {
        Ok(Some((_, messages))) => messages.into_iter().map(ChatMessage::from).collect(),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::error!(ticket_id, "Failed to load chat history: {e}");
            return error_opening_chat();
        }
    };

    let page = ChatPageResponse {
        ticket: ticket.into(),
        user: user.into(),
        admin: admin.into(),
        chat_history,
        sender: query.sender,
        role: query.role,
    };

    (StatusCode::OK, Json(ApiResponse::success(page, "Chat loaded")))
}

fn error_opening_chat() -> (StatusCode, Json<ApiResponse<ChatPageResponse>>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error("Error opening chat")),
    )
}

/// GET /tickets/{ticket_id}/csv
///
/// **Response**: `text/csv` attachment `ticket_{ticket_id}.csv` with columns
/// `Title,Description,Status,Priority`.
pub async fn download_csv(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> Response {
    let ticket = match tickets::Model::find_by_id(app_state.db(), ticket_id).await {
        Ok(Some(ticket)) => ticket,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Ticket not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(ticket_id, "Failed to export ticket: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Internal Server Error")),
            )
                .into_response();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"ticket_{ticket_id}.csv\""))
            .unwrap_or(HeaderValue::from_static("attachment")),
    );

    (StatusCode::OK, headers, ticket_csv(&ticket)).into_response()
}
