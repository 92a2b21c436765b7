use axum::{
    Json,
    extract::{Path, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::tickets;
use std::sync::Arc;
use util::state::AppState;
use util::ws::axum_adapter::ws_route;
use util::ws::serve::WsServerOptions;

use super::topics::ticket_chat_topic;
use super::ws_handlers::TicketWsHandler;
use crate::response::ApiResponse;

/// GET /ws/tickets/{ticket_id}
///
/// Join the chat room of a ticket. Unknown tickets are refused with `404`
/// before the upgrade.
pub async fn ticket_chat_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> Response {
    match tickets::Model::find_by_id(app_state.db(), ticket_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Ticket not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(ticket_id, "Failed to load ticket for chat: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Database error")),
            )
                .into_response();
        }
    }

    let handler = Arc::new(TicketWsHandler {
        db: app_state.db_clone(),
        uploads_root: app_state.uploads_root().to_path_buf(),
        ticket_id,
        max_image_bytes: app_state.max_image_bytes(),
    });
    let topic = move || ticket_chat_topic(ticket_id);

    ws_route(ws, app_state.ws_clone(), topic, handler, WsServerOptions::default()).into_response()
}
