//! # tickets Routes Module
//!
//! Filing, listing and resolving support tickets, plus the read side of a
//! ticket's chat and its CSV export.
//!
//! ## Structure
//! - `get.rs` list, chat page data, CSV download
//! - `post.rs` create (with least-loaded admin assignment)
//! - `put.rs` status toggle

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    routing::{get, put},
};
use util::state::AppState;

use get::{download_csv, get_chat, list_tickets};
use post::create_ticket;
use put::update_status;

/// Builds the `/tickets` route group.
///
/// - `GET /tickets?email=` → `list_tickets`
/// - `POST /tickets` → `create_ticket`
/// - `GET /tickets/{ticket_id}/chat` → `get_chat`
/// - `PUT /tickets/{ticket_id}/status` → `update_status`
/// - `GET /tickets/{ticket_id}/csv` → `download_csv`
pub fn tickets_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tickets).post(create_ticket))
        .route("/{ticket_id}/chat", get(get_chat))
        .route("/{ticket_id}/status", put(update_status))
        .route("/{ticket_id}/csv", get(download_csv))
}
