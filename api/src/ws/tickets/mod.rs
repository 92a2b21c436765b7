use axum::{Router, routing::get};
use util::state::AppState;

use crate::ws::tickets::handlers::ticket_chat_handler;

pub mod common;
pub mod emit;
pub mod error;
pub mod handlers;
pub mod image;
pub mod payload;
pub mod topics;
pub mod ws_handlers;

pub use error::ChatError;

pub fn ws_ticket_routes() -> Router<AppState> {
    Router::new().route("/{ticket_id}", get(ticket_chat_handler))
}
