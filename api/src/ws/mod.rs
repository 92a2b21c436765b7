use axum::Router;
use util::state::AppState;

use crate::ws::tickets::ws_ticket_routes;

pub mod core;
pub mod tickets;

/// Builds the `/ws` router: one chat room per ticket.
pub fn ws_routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/tickets", ws_ticket_routes())
        .with_state(app_state)
}
