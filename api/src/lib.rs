pub mod middleware;
pub mod response;
pub mod routes;
pub mod ws;

use axum::{
    Router,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    middleware::from_fn,
};
use tower_http::cors::CorsLayer;
use util::state::AppState;

use crate::middleware::log_request;
use crate::routes::{routes, uploads::uploads_routes};
use crate::ws::ws_routes;

/// The full application: `/api`, `/uploads` and `/ws`, with request logging and CORS.
pub fn app(app_state: AppState) -> Router {
    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes(app_state.clone()))
        .nest("/uploads", uploads_routes().with_state(app_state.clone()))
        .nest("/ws", ws_routes(app_state))
        .layer(from_fn(log_request))
        .layer(cors)
}
