//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` liveness probe
//! - `/auth` registration and login for users and admins
//! - `/tickets` filing, listing, chat page data, status and CSV export
//! - `/admins` admin dashboard and title search
//!
//! Uploaded chat images are served outside `/api`, see [`uploads::uploads_routes`].

use crate::routes::{
    admins::admins_routes, auth::auth_routes, health::health_routes, tickets::tickets_routes,
};
use axum::Router;
use util::state::AppState;

pub mod admins;
pub mod auth;
pub mod common;
pub mod health;
pub mod tickets;
pub mod uploads;

/// Builds the `/api` router with `AppState` applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/tickets", tickets_routes())
        .nest("/admins", admins_routes())
        .with_state(app_state)
}
