//! # admins Routes Module
//!
//! Admin-facing views over tickets.

pub mod common;
pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

use get::get_dashboard;

/// Builds the `/admins` route group.
///
/// - `GET /admins/dashboard?email=&search=` → `get_dashboard`
pub fn admins_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}
