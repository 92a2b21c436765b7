//! # auth Routes Module
//!
//! Account creation and login for both end users and admins. There are no
//! sessions; the login response carries everything the caller's landing page
//! needs.

pub mod common;
pub mod post;

use axum::{Router, routing::post};
use util::state::AppState;

use post::{login, register};

/// Builds the `/auth` route group.
///
/// - `POST /auth/register` → `register`
/// - `POST /auth/login` → `login`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
