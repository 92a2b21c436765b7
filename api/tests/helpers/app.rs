use axum::{Router, body::Body, http::Request, response::Response};
use db::models::{admin, tickets, user};
use db::test_utils::setup_test_db;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use util::{state::AppState, ws::WebSocketManager};

/// Router over a fresh in-memory database and a throwaway uploads directory.
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub uploads: TempDir,
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response {
        self.app.clone().oneshot(req).await.unwrap()
    }
}

pub async fn make_test_app() -> TestApp {
    make_test_app_with(|state| state).await
}

/// Like [`make_test_app`], with `configure` applied to the state first.
pub async fn make_test_app_with(configure: impl FnOnce(AppState) -> AppState) -> TestApp {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let state = configure(AppState::new(db, WebSocketManager::new(), uploads.path()));
    let app = api::app(state.clone());

    TestApp {
        app,
        state,
        uploads,
    }
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// One user, one IT admin and a pending ticket from the user assigned to that admin.
pub struct Seeded {
    pub user: user::Model,
    pub admin: admin::Model,
    pub ticket: tickets::Model,
}

pub async fn seed_ticket(state: &AppState) -> Seeded {
    let db = state.db();
    let user = user::Model::create(db, "bob", "bob@hd.io", "pw").await.unwrap();
    let admin = admin::Model::create(db, "alice", "alice@hd.io", "pw", "IT")
        .await
        .unwrap();
    let ticket = tickets::Model::create(
        db,
        user.id,
        admin.id,
        tickets::NewTicket {
            email: "bob@hd.io",
            title: "VPN down",
            department: "IT",
            description: "Cannot reach the intranet",
            priority: "High",
        },
    )
    .await
    .unwrap();

    Seeded {
        user,
        admin,
        ticket,
    }
}
