//! Application state container shared across Axum route handlers and services.
//!
//! This struct holds shared resources such as the database connection and WebSocket manager.
//! It is cloned into route handlers via Axum's `State<T>` extractor.

use crate::config;
use crate::ws::WebSocketManager;
use sea_orm::DatabaseConnection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Central application state shared across the server.
///
/// This includes:
/// - A cloned, thread-safe database connection for use with SeaORM.
/// - A global `WebSocketManager` for broadcasting to per-ticket chat rooms.
/// - The directory chat images are written to and served from.
/// - The largest decoded chat image accepted over a socket.
/// - A lock serializing ticket assignment so two concurrent creations
///   cannot both pick the same stale least-loaded admin.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    ws: WebSocketManager,
    uploads_root: PathBuf,
    max_image_bytes: usize,
    assignment_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `db` - A SeaORM `DatabaseConnection`, typically cloned from the main pool.
    /// * `ws` - A `WebSocketManager` responsible for topic-based fan-out.
    /// * `uploads_root` - Directory for uploaded chat images.
    ///
    /// The image limit starts at the configured `MAX_IMAGE_BYTES`.
    pub fn new(db: DatabaseConnection, ws: WebSocketManager, uploads_root: impl Into<PathBuf>) -> Self {
        Self {
            db,
            ws,
            uploads_root: uploads_root.into(),
            max_image_bytes: config::max_image_bytes(),
            assignment_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a shared reference to the internal `WebSocketManager`.
    pub fn ws(&self) -> &WebSocketManager {
        &self.ws
    }

    pub fn uploads_root(&self) -> &Path {
        &self.uploads_root
    }

    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }

    /// Overrides the chat image limit.
    pub fn with_max_image_bytes(mut self, limit: usize) -> Self {
        self.max_image_bytes = limit;
        self
    }

    pub fn assignment_lock(&self) -> &Mutex<()> {
        &self.assignment_lock
    }
}

impl AppState {
    /// Returns a cloned copy of the database connection.
    ///
    /// Useful for async contexts or spawning tasks that require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    /// Returns a cloned instance of the `WebSocketManager`.
    pub fn ws_clone(&self) -> WebSocketManager {
        self.ws.clone()
    }
}
