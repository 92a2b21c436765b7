use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use util::{paths::upload_path, state::AppState};

use crate::response::ApiResponse;

/// Builds the `/uploads` route group serving images stored by the chat.
pub fn uploads_routes() -> Router<AppState> {
    Router::new().route("/{filename}", get(get_upload))
}

/// GET /uploads/{filename}
///
/// Returns the raw bytes of a chat image. The `Content-Type` is inferred from
/// the file extension.
///
/// ### Error Responses
/// - `404 Not Found` the name is not a plain file name, or no such file
/// - `500 Internal Server Error` the file could not be read
pub async fn get_upload(
    State(app_state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    let Some(fs_path) = upload_path(app_state.uploads_root(), &filename) else {
        tracing::warn!("Rejected upload path '{filename}'");
        return not_found();
    };

    let buffer = match tokio::fs::read(&fs_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return not_found(),
        Err(e) => {
            tracing::error!("Failed to read upload {}: {e}", fs_path.display());
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to read file")),
            )
                .into_response();
        }
    };

    let mime = mime_guess::from_path(&fs_path)
        .first_or_octet_stream()
        .to_string();

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&mime)
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );

    (StatusCode::OK, headers, buffer).into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("File not found")),
    )
        .into_response()
}
