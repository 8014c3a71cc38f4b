use std::path::Path;

use axum::{Json, Router, http::StatusCode};
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route not found" })),
    )
}

/// Fallback for everything outside `/api`: the frontend build when one is
/// configured (unknown paths get its `index.html`), otherwise a JSON 404.
pub fn init_frontend_router(static_dir: Option<&Path>) -> Router<AppState> {
    match static_dir {
        Some(dir) => Router::new().fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => Router::new().fallback(not_found),
    }
}
