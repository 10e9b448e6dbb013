use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tower_http::services::ServeDir;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::consultation::ConsultRequest;
use crate::state::AppState;

const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn create_routes(state: &AppState) -> Router<AppState> {
    let system = &state.config.system;

    Router::new()
        // REST API routes
        .route("/api/health", get(health_check))
        .route("/api/consult", post(run_consultation))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // Static file serving: synthesized audio plus the browser form
        .nest_service("/audio", ServeDir::new(&system.audio_dir))
        .fallback_service(ServeDir::new(&system.static_dir))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}

/// Submit action of the browser form: optional `audio` and `image` multipart
/// fields in, three display widgets out. Neither field present is still a
/// valid request.
async fn run_consultation(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let upload_dir = PathBuf::from(&state.config.system.upload_dir);
    let mut request = ConsultRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };
        let file_name = field.file_name().map(|n| n.to_string());
        let data = field.bytes().await.map_err(bad_request)?;
        if data.is_empty() {
            continue;
        }

        match name.as_str() {
            "audio" => {
                let path = save_upload(&upload_dir, file_name.as_deref(), "webm", &data)
                    .await
                    .map_err(internal_error)?;
                request.audio_reference = Some(path);
            }
            "image" => {
                let path = save_upload(&upload_dir, file_name.as_deref(), "jpg", &data)
                    .await
                    .map_err(internal_error)?;
                request.image_reference = Some(path);
            }
            other => debug!("Ignoring unknown multipart field: {other}"),
        }
    }

    let outcome = state.orchestrator.handle(request.clone()).await;
    remove_uploads(&request);

    let audio_url = outcome
        .synthesized_audio_reference
        .as_deref()
        .and_then(|p| p.file_name())
        .map(|n| format!("/audio/{}", n.to_string_lossy()));

    Ok(Json(json!({
        "transcription": outcome.transcription,
        "advisory_text": outcome.advisory_text,
        "audio_url": audio_url,
    })))
}

/// Persist one multipart field under the upload directory, keeping the
/// original extension when the browser supplied a filename.
async fn save_upload(
    dir: &Path,
    original_name: Option<&str>,
    fallback_ext: &str,
    data: &[u8],
) -> anyhow::Result<PathBuf> {
    let ext = original_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .unwrap_or(fallback_ext);

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("upload_{}.{ext}", Uuid::new_v4()));
    tokio::fs::write(&path, data).await?;
    Ok(path)
}

/// Uploads are transient; drop them once the orchestrator is done.
fn remove_uploads(request: &ConsultRequest) {
    let uploads = [
        request.audio_reference.as_deref(),
        request.image_reference.as_deref(),
    ];
    for path in uploads.into_iter().flatten() {
        if let Err(e) = std::fs::remove_file(path) {
            warn!("Could not remove upload {}: {e}", path.display());
        }
    }
}

fn bad_request<E: std::fmt::Display>(err: E) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": err.to_string()})),
    )
}

fn internal_error<E: std::fmt::Display>(err: E) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": err.to_string()})),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_upload_keeps_original_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_upload(dir.path(), Some("scan.png"), "jpg", b"data")
            .await
            .unwrap();
        assert_eq!(path.extension().unwrap(), "png");
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("upload_"));
        assert_eq!(std::fs::read(&path).unwrap(), b"data");
    }

    #[tokio::test]
    async fn test_save_upload_falls_back_to_default_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_upload(dir.path(), None, "webm", b"data").await.unwrap();
        assert_eq!(path.extension().unwrap(), "webm");
    }
}
