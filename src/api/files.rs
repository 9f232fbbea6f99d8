use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::models::{CleanupResponse, HealthResponse};
use super::{ApiError, AppState};
use crate::error::Error;

pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    if !is_safe_archive_name(&filename) {
        return Err(Error::NotFound(filename).into());
    }
    let path = state.config.server.temp_dir.join(&filename);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| Error::NotFound(filename.clone()))?;
    Ok(attachment(&filename, "application/zip", bytes))
}

pub async fn direct(
    State(state): State<AppState>,
    Path((id, kind)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    if kind != "favicon" || !is_safe_id(&id) {
        return Err(Error::NotFound(format!("{id}/{kind}")).into());
    }
    let path = state
        .config
        .server
        .temp_dir
        .join(&id)
        .join("favicon.ico");
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| Error::NotFound("favicon.ico".into()))?;
    Ok(attachment("favicon.ico", "image/x-icon", bytes))
}

/// Removes an archive or a kept working directory. Always reports success;
/// callers cannot distinguish "nothing to clean" from "cleanup failed".
pub async fn cleanup(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<CleanupResponse> {
    if let Err(err) = remove_artifact(&state.config.server.temp_dir, &id) {
        tracing::warn!(%id, %err, "cleanup failed");
    }
    Json(CleanupResponse {
        success: true,
        message: "cleaned up".into(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: "iconsmith".into(),
    })
}

fn remove_artifact(temp_root: &std::path::Path, id: &str) -> std::io::Result<()> {
    if is_safe_archive_name(id) {
        let path = temp_root.join(id);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
    } else if is_safe_id(id) {
        let path = temp_root.join(id);
        if path.exists() {
            std::fs::remove_dir_all(path)?;
        }
    }
    Ok(())
}

fn attachment(filename: &str, content_type: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Working-directory ids are short hex strings; anything else (path
/// separators, dots) is rejected before touching the filesystem.
fn is_safe_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= 32 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_safe_archive_name(name: &str) -> bool {
    name.strip_prefix("favicon-")
        .and_then(|rest| rest.strip_suffix(".zip"))
        .is_some_and(is_safe_id)
}
