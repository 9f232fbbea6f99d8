use axum::extract::{Multipart, State};
use axum::Json;

use super::models::GenerateResponse;
use super::{ApiError, AppState};
use crate::catalog::GenerationMode;
use crate::config;
use crate::error::Error;
use crate::normalize::ResizePolicy;
use crate::pipeline::{self, GenerateOptions};

/// Multipart intake for the generation endpoint. Validation happens before
/// any working directory is created, so a rejected upload leaves no trace.
pub async fn generate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, ApiError> {
    let mut image_bytes: Option<Vec<u8>> = None;
    let mut image_name: Option<String> = None;
    let mut maintain_dimensions = false;
    let mut generation_type = String::from("full_set");

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("malformed multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("image") => {
                image_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| Error::Validation(format!("failed to read upload: {e}")))?;
                image_bytes = Some(bytes.to_vec());
            }
            Some("maintain_dimensions") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| Error::Validation(format!("malformed multipart body: {e}")))?;
                maintain_dimensions = matches!(value.trim(), "on" | "true" | "1");
            }
            Some("generation_type") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| Error::Validation(format!("malformed multipart body: {e}")))?;
                generation_type = value.trim().to_string();
            }
            _ => {}
        }
    }

    let bytes = image_bytes.ok_or_else(|| Error::Validation("no file was uploaded".into()))?;
    let name = image_name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::Validation("no file was selected".into()))?;
    if bytes.is_empty() {
        return Err(Error::Validation("uploaded file is empty".into()).into());
    }
    if !config::allowed_file(&name) {
        return Err(Error::Validation(format!(
            "unsupported file format (allowed: {})",
            config::ALLOWED_EXTENSIONS.join(", ")
        ))
        .into());
    }
    let mode = GenerationMode::parse(&generation_type)
        .ok_or_else(|| Error::Validation(format!("unknown generation_type: {generation_type}")))?;

    let policy = if maintain_dimensions {
        ResizePolicy::AspectPad
    } else {
        ResizePolicy::Stretch
    };
    let options = GenerateOptions { mode, policy };

    // The whole pipeline is synchronous CPU-bound work.
    let config = state.config.clone();
    let output =
        tokio::task::spawn_blocking(move || pipeline::run(&config, &bytes, &options))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))??;

    tracing::info!(
        id = %output.id,
        rendered = output.rendered,
        failed = output.failed,
        "icon set generated"
    );

    let response = match &output.archive_name {
        Some(archive) => GenerateResponse {
            success: true,
            download_url: format!("/download/{archive}"),
            is_single_file: false,
            filename: None,
        },
        None => GenerateResponse {
            success: true,
            download_url: format!("/direct/{}/favicon", output.id),
            is_single_file: true,
            filename: Some("favicon.ico".into()),
        },
    };
    Ok(Json(response))
}
