use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use tower::ServiceExt;

use iconsmith::api::models::{CleanupResponse, ErrorResponse, GenerateResponse, HealthResponse};
use iconsmith::api::{router, AppState};
use iconsmith::config::Config;

const BOUNDARY: &str = "iconsmith-test-boundary";

fn test_state(temp_root: &Path) -> AppState {
    let mut config = Config::default();
    config.server.temp_dir = temp_root.to_path_buf();
    AppState {
        config: Arc::new(config),
    }
}

fn red_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([255, 0, 0]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn multipart_body(filename: &str, bytes: &[u8], generation_type: &str, maintain: bool) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(
        format!(
            "\r\n--{BOUNDARY}\r\nContent-Disposition: form-data; \
             name=\"generation_type\"\r\n\r\n{generation_type}\r\n"
        )
        .as_bytes(),
    );
    if maintain {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"maintain_dimensions\"\r\n\r\non\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn generate_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn health_reports_the_service() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()));

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.service, "iconsmith");
    assert!(!health.timestamp.is_empty());
}

#[tokio::test]
async fn disallowed_extension_is_rejected_without_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()));

    let body = multipart_body("logo.bmp", b"not an image", "full_set", false);
    let response = app.oneshot(generate_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(!error.success);
    assert!(error.message.contains("unsupported file format"));

    // No working directory was created for the rejected upload.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn missing_image_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()));

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; \
         name=\"generation_type\"\r\n\r\nfull_set\r\n--{BOUNDARY}--\r\n"
    )
    .into_bytes();
    let response = app.oneshot(generate_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_generation_type_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()));

    let body = multipart_body("logo.png", &red_png(32, 32), "mystery_mode", false);
    let response = app.oneshot(generate_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn corrupt_image_is_a_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()));

    let body = multipart_body("logo.png", b"corrupt bytes", "full_set", false);
    let response = app.oneshot(generate_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(!error.success);
}

#[tokio::test]
async fn full_set_flow_generates_downloads_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path());

    let body = multipart_body("logo.png", &red_png(500, 300), "full_set", true);
    let response = router(state.clone())
        .oneshot(generate_request(body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let generated: GenerateResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(generated.success);
    assert!(!generated.is_single_file);
    assert!(generated.filename.is_none());
    assert!(generated.download_url.starts_with("/download/favicon-"));

    let response = router(state.clone())
        .oneshot(get(&generated.download_url))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let archive = body_bytes(response).await;
    assert_eq!(&archive[..2], &b"PK"[..]);

    let archive_name = generated.download_url.rsplit('/').next().unwrap();
    let response = router(state.clone())
        .oneshot(delete(&format!("/cleanup/{archive_name}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cleaned: CleanupResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(cleaned.success);
    assert!(!dir.path().join(archive_name).exists());
}

#[tokio::test]
async fn favicon_only_flow_serves_the_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path());

    let body = multipart_body("logo.png", &red_png(64, 64), "favicon_only", false);
    let response = router(state.clone())
        .oneshot(generate_request(body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let generated: GenerateResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(generated.is_single_file);
    assert_eq!(generated.filename.as_deref(), Some("favicon.ico"));
    assert!(generated.download_url.starts_with("/direct/"));

    let response = router(state.clone())
        .oneshot(get(&generated.download_url))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let ico = body_bytes(response).await;
    let decoded = image::load_from_memory(&ico).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (16, 16));

    // Cleanup by request id removes the kept working directory.
    let id = generated.download_url.split('/').nth(2).unwrap().to_string();
    assert!(dir.path().join(&id).exists());
    let response = router(state.clone())
        .oneshot(delete(&format!("/cleanup/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!dir.path().join(&id).exists());
}

#[tokio::test]
async fn missing_archive_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()));

    let response = app
        .oneshot(get("/download/favicon-0123456789abcdef.zip"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unexpected_download_names_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path());
    std::fs::write(dir.path().join("secret.zip"), b"nope").unwrap();

    let response = router(state.clone())
        .oneshot(get("/download/secret.zip"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn direct_download_rejects_other_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()));

    let response = app
        .oneshot(get("/direct/0123456789abcdef/archive"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cleanup_always_reports_success() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(test_state(dir.path()));

    let response = app
        .oneshot(delete("/cleanup/never-existed.zip"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cleaned: CleanupResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(cleaned.success);
}
