//! Shared fixtures for the HTTP integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use image::{ImageBuffer, Rgb};
use std::io::Cursor;
use store::VuforiaDatabase;
use tower::ServiceExt;
use vumock::{ServerConfig, ServerState};

pub const BOUNDARY: &str = "int3grationb0undary";

/// A state plus both routers with one provisioned database.
pub struct TestMock {
    pub state: ServerState,
    pub database: VuforiaDatabase,
}

impl TestMock {
    pub fn new(config: ServerConfig) -> Self {
        let state = ServerState::new(config);
        let database = VuforiaDatabase::new();
        state
            .target_manager
            .add_database(database.clone())
            .expect("fresh database adds cleanly");
        Self { state, database }
    }

    /// Fast-processing defaults for lifecycle tests.
    pub fn quick() -> Self {
        Self::new(ServerConfig {
            processing_time_seconds: 0.1,
            ..ServerConfig::default()
        })
    }

    pub fn vws(&self) -> Router {
        server::vws_router(self.state.clone())
    }

    pub fn vwq(&self) -> Router {
        server::vwq_router(self.state.clone())
    }
}

pub fn rfc1123_now() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Send a signed management-API request through the router.
pub async fn vws_request(
    mock: &TestMock,
    method: &str,
    path: &str,
    body: Vec<u8>,
) -> Response {
    let content_type = if body.is_empty() { "" } else { "application/json" };
    let date = rfc1123_now();
    let authorization = auth::authorization_header(
        &mock.database.server_access_key,
        &mock.database.server_secret_key,
        method,
        &body,
        content_type,
        &date,
        path,
    );
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("Authorization", authorization)
        .header("Date", date)
        .header("Content-Length", body.len().to_string());
    if !content_type.is_empty() {
        builder = builder.header("Content-Type", content_type);
    }
    let request = builder.body(Body::from(body)).expect("request builds");
    mock.vws().oneshot(request).await.expect("router responds")
}

/// Send a signed query-API request through the router.
pub async fn vwq_request(mock: &TestMock, parts: &[(&str, &[u8])]) -> Response {
    let body = multipart_body(parts);
    let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
    let date = rfc1123_now();
    let authorization = auth::authorization_header(
        &mock.database.client_access_key,
        &mock.database.client_secret_key,
        "POST",
        &body,
        &content_type,
        &date,
        "/v1/query",
    );
    let request = Request::builder()
        .method("POST")
        .uri("/v1/query")
        .header("Authorization", authorization)
        .header("Date", date)
        .header("Content-Type", content_type)
        .header("Content-Length", body.len().to_string())
        .body(Body::from(body))
        .expect("request builds");
    mock.vwq().oneshot(request).await.expect("router responds")
}

pub fn multipart_body(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn response_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

pub async fn response_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn png_bytes(image: ImageBuffer<Rgb<u8>, Vec<u8>>) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("in-memory PNG encoding succeeds");
    bytes
}

/// A busy image that processes to the success status.
pub fn high_contrast_png() -> Vec<u8> {
    png_bytes(ImageBuffer::from_fn(8, 8, |x, y| {
        if (x + y) % 2 == 0 {
            Rgb([0u8, 0, 0])
        } else {
            Rgb([255u8, 255, 255])
        }
    }))
}

/// A second distinct busy image.
pub fn gradient_png() -> Vec<u8> {
    png_bytes(ImageBuffer::from_fn(8, 8, |x, y| {
        Rgb([(x * 32) as u8, (y * 32) as u8, 128])
    }))
}

/// A 1x1 near-black image; processes to the failed status, rating 0.
pub fn near_black_png() -> Vec<u8> {
    png_bytes(ImageBuffer::from_pixel(1, 1, Rgb([1u8, 1, 1])))
}

/// Body for `POST /targets`.
pub fn add_target_body(name: &str, image: &[u8]) -> Vec<u8> {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    serde_json::json!({
        "name": name,
        "width": 1.0,
        "image": BASE64.encode(image),
    })
    .to_string()
    .into_bytes()
}

/// Add a target and wait until it leaves the processing state.
pub async fn add_processed_target(mock: &TestMock, name: &str, image: &[u8]) -> String {
    let response = vws_request(mock, "POST", "/targets", add_target_body(name, image)).await;
    assert_eq!(response.status(), 201);
    let body = response_json(response).await;
    let target_id = body["target_id"].as_str().expect("target id").to_owned();
    wait_past_processing(mock).await;
    target_id
}

/// Sleep comfortably past the configured processing window.
pub async fn wait_past_processing(mock: &TestMock) {
    let seconds = mock.state.config.processing_time_seconds;
    tokio::time::sleep(std::time::Duration::from_secs_f64(seconds + 0.15)).await;
}

pub fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|value| value.to_str().ok())
}
