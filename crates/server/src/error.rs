use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validators::ErrorResponse;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server-side faults.
///
/// Protocol-level failures are *not* errors here: they are catalogued
/// [`ErrorResponse`] values converted by [`protocol_response`]. This type
/// exists for faults of the emulator itself, which must fail loudly rather
/// than masquerade as an emulated shape.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "unmodeled internal fault");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

/// Convert a catalogued protocol error into an axum response, headers and
/// body byte for byte.
pub fn protocol_response(error: ErrorResponse) -> Response {
    let mut builder = axum::http::Response::builder().status(error.status);
    for (name, value) in &error.headers {
        builder = builder.header(*name, value);
    }
    builder
        .body(Body::from(error.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
