//! HTTP entry point: one chat endpoint behind a permissive CORS policy.

use crate::models::{ChatRequest, ChatResponse, ErrorBody};
use crate::relay::ChatRelay;
use crate::{Error, Result};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const CHAT_PATH: &str = "/api/forestwise-ai";
/// Alias kept for frontends built against the serverless-function URL.
pub const FUNCTION_PATH: &str = "/.netlify/functions/forestwise-ai";

/// Largest accepted request body, sized for base64 photos of several megabytes.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::OPTIONS,
    Method::PATCH,
    Method::DELETE,
    Method::POST,
    Method::PUT,
];

pub const ALLOWED_HEADERS: [HeaderName; 9] = [
    HeaderName::from_static("x-csrf-token"),
    HeaderName::from_static("x-requested-with"),
    HeaderName::from_static("accept"),
    HeaderName::from_static("accept-version"),
    HeaderName::from_static("content-length"),
    HeaderName::from_static("content-md5"),
    HeaderName::from_static("content-type"),
    HeaderName::from_static("date"),
    HeaderName::from_static("x-api-version"),
];

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from(&self))).into_response()
    }
}

/// CORS policy applied to every route. Answers OPTIONS itself, so preflight
/// requests never reach a handler.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(ALLOWED_HEADERS)
}

pub fn build_router(relay: ChatRelay) -> Router {
    Router::new()
        .route(CHAT_PATH, post(chat_handler))
        .route(FUNCTION_PATH, post(chat_handler))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(relay)
}

fn body_rejection(rejection: BytesRejection) -> Error {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge(MAX_BODY_BYTES)
    } else {
        Error::InvalidRequest(rejection.body_text())
    }
}

async fn chat_handler(
    State(relay): State<ChatRelay>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<ChatResponse>> {
    let request = body
        .map_err(body_rejection)
        .and_then(|body| ChatRequest::from_body(&body))
        .map_err(|e| {
            tracing::warn!("Rejected chat request: {}", e);
            e
        })?;
    Ok(Json(relay.handle(&request).await?))
}

async fn health_check() -> &'static str {
    "ok"
}
