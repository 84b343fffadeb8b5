//! Serverless-function adapter.
//!
//! Function platforms hand the relay an event carrying the HTTP method and a
//! raw string body, and expect a `{statusCode, headers, body}` object back.
//! This module translates between that shape and [`ChatRelay`].

use crate::models::{ChatRequest, ErrorBody};
use crate::relay::ChatRelay;
use crate::server::{ALLOWED_HEADERS, ALLOWED_METHODS};
use axum::http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl FunctionResponse {
    fn new(status: StatusCode, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        Self {
            status_code: status.as_u16(),
            headers,
            body,
        }
    }

    fn json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        // Serializing plain string structs cannot fail.
        let body = serde_json::to_string(value).unwrap_or_default();
        let mut response = Self::new(status, body);
        response
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        response
    }

    fn preflight() -> Self {
        let mut response = Self::new(StatusCode::OK, String::new());
        response.headers.insert(
            "Access-Control-Allow-Methods".to_string(),
            header_list(ALLOWED_METHODS.iter().map(Method::as_str)),
        );
        response.headers.insert(
            "Access-Control-Allow-Headers".to_string(),
            header_list(ALLOWED_HEADERS.iter().map(|h| h.as_str())),
        );
        response
    }
}

fn header_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

/// Handle one function invocation.
pub async fn handle_event(relay: &ChatRelay, event: &FunctionEvent) -> FunctionResponse {
    let method = event.http_method.to_ascii_uppercase();

    if method == Method::OPTIONS.as_str() {
        return FunctionResponse::preflight();
    }

    if method != Method::POST.as_str() {
        return FunctionResponse::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
        );
    }

    let body = event.body.as_deref().unwrap_or_default();
    let result = match ChatRequest::from_body(body.as_bytes()) {
        Ok(request) => relay.handle(&request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => FunctionResponse::json(StatusCode::OK, &response),
        Err(e) => FunctionResponse::json(e.status_code(), &ErrorBody::from(&e)),
    }
}
