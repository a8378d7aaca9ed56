//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;

/// Bodies longer than this many bytes are truncated in the info level logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body, in bytes, the middleware will buffer. Matches
/// axum's default body limit for extractors.
pub const MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Requests with a body larger than [MAX_REQUEST_BODY_SIZE] are rejected with
/// `413 Payload Too Large` before the body is fully read.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match read_body(body, MAX_REQUEST_BODY_SIZE).await {
        Ok(bytes) => bytes,
        Err(error) if is_length_limit_error(&error) => {
            tracing::warn!(
                "rejected {} {}: body exceeds {MAX_REQUEST_BODY_SIZE} bytes",
                parts.method,
                parts.uri
            );
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };
    log_request(&parts, &String::from_utf8_lossy(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match read_body(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, limit)
        .await
        .inspect_err(|error| tracing::error!("could not read body for logging: {error}"))
}

fn is_length_limit_error(error: &axum::Error) -> bool {
    std::iter::successors(std::error::Error::source(error), |source| source.source())
        .any(|source| source.is::<LengthLimitError>())
}

/// The longest prefix of `body` that fits in [LOG_BODY_LENGTH_LIMIT] bytes
/// without splitting a character.
fn truncate(body: &str) -> &str {
    let end = body
        .char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(body.len()))
        .take_while(|&index| index <= LOG_BODY_LENGTH_LIMIT)
        .last()
        .unwrap_or(0);

    &body[..end]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    let (method, uri) = (&parts.method, &parts.uri);

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!("Received request: {method} {uri}\nbody: {}...", truncate(body));
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {method} {uri}\nbody: {body:?}");
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    let status = parts.status;

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!("Sending response: {status}\nbody: {}...", truncate(body));
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {status}\nbody: {body:?}");
    }
}
