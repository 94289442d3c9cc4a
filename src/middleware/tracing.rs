//! Request tracing middleware

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::Instrument;

static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");
static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Middleware for logging request information with timing
///
/// Every request runs inside a `request` span carrying a request id. An
/// incoming `x-request-id` is reused, otherwise a process-local counter value
/// is assigned. The id is echoed on the response.
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let client_ip = client_ip(&request);

    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed).to_string());

    let span = tracing::info_span!("request", request_id = %request_id);
    let start = Instant::now();

    let mut response = async move {
        tracing::info!(
            method = %method,
            path = %path,
            client_ip = ?client_ip,
            "Request started"
        );

        let response = next.run(request).await;
        let status = response.status().as_u16();
        let duration_ms = start.elapsed().as_millis() as u64;

        match status {
            500..=u16::MAX => tracing::error!(
                method = %method,
                path = %path,
                status,
                duration_ms,
                "Request completed with error"
            ),
            400..=499 => tracing::warn!(
                method = %method,
                path = %path,
                status,
                duration_ms,
                "Request completed with client error"
            ),
            _ => tracing::info!(
                method = %method,
                path = %path,
                status,
                duration_ms,
                "Request completed"
            ),
        }

        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }

    response
}

/// First hop of `x-forwarded-for`, falling back to `x-real-ip`
fn client_ip(request: &Request) -> Option<String> {
    let headers = request.headers();
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.to_string())
        })
}
