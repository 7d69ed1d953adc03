//! Access log: one event per request, levelled by outcome.

use std::time::Instant;

use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, info, warn};

/// Emits an access-log event after the response is produced.
///
/// Server errors log at `error`, gate rejections (`401`/`403`) at `warn`,
/// everything else at `info`. Only the presence of a bearer header is
/// recorded, never its value.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let bearer = request.headers().contains_key(header::AUTHORIZATION);
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let code = status.as_u16();

    if status.is_server_error() {
        error!(%method, %path, status = code, elapsed_ms, bearer, "Request failed");
    } else if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        warn!(%method, %path, status = code, elapsed_ms, bearer, "Request rejected");
    } else {
        info!(%method, %path, status = code, elapsed_ms, bearer, "Request served");
    }

    response
}
