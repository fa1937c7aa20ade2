//! HTTP surface of the inbox.
//!
//! One resource, `/inbox`:
//!
//! - `OPTIONS` advertises the write capability (`Allow`, `Accept-Post`).
//! - `GET` is 403 (the inbox is write-only) unless the manager is
//!   configured to expose an LDP listing of stored inbound ids.
//! - `POST` with `application/ld+json` runs the acceptance state machine;
//!   any other content type is 415.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{HeaderMap, HeaderName, ALLOW, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::domain::config::LD_JSON_CONTENT_TYPE;
use crate::service::NotificationManager;

/// `Accept-Post` response header (LDN capability discovery).
const ACCEPT_POST: HeaderName = HeaderName::from_static("accept-post");

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    manager: Arc<NotificationManager>,
}

/// Build the inbox router.
pub fn build_router(manager: Arc<NotificationManager>) -> Router {
    Router::new()
        .route(
            "/inbox",
            post(handle_post).get(handle_get).options(handle_options),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { manager })
}

async fn handle_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    // A trailing ';profile=...' is accepted and ignored (RFC 6906).
    if !content_type.starts_with(LD_JSON_CONTENT_TYPE) {
        debug!(
            content_type,
            "415 Unsupported Media Type: POST content type is not an accepted format"
        );
        return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
    }

    debug!("received a ld+json POST request");

    match state.manager.receive(&body) {
        Ok(_) => StatusCode::CREATED.into_response(),
        Err(e) => StatusCode::from_u16(e.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
    }
}

async fn handle_get(State(state): State<AppState>) -> Response {
    if !state.manager.config().expose_listing {
        return StatusCode::FORBIDDEN.into_response();
    }

    match state.manager.inbound_listing() {
        Ok(listing) => (
            StatusCode::OK,
            [(CONTENT_TYPE, LD_JSON_CONTENT_TYPE)],
            listing.to_string(),
        )
            .into_response(),
        Err(e) => StatusCode::from_u16(e.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
    }
}

async fn handle_options() -> Response {
    (
        StatusCode::OK,
        [(ALLOW, "POST, OPTIONS"), (ACCEPT_POST, LD_JSON_CONTENT_TYPE)],
    )
        .into_response()
}
