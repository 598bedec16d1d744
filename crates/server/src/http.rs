//! HTTP surface: a JSON view API plus the embedded single-page shell.
//!
//! Handlers never touch dashboard state; they read the latest published
//! [`ViewSet`] from a `watch` receiver and serialize it.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderValue, Request, StatusCode, Uri},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use guard_core::{GuardError, Page, Result};
use guard_renderer::PageView;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::debug;

use crate::views::ViewSet;

/// Browser shell; fetches `/api/view` on every refresh interval.
const SHELL: &str = include_str!("../assets/index.html");

#[derive(Clone)]
pub struct AppState {
    views:      watch::Receiver<Arc<ViewSet>>,
    refresh_ms: u64,
}

impl AppState {
    pub fn new(views: watch::Receiver<Arc<ViewSet>>, refresh_ms: u64) -> Self {
        Self { views, refresh_ms }
    }

    fn current(&self) -> Arc<ViewSet> {
        self.views.borrow().clone()
    }
}

#[derive(Debug, Deserialize)]
struct ViewQuery {
    #[serde(default)]
    path: String,
}

#[derive(Serialize)]
struct ViewResponse<'a> {
    /// How often the shell should poll again.
    refresh_ms: u64,
    view:       &'a PageView,
}

#[derive(Serialize)]
struct ApiError {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/view", get(view_handler))
        .route("/api/tracks/:id", get(track_handler))
        .fallback(shell_handler)
        .layer(middleware::from_fn(security_headers))
        .with_state(state)
}

pub async fn bind(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| GuardError::Server(format!("cannot bind {addr}: {e}")))
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| GuardError::Server(format!("HTTP server stopped: {e}")))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn view_handler(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Response {
    let page = Page::route(&query.path);
    debug!(path = %query.path, page = page.kind(), "View requested");

    let view = state.current().view(&page);
    let status = if page.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    let body = ViewResponse {
        refresh_ms: state.refresh_ms,
        view:       &view,
    };
    (status, Json(body)).into_response()
}

async fn track_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.current().track(&id) {
        Some(table) => Json(table).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: format!("no tracking data for '{id}'"),
            }),
        )
            .into_response(),
    }
}

/// Every non-API path gets the shell, with 404 for paths no page claims.
async fn shell_handler(uri: Uri) -> Response {
    let status = if Page::route(uri.path()).is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (
        status,
        [(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")],
        Html(SHELL),
    )
        .into_response()
}

// ── Middleware ────────────────────────────────────────────────────────────────

async fn security_headers(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    // Media comes straight from the tracker host, so img/media allow any origin.
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(
            "default-src 'self'; \
             script-src 'self' 'unsafe-inline'; \
             style-src 'self' 'unsafe-inline'; \
             img-src 'self' data: http: https:; \
             media-src 'self' blob: http: https:; \
             connect-src 'self'; \
             frame-ancestors 'none'",
        ),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_conflict_is_a_server_error() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap().to_string();

        let err = bind(&addr).await.unwrap_err();
        assert!(matches!(&err, GuardError::Server(msg) if msg.contains(&addr)), "{err}");
    }

    #[tokio::test]
    async fn bind_free_port() {
        let listener = bind("127.0.0.1:0").await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[test]
    fn shell_draws_drilldown_from_the_view() {
        assert!(SHELL.contains("view.drilldown[selectedTrack]"));
        assert!(!SHELL.contains("/api/tracks"));
    }
}
