//! HTTP server setup and handlers.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Dispatch redirect lookups through the chain
//! - Serve the admin API (status, config dump, runtime registration)
//!
//! # Design Decisions
//! - Looked-up destinations use 303 See Other; the catch-all answers every
//!   unmatched request with a 301 back to `/`
//! - Registration parses the body by hand so malformed JSON is a clean 400
//! - A wrong method on the registration route is a 400 as well, same as any
//!   other non-conforming registration

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderName, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::format::Format;
use crate::config::mapping::RedirectRequest;
use crate::config::schema::ServerConfig;
use crate::http::request::{MakeUuidRequestId, X_REQUEST_ID};
use crate::observability::metrics;
use crate::routing::chain::{Dispatch, DispatchChain};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<DispatchChain>,
}

/// HTTP server for the redirect service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over a built dispatch chain.
    pub fn new(config: ServerConfig, chain: DispatchChain) -> Self {
        let state = AppState {
            chain: Arc::new(chain),
        };
        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/status", get(get_status))
            .route(
                "/api/config/add",
                post(add_redirect).fallback(wrong_method),
            )
            .route("/api/config/{format}", get(dump_config))
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                X_REQUEST_ID,
            )))
            .layer(SetRequestIdLayer::new(
                HeaderName::from_static(X_REQUEST_ID),
                MakeUuidRequestId,
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Serialize)]
struct SystemStatus {
    version: &'static str,
    status: &'static str,
}

async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

/// Fallback handler: resolve the path through the dispatch chain.
async fn dispatch_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();

    match state.chain.dispatch(path).await {
        Dispatch::Redirect { target, namespace } => {
            tracing::debug!(path = %path, target = %target, namespace = %namespace, "Redirecting");
            metrics::record_redirect(&namespace);
            Redirect::to(&target).into_response()
        }
        Dispatch::Fallthrough => {
            tracing::debug!(path = %path, "No mapping entry, falling through to catch-all");
            metrics::record_fallthrough();
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/")]).into_response()
        }
    }
}

/// `GET /api/config/{format}`: JSON dump of the live mapping for a format.
async fn dump_config(State(state): State<AppState>, Path(format): Path<String>) -> Response {
    let format: Format = match format.parse() {
        Ok(format) => format,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    };

    match state.chain.snapshot(format).await {
        Some(mapping) => Json(mapping).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("no mapping loaded for {format}") })),
        )
            .into_response(),
    }
}

/// `POST /api/config/add`: validate and merge a redirect into the live
/// mappings. 201 on success, 400 on malformed body or failed validation.
async fn add_redirect(State(state): State<AppState>, body: Bytes) -> Response {
    let request: RedirectRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed registration body");
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": format!("malformed body: {e}") })),
            )
                .into_response();
        }
    };

    match state.chain.register(&request).await {
        Ok(()) => {
            tracing::info!(path = %request.path, url = %request.url, "Redirect registered");
            metrics::record_registration();
            (
                StatusCode::CREATED,
                Json(serde_json::json!({ "status": "created", "path": request.path })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rejected registration");
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Method fallback for the registration route: anything but POST is a
/// client error, not a 405.
async fn wrong_method() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": "registration requires POST" })),
    )
        .into_response()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
