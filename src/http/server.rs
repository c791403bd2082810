//! HTTP server setup and the webhook endpoint.
//!
//! # Responsibilities
//! - Create the Axum router and wire up middleware (tracing, request ID)
//! - Accept a delivery on any path, read the event header and body
//! - Hand the delivery to the dispatcher
//! - Always answer 200 OK; routing outcomes are visible in logs/metrics only
//!
//! # Design Decisions
//! - No request timeout layer: commands run to completion inside the
//!   handler, and a deploy script may legitimately take minutes
//! - A body that cannot be read ends the delivery with a log entry, not an
//!   error response; the listener keeps serving

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, StatusCode},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::dispatch::dispatcher::Dispatcher;
use crate::observability::metrics;

/// Deliveries larger than this are cut off while reading the body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Event-type headers, in preference order. Gitea sends both; Gogs only
/// the latter.
const EVENT_HEADERS: [&str; 2] = ["x-gitea-event", "x-gogs-event"];

/// Application state injected into the handler.
#[derive(Clone)]
struct AppState {
    dispatcher: Arc<Dispatcher>,
}

/// HTTP server for the webhook listener.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        let state = AppState { dispatcher };

        let router = Router::new()
            .route("/", any(hook_handler))
            .route("/{*path}", any(hook_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        Self { router }
    }

    /// Serve until the shutdown signal fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "webhook listener starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("shutdown signal received");
            })
            .await?;

        tracing::info!("webhook listener stopped");
        Ok(())
    }
}

/// The single webhook endpoint. Any path, any method; the event header and
/// the payload decide everything else.
async fn hook_handler(
    State(state): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> StatusCode {
    metrics::record_request();

    let event = event_kind(request.headers());
    tracing::debug!(
        remote = %remote,
        method = %request.method(),
        path = %request.uri().path(),
        event = event.as_deref().unwrap_or(""),
        "incoming webhook delivery"
    );

    let body = match axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(remote = %remote, error = %e, "failed to read request body");
            return StatusCode::OK;
        }
    };

    state.dispatcher.dispatch(event.as_deref(), &body).await;

    StatusCode::OK
}

/// First recognized event-type header value, if any.
fn event_kind(headers: &HeaderMap) -> Option<String> {
    EVENT_HEADERS.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    })
}
