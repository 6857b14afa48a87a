use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, RawQuery, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use relay_store::SessionStore;
use server_api::{fetch_motion, ingest_motion, issue_pairing, RelayContext, SessionQuery};
use shared::{
    error::ApiError,
    protocol::{
        motion_route, pairing_route, ErrorResponse, FetchResponse, IngestResponse,
        PairingResponse,
    },
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Clone)]
struct AppState {
    relay: RelayContext,
}

type Rejection = (StatusCode, Json<ErrorResponse>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let pairing_base = settings.pairing_base()?;
    let relay = RelayContext::new(SessionStore::new(), pairing_base);
    let app = build_router(Arc::new(AppState { relay }), settings.max_body_bytes);

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "motion relay listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(motion_route(), get(http_fetch_motion).post(http_ingest_motion))
        .route(pairing_route(), get(http_pairing))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_ingest_motion(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<IngestResponse>, Rejection> {
    let ack = ingest_motion(&state.relay, &body).await.map_err(reject)?;
    Ok(Json(ack))
}

async fn http_fetch_motion(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<FetchResponse>, Rejection> {
    let q = SessionQuery::from_raw(raw.as_deref());
    let fetched = fetch_motion(&state.relay, &q).await.map_err(reject)?;
    Ok(Json(fetched))
}

async fn http_pairing(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Json<PairingResponse> {
    let q = SessionQuery::from_raw(raw.as_deref());
    Json(issue_pairing(&state.relay, &q))
}

fn reject(error: ApiError) -> Rejection {
    warn!(code = ?error.code, message = %error.message, "rejected motion request");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(error)))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
