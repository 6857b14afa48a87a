use relay_store::{SessionStore, StoreError};
use serde::Deserialize;
use serde_json::Value;
use shared::{
    domain::{MotionSample, SessionId},
    error::ApiError,
    pairing::pairing_link,
    protocol::{FetchResponse, IngestResponse, PairingResponse},
};
use tracing::debug;
use url::Url;

#[derive(Clone)]
pub struct RelayContext {
    pub store: SessionStore,
    /// Origin and path the phone page is served from.
    pub pairing_base: Url,
}

impl RelayContext {
    pub fn new(store: SessionStore, pairing_base: Url) -> Self {
        Self {
            store,
            pairing_base,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    pub session: Option<String>,
}

impl SessionQuery {
    /// Reads `session` from a raw query string. The first occurrence wins
    /// and unrelated or repeated parameters are ignored.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let session = raw.and_then(|raw| {
            url::form_urlencoded::parse(raw.as_bytes())
                .find(|(key, _)| key == "session")
                .map(|(_, value)| value.into_owned())
        });
        Self { session }
    }
}

/// Handles a raw `POST /motion` body.
///
/// Unparseable JSON and a `sample` of the wrong shape are malformed requests;
/// a body whose `session` is not a non-empty string is an invalid session.
pub async fn ingest_motion(ctx: &RelayContext, body: &[u8]) -> Result<IngestResponse, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::malformed(format!("Invalid JSON: {e}")))?;

    let session = value
        .get("session")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if session.is_empty() {
        return Err(ApiError::invalid_session());
    }

    let sample = match value.get("sample") {
        None | Some(Value::Null) => None,
        Some(raw) => Some(
            MotionSample::deserialize(raw)
                .map_err(|e| ApiError::malformed(format!("Invalid sample: {e}")))?,
        ),
    };

    let receipt = ctx.store.ingest(session, sample).await.map_err(store_error)?;
    Ok(IngestResponse::new(receipt.sequence, receipt.arrived_at_ms))
}

pub async fn fetch_motion(ctx: &RelayContext, query: &SessionQuery) -> Result<FetchResponse, ApiError> {
    let session = query.session.as_deref().unwrap_or_default();
    let entry = ctx.store.fetch(session).await.map_err(store_error)?;
    Ok(FetchResponse::new(entry))
}

/// Issues the link a phone should open, minting a session id when none is given.
pub fn issue_pairing(ctx: &RelayContext, query: &SessionQuery) -> PairingResponse {
    let session = query
        .session
        .as_deref()
        .and_then(SessionId::parse)
        .unwrap_or_else(SessionId::generate);
    let url = pairing_link(&ctx.pairing_base, &session);
    debug!(%session, %url, "issued pairing link");
    PairingResponse {
        ok: true,
        session,
        url: url.into(),
    }
}

fn store_error(error: StoreError) -> ApiError {
    match error {
        StoreError::InvalidSession => ApiError::invalid_session(),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
