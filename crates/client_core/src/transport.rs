use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{MotionSample, SessionEntry, SessionId},
    error::ApiError,
    protocol::{motion_route, ErrorResponse, FetchResponse, IngestRequest, IngestResponse},
};
use url::Url;

use crate::error::RelayError;

/// The two relay calls both loops depend on.
#[async_trait]
pub trait MotionRelay: Send + Sync {
    async fn ingest(
        &self,
        session: &SessionId,
        sample: &MotionSample,
    ) -> Result<IngestResponse, RelayError>;

    async fn fetch(&self, session: &SessionId) -> Result<Option<SessionEntry>, RelayError>;
}

pub struct HttpRelay {
    http: Client,
    motion_url: Url,
}

impl HttpRelay {
    pub fn new(server_url: &str) -> Result<Self, RelayError> {
        let mut base = Url::parse(server_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let motion_url = base.join(motion_route().trim_start_matches('/'))?;
        Ok(Self {
            http: Client::new(),
            motion_url,
        })
    }

    pub fn motion_url(&self) -> &Url {
        &self.motion_url
    }
}

#[async_trait]
impl MotionRelay for HttpRelay {
    async fn ingest(
        &self,
        session: &SessionId,
        sample: &MotionSample,
    ) -> Result<IngestResponse, RelayError> {
        let res = self
            .http
            .post(self.motion_url.clone())
            .json(&IngestRequest {
                session: session.clone(),
                sample: Some(*sample),
            })
            .send()
            .await?;
        decode(res).await
    }

    async fn fetch(&self, session: &SessionId) -> Result<Option<SessionEntry>, RelayError> {
        let mut url = self.motion_url.clone();
        url.query_pairs_mut().append_pair("session", session.as_str());
        let res = self.http.get(url).header("cache-control", "no-store").send().await?;
        let body: FetchResponse = decode(res).await?;
        Ok(body.entry)
    }
}

/// Reads a success body, or turns an error envelope into [`RelayError::Rejected`].
async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, RelayError> {
    if res.status().is_success() {
        return Ok(res.json().await?);
    }

    let status = res.status();
    let bytes = res.bytes().await?;
    match serde_json::from_slice::<ErrorResponse>(&bytes) {
        Ok(rejected) => Err(ApiError::from(rejected).into()),
        Err(_) => Err(RelayError::Unexpected(status.as_u16())),
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
