use serde::{Deserialize, Serialize};

use crate::{
    domain::{MotionSample, SessionEntry, SessionId},
    error::{ApiError, ErrorCode},
};

pub fn motion_route() -> &'static str {
    "/motion"
}

pub fn pairing_route() -> &'static str {
    "/pairing"
}

/// Body of `POST /motion` as sent by a phone producer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    pub session: SessionId,
    pub sample: Option<MotionSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestResponse {
    pub ok: bool,
    pub seq: u64,
    pub t: i64,
}

impl IngestResponse {
    pub fn new(seq: u64, t: i64) -> Self {
        Self { ok: true, seq, t }
    }
}

/// Reply to `GET /motion`. A `None` entry is a successful "nothing yet".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    pub ok: bool,
    pub entry: Option<SessionEntry>,
}

impl FetchResponse {
    pub fn new(entry: Option<SessionEntry>) -> Self {
        Self { ok: true, entry }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingResponse {
    pub ok: bool,
    pub session: SessionId,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    pub code: ErrorCode,
}

impl From<ApiError> for ErrorResponse {
    fn from(value: ApiError) -> Self {
        Self {
            ok: false,
            error: value.message,
            code: value.code,
        }
    }
}

impl From<ErrorResponse> for ApiError {
    fn from(value: ErrorResponse) -> Self {
        ApiError::new(value.code, value.error)
    }
}
