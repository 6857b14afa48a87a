use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid relay url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("relay request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("relay rejected request ({code:?}): {message}")]
    Rejected { code: ErrorCode, message: String },
    #[error("relay answered with unexpected status {0}")]
    Unexpected(u16),
}

impl From<ApiError> for RelayError {
    fn from(value: ApiError) -> Self {
        RelayError::Rejected {
            code: value.code,
            message: value.message,
        }
    }
}
