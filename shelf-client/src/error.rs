use shelf_core::MapperError;
use thiserror::Error;

/// Failures of a single API call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The call needs a bearer token and none was available.
    #[error("missing authorization: log in before calling this endpoint")]
    MissingAuthorization,

    /// The server answered with a non-success status.
    #[error("server responded with status {0}")]
    UnexpectedStatus(u16),

    #[error(transparent)]
    Mapper(#[from] MapperError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response body is not JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A response envelope lacked the key holding its payload.
    #[error("response is missing '{0}'")]
    MissingField(&'static str),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    /// Whether the server rejected the credentials or token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::UnexpectedStatus(401 | 403))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
