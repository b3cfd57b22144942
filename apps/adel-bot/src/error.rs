use thiserror::Error;

/// Failure talking to the reseller API. Always recovered per update.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Body was not JSON at all.
    #[error("undecodable response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("reseller reported success=false")]
    Rejected,
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if let Some(status) = e.status() {
            UpstreamError::Status(status.as_u16())
        } else if e.is_decode() {
            UpstreamError::Body(e)
        } else {
            UpstreamError::Transport(e)
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    /// Well-formed listing with nothing in it.
    #[error("nothing found")]
    EmptyResult,
    #[error("invalid input: {0}")]
    Validation(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
