use thiserror::Error;

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("insight API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("insight API response had no message content")]
    EmptyResponse,

    #[error("insight provider is not configured")]
    Unavailable,
}
