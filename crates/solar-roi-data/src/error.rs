use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Missing or rejected credentials: {0}")]
    Credentials(String),

    #[error("Unexpected payload: {0}")]
    Decode(String),

    #[error("No data available: {0}")]
    Unavailable(String),
}
