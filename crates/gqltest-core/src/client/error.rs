use thiserror::Error;

/// Errors that can occur while talking to the GraphQL endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid header format: '{0}' (expected 'Key: Value')")]
    InvalidHeader(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network(err.to_string())
    }
}
