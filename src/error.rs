use thiserror::Error;

/// Main error type for castchain
#[derive(Error, Debug)]
pub enum CastchainError {
    /// The SPARQL endpoint answered with a non-success status
    #[error("Oracle error {status}: {body}")]
    Oracle {
        status: u16,
        body: String,
    },

    /// Network-level failure talking to the endpoint
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response or row could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for CastchainError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CastchainError::Decode(err.to_string())
        } else {
            CastchainError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CastchainError {
    fn from(err: serde_json::Error) -> Self {
        CastchainError::Decode(err.to_string())
    }
}

/// Convenient Result type using CastchainError
pub type Result<T> = std::result::Result<T, CastchainError>;
