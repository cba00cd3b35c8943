use thiserror::Error;

/// A remote call that could not complete, as opposed to one the backend
/// answered with an error.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}
