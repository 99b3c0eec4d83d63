//! Error type shared by every operation that talks to the scheduler backend.

use thiserror::Error;

/// Failure of a board or session operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    /// The request never produced a response (fetch rejected, offline, CORS)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("Server error {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Page {page} is outside the served window 0..={max}")]
    PageOutOfRange { page: u32, max: u32 },

    #[error("Timezone offset {0} exceeds 720 minutes")]
    InvalidTimezoneOffset(i32),

    /// The submission would be rejected by the server
    #[error("Invalid availability request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type BoardResult<T> = Result<T, BoardError>;
