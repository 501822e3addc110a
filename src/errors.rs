// errors.rs
use astra::Response;
use thiserror::Error;

/// Errors a route handler can hand back to the server loop.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("No listing found: {0}")]
    Exhausted(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::Exhausted(_) => 503,
            ServerError::Internal(_) => 500,
        }
    }
}

impl From<crate::listings::Exhausted> for ServerError {
    fn from(e: crate::listings::Exhausted) -> Self {
        ServerError::Exhausted(e.to_string())
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
