use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong in a catalog action. The first three
/// variants are all the same thing to the user ("request failed"); they
/// stay separate so the log line says what actually happened.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("request could not be sent: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CatalogError {
    pub fn is_request_failure(&self) -> bool {
        !matches!(self, CatalogError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
