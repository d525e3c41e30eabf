//! Error types for the APA stats site

use thiserror::Error;


pub type Result<T> = std::result::Result<T, ApaError>;

#[derive(Error, Debug)]
pub enum ApaError {
    #[error("Configuration missing: {env_var} environment variable not set")]
    Configuration { env_var: String },

    #[error("Authentication with APA failed: {message}")]
    Authentication { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("APA API returned {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GraphQL error: {message}")]
    GraphQl { message: String },

    #[error("APA API returned no data")]
    NoData,

    #[error("Invalid identifier: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Identifier {id} is out of range")]
    IdOutOfRange { id: u32 },

    #[error("Invalid week: {week}")]
    InvalidWeek { week: u16 },
}

impl ApaError {
    /// True when the upstream refused our access token.
    ///
    /// The session drops its cached token on this so the next request refreshes.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApaError::Status { status: 401, .. })
    }

    /// True for failures talking to the APA API (transport, status, body).
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            ApaError::Http(_)
                | ApaError::Status { .. }
                | ApaError::Json(_)
                | ApaError::GraphQl { .. }
        )
    }

    /// True when the caller sent a malformed path or query parameter.
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            ApaError::InvalidId(_) | ApaError::IdOutOfRange { .. } | ApaError::InvalidWeek { .. }
        )
    }
}
