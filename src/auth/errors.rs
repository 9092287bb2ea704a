//! Identity provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Identity provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Login was denied by the user")]
    Denied,

    #[error("Login code expired before it was confirmed")]
    Expired,

    #[error("Identity provider error {code}: {description}")]
    Provider {
        code: String,
        description: String,
    },

    #[error("Failed to parse {context} response: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid identity provider URL: {0}")]
    InvalidUrl(String),
}
