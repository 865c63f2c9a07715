use thiserror::Error;

pub type Result<T> = std::result::Result<T, WpError>;

#[derive(Debug, Error)]
pub enum WpError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for WpError {
    fn from(err: reqwest::Error) -> Self {
        WpError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for WpError {
    fn from(err: serde_json::Error) -> Self {
        WpError::Parse(err.to_string())
    }
}
