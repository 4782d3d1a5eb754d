use thiserror::Error;

/// All possible error types that may occur while talking to the backend or handling form input
#[derive(Error, Debug)]
pub enum CpError {
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Network error. {0}")]
    Network(String),
    #[error("JSON error\n{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Validation(String),
    #[error("You must be signed in to submit the form")]
    NotAuthenticated,
    #[error("Invalid configuration. {0}")]
    Config(&'static str),
    #[error("{0}")]
    Generic(String),
}

impl CpError {
    /// Message shown to the user for this error. Backend errors that carry no message of their
    /// own are replaced with the `fallback` text.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } if message.trim().is_empty() => fallback.to_owned(),
            Self::Generic(message) if message.trim().is_empty() => fallback.to_owned(),
            _ => self.to_string(),
        }
    }
}

impl From<&str> for CpError {
    fn from(value: &str) -> Self {
        Self::Generic(value.to_owned())
    }
}

impl From<String> for CpError {
    fn from(value: String) -> Self {
        Self::Generic(value)
    }
}

/// Generic [Result][std::result::Result] type where the error is always [CpError]
pub type CpResult<T> = std::result::Result<T, CpError>;
