use reqwest::StatusCode;

/// Client error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input rejected before any remote call
    #[error("Validation error: {0}")]
    Validation(String),
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
    /// HTTP client could not be built or the initial token exchange failed
    #[error("Connection error: {0}")]
    Connection(String),
    /// Token endpoint failure after construction
    #[error("Token error: {0}")]
    Token(String),
    /// Transport error (preserves reqwest::Error for status/timeout inspection)
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success response from the accounts-management API
    #[error("Upstream error ({status}): {reason}")]
    Upstream {
        status: StatusCode,
        code: Option<String>,
        reason: String,
    },
    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
    /// Lookup returned no matching record
    #[error("Not found: {0}")]
    NotFound(String),
    /// Operation exists in the contract but has no backing implementation yet
    #[error("Not implemented: {0}")]
    Unimplemented(&'static str),
    /// Tracing subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable machine-readable name for the error variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Config(_) => "config_error",
            Self::Connection(_) => "connection_error",
            Self::Token(_) => "token_error",
            Self::Http(_) => "http_request_error",
            Self::Upstream { .. } => "upstream_error",
            Self::Decode(_) => "decode_error",
            Self::NotFound(_) => "not_found",
            Self::Unimplemented(_) => "unimplemented",
            Self::Logging(_) => "logging_error",
        }
    }

    /// HTTP status of the failed remote call, if there was one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            _ => self.status() == Some(StatusCode::NOT_FOUND),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
