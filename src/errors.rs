use std::fmt;

/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    Config(String),
    Network(String),
    Timeout(String),
    /// The server answered 401; the local session has already been cleared.
    Unauthorized,
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
    /// Local precondition failure; no request was attempted.
    NotAuthenticated,
}

impl fmt::Display for ApiError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(message) => write!(formatter, "Config error: {message}"),
            ApiError::Network(message) => write!(formatter, "Network error: {message}"),
            ApiError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            ApiError::Unauthorized => write!(formatter, "Unauthorized: session expired"),
            ApiError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            ApiError::Parse(message) => write!(formatter, "Response error: {message}"),
            ApiError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
            ApiError::NotAuthenticated => write!(formatter, "Not authenticated"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Trims and truncates HTTP error bodies before they reach callers.
pub(crate) fn sanitize_body(body: String) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
