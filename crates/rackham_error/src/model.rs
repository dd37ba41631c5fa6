//! Model service error types and retry classification.

/// Conditions raised while talking to the model service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ModelErrorKind {
    /// API key not found in environment
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Connection could not be established or was reset
    #[display("Transport error: {}", _0)]
    Transport(String),
    /// Request exceeded the configured timeout
    #[display("Request timed out: {}", _0)]
    Timeout(String),
    /// Response body could not be decoded
    #[display("Invalid response: {}", _0)]
    InvalidResponse(String),
    /// Response decoded but carried no text
    #[display("Model returned an empty response")]
    EmptyResponse,
    /// Request could not be assembled
    #[display("Failed to build request: {}", _0)]
    Builder(String),
}

impl ModelErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelErrorKind::Http { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            ModelErrorKind::Transport(_) => true,
            ModelErrorKind::Timeout(_) => true,
            ModelErrorKind::InvalidResponse(_) => true,
            ModelErrorKind::EmptyResponse => true,
            ModelErrorKind::MissingApiKey(_) | ModelErrorKind::Builder(_) => false,
        }
    }
}

/// Model service error with source location tracking.
///
/// # Examples
///
/// ```
/// use rackham_error::{ModelError, ModelErrorKind};
///
/// let err = ModelError::new(ModelErrorKind::MissingApiKey("DEEPSEEK_API_KEY".to_string()));
/// assert!(format!("{}", err).contains("DEEPSEEK_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Model Error: {} at line {} in {}", kind, line, file)]
pub struct ModelError {
    /// The kind of error that occurred
    pub kind: ModelErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ModelError {
    /// Create a new ModelError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ModelErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for model driver calls.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Trait for errors that support retry logic.
///
/// Transient failures (connection resets, timeouts, garbled bodies, 429 and
/// 5xx responses) report `true`. Permanent failures such as 400 or 401 report `false` and
/// must not be retried.
///
/// # Examples
///
/// ```
/// use rackham_error::{ModelError, ModelErrorKind, RetryableError};
///
/// let busy = ModelError::new(ModelErrorKind::Http {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
/// assert!(busy.is_retryable());
///
/// let denied = ModelError::new(ModelErrorKind::Http {
///     status_code: 401,
///     message: "Unauthorized".to_string(),
/// });
/// assert!(!denied.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for ModelError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
