//! Pipeline error types.

/// Fatal pipeline conditions.
///
/// Everything recoverable (bad model output, unavailable service) is handled
/// inside the pipeline by fallback synthesis and never surfaces here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Story text shorter than the configured minimum
    #[display("Story too short: {} characters, minimum is {}", length, minimum)]
    StoryTooShort {
        /// Trimmed story length in characters
        length: usize,
        /// Configured minimum
        minimum: usize,
    },
    /// Story text longer than the configured maximum
    #[display("Story too long: {} characters, maximum is {}", length, maximum)]
    StoryTooLong {
        /// Story length in characters
        length: usize,
        /// Configured maximum
        maximum: usize,
    },
    /// Required input text not found in the store
    #[display("Required input file not found: {}", _0)]
    MissingInput(String),
    /// Query template could not be prepared
    #[display("Template error: {}", _0)]
    Template(String),
}

/// Pipeline error with location tracking.
///
/// # Examples
///
/// ```
/// use rackham_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::StoryTooShort { length: 99, minimum: 100 });
/// assert!(format!("{}", err).contains("99 characters"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The kind of error that occurred
    pub kind: PipelineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
