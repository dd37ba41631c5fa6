//! Per-stage outcomes.

/// Why a stage's model output was not used.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RejectionReason {
    /// The client was unavailable before the stage began
    #[display("model unavailable")]
    ModelUnavailable,
    /// Every attempt failed transiently
    #[display("no response after retries")]
    NoResponse,
    /// The client reported a permanent failure
    #[display("model error: {}", _0)]
    ModelError(String),
    /// The response was empty or whitespace
    #[display("empty response")]
    EmptyResponse,
    /// Nothing in the response could be parsed
    #[display("no parseable records")]
    NoRecords,
    /// Too few records passed the quality gate
    #[display("{} accepted records, minimum is {}", accepted, minimum)]
    BelowMinimum {
        /// Records that passed
        accepted: usize,
        /// Configured minimum
        minimum: usize,
    },
}

/// Result of trying to use model output for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome<T> {
    /// Model output passed and is used as-is
    Accepted(T),
    /// Model output unusable; the stage falls back
    Rejected(RejectionReason),
}

impl<T> StageOutcome<T> {
    /// True for [`StageOutcome::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Map the accepted value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StageOutcome<U> {
        match self {
            Self::Accepted(value) => StageOutcome::Accepted(f(value)),
            Self::Rejected(reason) => StageOutcome::Rejected(reason),
        }
    }
}
