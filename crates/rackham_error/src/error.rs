//! Top-level error wrapper types.

use crate::{ConfigError, ModelError, PipelineError, StorageError};

/// Every error a Rackham operation can surface.
///
/// # Examples
///
/// ```
/// use rackham_error::{ConfigError, RackhamError};
///
/// let err: RackhamError = ConfigError::new("bad marker").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RackhamErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Model service error
    #[from(ModelError)]
    Model(ModelError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Rackham error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Rackham Error: {}", _0)]
pub struct RackhamError(Box<RackhamErrorKind>);

impl RackhamError {
    /// Create a new error from a kind.
    pub fn new(kind: RackhamErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RackhamErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to RackhamErrorKind
impl<T> From<T> for RackhamError
where
    T: Into<RackhamErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Rackham operations.
pub type RackhamResult<T> = std::result::Result<T, RackhamError>;
