//! Error types for the Rackham story pipeline.
//!
//! Every error follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind and records where it was raised
//! - constructors use `#[track_caller]` so the location is captured automatically
//!
//! # Examples
//!
//! ```
//! use rackham_error::{ConfigError, RackhamResult};
//!
//! fn load() -> RackhamResult<()> {
//!     Err(ConfigError::new("scenes.min exceeds scenes.max"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod model;
mod pipeline;
mod storage;

pub use config::ConfigError;
pub use error::{RackhamError, RackhamErrorKind, RackhamResult};
pub use model::{ModelError, ModelErrorKind, ModelResult, RetryableError};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use storage::{StorageError, StorageErrorKind};
