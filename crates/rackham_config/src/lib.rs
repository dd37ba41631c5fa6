//! Typed configuration for the Rackham story pipeline.
//!
//! Configuration is layered with the `config` crate:
//! - Bundled defaults (`rackham.toml` compiled into the binary)
//! - `~/.config/rackham/rackham.toml`
//! - `./rackham.toml`
//!
//! Later sources override earlier ones. Every load ends with
//! [`RackhamConfig::validate`], so a bad range or marker table fails at
//! startup rather than mid-run.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod layout;
mod model;
mod rackham;
mod rules;

pub use layout::{InputKey, LayoutConfig, OutputNames};
pub use model::{ModelConfig, RetryConfig};
pub use rackham::RackhamConfig;
pub use rules::{EntityRules, FieldMarker, ImagePromptRules, NarrationRules, StoryRules};
