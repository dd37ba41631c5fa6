//! Trait definitions for the Rackham story pipeline.
//!
//! The pipeline talks to the model service only through [`StoryDriver`], so
//! any chat-completion backend (or a scripted test double) can stand behind it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::StoryDriver;
