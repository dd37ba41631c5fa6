//! Output rendering for Rackham.
//!
//! [`TemplateEngine`] turns a [`rackham_core::ProcessingResult`] into six
//! plain-text artifacts: the story, the narration script, character
//! sheets, the scene breakdown, image prompts and a processing report.
//! Rendering is pure string formatting and cannot fail.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod visual;

pub use engine::{RenderedFile, TemplateEngine};
pub use visual::{SceneVisuals, key_elements};
