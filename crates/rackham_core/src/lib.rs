//! Core data types for the Rackham story pipeline.
//!
//! This crate holds the entities every stage produces (characters, scenes,
//! narration, image prompts), the field vocabulary used to parse them, and
//! the request/response types exchanged with the model service.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod character;
mod field;
mod message;
mod prompt;
mod record;
mod request;
mod result;
mod role;
mod scene;
mod stats;
mod story;

pub use character::Character;
pub use field::{CharacterField, EntityField, PromptField, SceneField};
pub use message::Message;
pub use prompt::ImagePrompt;
pub use record::{Entity, FieldRecord};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use result::ProcessingResult;
pub use role::Role;
pub use scene::Scene;
pub use stats::{ProcessingMethod, ProcessingStats, Stage, StageReport, word_count};
pub use story::{Story, TitleRule};
