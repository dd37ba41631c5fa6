//! Text content storage for Rackham.
//!
//! Inputs (story, query templates, framework templates, style guides) and the
//! rendered artifacts are addressed by `/`-separated logical paths relative to
//! a store root, e.g. `(in)/ai_queries/scene_queries.txt`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod storage;

pub use filesystem::FileSystemStore;
pub use storage::ContentStore;
