//! Test utilities for Rackham pipeline tests.

#![allow(dead_code)]

pub mod fixtures;
pub mod memory_store;
pub mod mock_driver;

#[allow(unused_imports)]
pub use fixtures::*;
pub use memory_store::MemoryStore;
#[allow(unused_imports)]
pub use mock_driver::{MockDriver, MockResponse};
