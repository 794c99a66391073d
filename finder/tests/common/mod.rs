//! Common test utilities for finder integration tests

#![allow(dead_code)] // Not every test binary uses every helper

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
