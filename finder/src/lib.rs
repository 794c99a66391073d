//! Recipe finder library
//!
//! Searches recipes and a matching video through two remote APIs, and keeps
//! favorite queries and saved recipes in a session-scoped store. The state
//! manager, the remote services, the store and the presentation layer are
//! all injected so the controller can be driven by fakes.

pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;

// Re-export main types
pub use config::FinderConfig;
pub use controller::{Controller, FetchOutcome};
pub use crate::core::{RecipeStateManager, RequestTracker};
pub use error::{FinderError, FinderResult, StoreError};
pub use traits::*;
