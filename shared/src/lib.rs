//! Shared types for the recipe finder
//!
//! Contains the domain records that cross component boundaries: recipes as
//! returned by the search API, video embeds, view identifiers and the
//! failure kinds reported by remote services.

pub mod types;
pub mod errors;
pub mod logging;

pub use types::*;
pub use errors::*;
