//! Finder core logic with no I/O dependencies

pub mod generation;
pub mod state;

pub use generation::RequestTracker;
pub use state::{FAVORITES_KEY, RecipeStateManager, SAVED_RECIPES_KEY};
