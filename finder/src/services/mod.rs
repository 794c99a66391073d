//! Finder service implementations

pub mod recipe_client;
pub mod session_store;
pub mod terminal_view;
pub mod video_client;

#[cfg(test)]
pub mod tests;

pub use recipe_client::*;
pub use session_store::*;
pub use terminal_view::*;
pub use video_client::*;
