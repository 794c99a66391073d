//! Finder trait definitions for dependency injection
//!
//! Every I/O boundary (session storage, the two remote APIs and the
//! presentation layer) sits behind one of these traits so the state manager
//! and the controller can be driven by in-memory fakes or mocks.

use async_trait::async_trait;
use tokio::sync::mpsc;

use shared::{FetchFailure, PopupId, Recipe, VideoEmbed};
use crate::error::StoreError;

/// Session-scoped key-value persistence
#[mockall::automock]
pub trait SessionStore: Send + Sync {
    /// Read the raw value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Remote recipe search
#[mockall::automock]
#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Search recipes matching `query`
    async fn search(&self, query: &str) -> Result<Vec<Recipe>, FetchFailure>;
}

/// Remote video lookup
#[mockall::automock]
#[async_trait]
pub trait VideoService: Send + Sync {
    /// Find at most one video for `query`
    async fn find_video(&self, query: &str) -> Result<VideoEmbed, FetchFailure>;
}

/// User actions forwarded by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The search input changed
    InputChanged(String),
    /// Explicit search request for the current input
    SearchRequested,
    /// Favorite button pressed for the current input
    FavoriteToggled,
    /// A remembered favorite was picked
    FavoriteSelected(String),
    /// A search result was picked, by position
    ResultSelected(usize),
    /// A saved recipe was picked from the panel, by position
    SavedSelected(usize),
    /// Bookmark toggled inside an opened recipe
    SaveToggled(PopupId),
    /// An opened recipe was closed
    PopupClosed(PopupId),
    /// Show or hide the saved-recipe panel
    SavedPanelToggled,
    /// Search-as-you-type switched on or off
    DynamicSearchToggled(bool),
    Quit,
}

/// Presentation layer
///
/// The view never calls back into the controller. It hands out an event
/// stream from [`RecipeView::subscribe`] and otherwise only renders.
#[mockall::automock]
pub trait RecipeView {
    /// Attach to the stream of user actions
    fn subscribe(&mut self) -> mpsc::Receiver<ViewEvent>;

    fn render_results(&mut self, recipes: &[Recipe]);

    fn clear_results(&mut self);

    fn render_favorites(&mut self, favorites: &[String]);

    fn set_favorite_star(&mut self, is_favorite: bool);

    fn set_favorite_enabled(&mut self, enabled: bool);

    fn open_popup(&mut self, id: PopupId, recipe: &Recipe, saved: bool);

    fn close_popup(&mut self, id: PopupId);

    fn is_popup_open(&self, id: PopupId) -> bool;

    fn set_popup_saved(&mut self, id: PopupId, saved: bool);

    /// Embed a video player into an opened recipe
    fn show_video(&mut self, id: PopupId, embed_url: &str);

    fn render_saved_panel(&mut self, recipes: &[Recipe]);

    /// Flip the saved-recipe panel, returning whether it is now visible
    fn toggle_saved_panel(&mut self) -> bool;

    /// Diagnostic line; never blocks interaction
    fn show_error(&mut self, message: &str);
}
