//! Interaction controller
//!
//! Wires view events to the state manager and the remote services. All
//! state is touched from the controller loop only; fetches run as spawned
//! tasks and report back through an internal channel. A search result is
//! applied only if no newer search has been issued since it started, and a
//! video is applied only if its recipe view is still open.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use shared::{FetchFailure, PopupId, Recipe, VideoEmbed, is_searchable};
use crate::core::{RecipeStateManager, RequestTracker};
use crate::error::{FinderError, FinderResult};
use crate::traits::{RecipeService, RecipeView, SessionStore, VideoService, ViewEvent};

/// Completion of an asynchronous fetch
#[derive(Debug)]
pub enum FetchOutcome {
    Search {
        generation: u64,
        query: String,
        result: Result<Vec<Recipe>, FetchFailure>,
    },
    Video {
        popup: PopupId,
        result: Result<VideoEmbed, FetchFailure>,
    },
}

/// Main controller with dependency injection
pub struct Controller<S, R, Y, V>
where
    S: SessionStore,
    R: RecipeService + 'static,
    Y: VideoService + 'static,
    V: RecipeView,
{
    state: RecipeStateManager<S>,
    recipes: Arc<R>,
    videos: Arc<Y>,
    view: V,
    tracker: RequestTracker,
    input: String,
    dynamic_search: bool,
    results: Vec<Recipe>,
    popups: HashMap<PopupId, Recipe>,
    outcomes_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl<S, R, Y, V> Controller<S, R, Y, V>
where
    S: SessionStore,
    R: RecipeService + 'static,
    Y: VideoService + 'static,
    V: RecipeView,
{
    /// Create a controller and render the initial favorites
    pub fn new(state: RecipeStateManager<S>, recipes: Arc<R>, videos: Arc<Y>, mut view: V, dynamic_search: bool) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();

        view.render_favorites(state.favorites());
        view.set_favorite_enabled(false);
        view.set_favorite_star(false);

        Self {
            state,
            recipes,
            videos,
            view,
            tracker: RequestTracker::new(),
            input: String::new(),
            dynamic_search,
            results: Vec::new(),
            popups: HashMap::new(),
            outcomes_tx,
            outcomes_rx,
        }
    }

    /// Run until the view asks to quit or its event stream ends
    pub async fn run(&mut self) -> FinderResult<()> {
        let mut events = self.view.subscribe();
        info!(dynamic_search = self.dynamic_search, "Controller loop started");

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else {
                        debug!("View event stream closed");
                        break;
                    };
                    if !self.handle_event(event) {
                        break;
                    }
                }

                Some(outcome) = self.outcomes_rx.recv() => {
                    self.apply_outcome(outcome);
                }
            }
        }

        info!("Controller loop stopped");
        Ok(())
    }

    /// Handle one user action; returns `false` when the loop should stop
    pub fn handle_event(&mut self, event: ViewEvent) -> bool {
        debug!(?event, "Handling view event");

        match event {
            ViewEvent::InputChanged(query) => self.on_input(query),
            ViewEvent::SearchRequested => {
                if is_searchable(&self.input) {
                    self.start_search();
                }
            }
            ViewEvent::FavoriteToggled => self.on_favorite_toggled(),
            ViewEvent::FavoriteSelected(query) => {
                self.input = query;
                if is_searchable(&self.input) {
                    self.start_search();
                }
                self.refresh_favorite_button();
            }
            ViewEvent::ResultSelected(index) => match self.results.get(index).cloned() {
                Some(recipe) => self.open_recipe(recipe),
                None => debug!(index, "No search result at position"),
            },
            ViewEvent::SavedSelected(index) => match self.state.saved_recipes().get(index).cloned() {
                Some(recipe) => self.open_recipe(recipe),
                None => debug!(index, "No saved recipe at position"),
            },
            ViewEvent::SaveToggled(popup) => self.on_save_toggled(popup),
            ViewEvent::PopupClosed(popup) => {
                self.popups.remove(&popup);
                self.view.close_popup(popup);
            }
            ViewEvent::SavedPanelToggled => {
                if self.view.toggle_saved_panel() {
                    self.view.render_saved_panel(self.state.saved_recipes());
                }
            }
            ViewEvent::DynamicSearchToggled(enabled) => {
                self.dynamic_search = enabled;
            }
            ViewEvent::Quit => return false,
        }

        true
    }

    /// Wait for the next fetch to complete and apply it
    pub async fn process_next_outcome(&mut self) -> bool {
        match self.outcomes_rx.recv().await {
            Some(outcome) => {
                self.apply_outcome(outcome);
                true
            }
            None => false,
        }
    }

    /// Apply a completed fetch, dropping it if its target is stale
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Search { generation, query, result } => {
                if !self.tracker.is_current(generation) {
                    debug!(generation, latest = self.tracker.latest(), query = %query, "Discarding superseded search");
                    return;
                }

                match result {
                    Ok(recipes) => {
                        info!(query = %query, count = recipes.len(), "Search results received");
                        self.view.render_results(&recipes);
                        self.results = recipes;
                    }
                    Err(reason) => {
                        let e = FinderError::fetch("Recipe search", reason);
                        warn!(query = %query, error = %e, "Recipe search failed");
                        self.results.clear();
                        self.view.clear_results();
                        self.view.show_error(&e.to_string());
                    }
                }
            }
            FetchOutcome::Video { popup, result } => {
                if !self.popups.contains_key(&popup) || !self.view.is_popup_open(popup) {
                    debug!(%popup, "Discarding video for closed recipe view");
                    return;
                }

                match result {
                    Ok(embed) => {
                        if let Some(url) = embed.as_url() {
                            self.view.show_video(popup, url);
                        }
                    }
                    Err(reason) => {
                        let e = FinderError::fetch("Video lookup", reason);
                        warn!(%popup, error = %e, "Video lookup failed");
                        self.view.show_error(&e.to_string());
                    }
                }
            }
        }
    }

    /// Current search input
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn dynamic_search(&self) -> bool {
        self.dynamic_search
    }

    /// Most recently applied search results
    pub fn results(&self) -> &[Recipe] {
        &self.results
    }

    pub fn state(&self) -> &RecipeStateManager<S> {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    fn on_input(&mut self, query: String) {
        self.input = query;
        self.refresh_favorite_button();

        if self.dynamic_search && is_searchable(&self.input) {
            self.start_search();
        } else {
            self.tracker.invalidate();
            self.results.clear();
            self.view.clear_results();
        }
    }

    fn on_favorite_toggled(&mut self) {
        if !is_searchable(&self.input) {
            return;
        }

        if let Err(e) = self.state.toggle_favorite(&self.input) {
            warn!(error = %e, "Favorite not persisted");
            self.view.show_error(&format!("Favorite not persisted: {e}"));
        }
        self.view.render_favorites(self.state.favorites());
        self.view.set_favorite_star(self.state.is_favorite(&self.input));
    }

    fn on_save_toggled(&mut self, popup: PopupId) {
        let Some(recipe) = self.popups.get(&popup).cloned() else {
            debug!(%popup, "Save toggled for unknown recipe view");
            return;
        };

        if let Err(e) = self.state.toggle_saved_recipe(&recipe) {
            warn!(error = %e, "Saved recipe not persisted");
            self.view.show_error(&format!("Saved recipe not persisted: {e}"));
        }
        self.view.set_popup_saved(popup, self.state.is_recipe_saved(&recipe.uri));
        self.view.render_saved_panel(self.state.saved_recipes());
    }

    fn refresh_favorite_button(&mut self) {
        self.view.set_favorite_enabled(is_searchable(&self.input));
        self.view.set_favorite_star(self.state.is_favorite(&self.input));
    }

    fn open_recipe(&mut self, recipe: Recipe) {
        let popup = PopupId::new();
        let saved = self.state.is_recipe_saved(&recipe.uri);
        self.view.open_popup(popup, &recipe, saved);

        let label = recipe.label.clone();
        self.popups.insert(popup, recipe);

        let videos = Arc::clone(&self.videos);
        let tx = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let result = videos.find_video(&label).await;
            let _ = tx.send(FetchOutcome::Video { popup, result });
        });
    }

    fn start_search(&mut self) {
        let generation = self.tracker.next();
        let query = self.input.clone();
        debug!(generation, query = %query, "Starting recipe search");

        let recipes = Arc::clone(&self.recipes);
        let tx = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let result = recipes.search(&query).await;
            let _ = tx.send(FetchOutcome::Search { generation, query, result });
        });
    }
}
