//! Recording view and controller builders

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use finder::{Controller, MockRecipeService, MockVideoService, RecipeStateManager, RecipeView, ViewEvent};
use finder::services::MemorySessionStore;
use shared::{PopupId, Recipe};

/// One rendering call made by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Results(Vec<String>),
    Cleared,
    Favorites(Vec<String>),
    Star(bool),
    FavoriteEnabled(bool),
    Opened(PopupId, String, bool),
    Closed(PopupId),
    PopupSaved(PopupId, bool),
    Video(PopupId, String),
    SavedPanel(Vec<String>),
    Error(String),
}

/// View that records every call and replays scripted events
pub struct RecordingView {
    calls: Arc<Mutex<Vec<ViewCall>>>,
    events: Option<mpsc::Receiver<ViewEvent>>,
    open: HashSet<PopupId>,
    panel_visible: bool,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            events: None,
            open: HashSet::new(),
            panel_visible: false,
        }
    }

    /// View whose `subscribe` hands out the returned sender's stream
    pub fn scripted() -> (Self, mpsc::Sender<ViewEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let mut view = Self::new();
        view.events = Some(rx);
        (view, tx)
    }

    pub fn calls_handle(&self) -> Arc<Mutex<Vec<ViewCall>>> {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ViewCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn labels(recipes: &[Recipe]) -> Vec<String> {
    recipes.iter().map(|r| r.label.clone()).collect()
}

impl RecipeView for RecordingView {
    fn subscribe(&mut self) -> mpsc::Receiver<ViewEvent> {
        self.events.take().unwrap_or_else(|| mpsc::channel(1).1)
    }

    fn render_results(&mut self, recipes: &[Recipe]) {
        self.record(ViewCall::Results(labels(recipes)));
    }

    fn clear_results(&mut self) {
        self.record(ViewCall::Cleared);
    }

    fn render_favorites(&mut self, favorites: &[String]) {
        self.record(ViewCall::Favorites(favorites.to_vec()));
    }

    fn set_favorite_star(&mut self, is_favorite: bool) {
        self.record(ViewCall::Star(is_favorite));
    }

    fn set_favorite_enabled(&mut self, enabled: bool) {
        self.record(ViewCall::FavoriteEnabled(enabled));
    }

    fn open_popup(&mut self, id: PopupId, recipe: &Recipe, saved: bool) {
        self.open.insert(id);
        self.record(ViewCall::Opened(id, recipe.label.clone(), saved));
    }

    fn close_popup(&mut self, id: PopupId) {
        self.open.remove(&id);
        self.record(ViewCall::Closed(id));
    }

    fn is_popup_open(&self, id: PopupId) -> bool {
        self.open.contains(&id)
    }

    fn set_popup_saved(&mut self, id: PopupId, saved: bool) {
        self.record(ViewCall::PopupSaved(id, saved));
    }

    fn show_video(&mut self, id: PopupId, embed_url: &str) {
        self.record(ViewCall::Video(id, embed_url.to_string()));
    }

    fn render_saved_panel(&mut self, recipes: &[Recipe]) {
        if self.panel_visible {
            self.record(ViewCall::SavedPanel(labels(recipes)));
        }
    }

    fn toggle_saved_panel(&mut self) -> bool {
        self.panel_visible = !self.panel_visible;
        self.panel_visible
    }

    fn show_error(&mut self, message: &str) {
        self.record(ViewCall::Error(message.to_string()));
    }
}

pub type TestController =
    Controller<Arc<MemorySessionStore>, MockRecipeService, MockVideoService, RecordingView>;

/// Controller over an in-memory store and the given service mocks
pub fn controller_with(
    store: &Arc<MemorySessionStore>,
    recipes: MockRecipeService,
    videos: MockVideoService,
    dynamic_search: bool,
) -> TestController {
    Controller::new(
        RecipeStateManager::new(Arc::clone(store)),
        Arc::new(recipes),
        Arc::new(videos),
        RecordingView::new(),
        dynamic_search,
    )
}

/// Popup id of the most recently opened recipe view
pub fn last_opened(calls: &[ViewCall]) -> Option<PopupId> {
    calls.iter().rev().find_map(|call| match call {
        ViewCall::Opened(id, _, _) => Some(*id),
        _ => None,
    })
}

/// Poll recorded calls until `condition` holds or the timeout passes
pub async fn wait_for_call<F>(calls: &Arc<Mutex<Vec<ViewCall>>>, condition: F, timeout_ms: u64) -> bool
where
    F: Fn(&[ViewCall]) -> bool,
{
    let start = Instant::now();
    let timeout = Duration::from_millis(timeout_ms);

    loop {
        if condition(&calls.lock().unwrap()) {
            return true;
        }
        if start.elapsed() > timeout {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
