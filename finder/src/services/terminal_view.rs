//! Line-oriented terminal presentation layer
//!
//! Input lines become [`ViewEvent`]s on a dedicated reader thread, so a
//! pending read never holds up runtime shutdown; rendering writes plain
//! text. Plain lines are the search input, slash commands are the buttons:
//!
//! ```text
//! /search          search for the current input
//! /fav             toggle the current input as a favorite
//! /favs N          search for favorite number N
//! /open N          open search result number N
//! /saved N         open saved recipe number N
//! /save            toggle the bookmark on the focused recipe
//! /close           close the focused recipe
//! /panel           show or hide the saved-recipe panel
//! /dynamic on|off  search as you type
//! /quit
//! //text           search input starting with a single `/`
//! ```

use std::collections::HashMap;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::{Arc, Mutex};
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use shared::{PopupId, Recipe};
use crate::traits::{RecipeView, ViewEvent};

const EVENT_CHANNEL_CAPACITY: usize = 32;
const NO_SAVED_RECIPES: &str = "No saved recipes.";

/// State the input reader needs to resolve numbered and focused commands
#[derive(Debug, Default, Clone)]
pub struct InputContext {
    pub favorites: Vec<String>,
    pub focused: Option<PopupId>,
}

/// Turn one input line into an event; `None` for lines that do nothing
pub fn parse_command(line: &str, context: &InputContext) -> Option<ViewEvent> {
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(command) = line.strip_prefix('/') else {
        return Some(ViewEvent::InputChanged(line.to_string()));
    };
    if command.starts_with('/') {
        return Some(ViewEvent::InputChanged(command.to_string()));
    }

    let mut parts = command.split_whitespace();
    let name = parts.next()?;
    let argument = parts.next();

    match (name, argument) {
        ("search", None) => Some(ViewEvent::SearchRequested),
        ("fav", None) => Some(ViewEvent::FavoriteToggled),
        ("favs", Some(n)) => {
            let index = parse_position(n)?;
            context.favorites.get(index).cloned().map(ViewEvent::FavoriteSelected)
        }
        ("open", Some(n)) => parse_position(n).map(ViewEvent::ResultSelected),
        ("saved", Some(n)) => parse_position(n).map(ViewEvent::SavedSelected),
        ("save", None) => context.focused.map(ViewEvent::SaveToggled),
        ("close", None) => context.focused.map(ViewEvent::PopupClosed),
        ("panel", None) => Some(ViewEvent::SavedPanelToggled),
        ("dynamic", Some("on")) => Some(ViewEvent::DynamicSearchToggled(true)),
        ("dynamic", Some("off")) => Some(ViewEvent::DynamicSearchToggled(false)),
        ("quit", None) => Some(ViewEvent::Quit),
        _ => None,
    }
}

/// 1-based position as typed by the user to a 0-based index
fn parse_position(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok()?.checked_sub(1)
}

/// Terminal implementation of [`RecipeView`]
pub struct TerminalView<R, W> {
    input: Option<R>,
    out: W,
    context: Arc<Mutex<InputContext>>,
    popups: HashMap<PopupId, String>,
    open_order: Vec<PopupId>,
    panel_visible: bool,
}

impl TerminalView<BufReader<Stdin>, Stdout> {
    /// View over the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> TerminalView<R, W>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            input: Some(input),
            out,
            context: Arc::new(Mutex::new(InputContext::default())),
            popups: HashMap::new(),
            open_order: Vec::new(),
            panel_visible: false,
        }
    }

    /// Borrow the output sink
    pub fn output(&self) -> &W {
        &self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!(error = %e, "Terminal write failed");
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "Terminal flush failed");
        }
    }

    fn update_context(&self, update: impl FnOnce(&mut InputContext)) {
        match self.context.lock() {
            Ok(mut context) => update(&mut context),
            Err(_) => warn!("Input context lock poisoned"),
        }
    }

    fn refocus(&self) {
        let focused = self.open_order.last().copied();
        self.update_context(|context| context.focused = focused);
    }
}

impl<R, W> RecipeView for TerminalView<R, W>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    fn subscribe(&mut self) -> mpsc::Receiver<ViewEvent> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let Some(input) = self.input.take() else {
            warn!("Terminal input already subscribed");
            return rx;
        };

        let context = Arc::clone(&self.context);
        let reader = thread::Builder::new()
            .name("terminal-input".to_string())
            .spawn(move || {
                for line in input.lines() {
                    let line = match line {
                        Ok(line) => line,
                        Err(e) => {
                            warn!(error = %e, "Terminal read failed");
                            break;
                        }
                    };

                    let event = match context.lock() {
                        Ok(context) => parse_command(&line, &context),
                        Err(_) => break,
                    };

                    match event {
                        Some(event) => {
                            if tx.blocking_send(event).is_err() {
                                break;
                            }
                        }
                        None => debug!(line = %line, "Ignoring unrecognised input"),
                    }
                }
            });

        if let Err(e) = reader {
            warn!(error = %e, "Could not start terminal reader");
        }

        rx
    }

    fn render_results(&mut self, recipes: &[Recipe]) {
        self.clear_results();
        if recipes.is_empty() {
            self.line("No results.");
        }
        for (i, recipe) in recipes.iter().enumerate() {
            self.line(&format!("  {}. {}", i + 1, recipe.label));
        }
        self.flush();
    }

    fn clear_results(&mut self) {
        self.line("-- results --");
    }

    fn render_favorites(&mut self, favorites: &[String]) {
        let listed = favorites.to_vec();
        self.update_context(|context| context.favorites = listed);

        self.line("-- favorites --");
        for (i, favorite) in favorites.iter().enumerate() {
            self.line(&format!("  {}. {}", i + 1, favorite));
        }
        self.flush();
    }

    fn set_favorite_star(&mut self, is_favorite: bool) {
        let star = if is_favorite { "★" } else { "☆" };
        self.line(&format!("favorite: {star}"));
    }

    fn set_favorite_enabled(&mut self, enabled: bool) {
        if !enabled {
            debug!("Favorite button disabled");
        }
    }

    fn open_popup(&mut self, id: PopupId, recipe: &Recipe, saved: bool) {
        self.popups.insert(id, recipe.label.clone());
        self.open_order.retain(|open| *open != id);
        self.open_order.push(id);
        self.refocus();

        let bookmark = if saved { "[saved]" } else { "[not saved]" };
        self.line(&format!("== {} {} ==", recipe.label, bookmark));
        if !recipe.image.is_empty() {
            self.line(&format!("image: {}", recipe.image));
        }
        for ingredient in &recipe.ingredient_lines {
            self.line(&format!("  - {ingredient}"));
        }
        if let Some(url) = &recipe.url {
            self.line(&format!("more: {url}"));
        }
        self.flush();
    }

    fn close_popup(&mut self, id: PopupId) {
        if let Some(label) = self.popups.remove(&id) {
            self.open_order.retain(|open| *open != id);
            self.refocus();
            self.line(&format!("closed {label}"));
            self.flush();
        }
    }

    fn is_popup_open(&self, id: PopupId) -> bool {
        self.popups.contains_key(&id)
    }

    fn set_popup_saved(&mut self, id: PopupId, saved: bool) {
        if let Some(label) = self.popups.get(&id).cloned() {
            let bookmark = if saved { "saved" } else { "removed from saved" };
            self.line(&format!("{label}: {bookmark}"));
            self.flush();
        }
    }

    fn show_video(&mut self, id: PopupId, embed_url: &str) {
        if let Some(label) = self.popups.get(&id).cloned() {
            self.line(&format!("{label} video: {embed_url}"));
            self.flush();
        }
    }

    fn render_saved_panel(&mut self, recipes: &[Recipe]) {
        if !self.panel_visible {
            return;
        }
        self.line("-- saved recipes --");
        if recipes.is_empty() {
            self.line(NO_SAVED_RECIPES);
        }
        for (i, recipe) in recipes.iter().enumerate() {
            self.line(&format!("  {}. {}", i + 1, recipe.label));
        }
        self.flush();
    }

    fn toggle_saved_panel(&mut self) -> bool {
        self.panel_visible = !self.panel_visible;
        self.panel_visible
    }

    fn show_error(&mut self, message: &str) {
        self.line(&format!("! {message}"));
        self.flush();
    }
}
