//! Favorite queries and saved recipes
//!
//! Pure toggle semantics over two ordered sets, mirrored write-through into
//! an injected [`SessionStore`]. Nothing here filters by query length; the
//! minimum-length gate belongs to the controller.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use shared::{Recipe, decode_list, encode_list};
use crate::error::FinderResult;
use crate::traits::SessionStore;

/// Store key holding the JSON array of favorite queries
pub const FAVORITES_KEY: &str = "favorites";

/// Store key holding the JSON array of saved recipes
pub const SAVED_RECIPES_KEY: &str = "savedRecipes";

/// Single source of truth for favorites and saved recipes
pub struct RecipeStateManager<S: SessionStore> {
    store: S,
    favorites: Vec<String>,
    saved_recipes: Vec<Recipe>,
}

impl<S: SessionStore> RecipeStateManager<S> {
    /// Create a manager, loading both sets from the store
    pub fn new(store: S) -> Self {
        let mut manager = Self {
            store,
            favorites: Vec::new(),
            saved_recipes: Vec::new(),
        };
        manager.favorites = manager.load_favorites();
        manager.saved_recipes = manager.load_saved_recipes();
        debug!(
            favorites = manager.favorites.len(),
            saved = manager.saved_recipes.len(),
            "Loaded session state"
        );
        manager
    }

    /// Read the persisted favorites; absent or malformed data yields an empty set
    pub fn load_favorites(&self) -> Vec<String> {
        let mut favorites: Vec<String> = self.load_list(FAVORITES_KEY);
        dedup_by_key(&mut favorites, |q| q.clone());
        favorites
    }

    /// Read the persisted saved recipes; absent or malformed data yields an empty set
    pub fn load_saved_recipes(&self) -> Vec<Recipe> {
        let mut recipes: Vec<Recipe> = self.load_list(SAVED_RECIPES_KEY);
        dedup_by_key(&mut recipes, |r| r.uri.clone());
        recipes
    }

    /// Add `query` to the favorites if absent, remove it otherwise
    ///
    /// Returns whether `query` is a favorite afterwards. The in-memory set is
    /// updated even when persisting fails.
    pub fn toggle_favorite(&mut self, query: &str) -> FinderResult<bool> {
        let now_favorite = match self.favorites.iter().position(|q| q == query) {
            Some(index) => {
                self.favorites.remove(index);
                false
            }
            None => {
                self.favorites.push(query.to_string());
                true
            }
        };
        self.persist(FAVORITES_KEY, &self.favorites)?;
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, query: &str) -> bool {
        self.favorites.iter().any(|q| q == query)
    }

    /// Save `recipe` if no recipe with its `uri` is saved, remove that recipe otherwise
    ///
    /// The `uri` is authoritative: a stored recipe is removed even if the
    /// other fields of `recipe` differ from it. Returns whether a recipe with
    /// that `uri` is saved afterwards.
    pub fn toggle_saved_recipe(&mut self, recipe: &Recipe) -> FinderResult<bool> {
        let now_saved = match self.saved_recipes.iter().position(|r| r.uri == recipe.uri) {
            Some(index) => {
                self.saved_recipes.remove(index);
                false
            }
            None => {
                self.saved_recipes.push(recipe.clone());
                true
            }
        };
        self.persist(SAVED_RECIPES_KEY, &self.saved_recipes)?;
        Ok(now_saved)
    }

    pub fn is_recipe_saved(&self, uri: &str) -> bool {
        self.saved_recipes.iter().any(|r| r.uri == uri)
    }

    /// Favorites in insertion order
    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    /// Saved recipes in insertion order
    pub fn saved_recipes(&self) -> &[Recipe] {
        &self.saved_recipes
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "Session store read failed, starting empty");
                return Vec::new();
            }
        };

        decode_list(&raw).unwrap_or_else(|e| {
            warn!(key, error = %e, "Discarding malformed session value");
            Vec::new()
        })
    }

    fn persist<T: Serialize>(&self, key: &str, items: &[T]) -> FinderResult<()> {
        let encoded = encode_list(items)?;
        self.store.set(key, encoded).map_err(|e| {
            warn!(key, error = %e, "Session store write failed");
            e.into()
        })
    }
}

/// Keep the first occurrence of each key, preserving order
fn dedup_by_key<T, K, F>(items: &mut Vec<T>, key: F)
where
    K: Eq + std::hash::Hash,
    F: Fn(&T) -> K,
{
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(key(item)));
}
