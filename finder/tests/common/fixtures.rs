//! Recipe fixtures and canned API bodies

use serde_json::json;
use shared::Recipe;

pub fn recipe(uri: &str, label: &str) -> Recipe {
    let mut recipe = Recipe::new(uri, label);
    recipe.image = format!("https://img.example/{uri}.jpg");
    recipe.ingredient_lines = vec!["1 onion".to_string(), "salt".to_string()];
    recipe
}

pub fn pasta_recipes() -> Vec<Recipe> {
    vec![recipe("r-carbonara", "Carbonara"), recipe("r-pesto", "Pesto Pasta")]
}

pub fn soup_recipes() -> Vec<Recipe> {
    vec![recipe("r-minestrone", "Minestrone")]
}

/// Edamam-style search body for the given recipes
pub fn search_body(recipes: &[Recipe]) -> serde_json::Value {
    json!({
        "count": recipes.len(),
        "hits": recipes.iter().map(|r| json!({ "recipe": r })).collect::<Vec<_>>()
    })
}

/// YouTube-style search body with one video hit
pub fn video_body(video_id: &str) -> serde_json::Value {
    json!({
        "items": [ { "id": { "kind": "youtube#video", "videoId": video_id } } ]
    })
}
