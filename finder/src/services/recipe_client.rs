//! Recipe search client for the Edamam search API

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use shared::{FetchFailure, Recipe, RecipeHit};
use crate::traits::RecipeService;

/// Search response body; only `hits` is used
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<RecipeHit>,
}

/// Real recipe service calling `GET {base}/search`
#[derive(Clone)]
pub struct EdamamRecipeClient {
    client: reqwest::Client,
    base_url: String,
    app_id: String,
    app_key: String,
}

impl EdamamRecipeClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.edamam.com";

    pub fn new(base_url: impl Into<String>, app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_id: app_id.into(),
            app_key: app_key.into(),
        }
    }

    pub(crate) fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl RecipeService for EdamamRecipeClient {
    async fn search(&self, query: &str) -> Result<Vec<Recipe>, FetchFailure> {
        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("q", query),
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchFailure::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::from_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
            ));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| FetchFailure::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        debug!(query, hits = body.hits.len(), "Recipe search completed");
        Ok(body.hits.into_iter().map(|hit| hit.recipe).collect())
    }
}
