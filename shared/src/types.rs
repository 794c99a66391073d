//! Core shared types and identifiers

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::{SharedError, SharedResult};

/// Shortest query that may be searched for or remembered as a favorite
pub const MIN_QUERY_LEN: usize = 3;

/// Whether a query is long enough to be searched or favorited
pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_LEN
}

/// A recipe as returned by the search API
///
/// `uri` is the only stable identity; two recipes with the same `uri` are the
/// same recipe even if the remaining fields differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub uri: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ingredient_lines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Recipe {
    pub fn new(uri: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            label: label.into(),
            image: String::new(),
            ingredient_lines: Vec::new(),
            url: None,
        }
    }
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for Recipe {}

/// One element of the search response's `hits` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeHit {
    pub recipe: Recipe,
}

/// Video reference attached to an opened recipe
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VideoEmbed {
    /// No video was found
    #[default]
    Empty,
    /// Embeddable player URL
    Url(String),
}

impl VideoEmbed {
    const EMBED_BASE: &'static str = "https://www.youtube.com/embed/";

    pub fn from_video_id(video_id: &str) -> Self {
        VideoEmbed::Url(format!("{}{}", Self::EMBED_BASE, video_id))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, VideoEmbed::Empty)
    }

    pub fn as_url(&self) -> Option<&str> {
        match self {
            VideoEmbed::Empty => None,
            VideoEmbed::Url(url) => Some(url),
        }
    }
}

/// Identifier of one opened recipe view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PopupId(Uuid);

impl PopupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PopupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PopupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ways a remote service call can fail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchFailure {
    NetworkError(String),
    AuthenticationFailed,
    RateLimitExceeded,
    ServerError(String),
    InvalidResponse(String),
}

impl FetchFailure {
    /// Map a non-success HTTP status to a failure kind
    pub fn from_status(status: u16, reason: &str) -> Self {
        match status {
            401 | 403 => FetchFailure::AuthenticationFailed,
            429 => FetchFailure::RateLimitExceeded,
            _ => FetchFailure::ServerError(format!("{status} {reason}").trim_end().to_string()),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::NetworkError(msg) => write!(f, "network error: {msg}"),
            FetchFailure::AuthenticationFailed => write!(f, "authentication failed"),
            FetchFailure::RateLimitExceeded => write!(f, "rate limit exceeded"),
            FetchFailure::ServerError(msg) => write!(f, "server error: {msg}"),
            FetchFailure::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for FetchFailure {}

/// Encode a list as a JSON array string
pub fn encode_list<T: Serialize>(items: &[T]) -> SharedResult<String> {
    serde_json::to_string(items).map_err(|e| SharedError::SerializationError { message: e.to_string() })
}

/// Decode a JSON array string into a list
pub fn decode_list<T: DeserializeOwned>(raw: &str) -> SharedResult<Vec<T>> {
    serde_json::from_str(raw).map_err(|e| SharedError::DeserializationError { message: e.to_string() })
}
