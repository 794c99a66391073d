//! Tests for finder services
//!
//! HTTP clients run against wiremock servers; the file-backed store runs in
//! temporary directories.
