//! Full session against mock HTTP endpoints and a file-backed store

mod common;

use std::sync::Arc;

use common::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use finder::services::JsonFileSessionStore;
use finder::{Controller, FinderConfig, RecipeStateManager, ViewEvent};

async fn recipe_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "pasta"))
        .and(query_param("app_id", "app-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&pasta_recipes())))
        .mount(&server)
        .await;
    server
}

async fn video_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Carbonara recipe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(video_body("carb0nara")))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn config_for(recipes: &MockServer, videos: &MockServer) -> FinderConfig {
    let recipes_uri = recipes.uri();
    let videos_uri = videos.uri();
    FinderConfig::from_lookup(move |key| match key {
        "EDAMAM_APP_ID" => Some("app-id".to_string()),
        "EDAMAM_APP_KEY" => Some("app-key".to_string()),
        "YOUTUBE_API_KEY" => Some("yt-key".to_string()),
        "EDAMAM_BASE_URL" => Some(recipes_uri.clone()),
        "YOUTUBE_BASE_URL" => Some(videos_uri.clone()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_session_search_favorite_and_save() {
    let recipes = recipe_server().await;
    let videos = video_server().await;
    let config = config_for(&recipes, &videos);

    let dir = TempDir::new().unwrap();
    let session_file = dir.path().join("session.json");

    let (view, events) = RecordingView::scripted();
    let calls = view.calls_handle();
    let mut controller = Controller::new(
        RecipeStateManager::new(JsonFileSessionStore::new(&session_file)),
        Arc::new(config.recipe_client()),
        Arc::new(config.video_client()),
        view,
        false,
    );

    let driver = async {
        events.send(ViewEvent::InputChanged("pasta".to_string())).await.unwrap();
        events.send(ViewEvent::FavoriteToggled).await.unwrap();
        events.send(ViewEvent::SearchRequested).await.unwrap();
        assert!(
            wait_for_call(&calls, |c| c.iter().any(|call| matches!(call, ViewCall::Results(_))), 2000).await,
            "Search results were not rendered"
        );

        events.send(ViewEvent::ResultSelected(0)).await.unwrap();
        assert!(
            wait_for_call(&calls, |c| c.iter().any(|call| matches!(call, ViewCall::Video(..))), 2000).await,
            "Video was not shown"
        );

        let popup = last_opened(&calls.lock().unwrap()).unwrap();
        events.send(ViewEvent::SaveToggled(popup)).await.unwrap();
        events.send(ViewEvent::PopupClosed(popup)).await.unwrap();
        events.send(ViewEvent::Quit).await.unwrap();
        popup
    };

    let (run_result, popup) = tokio::join!(controller.run(), driver);
    run_result.unwrap();

    let calls = calls.lock().unwrap().clone();
    assert!(calls.contains(&ViewCall::Results(vec!["Carbonara".to_string(), "Pesto Pasta".to_string()])));
    assert!(calls.contains(&ViewCall::Video(popup, "https://www.youtube.com/embed/carb0nara".to_string())));
    assert!(calls.contains(&ViewCall::PopupSaved(popup, true)));
    assert!(calls.contains(&ViewCall::Closed(popup)));
    assert!(!calls.iter().any(|call| matches!(call, ViewCall::Error(_))));

    // a later run over the same file resumes the session
    let resumed = RecipeStateManager::new(JsonFileSessionStore::new(&session_file));
    assert_eq!(resumed.favorites(), ["pasta".to_string()]);
    assert_eq!(resumed.saved_recipes().len(), 1);
    assert_eq!(resumed.saved_recipes()[0].uri, "r-carbonara");
    assert_eq!(resumed.saved_recipes()[0].ingredient_lines.len(), 2);
}

#[tokio::test]
async fn test_session_reports_rejected_credentials() {
    let recipes = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&recipes)
        .await;
    let videos = MockServer::start().await;
    let config = config_for(&recipes, &videos);

    let (view, events) = RecordingView::scripted();
    let calls = view.calls_handle();
    let mut controller = Controller::new(
        RecipeStateManager::new(Arc::new(finder::services::MemorySessionStore::new())),
        Arc::new(config.recipe_client()),
        Arc::new(config.video_client()),
        view,
        true,
    );

    let driver = async {
        events.send(ViewEvent::InputChanged("soup".to_string())).await.unwrap();
        let reported = wait_for_call(
            &calls,
            |c| c.iter().any(|call| matches!(call, ViewCall::Error(msg) if msg.contains("authentication failed"))),
            2000,
        )
        .await;
        events.send(ViewEvent::Quit).await.unwrap();
        reported
    };

    let (run_result, reported) = tokio::join!(controller.run(), driver);
    run_result.unwrap();
    assert!(reported, "Authentication failure was not reported");
    assert!(controller.results().is_empty());
}
