//! Route handler tests over an in-memory store and scripted provider.

use agents::{AssetManager, DbManager};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use llm::{General, ScriptedProvider};
use std::sync::Arc;
use store::{AssetPatch, AssetStore, NewAsset};
use tally_gateway::{AppState, assets, chat};

fn state() -> (AppState<ScriptedProvider>, ScriptedProvider) {
    let store = Arc::new(AssetStore::in_memory().unwrap());
    let provider = ScriptedProvider::new();
    let delegate = DbManager::new(provider.clone(), General::default(), Arc::clone(&store));
    let manager = AssetManager::new(provider.clone(), General::default(), delegate);
    (
        AppState {
            store,
            manager: Arc::new(manager),
        },
        provider,
    )
}

fn macbook() -> NewAsset {
    NewAsset {
        name: "MacBook Pro".into(),
        category: "Electronics".into(),
        value: 2000.0,
        quantity: 1.0,
        status: "Active".into(),
        purchase_date: None,
    }
}

#[tokio::test]
async fn create_returns_201_and_representation() {
    let (state, _) = state();
    let (status, Json(asset)) = assets::create_asset(State(state.clone()), Json(macbook()))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert!(!asset.id.is_empty());

    // The representation carries exactly the public fields.
    let value = serde_json::to_value(&asset).unwrap();
    assert_eq!(value["name"], "MacBook Pro");
    assert_eq!(value["value"], 2000.0);
    assert!(value.get("created_at").is_none());
}

#[tokio::test]
async fn create_invalid_value_returns_422() {
    let (state, _) = state();
    let mut new = macbook();
    new.value = -10.0;
    let err = assets::create_asset(State(state), Json(new))
        .await
        .unwrap_err();
    assert_eq!(
        err.into_response().status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn get_missing_returns_404() {
    let (state, _) = state();
    let err = assets::get_asset(State(state), Path("missing".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_applies_partial_fields() {
    let (state, _) = state();
    let (_, Json(created)) = assets::create_asset(State(state.clone()), Json(macbook()))
        .await
        .unwrap();

    let patch = AssetPatch {
        status: Some("Retired".into()),
        ..Default::default()
    };
    let Json(updated) = assets::update_asset(State(state), Path(created.id.clone()), Json(patch))
        .await
        .unwrap();

    assert_eq!(updated.status, "Retired");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.value, created.value);
}

#[tokio::test]
async fn update_missing_returns_404() {
    let (state, _) = state();
    let err = assets::update_asset(
        State(state),
        Path("missing".to_string()),
        Json(AssetPatch::default()),
    )
    .await
    .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_get_returns_404() {
    let (state, _) = state();
    let (_, Json(created)) = assets::create_asset(State(state.clone()), Json(macbook()))
        .await
        .unwrap();

    let status = assets::delete_asset(State(state.clone()), Path(created.id.clone()))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let err = assets::get_asset(State(state), Path(created.id))
        .await
        .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_respects_skip_and_limit() {
    let (state, _) = state();
    for i in 0..5 {
        let mut new = macbook();
        new.name = format!("Asset {i}");
        assets::create_asset(State(state.clone()), Json(new))
            .await
            .unwrap();
    }

    let Json(page) = assets::list_assets(
        State(state),
        Query(assets::PageParams { skip: 3, limit: 10 }),
    )
    .await
    .unwrap();
    assert_eq!(page.len(), 2);
}

#[tokio::test]
async fn chat_query_returns_agent_answer() {
    let (state, provider) = state();
    provider.push_text("Hello! How can I help with your assets today?");

    let Json(reply) = chat::query_agent(
        State(state),
        Json(chat::ChatQuery {
            question: "hi".into(),
        }),
    )
    .await;
    assert!(reply.answer.starts_with("Hello!"));
}

#[tokio::test]
async fn chat_failure_degrades_to_apology() {
    // Empty script: the agent's model call fails.
    let (state, _) = state();

    let Json(reply) = chat::query_agent(
        State(state),
        Json(chat::ChatQuery {
            question: "what do I own?".into(),
        }),
    )
    .await;
    assert_eq!(reply.answer, chat::APOLOGY);
}
