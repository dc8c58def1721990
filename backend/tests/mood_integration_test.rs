//! Integration tests for mood entry endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_with_defaults() {
    let app = common::TestApp::new();
    let (user_id, token) = app.register_user("mood@x.com").await;

    let (status, body) = app.post("/mood", Some(&token), json!({ "mood": 4 })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["mood"], 4);
    assert_eq!(body["category"], "Mood");
    assert_eq!(body["userId"], user_id);
    assert!(body["date"].is_string());
    assert!(body.get("notes").is_none());
}

#[tokio::test]
async fn test_create_with_all_fields() {
    let app = common::TestApp::new();
    let (_, token) = app.register_user("mood@x.com").await;

    let (status, body) = app
        .post(
            "/mood",
            Some(&token),
            json!({
                "mood": 2,
                "category": "Stress",
                "notes": "deadline",
                "date": "2024-03-05T09:00:00Z"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["category"], "Stress");
    assert_eq!(body["notes"], "deadline");
    assert_eq!(body["date"], "2024-03-05T09:00:00Z");
}

#[tokio::test]
async fn test_mood_must_be_a_number_in_range() {
    let app = common::TestApp::new();
    let (_, token) = app.register_user("mood@x.com").await;

    let (status, body) = app.post("/mood", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "mood (number) required");

    for mood in [json!(0), json!(6), json!(3.5)] {
        let (status, _) = app.post("/mood", Some(&token), json!({ "mood": mood })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "mood {}", mood);
    }

    let (status, _) = app.post("/mood", Some(&token), json!({ "mood": "4" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_history_is_newest_first_and_private() {
    let app = common::TestApp::new();
    let (_, alice) = app.register_user("alice@x.com").await;
    let (_, bob) = app.register_user("bob@x.com").await;

    for (mood, date) in [(1, "2024-03-01"), (5, "2024-03-03"), (3, "2024-03-02")] {
        let (status, _) = app
            .post("/mood", Some(&alice), json!({ "mood": mood, "date": date }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get("/mood", Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    let moods: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["mood"].as_i64().unwrap())
        .collect();
    assert_eq!(moods, vec![5, 3, 1]);

    let (_, body) = app.get("/mood", Some(&bob)).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_history_is_capped() {
    let app = common::TestApp::new();
    let (_, token) = app.register_user("lots@x.com").await;

    for _ in 0..505 {
        app.post("/mood", Some(&token), json!({ "mood": 3 })).await;
    }

    let (_, body) = app.get("/mood", Some(&token)).await;
    assert_eq!(body.as_array().unwrap().len(), 500);
}
