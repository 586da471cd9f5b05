//! Integration tests for `GET /api/v1/search`.

mod common;

use axum::http::StatusCode;
use common::{answer, ask, body_json, get, seed_user};

fn qids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["question"]["qid"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn questions_scope_matches_title_case_insensitively() {
    let (app, store) = common::build_test_app();
    let asker = seed_user(&store, "asker").await;
    let hit = ask(&app, asker, "Photosynthesis basics", "b", "Science.Biology").await;
    ask(&app, asker, "Rust traits", "b", "Computing").await;

    let json = body_json(get(app, "/api/v1/search?q=PHOTO&scope=questions").await).await;
    assert_eq!(qids(&json), vec![hit]);
}

#[tokio::test]
async fn answers_scope_returns_full_answer_lists() {
    let (app, store) = common::build_test_app();
    let asker = seed_user(&store, "asker").await;
    let a1 = seed_user(&store, "a1").await;
    let a2 = seed_user(&store, "a2").await;
    let qid = ask(&app, asker, "Plant energy", "b", "Science.Biology").await;
    answer(&app, qid, a1, "Chloroplasts").await;
    answer(&app, qid, a2, "The sun").await;

    let json = body_json(get(app, "/api/v1/search?q=chloro&scope=answers").await).await;
    assert_eq!(qids(&json), vec![qid]);
    assert_eq!(json["data"][0]["answers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn default_scope_is_ranked_search() {
    let (app, store) = common::build_test_app();
    let asker = seed_user(&store, "asker").await;
    let hit = ask(&app, asker, "Mitochondria", "powerhouse of the cell", "Science.Biology").await;
    ask(&app, asker, "Compilers", "parsing", "Computing").await;

    let json = body_json(get(app, "/api/v1/search?q=powerhouse").await).await;
    assert_eq!(qids(&json), vec![hit]);
}

#[tokio::test]
async fn ranked_search_respects_configured_topic() {
    let mut config = common::test_config();
    config.search_topic = Some("Science.Biology".into());
    let (app, store) = common::build_test_app_with(config);
    let asker = seed_user(&store, "asker").await;
    let bio = ask(&app, asker, "Cell division", "mitosis", "Science.Biology").await;
    ask(&app, asker, "Cell voltage", "battery", "Science.Chemistry").await;

    let json = body_json(get(app, "/api/v1/search?q=cell&scope=all").await).await;
    assert_eq!(qids(&json), vec![bio]);
}

#[tokio::test]
async fn punctuation_only_ranked_term_returns_empty() {
    let (app, store) = common::build_test_app();
    let asker = seed_user(&store, "asker").await;
    ask(&app, asker, "anything", "b", "Science").await;

    let response = get(app, "/api/v1/search?q=%21%3F&scope=all").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn ranked_search_accepts_punctuation_inside_words() {
    let (app, store) = common::build_test_app();
    let asker = seed_user(&store, "asker").await;
    let hit = ask(&app, asker, "printf(x) in C", "format strings", "Computing").await;

    let response = get(app, "/api/v1/search?q=printf%28x%29").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(qids(&body_json(response).await), vec![hit]);
}

#[tokio::test]
async fn unknown_scope_is_rejected() {
    let (app, _store) = common::build_test_app();
    let response = get(app, "/api/v1/search?q=x&scope=everything").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
