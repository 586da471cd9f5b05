//! Integration tests for karma votes.

mod common;

use axum::http::StatusCode;
use common::{answer, ask, body_json, get, put_json, seed_user};
use serde_json::json;

#[tokio::test]
async fn votes_replace_and_sum_per_voter() {
    let (app, store) = common::build_test_app();
    let asker = seed_user(&store, "asker").await;
    let author = seed_user(&store, "author").await;
    let v1 = seed_user(&store, "v1").await;
    let v2 = seed_user(&store, "v2").await;
    let qid = ask(&app, asker, "t", "b", "Science").await;
    answer(&app, qid, author, "answer").await;

    let votes_uri = format!("/api/v1/questions/{qid}/answers/{author}/votes");
    let karma_uri = format!("/api/v1/questions/{qid}/answers/{author}/karma");

    let json = body_json(get(app.clone(), &karma_uri).await).await;
    assert_eq!(json["data"]["karma"], 0);

    let response = put_json(app.clone(), &votes_uri, json!({ "voter_uid": v1, "vote": 1 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["karma"], 1);

    // Repeating the same vote changes nothing.
    let response = put_json(app.clone(), &votes_uri, json!({ "voter_uid": v1, "vote": 1 })).await;
    assert_eq!(body_json(response).await["data"]["karma"], 1);

    put_json(app.clone(), &votes_uri, json!({ "voter_uid": v1, "vote": -1 })).await;
    put_json(app.clone(), &votes_uri, json!({ "voter_uid": v2, "vote": 1 })).await;

    let json = body_json(get(app.clone(), &karma_uri).await).await;
    assert_eq!(json["data"]["karma"], 0);

    let json = body_json(get(app.clone(), &format!("{votes_uri}/{v1}")).await).await;
    assert_eq!(json["data"]["vote"], -1);
    let json = body_json(get(app.clone(), &format!("{votes_uri}/{v2}")).await).await;
    assert_eq!(json["data"]["vote"], 1);
    let json = body_json(get(app, &format!("{votes_uri}/{asker}")).await).await;
    assert_eq!(json["data"]["vote"], 0);
}

#[tokio::test]
async fn vote_outside_unit_range_is_rejected() {
    let (app, store) = common::build_test_app();
    let asker = seed_user(&store, "asker").await;
    let qid = ask(&app, asker, "t", "b", "Science").await;
    answer(&app, qid, asker, "self answer").await;

    let response = put_json(
        app,
        &format!("/api/v1/questions/{qid}/answers/{asker}/votes"),
        json!({ "voter_uid": asker, "vote": 2 }),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn self_vote_is_counted() {
    let (app, store) = common::build_test_app();
    let author = seed_user(&store, "author").await;
    let qid = ask(&app, author, "t", "b", "Science").await;
    answer(&app, qid, author, "my own answer").await;

    let response = put_json(
        app,
        &format!("/api/v1/questions/{qid}/answers/{author}/votes"),
        json!({ "voter_uid": author, "vote": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["karma"], 1);
}

#[tokio::test]
async fn vote_on_missing_answer_is_a_bad_request() {
    let (app, store) = common::build_test_app();
    let asker = seed_user(&store, "asker").await;
    let other = seed_user(&store, "other").await;
    let qid = ask(&app, asker, "t", "b", "Science").await;

    let response = put_json(
        app,
        &format!("/api/v1/questions/{qid}/answers/{other}/votes"),
        json!({ "voter_uid": asker, "vote": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "CONSTRAINT_VIOLATION");
}
