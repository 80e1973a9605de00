//! Integration tests for quiz endpoints.

mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use common::fixtures::{sample_quiz_text, upload};
use common::TestContext;
use serde_json::Value;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_questions_empty_bank() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server.get("/api/questions").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Please ask admin to upload questions"));
}

#[tokio::test]
async fn test_questions_limited_to_quiz_size() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    upload(&server, "big.txt", &sample_quiz_text(12)).await.assert_status_ok();

    let questions: Value = server.get("/api/questions").await.json();
    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), 10);

    let ids: HashSet<i64> = questions.iter().map(|q| q["id"].as_i64().unwrap()).collect();
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn test_questions_smaller_bank_returned_whole() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    upload(&server, "small.txt", &sample_quiz_text(3)).await.assert_status_ok();

    let questions: Value = server.get("/api/questions").await.json();
    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), 3);
    for question in questions {
        assert_eq!(question["options"].as_array().unwrap().len(), 4);
        assert_eq!(question["correct"], 1);
    }
}
