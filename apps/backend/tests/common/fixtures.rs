//! Test fixtures and factory functions for creating test data.

use axum::body::Bytes;
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};

/// Generate document text with `num_questions` four-option questions.
/// The correct answer of each is option B, marked with `*`.
pub fn sample_quiz_text(num_questions: usize) -> String {
    (1..=num_questions)
        .map(|i| {
            format!(
                "{i}. Question {i}?\nA) Wrong {i}\nB) Right {i} *\nC) Other {i}\nD) Last {i}\n"
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pasted text using lowercase letters and the `(j)` marker.
pub fn pasted_quiz_text() -> &'static str {
    "1. Largest ocean?\na) Atlantic\nb) Pacific (j)\nc) Indian\n\n2. Smallest prime?\na) 2 (J)\nb) 3\n"
}

/// Body for POST /api/attempts.
pub fn attempt_request(player_name: &str, score: u32, total_questions: u32, is_winner: bool) -> Value {
    json!({
        "player_name": player_name,
        "score": score,
        "total_questions": total_questions,
        "answers": [1, 0, 2],
        "is_winner": is_winner,
    })
}

/// Upload a document through the admin API.
pub async fn upload(server: &TestServer, filename: &str, content: &str) -> TestResponse {
    server
        .post("/api/admin/upload")
        .add_query_param("filename", filename)
        .bytes(Bytes::from(content.to_string()))
        .await
}

/// Paste text through the admin API.
pub async fn paste(server: &TestServer, text: &str) -> TestResponse {
    server
        .post("/api/admin/paste")
        .json(&json!({ "text": text }))
        .await
}
