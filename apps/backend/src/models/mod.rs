//! Stored records and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export shared types from quiz-core
pub use quiz_core::types::{ParseWarning, Question};

/// Display name recorded for text pasted by an admin.
pub const PASTED_FILENAME: &str = "Pasted Questions";

/// Prefix of the stored name recorded for a paste; nothing is on disk.
pub const PASTED_PREFIX: &str = "pasted-";

// === Stored Entity Types ===

/// An upload or paste event that added questions to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: i64,
    pub filename: String,
    pub stored_name: String,
    pub upload_date: DateTime<Utc>,
    pub question_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

impl FileRecord {
    /// Record for text pasted by an admin.
    pub fn pasted(id: i64, question_count: usize) -> Self {
        let now = Utc::now();
        Self {
            id,
            filename: PASTED_FILENAME.to_string(),
            stored_name: format!("{}{}", PASTED_PREFIX, now.timestamp_millis()),
            upload_date: now,
            question_count,
            content_hash: None,
        }
    }

    pub fn is_paste(&self) -> bool {
        self.stored_name.starts_with(PASTED_PREFIX)
    }
}

/// Question plus the file it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredQuestion {
    #[serde(flatten)]
    pub question: Question,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file_id: Option<i64>,
}

impl StoredQuestion {
    pub fn from_source(question: Question, source_file_id: i64) -> Self {
        Self {
            question,
            source_file_id: Some(source_file_id),
        }
    }
}

/// Contents of `questions-data.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionsData {
    #[serde(default)]
    pub files: Vec<FileRecord>,
    #[serde(default)]
    pub questions: Vec<StoredQuestion>,
}

/// A finished quiz run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: i64,
    pub player_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    #[serde(default)]
    pub answers: serde_json::Value,
    #[serde(default)]
    pub is_winner: bool,
    pub timestamp: DateTime<Utc>,
}

impl Attempt {
    /// Score as a whole percentage, rounded half up.
    pub fn percentage(score: u32, total_questions: u32) -> u32 {
        if total_questions == 0 {
            return 0;
        }
        (f64::from(score) / f64::from(total_questions) * 100.0).round() as u32
    }
}

/// Hall of fame entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    pub id: i64,
    pub player_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub timestamp: DateTime<Utc>,
}

/// Contents of `quiz-data.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizData {
    #[serde(default)]
    pub attempts: Vec<Attempt>,
    #[serde(default)]
    pub winners: Vec<Winner>,
}

// === API Request/Response Types ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRequest {
    pub player_name: String,
    pub score: u32,
    pub total_questions: u32,
    #[serde(default)]
    pub answers: serde_json::Value,
    #[serde(default)]
    pub is_winner: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasteRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadParams {
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub file: FileRecord,
    pub questions_added: usize,
    pub total_questions: usize,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasteResponse {
    pub success: bool,
    pub questions_added: usize,
    pub total_questions: usize,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<FileRecord>,
    pub total_questions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReparseResponse {
    pub success: bool,
    pub total_questions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugTextResponse {
    pub raw_text: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_attempts: usize,
    pub total_winners: usize,
    pub total_questions: usize,
    pub total_files: usize,
}
