//! JSON file persistence
//!
//! Two documents live in the data directory: `questions-data.json` holds the
//! question bank and the uploads it came from, `quiz-data.json` holds quiz
//! attempts and winners. Every operation loads, modifies and rewrites a whole
//! document while holding one lock, so concurrent requests never interleave.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::models::*;

pub const QUESTIONS_FILE: &str = "questions-data.json";
pub const QUIZ_FILE: &str = "quiz-data.json";

/// File-backed store for questions, uploads and attempts
pub struct Database {
    questions_path: PathBuf,
    quiz_path: PathBuf,
    lock: Mutex<()>,
}

impl Database {
    /// Open the store in `data_dir`, writing empty documents if missing
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir).await?;

        let db = Self {
            questions_path: data_dir.join(QUESTIONS_FILE),
            quiz_path: data_dir.join(QUIZ_FILE),
            lock: Mutex::new(()),
        };

        if !tokio::fs::try_exists(&db.questions_path).await? {
            write_json(&db.questions_path, &QuestionsData::default()).await?;
        }
        if !tokio::fs::try_exists(&db.quiz_path).await? {
            write_json(&db.quiz_path, &QuizData::default()).await?;
        }

        Ok(db)
    }

    // === Question Repository ===

    /// Get every stored question
    pub async fn all_questions(&self) -> Result<Vec<Question>> {
        let _guard = self.lock.lock().await;
        let data: QuestionsData = read_json(&self.questions_path).await?;
        Ok(data.questions.into_iter().map(|q| q.question).collect())
    }

    /// Record an upload or paste and append its questions.
    /// Returns the new total number of questions.
    pub async fn add_questions(&self, file: FileRecord, questions: Vec<Question>) -> Result<usize> {
        let _guard = self.lock.lock().await;
        let mut data: QuestionsData = read_json(&self.questions_path).await?;

        let file_id = file.id;
        data.files.push(file);
        data.questions.extend(
            questions
                .into_iter()
                .map(|q| StoredQuestion::from_source(q, file_id)),
        );

        write_json(&self.questions_path, &data).await?;
        Ok(data.questions.len())
    }

    /// Replace the questions of previously recorded files.
    /// Files not named keep their questions. Returns the new total.
    pub async fn replace_file_questions(&self, updates: Vec<(i64, Vec<Question>)>) -> Result<usize> {
        let _guard = self.lock.lock().await;
        let mut data: QuestionsData = read_json(&self.questions_path).await?;

        for (file_id, questions) in updates {
            data.questions
                .retain(|q| q.source_file_id != Some(file_id));
            if let Some(file) = data.files.iter_mut().find(|f| f.id == file_id) {
                file.question_count = questions.len();
            }
            data.questions.extend(
                questions
                    .into_iter()
                    .map(|q| StoredQuestion::from_source(q, file_id)),
            );
        }

        write_json(&self.questions_path, &data).await?;
        Ok(data.questions.len())
    }

    /// Remove every file record and question
    pub async fn clear_questions(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        write_json(&self.questions_path, &QuestionsData::default()).await
    }

    // === File Repository ===

    /// Get all file records and the total question count
    pub async fn list_files(&self) -> Result<FileListResponse> {
        let _guard = self.lock.lock().await;
        let data: QuestionsData = read_json(&self.questions_path).await?;
        Ok(FileListResponse {
            total_questions: data.questions.len(),
            files: data.files,
        })
    }

    /// Check whether an upload with this content hash was already recorded
    pub async fn find_file_by_hash(&self, content_hash: &str) -> Result<Option<FileRecord>> {
        let _guard = self.lock.lock().await;
        let data: QuestionsData = read_json(&self.questions_path).await?;
        Ok(data
            .files
            .into_iter()
            .find(|f| f.content_hash.as_deref() == Some(content_hash)))
    }

    /// Remove a file record together with the questions it added
    pub async fn delete_file(&self, file_id: i64) -> Result<Option<FileRecord>> {
        let _guard = self.lock.lock().await;
        let mut data: QuestionsData = read_json(&self.questions_path).await?;

        let Some(idx) = data.files.iter().position(|f| f.id == file_id) else {
            return Ok(None);
        };
        let file = data.files.remove(idx);
        data.questions
            .retain(|q| q.source_file_id != Some(file_id));

        write_json(&self.questions_path, &data).await?;
        Ok(Some(file))
    }

    // === Attempt Repository ===

    /// Get all quiz attempts
    pub async fn list_attempts(&self) -> Result<Vec<Attempt>> {
        let _guard = self.lock.lock().await;
        let data: QuizData = read_json(&self.quiz_path).await?;
        Ok(data.attempts)
    }

    /// Get all winners
    pub async fn list_winners(&self) -> Result<Vec<Winner>> {
        let _guard = self.lock.lock().await;
        let data: QuizData = read_json(&self.quiz_path).await?;
        Ok(data.winners)
    }

    /// Store an attempt and, for a winning run, its winner entry
    pub async fn record_attempt(&self, attempt: Attempt, winner: Option<Winner>) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut data: QuizData = read_json(&self.quiz_path).await?;

        data.attempts.push(attempt);
        data.winners.extend(winner);

        write_json(&self.quiz_path, &data).await
    }

    // === Stats ===

    pub async fn stats(&self) -> Result<StatsResponse> {
        let _guard = self.lock.lock().await;
        let quiz: QuizData = read_json(&self.quiz_path).await?;
        let questions: QuestionsData = read_json(&self.questions_path).await?;

        Ok(StatsResponse {
            total_attempts: quiz.attempts.len(),
            total_winners: quiz.winners.len(),
            total_questions: questions.questions.len(),
            total_files: questions.files.len(),
        })
    }
}

async fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

/// Write through a temporary file so a crash never leaves half a document.
async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, serde_json::to_vec_pretty(value)?).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("Question {}?", id),
            options: vec!["a".to_string(), "b".to_string()],
            correct: 0,
        }
    }

    fn upload(id: i64, count: usize) -> FileRecord {
        FileRecord {
            id,
            filename: "quiz.txt".to_string(),
            stored_name: format!("{}-quiz.txt", id),
            upload_date: Utc::now(),
            question_count: count,
            content_hash: Some(format!("hash-{}", id)),
        }
    }

    #[tokio::test]
    async fn test_open_creates_documents() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).await.unwrap();

        assert!(dir.path().join(QUESTIONS_FILE).exists());
        assert!(dir.path().join(QUIZ_FILE).exists());
        assert_eq!(db.stats().await.unwrap(), StatsResponse::default());
    }

    #[tokio::test]
    async fn test_add_and_delete_file_questions() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).await.unwrap();

        assert_eq!(db.add_questions(upload(1, 2), vec![question(10), question(11)]).await.unwrap(), 2);
        assert_eq!(db.add_questions(upload(2, 1), vec![question(12)]).await.unwrap(), 3);

        let deleted = db.delete_file(1).await.unwrap().unwrap();
        assert_eq!(deleted.id, 1);

        let ids: Vec<i64> = db.all_questions().await.unwrap().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![12]);
        assert!(db.delete_file(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_file_questions() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).await.unwrap();
        db.add_questions(upload(1, 1), vec![question(10)]).await.unwrap();
        db.add_questions(FileRecord::pasted(2, 1), vec![question(20)]).await.unwrap();

        let total = db
            .replace_file_questions(vec![(1, vec![question(30), question(31)])])
            .await
            .unwrap();
        assert_eq!(total, 3);

        let listing = db.list_files().await.unwrap();
        assert_eq!(listing.files[0].question_count, 2);
        assert_eq!(listing.files[1].question_count, 1);
    }

    #[tokio::test]
    async fn test_find_file_by_hash() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).await.unwrap();
        db.add_questions(upload(7, 0), vec![]).await.unwrap();

        assert_eq!(db.find_file_by_hash("hash-7").await.unwrap().unwrap().id, 7);
        assert!(db.find_file_by_hash("hash-8").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_attempts_and_winners() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).await.unwrap();
        let now = Utc::now();

        let attempt = Attempt {
            id: 1,
            player_name: "Sam".to_string(),
            score: 10,
            total_questions: 10,
            percentage: 100,
            answers: serde_json::json!([0, 1]),
            is_winner: true,
            timestamp: now,
        };
        let winner = Winner {
            id: 2,
            player_name: "Sam".to_string(),
            score: 10,
            total_questions: 10,
            timestamp: now,
        };
        db.record_attempt(attempt.clone(), Some(winner.clone())).await.unwrap();
        db.record_attempt(Attempt { id: 3, is_winner: false, ..attempt }, None).await.unwrap();

        assert_eq!(db.list_attempts().await.unwrap().len(), 2);
        assert_eq!(db.list_winners().await.unwrap(), vec![winner]);
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let db = Database::open(dir.path()).await.unwrap();
            db.add_questions(upload(1, 1), vec![question(10)]).await.unwrap();
        }

        let db = Database::open(dir.path()).await.unwrap();
        assert_eq!(db.all_questions().await.unwrap(), vec![question(10)]);

        db.clear_questions().await.unwrap();
        assert!(db.all_questions().await.unwrap().is_empty());
    }
}
