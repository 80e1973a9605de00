//! Admin endpoints: question uploads, pastes and maintenance

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderName},
    Json,
};
use chrono::Utc;
use quiz_core::{config::ARROW, render_questions};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::ingest::hash_content;
use crate::AppState;

/// POST /api/admin/upload?filename=quiz.txt
/// Stores the raw document, parses it with the document preset and appends
/// the questions found
pub async fn upload(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<Json<UploadResponse>> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("No file uploaded".to_string()));
    }

    let filename = params
        .filename
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| "upload.txt".to_string());

    let content_hash = hash_content(&body);
    if let Some(existing) = state.db.find_file_by_hash(&content_hash).await? {
        tracing::warn!(
            "{} has the same content as {} (file {})",
            filename,
            existing.filename,
            existing.id
        );
    }

    let stored_name = state.uploads.save(&filename, &body).await?;
    let report = state.ingest.parse_document(&filename, &body);
    let questions_added = report.questions.len();

    let file = FileRecord {
        id: state.ids.next_id(),
        filename,
        stored_name,
        upload_date: Utc::now(),
        question_count: questions_added,
        content_hash: Some(content_hash),
    };
    let total_questions = match state.db.add_questions(file.clone(), report.questions).await {
        Ok(total) => total,
        Err(e) => {
            // No record points at the stored file, so drop it.
            if let Err(cleanup) = state.uploads.delete(&file.stored_name).await {
                tracing::warn!("Could not remove upload {}: {}", file.stored_name, cleanup);
            }
            return Err(e);
        }
    };

    Ok(Json(UploadResponse {
        success: true,
        file,
        questions_added,
        total_questions,
        warnings: report.warnings,
    }))
}

/// POST /api/admin/paste
/// Parses pasted text with the pasted preset
pub async fn paste(
    State(state): State<AppState>,
    Json(payload): Json<PasteRequest>,
) -> Result<Json<PasteResponse>> {
    let report = state.ingest.parse_pasted(&payload.text)?;
    let questions_added = report.questions.len();
    let file = FileRecord::pasted(state.ids.next_id(), questions_added);
    let total_questions = state.db.add_questions(file, report.questions).await?;

    Ok(Json(PasteResponse {
        success: true,
        questions_added,
        total_questions,
        warnings: report.warnings,
    }))
}

/// GET /api/admin/files
pub async fn files(State(state): State<AppState>) -> Result<Json<FileListResponse>> {
    Ok(Json(state.db.list_files().await?))
}

/// DELETE /api/admin/files/:id
/// Removes the file record, its stored upload and the questions it added
pub async fn delete_file(
    State(state): State<AppState>,
    Path(file_id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let file = state
        .db
        .delete_file(file_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("File {}", file_id)))?;

    if !file.is_paste() {
        state.uploads.delete(&file.stored_name).await?;
    }

    tracing::info!("Deleted file {} ({})", file.id, file.filename);
    Ok(Json(MessageResponse::ok("File deleted")))
}

/// DELETE /api/admin/questions
/// Clears the question bank and every stored upload
pub async fn clear_questions(State(state): State<AppState>) -> Result<Json<MessageResponse>> {
    state.db.clear_questions().await?;
    state.uploads.clear().await?;

    Ok(Json(MessageResponse::ok("All questions cleared")))
}

/// GET /api/admin/debug/:stored_name
/// Shows the text extracted from a stored upload
pub async fn debug_text(
    State(state): State<AppState>,
    Path(stored_name): Path<String>,
) -> Result<Json<DebugTextResponse>> {
    let content = state.uploads.read(&stored_name).await?;
    let raw_text = state
        .ingest
        .extract_text(&stored_name, &content)
        .ok_or_else(|| ApiError::BadRequest(format!("{} is not readable text", stored_name)))?;

    let lines = raw_text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(String::from)
        .collect();

    Ok(Json(DebugTextResponse { raw_text, lines }))
}

/// POST /api/admin/reparse
/// Parses every stored upload again, replacing the questions it added.
/// Pasted questions are kept as they are.
pub async fn reparse(State(state): State<AppState>) -> Result<Json<ReparseResponse>> {
    let listing = state.db.list_files().await?;
    let mut updates = Vec::new();

    for file in listing.files.iter().filter(|f| !f.is_paste()) {
        if !state.uploads.exists(&file.stored_name).await? {
            tracing::warn!("Upload {} missing, keeping its questions", file.stored_name);
            continue;
        }

        let content = state.uploads.read(&file.stored_name).await?;
        let report = state.ingest.parse_document(&file.filename, &content);
        updates.push((file.id, report.questions));
    }

    let total_questions = state.db.replace_file_questions(updates).await?;
    tracing::info!("Reparse finished with {} questions", total_questions);

    Ok(Json(ReparseResponse {
        success: true,
        total_questions,
    }))
}

/// GET /api/admin/export
/// All stored questions in the document text format
pub async fn export(
    State(state): State<AppState>,
) -> Result<([(HeaderName, &'static str); 1], String)> {
    let questions = state.db.all_questions().await?;
    let marker = state
        .config
        .parsers
        .document
        .correct_markers
        .first()
        .map(String::as_str)
        .unwrap_or(ARROW);

    Ok((
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_questions(&questions, marker),
    ))
}

/// GET /api/admin/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    Ok(Json(state.db.stats().await?))
}
