//! Turning uploads and pasted text into questions.

use std::sync::Arc;

use quiz_core::{ExtractError, Extractor, IdGenerator, ParseReport};
use sha2::{Digest, Sha256};

use crate::config::ParserPresets;
use crate::services::extract::TextExtractor;

/// Runs the question extractor for both entry points and logs what it
/// dropped or guessed.
pub struct IngestService {
    document: Extractor,
    pasted: Extractor,
    text: Box<dyn TextExtractor>,
    ids: Arc<dyn IdGenerator>,
}

impl IngestService {
    pub fn new(
        presets: &ParserPresets,
        text: Box<dyn TextExtractor>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            document: Extractor::new(&presets.document),
            pasted: Extractor::new(&presets.pasted),
            text,
            ids,
        }
    }

    /// Extract plain text from an uploaded document.
    ///
    /// Returns None when the document cannot be read as text.
    pub fn extract_text(&self, source: &str, content: &[u8]) -> Option<String> {
        match self.text.extract(content) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("Could not extract text from {}: {}", source, e);
                None
            }
        }
    }

    /// Questions from an uploaded document, parsed with the document preset.
    /// An unreadable document yields an empty report without parsing.
    pub fn parse_document(&self, source: &str, content: &[u8]) -> ParseReport {
        let Some(text) = self.extract_text(source, content) else {
            return ParseReport::default();
        };

        let report = self.document.parse_with_report(&text, &*self.ids);
        log_report(source, &report);
        report
    }

    /// Questions from pasted text, parsed with the pasted preset.
    /// Blank text or text without any question is an error.
    pub fn parse_pasted(&self, text: &str) -> Result<ParseReport, ExtractError> {
        let report = self.pasted.extract_required(text, &*self.ids)?;
        log_report("pasted text", &report);
        Ok(report)
    }
}

fn log_report(source: &str, report: &ParseReport) {
    for warning in &report.warnings {
        tracing::warn!("{}: {}", source, warning);
    }
    tracing::info!(
        "Parsed {} questions from {} ({} warnings)",
        report.questions.len(),
        source,
        report.warnings.len()
    );
}

/// Calculate SHA256 hash of content.
pub fn hash_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}
