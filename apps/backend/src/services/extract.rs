//! Text extraction for uploaded documents.
//!
//! The question parser only ever sees plain text. Turning an uploaded file
//! into that text happens here, and a failure never reaches the parser: the
//! caller treats it as "no questions available".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document is empty")]
    Empty,
    #[error("document is not valid UTF-8 text (invalid byte at offset {offset})")]
    NotText { offset: usize },
}

/// Turns the bytes of an uploaded document into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, content: &[u8]) -> Result<String, ExtractionError>;
}

/// Accepts UTF-8 text files, with or without a byte order mark.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, content: &[u8]) -> Result<String, ExtractionError> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
        if content.is_empty() {
            return Err(ExtractionError::Empty);
        }

        let text = std::str::from_utf8(content).map_err(|e| ExtractionError::NotText {
            offset: e.valid_up_to(),
        })?;
        Ok(text.replace("\r\n", "\n").replace('\r', "\n"))
    }
}
