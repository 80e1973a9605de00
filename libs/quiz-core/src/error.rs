//! Error types for quiz-core.
//!
//! Parsing itself never fails. These errors cover configuration checks and
//! the boundary where a caller decides that a parse produced nothing usable.

use thiserror::Error;

/// Result type alias using ExtractError.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors raised while validating a parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("correct-answer marker set is empty")]
    NoMarkers,

    #[error("correct-answer marker {index} is blank")]
    BlankMarker { index: usize },
}

/// Boundary-level outcomes of an extraction that produced no questions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no text provided")]
    EmptyInput,

    #[error("no questions found in {lines} non-blank lines")]
    NoQuestionsFound { lines: usize },
}
