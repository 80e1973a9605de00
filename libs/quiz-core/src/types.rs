//! Core types for the quiz question extractor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct: usize,
}

/// Which option letters are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterCase {
    /// Only `A)` through `D)`.
    Upper,
    /// `A)` through `D)` and `a)` through `d)`.
    Insensitive,
}

impl Default for LetterCase {
    fn default() -> Self {
        Self::Upper
    }
}

impl LetterCase {
    /// Whether `c` is an option letter under this policy.
    pub fn accepts(self, c: char) -> bool {
        match self {
            Self::Upper => matches!(c, 'A'..='D'),
            Self::Insensitive => matches!(c, 'A'..='D' | 'a'..='d'),
        }
    }
}

/// Non-fatal observation made while scanning. Line numbers are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// A question block ended with fewer than two options and was discarded.
    DroppedDraft {
        line: usize,
        question: String,
        options: usize,
    },
    /// A question was emitted without any option carrying a correct marker.
    MissingCorrectMarker { line: usize, question: String },
    /// More than one option carried a correct marker; the last one was kept.
    MultipleCorrectMarkers {
        line: usize,
        question: String,
        markers: usize,
    },
    /// An unmarked option line carried no text and was skipped.
    EmptyOption { line: usize },
    /// An option line appeared before any question header.
    OrphanOption { line: usize },
}

impl ParseWarning {
    pub fn line(&self) -> usize {
        match self {
            Self::DroppedDraft { line, .. }
            | Self::MissingCorrectMarker { line, .. }
            | Self::MultipleCorrectMarkers { line, .. }
            | Self::EmptyOption { line }
            | Self::OrphanOption { line } => *line,
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DroppedDraft {
                line,
                question,
                options,
            } => write!(
                f,
                "line {}: dropped question {:?} with {} option(s)",
                line, question, options
            ),
            Self::MissingCorrectMarker { line, question } => write!(
                f,
                "line {}: question {:?} has no correct marker, first option used",
                line, question
            ),
            Self::MultipleCorrectMarkers {
                line,
                question,
                markers,
            } => write!(
                f,
                "line {}: question {:?} has {} correct markers, last one used",
                line, question, markers
            ),
            Self::EmptyOption { line } => write!(f, "line {}: skipped empty option", line),
            Self::OrphanOption { line } => {
                write!(f, "line {}: option before any question ignored", line)
            }
        }
    }
}

/// Questions plus the warnings collected while producing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    pub questions: Vec<Question>,
    pub warnings: Vec<ParseWarning>,
}
