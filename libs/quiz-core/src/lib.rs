//! Core quiz library shared by the quiz host backend.
//!
//! Provides:
//! - Question extractor turning raw document or pasted text into
//!   multiple-choice questions
//! - Parser presets for document uploads and pasted text
//! - Injectable id generation
//! - Rendering of questions back into the text format
//! - Shared types (Question, ParseReport, ParseWarning, etc.)

pub mod config;
pub mod error;
pub mod ids;
pub mod parser;
pub mod render;
pub mod types;

pub use config::ParserConfig;
pub use error::{ConfigError, ExtractError, Result};
pub use ids::{IdGenerator, SequentialIds};
pub use parser::{extract_required, parse, parse_with_report, Extractor, MIN_OPTIONS};
pub use render::{render_question, render_questions};
pub use types::{LetterCase, ParseReport, ParseWarning, Question};
