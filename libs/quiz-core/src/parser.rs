//! Multiple-choice question parser.
//!
//! # Format
//! ```text
//! 1. Capital of France?
//! A) London
//! B) Paris *
//! C) Berlin
//! D) Madrid
//!
//! 2) Largest planet?
//! A) Mars B) Jupiter → (J) C) Venus D) Earth
//! ```
//!
//! A numbered line starts a question. Lettered lines add options to it, one
//! per line or several bundled on one line. An option carrying one of the
//! configured correct-answer markers becomes the answer, and the marker is
//! removed from its text. Anything else is ignored.
//!
//! The scan is lenient: a question left with fewer than two options is
//! dropped, a question with no marker answers with its first option, and when
//! several options are marked the last one wins. [`parse_with_report`]
//! returns the same questions together with a warning for each of these.

use crate::config::{MarkerSet, ParserConfig};
use crate::error::{ExtractError, Result};
use crate::ids::IdGenerator;
use crate::types::{LetterCase, ParseReport, ParseWarning, Question};

/// Minimum number of options for a question to be emitted.
pub const MIN_OPTIONS: usize = 2;

/// Parse raw text into questions.
pub fn parse(content: &str, config: &ParserConfig, ids: &dyn IdGenerator) -> Vec<Question> {
    Extractor::new(config).parse(content, ids)
}

/// Parse raw text, also returning the warnings collected along the way.
pub fn parse_with_report(
    content: &str,
    config: &ParserConfig,
    ids: &dyn IdGenerator,
) -> ParseReport {
    Extractor::new(config).parse_with_report(content, ids)
}

/// Parse raw text and treat an empty result as an error.
pub fn extract_required(
    content: &str,
    config: &ParserConfig,
    ids: &dyn IdGenerator,
) -> Result<Vec<Question>> {
    Extractor::new(config)
        .extract_required(content, ids)
        .map(|report| report.questions)
}

/// A parser configuration with its markers compiled, reusable across calls.
#[derive(Debug, Clone)]
pub struct Extractor {
    letter_case: LetterCase,
    markers: MarkerSet,
}

impl Extractor {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            letter_case: config.letter_case,
            markers: MarkerSet::compile(&config.correct_markers),
        }
    }

    pub fn parse(&self, content: &str, ids: &dyn IdGenerator) -> Vec<Question> {
        self.parse_with_report(content, ids).questions
    }

    /// Like [`Extractor::parse_with_report`], but blank input and input
    /// without a single question are errors.
    pub fn extract_required(&self, content: &str, ids: &dyn IdGenerator) -> Result<ParseReport> {
        if content.trim().is_empty() {
            return Err(ExtractError::EmptyInput);
        }

        let report = self.parse_with_report(content, ids);
        if report.questions.is_empty() {
            let lines = content.lines().filter(|l| !l.trim().is_empty()).count();
            return Err(ExtractError::NoQuestionsFound { lines });
        }
        Ok(report)
    }

    pub fn parse_with_report(&self, content: &str, ids: &dyn IdGenerator) -> ParseReport {
        if content.trim().is_empty() {
            return ParseReport::default();
        }

        let mut parser = Parser::new(self, ids);
        for (idx, line) in content.lines().enumerate() {
            parser.process_line(line, idx + 1);
        }
        parser.finalize()
    }
}

struct Draft {
    question: String,
    options: Vec<String>,
    correct: usize,
    marked: usize,
    line: usize,
}

impl Draft {
    fn new(question: &str, line: usize) -> Self {
        Self {
            question: question.to_string(),
            options: Vec::new(),
            correct: 0,
            marked: 0,
            line,
        }
    }
}

struct Parser<'a> {
    extractor: &'a Extractor,
    ids: &'a dyn IdGenerator,
    current: Option<Draft>,
    report: ParseReport,
}

impl<'a> Parser<'a> {
    fn new(extractor: &'a Extractor, ids: &'a dyn IdGenerator) -> Self {
        Self {
            extractor,
            ids,
            current: None,
            report: ParseReport::default(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) {
        match classify(line, self.extractor.letter_case) {
            LineType::Blank | LineType::Other => {}
            LineType::Header(text) => self.handle_header(text, line_num),
            LineType::Option(text) => self.handle_options(&[text], line_num),
            LineType::Bundled(chunks) => self.handle_options(&chunks, line_num),
        }
    }

    fn handle_header(&mut self, text: &str, line_num: usize) {
        self.flush();
        self.current = Some(Draft::new(text, line_num));
    }

    fn handle_options(&mut self, chunks: &[&str], line_num: usize) {
        let Some(draft) = self.current.as_mut() else {
            self.report
                .warnings
                .push(ParseWarning::OrphanOption { line: line_num });
            return;
        };

        let markers = &self.extractor.markers;
        for chunk in chunks {
            let marked = markers.is_marked(chunk);
            let text = if marked {
                markers.strip(chunk)
            } else {
                chunk.to_string()
            };

            // A marked option is kept even when the marker was its only text.
            if text.is_empty() && !marked {
                self.report
                    .warnings
                    .push(ParseWarning::EmptyOption { line: line_num });
                continue;
            }

            // Overwritten on every marker: the last marked option wins.
            if marked {
                draft.correct = draft.options.len();
                draft.marked += 1;
            }
            draft.options.push(text);
        }
    }

    fn flush(&mut self) {
        let Some(draft) = self.current.take() else {
            return;
        };

        if draft.options.len() < MIN_OPTIONS {
            self.report.warnings.push(ParseWarning::DroppedDraft {
                line: draft.line,
                question: draft.question,
                options: draft.options.len(),
            });
            return;
        }

        match draft.marked {
            0 => self.report.warnings.push(ParseWarning::MissingCorrectMarker {
                line: draft.line,
                question: draft.question.clone(),
            }),
            1 => {}
            markers => self.report.warnings.push(ParseWarning::MultipleCorrectMarkers {
                line: draft.line,
                question: draft.question.clone(),
                markers,
            }),
        }

        self.report.questions.push(Question {
            id: self.ids.next_id(),
            question: draft.question,
            options: draft.options,
            correct: draft.correct,
        });
    }

    fn finalize(mut self) -> ParseReport {
        self.flush();
        self.report
    }
}

#[derive(Debug, PartialEq)]
enum LineType<'a> {
    Blank,
    /// `12. text` or `12) text`
    Header(&'a str),
    /// `B) text`
    Option(&'a str),
    /// `A) text B) text C) text`
    Bundled(Vec<&'a str>),
    Other,
}

fn classify(line: &str, case: LetterCase) -> LineType<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineType::Blank;
    }
    if let Some(text) = header_text(trimmed) {
        return LineType::Header(text);
    }

    let positions = letter_markers(trimmed, case);
    if positions.first() != Some(&0) {
        return LineType::Other;
    }

    let mut chunks: Vec<&str> = positions
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            // Letter and ')' are both ASCII.
            let end = positions.get(i + 1).copied().unwrap_or(trimmed.len());
            trimmed[start + 2..end].trim()
        })
        .collect();

    if chunks.len() == 1 {
        LineType::Option(chunks.remove(0))
    } else {
        LineType::Bundled(chunks)
    }
}

/// Text after a leading `<digits>.` or `<digits>)`, if non-empty.
fn header_text(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return None;
    }

    let text = rest
        .strip_prefix('.')
        .or_else(|| rest.strip_prefix(')'))?
        .trim();
    (!text.is_empty()).then_some(text)
}

/// Byte offsets of option letters that open an option (`A)` and so on).
///
/// A letter counts only at the start of the line or after a character that
/// is neither a letter nor `(`, so words like `(used)` and references like
/// `(A)` stay inside option text.
fn letter_markers(line: &str, case: LetterCase) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut prev: Option<char> = None;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let closes = matches!(chars.peek(), Some((_, ')')));
        let boundary = prev.map_or(true, |p| !p.is_alphabetic() && p != '(');
        if closes && boundary && case.accepts(c) {
            positions.push(idx);
        }
        prev = Some(c);
    }

    positions
}
