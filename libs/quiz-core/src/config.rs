//! Parser configuration and the compiled correct-answer marker set.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::error::ConfigError;
use crate::types::LetterCase;

/// Arrow glyph authors put next to the correct option.
pub const ARROW: &str = "→";

/// Settings for one extraction entry point.
///
/// Document uploads and pasted text run the same scan and differ only in
/// these values; see [`ParserConfig::document`] and [`ParserConfig::pasted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub letter_case: LetterCase,
    /// Substrings that flag an option as the correct answer. Whitespace
    /// inside a marker matches any run of whitespace in the option text.
    pub correct_markers: Vec<String>,
}

impl ParserConfig {
    pub fn new<I, S>(letter_case: LetterCase, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            letter_case,
            correct_markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Preset for text extracted from an uploaded document.
    pub fn document() -> Self {
        Self::new(LetterCase::Upper, ["→ (J)", "(J)", ARROW, "*"])
    }

    /// Preset for text typed or pasted by an admin.
    pub fn pasted() -> Self {
        Self::new(LetterCase::Insensitive, ["→ (J)", "(J)", "(j)", ARROW])
    }

    /// Reject marker sets that would flag every option or none.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.correct_markers.is_empty() {
            return Err(ConfigError::NoMarkers);
        }
        if let Some(index) = self
            .correct_markers
            .iter()
            .position(|m| m.trim().is_empty())
        {
            return Err(ConfigError::BlankMarker { index });
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::document()
    }
}

/// Correct-answer markers compiled to patterns, longest marker first so a
/// combined marker is removed before the pieces it is made of.
///
/// Detection is case-sensitive. Stripping is not, so once an option is
/// flagged a lowercase `(j)` next to the flagging marker goes with it.
#[derive(Debug, Clone)]
pub(crate) struct MarkerSet {
    detect: Vec<Regex>,
    strip: Vec<Regex>,
}

impl MarkerSet {
    /// Blank markers are skipped rather than reported; call
    /// [`ParserConfig::validate`] to surface them.
    pub(crate) fn compile(markers: &[String]) -> Self {
        let mut markers: Vec<&str> = markers
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .collect();
        // Stable sort: equal lengths keep their configured order.
        markers.sort_by_key(|m| Reverse(m.chars().count()));
        markers.dedup();

        let compile_all = |case_insensitive: bool| -> Vec<Regex> {
            markers
                .iter()
                .filter_map(|m| {
                    RegexBuilder::new(&marker_pattern(m))
                        .case_insensitive(case_insensitive)
                        .build()
                        .ok()
                })
                .collect()
        };

        Self {
            detect: compile_all(false),
            strip: compile_all(true),
        }
    }

    pub(crate) fn is_marked(&self, text: &str) -> bool {
        self.detect.iter().any(|p| p.is_match(text))
    }

    /// Remove every marker occurrence along with the whitespace around it.
    pub(crate) fn strip(&self, text: &str) -> String {
        let mut cleaned = text.to_string();
        for pattern in &self.strip {
            if pattern.is_match(&cleaned) {
                cleaned = pattern.replace_all(&cleaned, " ").into_owned();
            }
        }
        cleaned.trim().to_string()
    }
}

fn marker_pattern(marker: &str) -> String {
    let body = marker
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s*");
    format!(r"\s*{}\s*", body)
}
