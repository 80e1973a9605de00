//! Write questions back out in the numbered/lettered text format.

use crate::types::Question;

/// Render questions numbered from 1, separated by blank lines.
///
/// `marker` is appended to the correct option and should be one of the
/// markers of the configuration the text will be parsed with. Options past
/// the fourth get letters the parser does not read back.
pub fn render_questions(questions: &[Question], marker: &str) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(idx, q)| render_question(idx + 1, q, marker))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one question under the given number.
pub fn render_question(number: usize, question: &Question, marker: &str) -> String {
    let mut out = format!("{}. {}\n", number, question.question);
    for (idx, option) in question.options.iter().enumerate() {
        out.push(option_letter(idx));
        out.push_str(") ");
        out.push_str(option);
        if idx == question.correct {
            out.push(' ');
            out.push_str(marker);
        }
        out.push('\n');
    }
    out
}

fn option_letter(idx: usize) -> char {
    char::from(b'A' + (idx % 26) as u8)
}
