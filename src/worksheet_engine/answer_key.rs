//! Answer-key lines and the JSON document handed to the worksheet page and
//! the PDF exporter.

use serde_json::{json, Value};

use crate::worksheet_engine::models::{Problem, Worksheet};

/// Text shown for a problem in the answer key.
///
/// `answer_key_html` wins outright. Otherwise the answer (markup preferred)
/// with `answer_prefix` in front, e.g. `x = 4`.
pub fn answer_line(problem: &Problem) -> String {
    if let Some(key) = &problem.answer_key_html {
        return key.clone();
    }
    let answer = problem
        .answer_html
        .as_deref()
        .or(problem.answer.as_deref())
        .unwrap_or_default();
    match &problem.answer_prefix {
        Some(prefix) => format!("{prefix}{answer}"),
        None => answer.to_string(),
    }
}

/// Plain-text version of [`answer_line`] for terminals and logs.
pub fn answer_text(problem: &Problem) -> String {
    let answer = problem
        .answer
        .as_deref()
        .or(problem.answer_html.as_deref())
        .unwrap_or_default();
    format!("{}{answer}", problem.answer_prefix.as_deref().unwrap_or_default())
}

/// Question text, plain version preferred.
pub fn question_text(problem: &Problem) -> &str {
    problem
        .question
        .as_deref()
        .or(problem.question_html.as_deref())
        .unwrap_or_default()
}

/// Note shown under the title when the worksheet repeats problems.
pub const TRUNCATED_NOTE: &str =
    "Not enough different problems for this many questions; some are repeated.";

fn problem_json(number: usize, problem: &Problem) -> Value {
    json!({
        "number": number,
        "question": problem.question,
        "questionHtml": problem.question_html,
        "answer": answer_line(problem),
    })
}

/// The worksheet as the rendering layer consumes it.
pub fn worksheet_json(sheet: &Worksheet) -> Value {
    let problems: Vec<Value> = sheet
        .problems
        .iter()
        .enumerate()
        .map(|(i, p)| problem_json(i + 1, p))
        .collect();

    json!({
        "id": sheet.id,
        "type": sheet.type_id,
        "title": sheet.title,
        "instruction": sheet.instruction,
        "difficulty": sheet.difficulty,
        "options": sheet.options,
        "truncated": sheet.truncated,
        "note": if sheet.truncated { Some(TRUNCATED_NOTE) } else { None },
        "problems": problems,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet_engine::{
        generator::{generate_worksheet, WorksheetRequest},
        registry::Registry,
    };

    #[test]
    fn prefix_and_key_html_are_applied() {
        let p = Problem::text("2x = 8", "4").with_prefix("x = ");
        assert_eq!(answer_line(&p), "x = 4");
        assert_eq!(answer_text(&p), "x = 4");

        let p = Problem::text("3 \u{2610} 5", "<").with_key_html("3 &lt; 5");
        assert_eq!(answer_line(&p), "3 &lt; 5");
        assert_eq!(answer_text(&p), "<");
    }

    #[test]
    fn markup_answers_are_preferred_in_the_key() {
        let p = Problem::html("1/2 + 1/4 =", "q", "3/4", "<b>3/4</b>");
        assert_eq!(answer_line(&p), "<b>3/4</b>");
        assert_eq!(question_text(&p), "1/2 + 1/4 =");
    }

    #[test]
    fn prefix_does_not_change_dedup_key() {
        let bare = Problem::text("x + 1 = 3", "2");
        assert_eq!(bare.clone().with_prefix("x = ").dedup_key(), bare.dedup_key());
    }

    #[test]
    fn json_export_numbers_problems() {
        let mut request = WorksheetRequest::new("equations");
        request.id = Some("demo".into());
        request.count = 3;
        let sheet = generate_worksheet(&Registry::builtin(), request);
        let doc = worksheet_json(&sheet);
        assert_eq!(doc["id"], sheet.id.as_str());
        assert_eq!(doc["difficulty"], "normal");
        assert_eq!(doc["problems"].as_array().map(Vec::len), Some(3));
        assert_eq!(doc["problems"][2]["number"], 3);
        assert!(doc["problems"][0]["answer"].as_str().unwrap().starts_with("x = "));
        assert!(doc["note"].is_null());
    }
}
