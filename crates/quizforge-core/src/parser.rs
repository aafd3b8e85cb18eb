//! Extraction of question lists from raw model output.
//!
//! Models wrap JSON in markdown fences, prepend prose, or invent their own
//! ids. The parser strips fences, takes the outermost bracketed span, decodes
//! it and re-numbers every question. Field contents are not validated.

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::model::{question_id, Question, QuestionType};

/// Parse a raw model response into questions with ids `q1..qN`.
pub fn parse_questions(raw: &str) -> Result<Vec<Question>, ParseError> {
    let cleaned = strip_code_fences(raw);
    let cleaned = cleaned.trim();

    let span = bracketed_span(cleaned).ok_or(ParseError::MalformedResponse { detail: None })?;

    let value: Value = serde_json::from_str(span).map_err(|e| ParseError::MalformedResponse {
        detail: Some(e.to_string()),
    })?;

    let Value::Array(items) = value else {
        return Err(ParseError::NotAnArray);
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(fields) => Ok(question_from_fields(i, fields)),
            other => Err(ParseError::MalformedResponse {
                detail: Some(format!("element {} is not an object: {other}", i + 1)),
            }),
        })
        .collect()
}

/// Remove every triple-backtick marker, together with a language tag written
/// directly after it and the whitespace that follows.
pub fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        rest = rest.trim_start();
    }
    out.push_str(rest);
    out
}

/// Substring from the first `[` to the last `]`, inclusive.
fn bracketed_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

fn question_from_fields(index: usize, fields: &Map<String, Value>) -> Question {
    let kind = fields
        .get("type")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<QuestionType>().ok())
        .unwrap_or(QuestionType::Mcq);

    let options = fields.get("options").and_then(Value::as_array).map(|opts| {
        opts.iter().map(text_of).collect::<Vec<_>>()
    });

    Question {
        id: question_id(index),
        kind,
        question: fields.get("question").map(text_of).unwrap_or_default(),
        options,
        correct_answer: fields.get("correctAnswer").map(text_of).unwrap_or_default(),
        explanation: fields
            .get("explanation")
            .filter(|v| !v.is_null())
            .map(text_of),
    }
}

/// Strings are taken as-is; other scalars (e.g. a boolean answer) use their
/// JSON text.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARRAY: &str = r#"[{"type":"mcq","question":"Capital of France?","options":["Paris","London","Rome","Berlin"],"correctAnswer":"Paris","explanation":"Paris is the capital."}]"#;

    #[test]
    fn ids_are_renumbered_in_order() {
        let raw = r#"[
            {"id":"x","type":"true_false","question":"A","correctAnswer":"true"},
            {"id":"x","type":"true_false","question":"B","correctAnswer":"false"},
            {"id":"q9","type":"short_answer","question":"C","correctAnswer":"c"}
        ]"#;
        let questions = parse_questions(raw).unwrap();
        let ids: Vec<_> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
        let texts: Vec<_> = questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);
    }

    #[test]
    fn fenced_and_bare_arrays_parse_identically() {
        let fenced = format!("```json\n{ARRAY}\n```");
        assert_eq!(
            parse_questions(&fenced).unwrap(),
            parse_questions(ARRAY).unwrap()
        );

        let untagged = format!("```\n{ARRAY}\n```");
        assert_eq!(
            parse_questions(&untagged).unwrap(),
            parse_questions(ARRAY).unwrap()
        );
    }

    #[test]
    fn surrounding_prose_is_ignored() {
        let raw = format!("Sure! Here are your questions:\n{ARRAY}\nGood luck with the test.");
        let questions = parse_questions(&raw).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, "Paris");
        assert_eq!(questions[0].options.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn missing_brackets_is_malformed() {
        let err = parse_questions("I cannot help with that.").unwrap_err();
        assert!(matches!(err, ParseError::MalformedResponse { detail: None }));

        let err = parse_questions("] backwards [").unwrap_err();
        assert!(matches!(err, ParseError::MalformedResponse { .. }));
    }

    #[test]
    fn invalid_json_is_malformed_with_detail() {
        let err = parse_questions(r#"[{"type":"mcq",}]"#).unwrap_err();
        match err {
            ParseError::MalformedResponse { detail } => assert!(detail.is_some()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_object_element_is_malformed() {
        let err = parse_questions(r#"["just a string"]"#).unwrap_err();
        assert!(matches!(err, ParseError::MalformedResponse { .. }));
    }

    #[test]
    fn inconsistent_answer_keys_pass_through() {
        let raw = r#"[
            {"type":"mcq","question":"Q","options":["a","b"],"correctAnswer":"z"},
            {"type":"true_false","question":"T","correctAnswer":"maybe"},
            {"question":"no type, no answer"}
        ]"#;
        let questions = parse_questions(raw).unwrap();
        assert_eq!(questions[0].options.as_ref().unwrap().len(), 2);
        assert_eq!(questions[0].correct_answer, "z");
        assert_eq!(questions[1].correct_answer, "maybe");
        assert_eq!(questions[2].kind, QuestionType::Mcq);
        assert_eq!(questions[2].correct_answer, "");
    }

    #[test]
    fn boolean_answers_become_text() {
        let raw = r#"[{"type":"true_false","question":"Q","correctAnswer":true}]"#;
        let questions = parse_questions(raw).unwrap();
        assert_eq!(questions[0].correct_answer, "true");
        assert!(questions[0].explanation.is_none());
    }

    #[test]
    fn empty_array_is_accepted() {
        assert!(parse_questions("[]").unwrap().is_empty());
    }

    #[test]
    fn strip_fences_removes_tags() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]\n");
        assert_eq!(strip_code_fences("```JSON [2]```"), "[2]");
        assert_eq!(strip_code_fences("no fences"), "no fences");
    }
}
