use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::models::question::{AnswerOption, Question, QuestionType};
use crate::models::test::{Test, TestMetadata};
use crate::services::validation_service;

const AI_QUESTION_POINTS: f64 = 5.0;
const DEFAULT_AI_TITLE: &str = "AI Generated Test";
const DEFAULT_AI_DURATION: i32 = 30;
const DEFAULT_AI_GRADE_LEVEL: i32 = 9;

/// Upstream question type names mapped to the platform wire names. Values
/// already in wire form pass through the table untouched.
const QUESTION_TYPE_ALIASES: &[(&str, &str)] = &[
    ("multiple_choice", "multipleChoice"),
    ("short_answer", "shortAnswer"),
];

/// Parses a raw upstream string and normalizes it. The generation call is
/// expected to return JSON but is not trusted to.
pub fn normalize_ai_payload_str(raw: &str) -> Result<Test> {
    let payload: JsonValue = serde_json::from_str(raw).map_err(|e| {
        Error::Normalization(format!("upstream AI response was not valid JSON: {}", e))
    })?;
    normalize_ai_payload(&payload)
}

/// Converts an AI-generated test payload, in either of the two known field
/// naming conventions, into a canonical draft `Test` ready for validation.
///
/// Malformed input (no `questions` list, a question without text, an
/// unrecognizable question type) is fatal for the whole call; no partial
/// document is ever returned.
pub fn normalize_ai_payload(payload: &JsonValue) -> Result<Test> {
    let raw_questions = payload
        .get("questions")
        .and_then(|q| q.as_array())
        .ok_or_else(|| Error::Normalization("AI payload is missing a 'questions' list".into()))?;

    let mut questions = Vec::with_capacity(raw_questions.len());
    for (idx, raw) in raw_questions.iter().enumerate() {
        let question = normalize_question(raw).map_err(|e| match e {
            Error::Normalization(msg) => {
                Error::Normalization(format!("question {}: {}", idx + 1, msg))
            }
            other => other,
        })?;
        questions.push(question);
    }

    let title = string_field(payload, &["title"])
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_AI_TITLE)
        .to_string();
    let instructions = string_field(payload, &["instructions"]);
    let duration =
        int_field(payload, &["estimated_time", "estimatedTime"]).unwrap_or(DEFAULT_AI_DURATION);
    let answer_key = string_field(payload, &["answer_key", "answerKey"]).unwrap_or("");
    let subject = string_field(payload, &["subject"]).unwrap_or("");
    let grade_level =
        int_field(payload, &["grade_level", "gradeLevel"]).unwrap_or(DEFAULT_AI_GRADE_LEVEL);

    tracing::debug!(
        question_count = questions.len(),
        duration,
        "normalized AI test payload"
    );

    let mut test = Test::new_ai_draft(title, questions);
    test.description = Some(instructions.unwrap_or("").to_string());
    test.instructions = instructions.map(str::to_string);
    test.answer_key = Some(answer_key.to_string());
    test.duration = duration;
    test.ai_generated_content = Some(serde_json::to_string(payload)?);
    test.metadata = TestMetadata {
        topics: vec![],
        subject: Some(subject.to_string()),
        grade_level: Some(grade_level),
        curriculum: None,
        standards: vec![],
    };
    Ok(test)
}

/// Parse, normalize and validate in one pass, so no unvalidated document
/// ever reaches a persistence attempt.
pub fn import_ai_test(raw: &str) -> Result<Test> {
    let mut test = normalize_ai_payload_str(raw)?;
    validation_service::validate_for_save(&mut test)?;
    Ok(test)
}

fn normalize_question(raw: &JsonValue) -> Result<Question> {
    let original_text = raw
        .get("question")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::Normalization("missing question text".into()))?;
    let question_text = original_text.trim();
    if question_text.is_empty() {
        return Err(Error::Normalization("missing question text".into()));
    }

    let type_raw = raw
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or("multipleChoice");
    let question_type = resolve_question_type(type_raw)?;

    let answer = raw.get("answer");

    let mut options = Vec::new();
    let mut correct_answer = None;

    if question_type == QuestionType::MultipleChoice {
        options = raw
            .get("options")
            .and_then(|v| v.as_array())
            .map(|opts| {
                opts.iter()
                    .enumerate()
                    .map(|(pos, opt)| {
                        let text = value_as_text(opt);
                        AnswerOption {
                            is_correct: answer_marks_option(answer, pos, &text),
                            text,
                            explanation: None,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
    } else if question_type.requires_correct_answer() {
        correct_answer = answer.map(value_as_text);
    }

    Ok(Question {
        question_text: question_text.to_string(),
        question_type,
        options,
        correct_answer,
        original_question: Some(original_text.to_string()),
        points: AI_QUESTION_POINTS,
        difficulty: Default::default(),
        tags: vec![],
        hints: vec![],
        media: None,
    })
}

fn resolve_question_type(raw: &str) -> Result<QuestionType> {
    let canonical = QUESTION_TYPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == raw)
        .map(|(_, wire)| *wire)
        .unwrap_or(raw);

    QuestionType::from_wire(canonical)
        .ok_or_else(|| Error::Normalization(format!("unrecognized question type '{}'", raw)))
}

/// The upstream answer marks an option as correct either by zero-based
/// index or by literal text match. Upstream data is not trusted, so zero
/// or multiple matches across the option list are tolerated.
fn answer_marks_option(answer: Option<&JsonValue>, position: usize, text: &str) -> bool {
    let Some(answer) = answer else {
        return false;
    };
    if answer.as_i64() == Some(position as i64) {
        return true;
    }
    answer.as_str() == Some(text)
}

fn value_as_text(value: &JsonValue) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

fn string_field<'a>(payload: &'a JsonValue, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| payload.get(key).and_then(|v| v.as_str()))
}

/// Integer fields arrive as numbers or numeric strings depending on the
/// model run; anything else falls back to the caller's default.
fn int_field(payload: &JsonValue, keys: &[&str]) -> Option<i32> {
    keys.iter().find_map(|key| {
        let value = payload.get(key)?;
        value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    })
}
