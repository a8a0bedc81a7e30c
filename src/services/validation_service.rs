use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::{Error, FieldError, Result, ValidationFailure};
use crate::models::question::{Question, QuestionType};
use crate::models::test::{Test, TestStatus};
use crate::utils::time;
use crate::utils::validation::{is_valid_media_url, to_wire_field};

const MAX_TAG_LEN: usize = 50;
const MAX_HINT_LEN: usize = 500;

/// Checks every rule a test document must satisfy before it may be
/// persisted, then applies the save-time mutations on success.
///
/// All rules are evaluated; a failing document comes back with the complete
/// list of (field, message) violations rather than just the first one.
/// On success the document is mutated in place: tags are lowercased,
/// `passing_score` is clamped to the recomputed total points, and the
/// timestamps are refreshed. There is no other silent adjustment.
pub fn validate_for_save(test: &mut Test) -> Result<()> {
    let mut errors: Vec<FieldError> = Vec::new();

    if let Err(field_errors) = test.validate() {
        flatten_errors("", &field_errors, &mut errors);
    }
    check_schedule(test, &mut errors);
    check_questions(test, &mut errors);

    if !errors.is_empty() {
        return Err(Error::Validation(ValidationFailure { errors }));
    }

    apply_save_transforms(test);
    Ok(())
}

/// Date rules. Drafts may keep a past scheduled date, but a deadline must
/// always come after the scheduled date.
fn check_schedule(test: &Test, errors: &mut Vec<FieldError>) {
    if test.status != TestStatus::Draft && test.scheduled_date <= time::now() {
        errors.push(FieldError::new(
            "scheduledDate",
            "Scheduled date must be in the future",
        ));
    }

    if let Some(deadline) = test.deadline {
        if deadline <= test.scheduled_date {
            errors.push(FieldError::new(
                "deadline",
                "Deadline must be after the scheduled date",
            ));
        }
    }
}

fn check_questions(test: &Test, errors: &mut Vec<FieldError>) {
    if test.status != TestStatus::Draft && test.questions.is_empty() {
        errors.push(FieldError::new(
            "questions",
            "A test must have at least one question",
        ));
    }

    for (idx, question) in test.questions.iter().enumerate() {
        check_question(idx, question, errors);
    }
}

fn check_question(idx: usize, question: &Question, errors: &mut Vec<FieldError>) {
    match question.question_type {
        QuestionType::MultipleChoice => {
            let count = question.options.len();
            if !(2..=10).contains(&count) {
                errors.push(FieldError::new(
                    format!("questions[{}].options", idx),
                    "Multiple choice questions must have between 2 and 10 options",
                ));
            }
        }
        QuestionType::TrueFalse => {
            if question.options.len() != 2 {
                errors.push(FieldError::new(
                    format!("questions[{}].options", idx),
                    "True/false questions must have exactly 2 options",
                ));
            }
        }
        _ => {}
    }

    if question.question_type.requires_correct_answer() {
        let missing = question
            .correct_answer
            .as_deref()
            .map(|a| a.trim().is_empty())
            .unwrap_or(true);
        if missing {
            errors.push(FieldError::new(
                format!("questions[{}].correctAnswer", idx),
                format!(
                    "A correct answer is required for {} questions",
                    question.question_type.as_str()
                ),
            ));
        }
    }

    if let Some(media) = question.media.as_deref() {
        if !is_valid_media_url(media) {
            errors.push(FieldError::new(
                format!("questions[{}].media", idx),
                "Media must be a valid http or https URL",
            ));
        }
    }

    for (tag_idx, tag) in question.tags.iter().enumerate() {
        if tag.chars().count() > MAX_TAG_LEN {
            errors.push(FieldError::new(
                format!("questions[{}].tags[{}]", idx, tag_idx),
                "Tags cannot exceed 50 characters",
            ));
        }
    }

    for (hint_idx, hint) in question.hints.iter().enumerate() {
        if hint.chars().count() > MAX_HINT_LEN {
            errors.push(FieldError::new(
                format!("questions[{}].hints[{}]", idx, hint_idx),
                "Hints cannot exceed 500 characters",
            ));
        }
    }
}

fn apply_save_transforms(test: &mut Test) {
    for question in &mut test.questions {
        for tag in &mut question.tags {
            if tag.chars().any(|c| c.is_uppercase()) {
                *tag = tag.to_lowercase();
            }
        }
    }

    // Total points can shrink as questions are edited; the passing score is
    // clamped rather than rejected so unrelated edits are never blocked.
    let total = test.total_points();
    if let Some(passing) = test.passing_score {
        if passing > total {
            tracing::warn!(
                passing_score = passing,
                total_points = total,
                "clamping passing score to total points"
            );
            test.passing_score = Some(total);
        }
    }

    let now = time::now();
    if test.created_at.is_none() {
        test.created_at = Some(now);
    }
    test.updated_at = Some(now);
}

/// Walks a `validator::ValidationErrors` tree into flat wire-format paths,
/// including list indices for embedded questions.
fn flatten_errors(prefix: &str, validation: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in validation.errors() {
        let path = format!("{}{}", prefix, to_wire_field(field));
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", path));
                    out.push(FieldError::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                flatten_errors(&format!("{}.", path), inner, out);
            }
            ValidationErrorsKind::List(items) => {
                for (item_idx, inner) in items {
                    flatten_errors(&format!("{}[{}].", path, item_idx), inner, out);
                }
            }
        }
    }
}
