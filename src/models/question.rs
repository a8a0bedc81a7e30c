use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[validate(length(
        min = 5,
        max = 2000,
        message = "Question text must be between 5 and 2000 characters long"
    ))]
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    pub correct_answer: Option<String>,
    /// Verbatim upstream question text, kept for audit when the question was
    /// normalized from an AI payload.
    pub original_question: Option<String>,
    #[serde(default = "default_points")]
    #[validate(range(min = 0.0, max = 100.0, message = "Points must be between 0 and 100"))]
    pub points: f64,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    pub media: Option<String>,
}

fn default_points() -> f64 {
    5.0
}

/// One answer choice. Options have no identity of their own; they are
/// addressed by position within the parent question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "multipleChoice")]
    MultipleChoice,
    #[serde(rename = "shortAnswer")]
    ShortAnswer,
    #[serde(rename = "essay")]
    Essay,
    #[serde(rename = "finalanswer")]
    FinalAnswer,
    #[serde(rename = "true-false")]
    TrueFalse,
    #[serde(rename = "matching")]
    Matching,
    #[serde(rename = "fill-in-the-blank")]
    FillInTheBlank,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multipleChoice",
            QuestionType::ShortAnswer => "shortAnswer",
            QuestionType::Essay => "essay",
            QuestionType::FinalAnswer => "finalanswer",
            QuestionType::TrueFalse => "true-false",
            QuestionType::Matching => "matching",
            QuestionType::FillInTheBlank => "fill-in-the-blank",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "multipleChoice" => Some(QuestionType::MultipleChoice),
            "shortAnswer" => Some(QuestionType::ShortAnswer),
            "essay" => Some(QuestionType::Essay),
            "finalanswer" => Some(QuestionType::FinalAnswer),
            "true-false" => Some(QuestionType::TrueFalse),
            "matching" => Some(QuestionType::Matching),
            "fill-in-the-blank" => Some(QuestionType::FillInTheBlank),
            _ => None,
        }
    }

    /// Whether this type expects a free-text `correctAnswer` instead of an
    /// option list.
    pub fn requires_correct_answer(&self) -> bool {
        matches!(self, QuestionType::ShortAnswer | QuestionType::FinalAnswer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_uses_platform_wire_names() {
        let variants = [
            QuestionType::MultipleChoice,
            QuestionType::ShortAnswer,
            QuestionType::Essay,
            QuestionType::FinalAnswer,
            QuestionType::TrueFalse,
            QuestionType::Matching,
            QuestionType::FillInTheBlank,
        ];

        for variant in variants {
            let json = serde_json::to_string(&variant).expect("variant should serialize");
            assert_eq!(json, format!("\"{}\"", variant.as_str()));

            let parsed: QuestionType =
                serde_json::from_str(&json).expect("variant should deserialize");
            assert_eq!(parsed, variant);
            assert_eq!(QuestionType::from_wire(variant.as_str()), Some(variant));
        }
    }

    #[test]
    fn question_type_rejects_unknown_variant() {
        assert!(serde_json::from_str::<QuestionType>("\"multiple_choice\"").is_err());
        assert_eq!(QuestionType::from_wire("multiple_choice"), None);
    }

    #[test]
    fn question_defaults_apply_on_deserialize() {
        let q: Question = serde_json::from_str(
            r#"{"questionText": "What is 2 + 2?", "questionType": "shortAnswer"}"#,
        )
        .expect("minimal question should deserialize");

        assert_eq!(q.points, 5.0);
        assert_eq!(q.difficulty, Difficulty::Medium);
        assert!(q.options.is_empty());
        assert!(q.tags.is_empty());
        assert!(q.hints.is_empty());
    }
}
