pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use crate::error::{Error, FieldError, Result, ValidationFailure};
pub use crate::models::question::{AnswerOption, Difficulty, Question, QuestionType};
pub use crate::models::test::{Test, TestMetadata, TestStatus, Visibility};
pub use crate::services::normalization_service::{
    import_ai_test, normalize_ai_payload, normalize_ai_payload_str,
};
pub use crate::services::validation_service::validate_for_save;
