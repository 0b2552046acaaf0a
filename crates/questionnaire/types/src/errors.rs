//! Error types for the questionnaire layer

use crate::{QuestionId, QuestionType};

/// Errors that can occur in questionnaire operations
#[derive(Debug, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("Question not found: {0}")]
    NotFound(QuestionId),

    #[error("Duplicate question ID: {0}")]
    DuplicateQuestionId(QuestionId),

    #[error("Question '{question}' depends on '{missing}', which is not in the catalog")]
    DanglingDependency {
        question: QuestionId,
        missing: QuestionId,
    },

    #[error("Question '{0}' depends on itself")]
    SelfDependency(QuestionId),

    #[error("Dependency cycle detected: {}", format_path(.0))]
    DependencyCycle(Vec<QuestionId>),

    #[error(
        "Question '{question}' can never be asked: its dependency '{dependency}' is ordered after it"
    )]
    DependencyUnsatisfiable {
        question: QuestionId,
        dependency: QuestionId,
    },

    #[error("Answer is for '{actual}' but the current question is '{expected}'")]
    NotCurrentQuestion {
        expected: QuestionId,
        actual: QuestionId,
    },

    #[error("Question '{question}' expects a {expected} answer, got {actual}")]
    PayloadTypeMismatch {
        question: QuestionId,
        expected: QuestionType,
        actual: &'static str,
    },

    #[error("Answer for '{question}' is not a valid {expected} payload: {reason}")]
    InvalidPayload {
        question: QuestionId,
        expected: QuestionType,
        reason: String,
    },

    #[error("Questionnaire has no remaining questions")]
    SequenceExhausted,

    #[error("Invalid session state: {0}")]
    InvalidSessionState(String),
}

fn format_path(path: &[QuestionId]) -> String {
    path.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type alias for questionnaire operations
pub type QuestionnaireResult<T> = Result<T, QuestionnaireError>;
