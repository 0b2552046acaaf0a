//! Session configuration
//!
//! The defaults are the strict policies: answers must target the current
//! question, nothing may be answered once the sequence is exhausted, and
//! progress never reports more than 100%.

use serde::{Deserialize, Serialize};

/// How `progress()` treats a cursor beyond the end of the catalog
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPolicy {
    /// Never report more than 100
    #[default]
    Clamped,
    /// Report the raw ratio, which exceeds 100 after over-answering
    Unclamped,
}

/// How `answer()` relates the given question id to the cursor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorBinding {
    /// The id must be the current dependency-resolved question
    #[default]
    Strict,
    /// Any catalog id is accepted and the cursor advances by one regardless
    Lenient,
}

/// Configuration for a questionnaire session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub progress_policy: ProgressPolicy,
    pub cursor_binding: CursorBinding,
    /// Accept answers after the last question; each still advances the cursor
    pub allow_answer_past_end: bool,
}

impl SessionConfig {
    /// The permissive policies: lenient binding, over-answering allowed,
    /// unclamped progress
    pub fn permissive() -> Self {
        Self {
            progress_policy: ProgressPolicy::Unclamped,
            cursor_binding: CursorBinding::Lenient,
            allow_answer_past_end: true,
        }
    }

    pub fn with_progress_policy(mut self, policy: ProgressPolicy) -> Self {
        self.progress_policy = policy;
        self
    }

    pub fn with_cursor_binding(mut self, binding: CursorBinding) -> Self {
        self.cursor_binding = binding;
        self
    }

    pub fn with_answer_past_end(mut self, allow: bool) -> Self {
        self.allow_answer_past_end = allow;
        self
    }
}
