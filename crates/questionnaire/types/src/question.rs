//! Question definitions: what the questionnaire can ask
//!
//! A QuestionDefinition is static, caller-owned configuration. The engine
//! only reads `id`, `question_type`, `priority`, `required` and `depends_on`;
//! the presentation fields (`title`, `description`, `context`) are carried
//! through untouched for the form that renders the question.

use crate::{Beneficiary, Child};
use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// Unique identifier for a question within a catalog
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ── Question Type ────────────────────────────────────────────────────

/// The kind of information a question collects.
///
/// The type decides which answer payload is accepted and which synthesis
/// rule turns the answer into document entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    GuardianAppointment,
    TrusteeAppointment,
    SamePersonGuardianTrustee,
    ExecutorAppointment,
    WitnessAppointment,
    BeneficiaryDetails,
}

impl QuestionType {
    /// Wire name of this question type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GuardianAppointment => "guardian-appointment",
            Self::TrusteeAppointment => "trustee-appointment",
            Self::SamePersonGuardianTrustee => "same-person-guardian-trustee",
            Self::ExecutorAppointment => "executor-appointment",
            Self::WitnessAppointment => "witness-appointment",
            Self::BeneficiaryDetails => "beneficiary-details",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Question Definition ──────────────────────────────────────────────

/// A single question in a questionnaire catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDefinition {
    /// Unique identifier within the catalog
    pub id: QuestionId,
    /// What kind of answer this question collects
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Sort key; lower is asked first, ties keep catalog order
    pub priority: i32,
    /// Required questions cannot be skipped and gate completion
    pub required: bool,
    /// Questions that must be answered before this one is surfaced
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<QuestionId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub context: QuestionContext,
}

impl QuestionDefinition {
    /// Create a new question definition
    pub fn new(id: impl Into<String>, question_type: QuestionType, priority: i32) -> Self {
        Self {
            id: QuestionId::new(id),
            question_type,
            priority,
            required: false,
            depends_on: Vec::new(),
            title: String::new(),
            description: String::new(),
            context: QuestionContext::default(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn depends_on(mut self, id: impl Into<String>) -> Self {
        self.depends_on.push(QuestionId::new(id));
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_context(mut self, context: QuestionContext) -> Self {
        self.context = context;
        self
    }

    /// Whether this question has any prerequisites
    pub fn has_dependencies(&self) -> bool {
        !self.depends_on.is_empty()
    }
}

/// Contextual data the presentation layer shows alongside a question
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionContext {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub minor_children: Vec<Child>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub minor_beneficiaries: Vec<Beneficiary>,
    /// Guardian the same-person question refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_name: Option<String>,
}
