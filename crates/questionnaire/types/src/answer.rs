//! Answers: payloads supplied by the presentation layer
//!
//! An [`AnswerPayload`] is a union keyed by question type. The only shape
//! check the engine performs is that the payload variant matches the type of
//! the question it answers; field contents are trusted.

use crate::{Address, QuestionId, QuestionType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Nominees ─────────────────────────────────────────────────────────

/// A guardian as entered on the form, before an id is assigned
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianNominee {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub for_children: Vec<String>,
}

/// A trustee as entered on the form, before an id is assigned
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrusteeNominee {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub for_beneficiaries: Vec<String>,
}

/// An executor as entered on the form, before an id is assigned
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutorNominee {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ── Answer Payloads ──────────────────────────────────────────────────

/// Answer to a guardian appointment question
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianAnswer {
    pub guardian: GuardianNominee,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_guardian: Option<GuardianNominee>,
}

/// Answer to a trustee appointment question
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrusteeAnswer {
    pub trustee: TrusteeNominee,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_trustee: Option<TrusteeNominee>,
}

/// Answer to the "should the guardian also be the trustee" question
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamePersonAnswer {
    pub use_same_person_for_trustee: bool,
    /// Which guardian to reuse, by id in the current document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_id: Option<String>,
}

/// Answer to an executor appointment question
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutorAnswer {
    pub executor: ExecutorNominee,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_executor: Option<ExecutorNominee>,
}

/// The raw data of an answer, one variant per family of question types.
///
/// Serialized untagged so the wire shape is the bare answer object. The
/// variant is never guessed from that shape: decoding goes through
/// [`AnswerPayload::from_value`] with the question type as the key.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerPayload {
    Guardian(GuardianAnswer),
    Trustee(TrusteeAnswer),
    SamePerson(SamePersonAnswer),
    Executor(ExecutorAnswer),
    /// Witness and beneficiary-detail answers have no synthesis rule
    Freeform(serde_json::Value),
}

impl AnswerPayload {
    /// Decode a bare answer object as the payload a question type dictates
    pub fn from_value(
        question_type: QuestionType,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match question_type {
            QuestionType::GuardianAppointment => Self::Guardian(serde_json::from_value(value)?),
            QuestionType::TrusteeAppointment => Self::Trustee(serde_json::from_value(value)?),
            QuestionType::SamePersonGuardianTrustee => {
                Self::SamePerson(serde_json::from_value(value)?)
            }
            QuestionType::ExecutorAppointment => Self::Executor(serde_json::from_value(value)?),
            QuestionType::WitnessAppointment | QuestionType::BeneficiaryDetails => {
                Self::Freeform(value)
            }
        })
    }

    /// Short name of the payload variant, used in mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Guardian(_) => "guardian",
            Self::Trustee(_) => "trustee",
            Self::SamePerson(_) => "same-person",
            Self::Executor(_) => "executor",
            Self::Freeform(_) => "freeform",
        }
    }

    /// Whether this payload is the right shape for a question type
    pub fn accepts(&self, question_type: QuestionType) -> bool {
        matches!(
            (self, question_type),
            (Self::Guardian(_), QuestionType::GuardianAppointment)
                | (Self::Trustee(_), QuestionType::TrusteeAppointment)
                | (Self::SamePerson(_), QuestionType::SamePersonGuardianTrustee)
                | (Self::Executor(_), QuestionType::ExecutorAppointment)
                | (Self::Freeform(_), QuestionType::WitnessAppointment)
                | (Self::Freeform(_), QuestionType::BeneficiaryDetails)
        )
    }
}

impl From<GuardianAnswer> for AnswerPayload {
    fn from(answer: GuardianAnswer) -> Self {
        Self::Guardian(answer)
    }
}

impl From<TrusteeAnswer> for AnswerPayload {
    fn from(answer: TrusteeAnswer) -> Self {
        Self::Trustee(answer)
    }
}

impl From<SamePersonAnswer> for AnswerPayload {
    fn from(answer: SamePersonAnswer) -> Self {
        Self::SamePerson(answer)
    }
}

impl From<ExecutorAnswer> for AnswerPayload {
    fn from(answer: ExecutorAnswer) -> Self {
        Self::Executor(answer)
    }
}

// ── Answer Record ────────────────────────────────────────────────────

/// A recorded answer. One record per question id; re-answering overwrites.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawAnswerRecord")]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub question_type: QuestionType,
    pub timestamp: DateTime<Utc>,
    pub data: AnswerPayload,
}

impl AnswerRecord {
    /// Create a record stamped with the current time
    pub fn new(question_id: QuestionId, question_type: QuestionType, data: AnswerPayload) -> Self {
        Self {
            question_id,
            question_type,
            timestamp: Utc::now(),
            data,
        }
    }
}

/// Wire form of a record; `data` stays raw until the type is known
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnswerRecord {
    question_id: QuestionId,
    question_type: QuestionType,
    timestamp: DateTime<Utc>,
    data: serde_json::Value,
}

impl TryFrom<RawAnswerRecord> for AnswerRecord {
    type Error = serde_json::Error;

    fn try_from(raw: RawAnswerRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            data: AnswerPayload::from_value(raw.question_type, raw.data)?,
            question_id: raw.question_id,
            question_type: raw.question_type,
            timestamp: raw.timestamp,
        })
    }
}
