//! Document model: the will aggregate the questionnaire populates
//!
//! Only the parts of the will that the questionnaire reads or writes are
//! modelled here. The persistence layer owns the full aggregate and merges
//! a [`DocumentUpdate`] into it.

use serde::{Deserialize, Serialize};

/// Postal address of a nominated person
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

// ── Entities ─────────────────────────────────────────────────────────

/// A child of the testator
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Minors require guardianship and trusteeship
    #[serde(default)]
    pub is_minor: bool,
}

/// A beneficiary named in the will
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub is_minor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_id: Option<String>,
}

/// A guardian appointed for minor children
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardian {
    pub id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    pub relationship: String,
    pub address: Address,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub for_children: Vec<String>,
    #[serde(default)]
    pub is_alternate: bool,
}

/// A trustee managing the inheritance of minor beneficiaries
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trustee {
    pub id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    pub relationship: String,
    pub address: Address,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Ids of the minor beneficiaries this trustee acts for
    #[serde(default)]
    pub for_beneficiaries: Vec<String>,
    #[serde(default)]
    pub is_alternate: bool,
    /// Set when the trustee was derived from a guardian
    #[serde(default)]
    pub is_guardian: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_id: Option<String>,
}

/// An executor of the estate
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Executor {
    pub id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    pub relationship: String,
    pub address: Address,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub is_alternate: bool,
}

// ── Minor Provisions ─────────────────────────────────────────────────

/// How inheritance for minors is managed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProvisionMethod {
    GuardianFund,
    TestamentaryTrust,
    Other,
}

/// Provisions the testator made for minor beneficiaries
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinorBeneficiaryProvisions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<ProvisionMethod>,
    /// Age at which a minor inherits outright
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_of_inheritance: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trustee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

// ── Document Model ───────────────────────────────────────────────────

/// The slice of the will the questionnaire reads and writes
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentModel {
    #[serde(default)]
    pub children: Vec<Child>,
    #[serde(default)]
    pub beneficiaries: Vec<Beneficiary>,
    #[serde(default)]
    pub guardians: Vec<Guardian>,
    #[serde(default)]
    pub trustees: Vec<Trustee>,
    #[serde(default)]
    pub executors: Vec<Executor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor_beneficiary_provisions: Option<MinorBeneficiaryProvisions>,
}

impl DocumentModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Children flagged as minors
    pub fn minor_children(&self) -> impl Iterator<Item = &Child> {
        self.children.iter().filter(|c| c.is_minor)
    }

    /// Beneficiaries flagged as minors
    pub fn minor_beneficiaries(&self) -> impl Iterator<Item = &Beneficiary> {
        self.beneficiaries.iter().filter(|b| b.is_minor)
    }

    /// Look up a guardian by id
    pub fn guardian(&self, id: &str) -> Option<&Guardian> {
        self.guardians.iter().find(|g| g.id == id)
    }

    /// Merge a partial update: every populated list replaces the current one
    pub fn apply(&mut self, update: DocumentUpdate) {
        if let Some(guardians) = update.guardians {
            self.guardians = guardians;
        }
        if let Some(trustees) = update.trustees {
            self.trustees = trustees;
        }
        if let Some(executors) = update.executors {
            self.executors = executors;
        }
    }
}

/// A partial update to the document model produced by synthesis.
///
/// `None` leaves the corresponding list untouched; `Some` replaces it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardians: Option<Vec<Guardian>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trustees: Option<Vec<Trustee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executors: Option<Vec<Executor>>,
}

impl DocumentUpdate {
    /// Whether no entity list is populated
    pub fn is_empty(&self) -> bool {
        self.guardians.is_none() && self.trustees.is_none() && self.executors.is_none()
    }
}
