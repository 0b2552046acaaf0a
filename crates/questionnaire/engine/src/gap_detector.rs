//! Gap detection: find missing appointments in a document and generate the
//! questions that fill them
//!
//! The detector checks three gaps in a fixed order (guardian, trustee,
//! executor) and emits questions with priorities counting up from 1 in
//! that order. When the document already names a guardian, the trustee gap
//! becomes a pair: a required "same person?" question followed by an
//! optional trustee question that depends on it.

use crate::id_minter::{EntityIdMinter, TimestampIdMinter};
use questionnaire_types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ── Gaps ─────────────────────────────────────────────────────────────

/// Which appointment is missing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapKind {
    Guardian,
    Trustee,
    Executor,
}

/// How urgently a gap must be filled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapSeverity {
    Critical,
    Important,
    Optional,
}

/// One piece of missing information
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingInfoGap {
    #[serde(rename = "type")]
    pub kind: GapKind,
    pub severity: GapSeverity,
    /// Human-readable explanation shown to the testator
    pub reason: String,
    /// Ids of the children or beneficiaries the gap concerns
    pub affected_items: Vec<String>,
}

/// Overall urgency of a report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportPriority {
    Critical,
    Important,
    Recommended,
}

impl ReportPriority {
    fn from_gaps(gaps: &[MissingInfoGap]) -> Self {
        if gaps.iter().any(|g| g.severity == GapSeverity::Critical) {
            Self::Critical
        } else if gaps.iter().any(|g| g.severity == GapSeverity::Important) {
            Self::Important
        } else {
            Self::Recommended
        }
    }
}

/// Result of analysing a document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingInfoReport {
    pub gaps: Vec<MissingInfoGap>,
    pub questions: Vec<QuestionDefinition>,
    pub priority: ReportPriority,
}

impl MissingInfoReport {
    pub fn has_gaps(&self) -> bool {
        !self.gaps.is_empty()
    }

    /// Validate the generated questions into a catalog
    pub fn catalog(&self) -> QuestionnaireResult<QuestionCatalog> {
        QuestionCatalog::new(self.questions.clone())
    }
}

// ── Detector ─────────────────────────────────────────────────────────

/// Analyses a document for missing appointments
#[derive(Clone, Debug)]
pub struct GapDetector<M = TimestampIdMinter> {
    minter: M,
}

impl GapDetector<TimestampIdMinter> {
    pub fn new() -> Self {
        Self::with_minter(TimestampIdMinter::new())
    }
}

impl Default for GapDetector<TimestampIdMinter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EntityIdMinter> GapDetector<M> {
    pub fn with_minter(minter: M) -> Self {
        Self { minter }
    }

    /// Detect gaps and generate the questions that fill them
    pub fn analyze(&mut self, model: &DocumentModel) -> MissingInfoReport {
        let gaps: Vec<MissingInfoGap> = [
            guardian_gap(model),
            trustee_gap(model),
            executor_gap(model),
        ]
        .into_iter()
        .flatten()
        .collect();

        let questions = self.questions_for(&gaps, model);
        let priority = ReportPriority::from_gaps(&gaps);

        tracing::info!(
            gaps = gaps.len(),
            questions = questions.len(),
            priority = ?priority,
            "Document analysed for missing information"
        );

        MissingInfoReport {
            gaps,
            questions,
            priority,
        }
    }

    fn question_id(&mut self, prefix: &str) -> QuestionId {
        QuestionId::new(format!("{}-{}", prefix, self.minter.mint()))
    }

    fn questions_for(
        &mut self,
        gaps: &[MissingInfoGap],
        model: &DocumentModel,
    ) -> Vec<QuestionDefinition> {
        let mut questions = Vec::new();
        let mut priority = 1;
        let mut next_priority = || {
            let p = priority;
            priority += 1;
            p
        };

        for gap in gaps {
            match gap.kind {
                GapKind::Guardian => {
                    let minor_children: Vec<Child> = model.minor_children().cloned().collect();
                    let question = QuestionDefinition::new(
                        self.question_id("guardian").0,
                        QuestionType::GuardianAppointment,
                        next_priority(),
                    )
                    .required()
                    .with_title("Appoint Guardian for Minor Children")
                    .with_description(format!(
                        "You have {} minor child(ren). Please nominate a backup guardian \
                         who will serve only if no natural parental guardian is available.",
                        minor_children.len()
                    ))
                    .with_context(QuestionContext {
                        minor_children,
                        ..Default::default()
                    });
                    questions.push(question);
                }

                GapKind::Trustee => {
                    let minor_beneficiaries: Vec<Beneficiary> =
                        model.minor_beneficiaries().cloned().collect();
                    let context = QuestionContext {
                        minor_beneficiaries,
                        ..Default::default()
                    };

                    match model.guardians.first() {
                        Some(guardian) => {
                            let same_person = QuestionDefinition::new(
                                self.question_id("same-person").0,
                                QuestionType::SamePersonGuardianTrustee,
                                next_priority(),
                            )
                            .required()
                            .with_title("Trustee Appointment")
                            .with_description(format!(
                                "Should {} also manage the financial inheritance for the \
                                 minor children?",
                                display_name(&guardian.full_name)
                            ))
                            .with_context(QuestionContext {
                                guardian_id: Some(guardian.id.clone()),
                                guardian_name: Some(guardian.full_name.clone()),
                                ..Default::default()
                            });

                            let trustee = QuestionDefinition::new(
                                self.question_id("trustee").0,
                                QuestionType::TrusteeAppointment,
                                next_priority(),
                            )
                            .depends_on(same_person.id.as_str())
                            .with_title("Appoint Trustee for Financial Management")
                            .with_description(
                                "If you prefer a different person to manage finances, \
                                 please specify:",
                            )
                            .with_context(context);

                            questions.push(same_person);
                            questions.push(trustee);
                        }
                        None => {
                            let trustee = QuestionDefinition::new(
                                self.question_id("trustee").0,
                                QuestionType::TrusteeAppointment,
                                next_priority(),
                            )
                            .required()
                            .with_title("Appoint Trustee for Financial Management")
                            .with_description(
                                "Who should manage the inheritance for minor beneficiaries \
                                 until they reach age 18?",
                            )
                            .with_context(context);
                            questions.push(trustee);
                        }
                    }
                }

                GapKind::Executor => {
                    let question = QuestionDefinition::new(
                        self.question_id("executor").0,
                        QuestionType::ExecutorAppointment,
                        next_priority(),
                    )
                    .required()
                    .with_title("Appoint Executor")
                    .with_description("Who should execute your will and manage your estate?");
                    questions.push(question);
                }
            }
        }

        questions
    }
}

fn display_name(full_name: &str) -> &str {
    if full_name.is_empty() {
        "the guardian"
    } else {
        full_name
    }
}

// ── Gap rules ────────────────────────────────────────────────────────

fn is_identified(full_name: &str, id_number: Option<&str>) -> bool {
    !full_name.is_empty() && id_number.is_some_and(|n| !n.is_empty())
}

fn guardian_gap(model: &DocumentModel) -> Option<MissingInfoGap> {
    let minor_children: Vec<String> = model.minor_children().map(|c| c.id.clone()).collect();
    if minor_children.is_empty() {
        return None;
    }

    let has_guardian = model
        .guardians
        .iter()
        .any(|g| is_identified(&g.full_name, g.id_number.as_deref()));
    if has_guardian {
        return None;
    }

    Some(MissingInfoGap {
        kind: GapKind::Guardian,
        severity: GapSeverity::Critical,
        reason: format!(
            "You have {} minor child(ren). Please nominate a backup guardian in case no \
             natural parental guardian is available.",
            minor_children.len()
        ),
        affected_items: minor_children,
    })
}

fn trustee_gap(model: &DocumentModel) -> Option<MissingInfoGap> {
    let mut seen = HashSet::new();
    let minors: Vec<String> = model
        .minor_children()
        .map(|c| c.id.clone())
        .chain(model.minor_beneficiaries().map(|b| b.id.clone()))
        .filter(|id| seen.insert(id.clone()))
        .collect();
    if minors.is_empty() || !model.trustees.is_empty() {
        return None;
    }

    let method = model
        .minor_beneficiary_provisions
        .as_ref()
        .and_then(|p| p.method);

    match method {
        Some(ProvisionMethod::TestamentaryTrust) => Some(MissingInfoGap {
            kind: GapKind::Trustee,
            severity: GapSeverity::Critical,
            reason: "You are using a testamentary trust for minor inheritance but no trustee \
                     is appointed."
                .to_string(),
            affected_items: minors,
        }),
        None => Some(MissingInfoGap {
            kind: GapKind::Trustee,
            severity: GapSeverity::Important,
            reason: format!(
                "You have {} minor(s) but haven't specified how their inheritance will be \
                 managed.",
                minors.len()
            ),
            affected_items: minors,
        }),
        Some(_) => None,
    }
}

fn executor_gap(model: &DocumentModel) -> Option<MissingInfoGap> {
    let has_executor = model
        .executors
        .iter()
        .any(|e| is_identified(&e.full_name, e.id_number.as_deref()));
    if has_executor {
        return None;
    }

    Some(MissingInfoGap {
        kind: GapKind::Executor,
        severity: GapSeverity::Critical,
        reason: "Every will must have at least one executor appointed.".to_string(),
        affected_items: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_minter::SequentialIdMinter;

    fn detector() -> GapDetector<SequentialIdMinter> {
        GapDetector::with_minter(SequentialIdMinter::new("q"))
    }

    fn minor(id: &str) -> Child {
        Child {
            id: id.into(),
            full_name: format!("Child {}", id),
            is_minor: true,
            ..Default::default()
        }
    }

    fn executor() -> Executor {
        Executor {
            id: "e-1".into(),
            full_name: "Pat Smith".into(),
            id_number: Some("123".into()),
            ..Default::default()
        }
    }

    fn guardian(full_name: &str, id_number: Option<&str>) -> Guardian {
        Guardian {
            id: "g-1".into(),
            full_name: full_name.into(),
            id_number: id_number.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_document_has_no_gaps() {
        let model = DocumentModel {
            executors: vec![executor()],
            ..Default::default()
        };
        let report = detector().analyze(&model);
        assert!(!report.has_gaps());
        assert!(report.questions.is_empty());
        assert_eq!(report.priority, ReportPriority::Recommended);
    }

    #[test]
    fn test_empty_document_needs_executor() {
        let report = detector().analyze(&DocumentModel::default());
        assert_eq!(report.gaps.len(), 1);
        assert_eq!(report.gaps[0].kind, GapKind::Executor);
        assert_eq!(report.priority, ReportPriority::Critical);
        assert_eq!(report.questions[0].id, QuestionId::new("executor-q-1"));
        assert!(report.questions[0].required);
    }

    #[test]
    fn test_executor_without_id_number_is_a_gap() {
        let mut unnamed = executor();
        unnamed.id_number = None;
        let model = DocumentModel {
            executors: vec![unnamed],
            ..Default::default()
        };
        assert_eq!(detector().analyze(&model).gaps[0].kind, GapKind::Executor);
    }

    #[test]
    fn test_minors_without_guardian_or_trustee() {
        let model = DocumentModel {
            children: vec![minor("c1"), minor("c2")],
            executors: vec![executor()],
            ..Default::default()
        };
        let report = detector().analyze(&model);

        let kinds: Vec<_> = report.gaps.iter().map(|g| g.kind).collect();
        assert_eq!(kinds, vec![GapKind::Guardian, GapKind::Trustee]);
        assert_eq!(report.gaps[0].affected_items, vec!["c1", "c2"]);
        assert_eq!(report.gaps[1].severity, GapSeverity::Important);

        let types: Vec<_> = report.questions.iter().map(|q| q.question_type).collect();
        assert_eq!(
            types,
            vec![QuestionType::GuardianAppointment, QuestionType::TrusteeAppointment]
        );
        assert_eq!(report.questions[0].context.minor_children.len(), 2);
        // No guardian in the document yet, so the trustee question stands alone
        assert!(report.questions[1].required);
        assert!(!report.questions[1].has_dependencies());
        assert_eq!(report.priority, ReportPriority::Critical);
    }

    #[test]
    fn test_guardian_present_yields_same_person_pair() {
        let model = DocumentModel {
            children: vec![minor("c1")],
            guardians: vec![guardian("Jane Doe", Some("800101"))],
            executors: vec![executor()],
            ..Default::default()
        };
        let report = detector().analyze(&model);

        assert_eq!(report.gaps.len(), 1);
        assert_eq!(report.questions.len(), 2);

        let same = &report.questions[0];
        assert_eq!(same.question_type, QuestionType::SamePersonGuardianTrustee);
        assert!(same.required);
        assert_eq!(same.priority, 1);
        assert_eq!(same.context.guardian_id.as_deref(), Some("g-1"));
        assert!(same.description.contains("Jane Doe"));

        let trustee = &report.questions[1];
        assert_eq!(trustee.question_type, QuestionType::TrusteeAppointment);
        assert!(!trustee.required);
        assert_eq!(trustee.priority, 2);
        assert_eq!(trustee.depends_on, vec![same.id.clone()]);

        assert!(report.catalog().is_ok());
    }

    #[test]
    fn test_unidentified_guardian_still_gaps() {
        let model = DocumentModel {
            children: vec![minor("c1")],
            guardians: vec![guardian("", None)],
            executors: vec![executor()],
            ..Default::default()
        };
        let report = detector().analyze(&model);
        assert_eq!(report.gaps[0].kind, GapKind::Guardian);
        assert!(report.questions[1].description.contains("the guardian"));
    }

    #[test]
    fn test_testamentary_trust_without_trustee_is_critical() {
        let model = DocumentModel {
            beneficiaries: vec![Beneficiary {
                id: "b1".into(),
                full_name: "Kim".into(),
                is_minor: true,
                ..Default::default()
            }],
            executors: vec![executor()],
            minor_beneficiary_provisions: Some(MinorBeneficiaryProvisions {
                method: Some(ProvisionMethod::TestamentaryTrust),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = detector().analyze(&model);
        assert_eq!(report.gaps.len(), 1);
        assert_eq!(report.gaps[0].severity, GapSeverity::Critical);
        assert_eq!(report.gaps[0].affected_items, vec!["b1"]);
        assert_eq!(report.questions[0].context.minor_beneficiaries.len(), 1);
    }

    #[test]
    fn test_guardian_fund_needs_no_trustee() {
        let model = DocumentModel {
            beneficiaries: vec![Beneficiary {
                id: "b1".into(),
                is_minor: true,
                ..Default::default()
            }],
            executors: vec![executor()],
            minor_beneficiary_provisions: Some(MinorBeneficiaryProvisions {
                method: Some(ProvisionMethod::GuardianFund),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(!detector().analyze(&model).has_gaps());
    }

    #[test]
    fn test_minor_counted_once_across_children_and_beneficiaries() {
        let model = DocumentModel {
            children: vec![minor("c1")],
            beneficiaries: vec![Beneficiary {
                id: "c1".into(),
                is_minor: true,
                ..Default::default()
            }],
            guardians: vec![guardian("Jane Doe", Some("800101"))],
            executors: vec![executor()],
            ..Default::default()
        };
        let report = detector().analyze(&model);
        assert_eq!(report.gaps[0].affected_items, vec!["c1"]);
        assert!(report.gaps[0].reason.contains("1 minor(s)"));
    }

    #[test]
    fn test_report_wire_shape() {
        let report = detector().analyze(&DocumentModel::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["priority"], "critical");
        assert_eq!(json["gaps"][0]["type"], "executor");
        assert_eq!(json["gaps"][0]["affectedItems"], serde_json::json!([]));
        assert_eq!(json["questions"][0]["type"], "executor-appointment");
    }
}
