//! Document synthesizer: turns recorded answers into a document update
//!
//! Synthesis reads the answers plus the current document model and returns
//! a [`DocumentUpdate`]. It performs no I/O and never fails. The only side
//! effect is drawing fresh ids from the minter.
//!
//! Every rule *replaces* its entity list in the update rather than appending
//! to it. Two answer types write the trustee list (a trustee appointment and
//! the same-person rule); which one wins is fixed by
//! [`TRUSTEE_MERGE_POLICY`].

use crate::id_minter::{EntityIdMinter, TimestampIdMinter};
use questionnaire_types::*;

/// Which writer keeps an entity list when several answers produce it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergePolicy {
    /// The answer recorded later replaces the list
    LastWriterWins,
    /// The first answer to produce the list keeps it
    FirstWriterWins,
}

/// Trustee list precedence. Answers are visited in recording order, so the
/// later of a trustee appointment and a same-person derivation wins.
pub const TRUSTEE_MERGE_POLICY: MergePolicy = MergePolicy::LastWriterWins;

/// Guardian and executor lists each have one producing rule; a repeated
/// question of the same type replaces the earlier list.
pub const ENTITY_MERGE_POLICY: MergePolicy = MergePolicy::LastWriterWins;

fn place<T>(slot: &mut Option<Vec<T>>, list: Vec<T>, policy: MergePolicy) {
    match policy {
        MergePolicy::LastWriterWins => *slot = Some(list),
        MergePolicy::FirstWriterWins => {
            if slot.is_none() {
                *slot = Some(list);
            }
        }
    }
}

/// Synthesize with a timestamp id minter and the default merge policies
pub fn synthesize(answers: &[AnswerRecord], current: &DocumentModel) -> DocumentUpdate {
    DocumentSynthesizer::new().synthesize(answers, current)
}

/// Builds document updates from answer records
#[derive(Clone, Debug)]
pub struct DocumentSynthesizer<M = TimestampIdMinter> {
    minter: M,
    trustee_policy: MergePolicy,
}

impl DocumentSynthesizer<TimestampIdMinter> {
    pub fn new() -> Self {
        Self::with_minter(TimestampIdMinter::new())
    }
}

impl Default for DocumentSynthesizer<TimestampIdMinter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EntityIdMinter> DocumentSynthesizer<M> {
    pub fn with_minter(minter: M) -> Self {
        Self {
            minter,
            trustee_policy: TRUSTEE_MERGE_POLICY,
        }
    }

    pub fn with_trustee_policy(mut self, policy: MergePolicy) -> Self {
        self.trustee_policy = policy;
        self
    }

    /// Build the partial update for a set of answers.
    ///
    /// `current` is the document as it stands before this update; the
    /// same-person rule resolves its guardian reference against it.
    pub fn synthesize(
        &mut self,
        answers: &[AnswerRecord],
        current: &DocumentModel,
    ) -> DocumentUpdate {
        let mut update = DocumentUpdate::default();

        for record in answers {
            match (record.question_type, &record.data) {
                (QuestionType::GuardianAppointment, AnswerPayload::Guardian(answer)) => {
                    let guardians = self.guardians_from(answer);
                    place(&mut update.guardians, guardians, ENTITY_MERGE_POLICY);
                }

                (QuestionType::TrusteeAppointment, AnswerPayload::Trustee(answer)) => {
                    let trustees = self.trustees_from(answer);
                    place(&mut update.trustees, trustees, self.trustee_policy);
                }

                (QuestionType::SamePersonGuardianTrustee, AnswerPayload::SamePerson(answer)) => {
                    if let Some(trustee) = self.trustee_from_guardian(answer, current) {
                        place(&mut update.trustees, vec![trustee], self.trustee_policy);
                    }
                }

                (QuestionType::ExecutorAppointment, AnswerPayload::Executor(answer)) => {
                    let executors = self.executors_from(answer);
                    place(&mut update.executors, executors, ENTITY_MERGE_POLICY);
                }

                (QuestionType::WitnessAppointment | QuestionType::BeneficiaryDetails, _) => {}

                (question_type, data) => {
                    tracing::warn!(
                        question_id = %record.question_id,
                        question_type = %question_type,
                        payload = data.kind(),
                        "Answer payload does not match its question type, ignored"
                    );
                }
            }
        }

        tracing::debug!(
            answers = answers.len(),
            guardians = update.guardians.as_ref().map_or(0, Vec::len),
            trustees = update.trustees.as_ref().map_or(0, Vec::len),
            executors = update.executors.as_ref().map_or(0, Vec::len),
            "Document update synthesized"
        );

        update
    }

    // ── Rules ────────────────────────────────────────────────────────

    fn guardians_from(&mut self, answer: &GuardianAnswer) -> Vec<Guardian> {
        let mut guardians = vec![self.guardian(&answer.guardian, false)];
        if let Some(alternate) = &answer.alternate_guardian {
            guardians.push(self.guardian(alternate, true));
        }
        guardians
    }

    fn guardian(&mut self, nominee: &GuardianNominee, is_alternate: bool) -> Guardian {
        Guardian {
            id: self.minter.mint(),
            full_name: nominee.full_name.clone(),
            id_number: nominee.id_number.clone(),
            relationship: nominee.relationship.clone(),
            address: nominee.address.clone(),
            phone: nominee.phone.clone(),
            email: nominee.email.clone(),
            for_children: nominee.for_children.clone(),
            is_alternate,
        }
    }

    fn trustees_from(&mut self, answer: &TrusteeAnswer) -> Vec<Trustee> {
        let mut trustees = vec![self.trustee(&answer.trustee, false)];
        if let Some(alternate) = &answer.alternate_trustee {
            trustees.push(self.trustee(alternate, true));
        }
        trustees
    }

    fn trustee(&mut self, nominee: &TrusteeNominee, is_alternate: bool) -> Trustee {
        Trustee {
            id: self.minter.mint(),
            full_name: nominee.full_name.clone(),
            id_number: nominee.id_number.clone(),
            relationship: nominee.relationship.clone(),
            address: nominee.address.clone(),
            phone: nominee.phone.clone(),
            email: nominee.email.clone(),
            for_beneficiaries: nominee.for_beneficiaries.clone(),
            is_alternate,
            is_guardian: false,
            guardian_id: None,
        }
    }

    /// Derive a trustee from an existing guardian, acting for every minor child
    fn trustee_from_guardian(
        &mut self,
        answer: &SamePersonAnswer,
        current: &DocumentModel,
    ) -> Option<Trustee> {
        if !answer.use_same_person_for_trustee {
            return None;
        }
        let guardian_id = answer.guardian_id.as_deref()?;

        let Some(guardian) = current.guardian(guardian_id) else {
            tracing::warn!(
                guardian_id,
                "Same-person answer references a guardian not in the document, no trustee derived"
            );
            return None;
        };

        Some(Trustee {
            id: self.minter.mint(),
            full_name: guardian.full_name.clone(),
            id_number: guardian.id_number.clone(),
            relationship: guardian.relationship.clone(),
            address: guardian.address.clone(),
            phone: guardian.phone.clone(),
            email: guardian.email.clone(),
            for_beneficiaries: current.minor_children().map(|c| c.id.clone()).collect(),
            is_alternate: false,
            is_guardian: true,
            guardian_id: Some(guardian.id.clone()),
        })
    }

    fn executors_from(&mut self, answer: &ExecutorAnswer) -> Vec<Executor> {
        let mut executors = vec![self.executor(&answer.executor, false)];
        if let Some(alternate) = &answer.alternate_executor {
            executors.push(self.executor(alternate, true));
        }
        executors
    }

    fn executor(&mut self, nominee: &ExecutorNominee, is_alternate: bool) -> Executor {
        Executor {
            id: self.minter.mint(),
            full_name: nominee.full_name.clone(),
            id_number: nominee.id_number.clone(),
            relationship: nominee.relationship.clone(),
            address: nominee.address.clone(),
            phone: nominee.phone.clone(),
            email: nominee.email.clone(),
            is_alternate,
        }
    }
}
