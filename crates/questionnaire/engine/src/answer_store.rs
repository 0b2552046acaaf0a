//! Answer store: one record per question, in first-answered order
//!
//! Re-answering a question overwrites its record in place, so the record
//! keeps the position of the first answer. There is no answer history.

use questionnaire_types::{AnswerRecord, QuestionId};
use std::collections::HashMap;

/// Insertion-ordered map from question id to its recorded answer
#[derive(Clone, Debug, Default)]
pub struct AnswerStore {
    records: Vec<AnswerRecord>,
    index: HashMap<QuestionId, usize>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, replacing any earlier record for the same question.
    ///
    /// Returns the replaced record.
    pub fn insert(&mut self, record: AnswerRecord) -> Option<AnswerRecord> {
        match self.index.get(&record.question_id) {
            Some(&slot) => Some(std::mem::replace(&mut self.records[slot], record)),
            None => {
                self.index
                    .insert(record.question_id.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, id: &QuestionId) -> Option<&AnswerRecord> {
        self.index.get(id).map(|&slot| &self.records[slot])
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.index.contains_key(id)
    }

    /// Every recorded answer, in insertion order
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use questionnaire_types::{AnswerPayload, QuestionType, SamePersonAnswer};

    fn record(id: &str, use_same: bool) -> AnswerRecord {
        AnswerRecord::new(
            QuestionId::new(id),
            QuestionType::SamePersonGuardianTrustee,
            AnswerPayload::SamePerson(SamePersonAnswer {
                use_same_person_for_trustee: use_same,
                guardian_id: None,
            }),
        )
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = AnswerStore::new();
        assert!(store.insert(record("a", true)).is_none());
        assert!(store.contains(&QuestionId::new("a")));
        assert_eq!(store.len(), 1);
        assert!(store.get(&QuestionId::new("b")).is_none());
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut store = AnswerStore::new();
        store.insert(record("a", true));
        store.insert(record("b", true));
        let replaced = store.insert(record("a", false));

        assert!(replaced.is_some());
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].question_id, QuestionId::new("a"));
        assert!(matches!(
            &store.records()[0].data,
            AnswerPayload::SamePerson(SamePersonAnswer {
                use_same_person_for_trustee: false,
                ..
            })
        ));
    }
}
