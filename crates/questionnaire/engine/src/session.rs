//! Questionnaire session: the sequencer over a question catalog
//!
//! A session walks a [`QuestionCatalog`] forward with a single cursor. The
//! current question is the first one at or after the cursor whose
//! dependencies have all been answered; questions with unanswered
//! prerequisites are passed over and recorded as [`DependencySkip`]s.
//!
//! Moving backwards with [`QuestionnaireSession::previous`] never removes
//! answers. Completion only looks at required questions, so it does not
//! depend on where the cursor is.

use crate::answer_store::AnswerStore;
use crate::config::{CursorBinding, ProgressPolicy, SessionConfig};
use crate::synthesizer;
use questionnaire_types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ── Identifiers ──────────────────────────────────────────────────────

/// Unique identifier for a questionnaire session
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionnaireSessionId(pub String);

impl QuestionnaireSessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for QuestionnaireSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Diagnostics & State ──────────────────────────────────────────────

/// A question passed over because some of its prerequisites had no answer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencySkip {
    pub question_id: QuestionId,
    pub missing: Vec<QuestionId>,
}

/// Resumable session state: the cursor and the recorded answers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub cursor: usize,
    pub answers: Vec<AnswerRecord>,
}

// ── Session ──────────────────────────────────────────────────────────

/// Sequencer state for one questionnaire over one document
#[derive(Clone, Debug)]
pub struct QuestionnaireSession {
    id: QuestionnaireSessionId,
    catalog: QuestionCatalog,
    answers: AnswerStore,
    cursor: usize,
    config: SessionConfig,
    dependency_skips: Vec<DependencySkip>,
}

impl QuestionnaireSession {
    /// Start a session at the first question with the default config
    pub fn new(catalog: QuestionCatalog) -> Self {
        Self::with_config(catalog, SessionConfig::default())
    }

    pub fn with_config(catalog: QuestionCatalog, config: SessionConfig) -> Self {
        let id = QuestionnaireSessionId::generate();
        tracing::info!(
            session_id = %id,
            questions = catalog.len(),
            cursor_binding = ?config.cursor_binding,
            "Questionnaire session started"
        );
        Self {
            id,
            catalog,
            answers: AnswerStore::new(),
            cursor: 0,
            config,
            dependency_skips: Vec::new(),
        }
    }

    /// Rebuild a session from a snapshot.
    ///
    /// Fails if the cursor lies beyond the catalog, or if an answer refers
    /// to a question that is not in the catalog, has the wrong type, carries
    /// a payload that does not fit that type, or appears twice.
    pub fn restore(
        catalog: QuestionCatalog,
        state: SessionState,
        config: SessionConfig,
    ) -> QuestionnaireResult<Self> {
        if state.cursor > catalog.len() && !config.allow_answer_past_end {
            return Err(QuestionnaireError::InvalidSessionState(format!(
                "cursor {} beyond catalog of {} questions",
                state.cursor,
                catalog.len()
            )));
        }

        let mut answers = AnswerStore::new();
        for record in state.answers {
            let question = catalog.find(&record.question_id).ok_or_else(|| {
                QuestionnaireError::InvalidSessionState(format!(
                    "answer for unknown question {}",
                    record.question_id
                ))
            })?;
            if question.question_type != record.question_type {
                return Err(QuestionnaireError::InvalidSessionState(format!(
                    "answer for {} recorded as {}, catalog says {}",
                    record.question_id, record.question_type, question.question_type
                )));
            }
            if !record.data.accepts(question.question_type) {
                return Err(QuestionnaireError::InvalidSessionState(format!(
                    "answer for {} carries a {} payload, expected {}",
                    record.question_id,
                    record.data.kind(),
                    question.question_type
                )));
            }
            let question_id = record.question_id.clone();
            if answers.insert(record).is_some() {
                return Err(QuestionnaireError::InvalidSessionState(format!(
                    "duplicate answer for {}",
                    question_id
                )));
            }
        }

        let mut session = Self::with_config(catalog, config);
        session.answers = answers;
        session.cursor = state.cursor;
        tracing::debug!(
            session_id = %session.id,
            cursor = session.cursor,
            answers = session.answers.len(),
            "Questionnaire session restored"
        );
        Ok(session)
    }

    /// Capture the cursor and answers
    pub fn snapshot(&self) -> SessionState {
        SessionState {
            cursor: self.cursor,
            answers: self.answers.records().to_vec(),
        }
    }

    // ── Sequencing ───────────────────────────────────────────────────

    /// The next question whose prerequisites are all answered.
    ///
    /// Advances the cursor past every question with unanswered
    /// dependencies. Returns `None` once the sequence is exhausted.
    pub fn current_question(&mut self) -> Option<&QuestionDefinition> {
        let index = self.resolve_current()?;
        self.catalog.get(index)
    }

    /// Move the cursor to the first askable question and return its index
    fn resolve_current(&mut self) -> Option<usize> {
        while let Some(question) = self.catalog.get(self.cursor) {
            let missing: Vec<QuestionId> = question
                .depends_on
                .iter()
                .filter(|dep| !self.answers.contains(dep))
                .cloned()
                .collect();

            if missing.is_empty() {
                return Some(self.cursor);
            }

            let skip = DependencySkip {
                question_id: question.id.clone(),
                missing,
            };
            // Revisits after previous() resolve the same skip again
            if !self.dependency_skips.contains(&skip) {
                tracing::warn!(
                    session_id = %self.id,
                    question_id = %skip.question_id,
                    missing = ?skip.missing,
                    "Question skipped, prerequisites unanswered"
                );
                self.dependency_skips.push(skip);
            }
            self.cursor += 1;
        }
        None
    }

    /// Record an answer for a question and advance the cursor by one.
    ///
    /// The id must exist in the catalog and the payload must fit the
    /// question type. Under strict binding the id must also be the current
    /// question. A rejected answer leaves the stored answers untouched.
    pub fn answer(
        &mut self,
        question_id: &QuestionId,
        payload: impl Into<AnswerPayload>,
    ) -> QuestionnaireResult<()> {
        let payload = payload.into();

        let question = self
            .catalog
            .find(question_id)
            .ok_or_else(|| QuestionnaireError::NotFound(question_id.clone()))?;
        let question_type = question.question_type;

        if !payload.accepts(question_type) {
            return Err(QuestionnaireError::PayloadTypeMismatch {
                question: question_id.clone(),
                expected: question_type,
                actual: payload.kind(),
            });
        }

        match self.config.cursor_binding {
            CursorBinding::Strict => match self.resolve_current() {
                Some(index) => {
                    let expected = &self.catalog.questions()[index].id;
                    if expected != question_id {
                        return Err(QuestionnaireError::NotCurrentQuestion {
                            expected: expected.clone(),
                            actual: question_id.clone(),
                        });
                    }
                }
                None if !self.config.allow_answer_past_end => {
                    return Err(QuestionnaireError::SequenceExhausted);
                }
                None => {}
            },
            CursorBinding::Lenient => {
                if self.cursor >= self.catalog.len() && !self.config.allow_answer_past_end {
                    return Err(QuestionnaireError::SequenceExhausted);
                }
            }
        }

        let was_complete = self.is_complete();
        let replaced = self
            .answers
            .insert(AnswerRecord::new(question_id.clone(), question_type, payload));
        self.cursor += 1;

        tracing::debug!(
            session_id = %self.id,
            question_id = %question_id,
            question_type = %question_type,
            overwrite = replaced.is_some(),
            cursor = self.cursor,
            "Answer recorded"
        );

        if !was_complete && self.is_complete() {
            tracing::info!(
                session_id = %self.id,
                answers = self.answers.len(),
                "Questionnaire complete"
            );
        }

        Ok(())
    }

    /// Answer with a bare JSON object, decoded as the question's payload type
    pub fn answer_value(
        &mut self,
        question_id: &QuestionId,
        value: serde_json::Value,
    ) -> QuestionnaireResult<()> {
        let question_type = self
            .catalog
            .find(question_id)
            .ok_or_else(|| QuestionnaireError::NotFound(question_id.clone()))?
            .question_type;
        let payload = AnswerPayload::from_value(question_type, value).map_err(|e| {
            QuestionnaireError::InvalidPayload {
                question: question_id.clone(),
                expected: question_type,
                reason: e.to_string(),
            }
        })?;
        self.answer(question_id, payload)
    }

    /// Answer whichever question is current
    pub fn answer_current(&mut self, payload: impl Into<AnswerPayload>) -> QuestionnaireResult<()> {
        let index = self
            .resolve_current()
            .ok_or(QuestionnaireError::SequenceExhausted)?;
        let question_id = self.catalog.questions()[index].id.clone();
        self.answer(&question_id, payload)
    }

    /// Pass over the current question if it is optional
    pub fn skip(&mut self) -> bool {
        let Some(index) = self.resolve_current() else {
            return false;
        };
        let question = &self.catalog.questions()[index];
        if question.required {
            tracing::debug!(
                session_id = %self.id,
                question_id = %question.id,
                "Required question cannot be skipped"
            );
            return false;
        }

        tracing::debug!(
            session_id = %self.id,
            question_id = %question.id,
            "Question skipped"
        );
        self.cursor += 1;
        true
    }

    /// Step the cursor back one position; answers are kept
    pub fn previous(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        tracing::debug!(session_id = %self.id, cursor = self.cursor, "Moved to previous question");
        true
    }

    /// Whether every required question has an answer
    pub fn is_complete(&self) -> bool {
        self.catalog
            .required_ids()
            .into_iter()
            .all(|id| self.answers.contains(id))
    }

    /// Cursor position as a rounded percentage of the catalog
    pub fn progress(&self) -> u32 {
        let total = self.catalog.len();
        if total == 0 {
            return 100;
        }
        let percent = (self.cursor as f64 / total as f64 * 100.0).round() as u32;
        match self.config.progress_policy {
            ProgressPolicy::Clamped => percent.min(100),
            ProgressPolicy::Unclamped => percent,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Recorded answers in first-answered order
    pub fn answers(&self) -> &[AnswerRecord] {
        self.answers.records()
    }

    pub fn answer_for(&self, question_id: &QuestionId) -> Option<&AnswerRecord> {
        self.answers.get(question_id)
    }

    /// Every dependency-driven skip so far, oldest first
    pub fn dependency_skips(&self) -> &[DependencySkip] {
        &self.dependency_skips
    }

    /// Ids of required questions still unanswered, in catalog order
    pub fn unanswered_required(&self) -> Vec<&QuestionId> {
        let answered: HashSet<&QuestionId> =
            self.answers.records().iter().map(|r| &r.question_id).collect();
        self.catalog
            .questions()
            .iter()
            .filter(|q| q.required && !answered.contains(&q.id))
            .map(|q| &q.id)
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn session_id(&self) -> &QuestionnaireSessionId {
        &self.id
    }

    /// Synthesize a document update from the recorded answers
    pub fn synthesize(&self, current: &DocumentModel) -> DocumentUpdate {
        synthesizer::synthesize(self.answers(), current)
    }
}
