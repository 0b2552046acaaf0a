//! Questionnaire orchestration engine for will building
//!
//! The engine walks a testator through a prioritised catalog of questions
//! and turns their answers into updates for the will document. It never
//! persists anything: callers read the document, synthesize an update,
//! merge it and store the result.
//!
//! # Architecture
//!
//! - [`QuestionnaireSession`]: The sequencer; current question, answer, skip,
//!   previous, completion and progress over a [`QuestionCatalog`]
//! - [`DocumentSynthesizer`]: Turns answer records into a
//!   [`DocumentUpdate`], including the guardian-as-trustee derivation
//! - [`GapDetector`]: Finds missing appointments in a document and
//!   generates the questions that fill them
//! - [`AnswerStore`]: Insertion-ordered answers, one per question
//!
//! [`QuestionCatalog`]: questionnaire_types::QuestionCatalog
//! [`DocumentUpdate`]: questionnaire_types::DocumentUpdate
//!
//! # Example
//!
//! ```rust
//! use questionnaire_engine::QuestionnaireSession;
//! use questionnaire_types::*;
//!
//! let catalog = QuestionCatalog::new(vec![
//!     QuestionDefinition::new("same-person", QuestionType::SamePersonGuardianTrustee, 1)
//!         .required(),
//!     QuestionDefinition::new("trustee", QuestionType::TrusteeAppointment, 2)
//!         .depends_on("same-person"),
//! ])
//! .unwrap();
//!
//! let mut session = QuestionnaireSession::new(catalog);
//! session
//!     .answer_current(SamePersonAnswer {
//!         use_same_person_for_trustee: true,
//!         guardian_id: Some("g-1".into()),
//!     })
//!     .unwrap();
//! assert!(session.is_complete());
//!
//! // The trustee question is optional
//! assert!(session.skip());
//! assert_eq!(session.progress(), 100);
//!
//! let mut document = DocumentModel::new();
//! document.guardians.push(Guardian {
//!     id: "g-1".into(),
//!     full_name: "Jane Doe".into(),
//!     ..Default::default()
//! });
//!
//! let update = session.synthesize(&document);
//! document.apply(update);
//! assert!(document.trustees[0].is_guardian);
//! ```

#![deny(unsafe_code)]

pub mod answer_store;
pub mod config;
pub mod gap_detector;
pub mod id_minter;
pub mod session;
pub mod synthesizer;

// Re-export main types
pub use answer_store::AnswerStore;
pub use config::{CursorBinding, ProgressPolicy, SessionConfig};
pub use gap_detector::{
    GapDetector, GapKind, GapSeverity, MissingInfoGap, MissingInfoReport, ReportPriority,
};
pub use id_minter::{EntityIdMinter, SequentialIdMinter, TimestampIdMinter};
pub use session::{DependencySkip, QuestionnaireSession, QuestionnaireSessionId, SessionState};
pub use synthesizer::{synthesize, DocumentSynthesizer, MergePolicy, TRUSTEE_MERGE_POLICY};
