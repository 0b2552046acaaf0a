//! Questionnaire Domain Types
//!
//! A will is assembled by asking the testator a short sequence of questions
//! and turning the answers into document entities. This crate holds the
//! vocabulary shared by the engine and its callers.
//!
//! # Key Concepts
//!
//! - **QuestionDefinition**: one question, with a priority, a required flag
//!   and the ids of questions that must be answered first.
//! - **QuestionCatalog**: the validated, priority-sorted list of questions
//!   for one session. Dependency problems are rejected here, not discovered
//!   while asking.
//! - **AnswerPayload / AnswerRecord**: the raw answer data, tagged by the
//!   question type it belongs to.
//! - **DocumentModel / DocumentUpdate**: the slice of the will the
//!   questionnaire reads, and the partial update synthesized from answers.

#![deny(unsafe_code)]

mod answer;
mod catalog;
mod document;
mod errors;
mod question;

pub use answer::*;
pub use catalog::*;
pub use document::*;
pub use errors::*;
pub use question::*;
