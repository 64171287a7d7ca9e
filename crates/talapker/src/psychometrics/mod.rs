//! Psychometric self-assessment: localized questions, Likert scoring to a four-letter type,
//! and program recommendations for that type.
//!
//! Content is loaded once into an immutable [`PsychometricContent`] snapshot held by a
//! [`ContentStore`]; scoring and recommendation lookup are pure functions over it.

pub mod catalog;
pub mod content;
pub mod domain;
pub mod recommendation;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, QuestionCatalog, QuestionSet};
pub use content::{ContentError, ContentStore, ContentSummary, PsychometricContent};
pub use domain::{
    Answer, Axis, LikertValue, Polarity, Question, QuizSubmission, RawAnswer,
    RecommendationBundle, TypeCode,
};
pub use recommendation::{RecommendationTable, PLACEHOLDER};
pub use repository::{RepositoryError, ResultId, ResultRecord, ResultRepository};
pub use router::{content_admin_router, psychometric_router};
pub use scoring::{score, score_sheet, validate_answers, AxisTally, ScoreSheet, SubmissionError};
pub use service::{
    PsychometricService, PsychometricServiceError, QuestionView, QuestionsView, SubmissionOutcome,
};
