use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use super::content::{ContentError, ContentStore, ContentSummary};
use super::domain::{QuizSubmission, RecommendationBundle, TypeCode};
use super::repository::{RepositoryError, ResultId, ResultRecord, ResultRepository};
use super::scoring::{score_sheet, validate_answers, SubmissionError};
use crate::i18n::Locale;

/// Question as sent to the quiz page. Scoring metadata stays on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: u32,
    pub text: String,
    pub options: Vec<String>,
}

/// Questions resolved for one locale. Only `questions` goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionsView {
    pub locale: Locale,
    pub questions: Vec<QuestionView>,
}

/// Response to a quiz submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionOutcome {
    pub result_id: ResultId,
    pub type_code: TypeCode,
    pub recommendation: RecommendationBundle,
    pub skipped_question_ids: Vec<u32>,
}

/// Service composing content, scoring, recommendation lookup and result storage.
pub struct PsychometricService<R> {
    content: Arc<ContentStore>,
    repository: Arc<R>,
}

static RESULT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_result_id() -> ResultId {
    let id = RESULT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ResultId(format!("res-{id:06}"))
}

impl<R> PsychometricService<R>
where
    R: ResultRepository + 'static,
{
    pub fn new(content: Arc<ContentStore>, repository: Arc<R>) -> Self {
        Self {
            content,
            repository,
        }
    }

    pub fn default_locale(&self) -> Locale {
        self.content.snapshot().catalog.default_locale()
    }

    /// Questions for the quiz page in the requested (or default) locale.
    pub fn questions(&self, locale_tag: Option<&str>) -> QuestionsView {
        let content = self.content.snapshot();
        let (locale, questions) = content.catalog.load_tag(locale_tag);
        if questions.is_empty() {
            tracing::debug!(%locale, "no questions available for locale");
        }

        let scale = content.catalog.scale(locale).to_vec();
        let questions = questions
            .into_iter()
            .map(|question| QuestionView {
                id: question.id,
                text: question.text,
                options: scale.clone(),
            })
            .collect();

        QuestionsView { locale, questions }
    }

    /// Validate, score, resolve and store a submission.
    pub fn submit(
        &self,
        submission: QuizSubmission,
    ) -> Result<SubmissionOutcome, PsychometricServiceError> {
        let QuizSubmission {
            locale,
            user_ref,
            answers,
        } = submission;

        let answers = validate_answers(&answers).map_err(|err| {
            tracing::warn!(error = %err, "rejected quiz submission");
            err
        })?;

        let content = self.content.snapshot();
        let locale = Locale::normalize(locale.as_deref(), content.catalog.default_locale());

        let sheet = score_sheet(&answers, &content.catalog.scoring_questions());
        if !sheet.skipped.is_empty() {
            tracing::debug!(skipped = ?sheet.skipped, "answers without a matching question were ignored");
        }

        let mut recommendation = content
            .recommendations
            .resolve_code(&sheet.type_code, locale);
        recommendation.percentages = sheet.percentages();

        let record = ResultRecord {
            id: next_result_id(),
            user_ref: user_ref.filter(|value| !value.trim().is_empty()),
            locale,
            answers,
            type_code: sheet.type_code.clone(),
            recommendation,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        tracing::info!(
            result_id = %stored.id.0,
            type_code = %stored.type_code,
            %locale,
            "stored quiz result"
        );

        Ok(SubmissionOutcome {
            result_id: stored.id,
            type_code: stored.type_code,
            recommendation: stored.recommendation,
            skipped_question_ids: sheet.skipped,
        })
    }

    pub fn get(&self, id: &ResultId) -> Result<ResultRecord, PsychometricServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn for_user(&self, user_ref: &str) -> Result<Vec<ResultRecord>, PsychometricServiceError> {
        Ok(self.repository.for_user(user_ref)?)
    }

    /// Resolve a type directly, e.g. to re-render a stored result in another language.
    pub fn recommendation(&self, type_code: &str, locale_tag: Option<&str>) -> RecommendationBundle {
        let content = self.content.snapshot();
        let locale = Locale::normalize(locale_tag, content.recommendations.default_locale());
        content.recommendations.resolve(type_code, locale)
    }

    pub fn reload(&self) -> Result<ContentSummary, PsychometricServiceError> {
        Ok(self.content.reload()?)
    }
}

/// Error raised by the psychometric service.
#[derive(Debug, thiserror::Error)]
pub enum PsychometricServiceError {
    #[error(transparent)]
    InvalidSubmission(#[from] SubmissionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Content(#[from] ContentError),
}
