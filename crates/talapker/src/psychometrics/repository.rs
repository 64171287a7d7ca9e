use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Answer, RecommendationBundle, TypeCode};
use crate::i18n::Locale;

/// Identifier wrapper for stored quiz results.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResultId(pub String);

/// Immutable outcome of a single quiz submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: ResultId,
    pub user_ref: Option<String>,
    pub locale: Locale,
    pub answers: Vec<Answer>,
    pub type_code: TypeCode,
    pub recommendation: RecommendationBundle,
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction owned by the persistence layer.
pub trait ResultRepository: Send + Sync {
    fn insert(&self, record: ResultRecord) -> Result<ResultRecord, RepositoryError>;
    fn fetch(&self, id: &ResultId) -> Result<Option<ResultRecord>, RepositoryError>;
    /// Records for `user_ref`, oldest first.
    fn for_user(&self, user_ref: &str) -> Result<Vec<ResultRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
