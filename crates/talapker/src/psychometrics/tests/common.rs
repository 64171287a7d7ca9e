use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::i18n::Locale;
use crate::psychometrics::content::{ContentStore, PsychometricContent};
use crate::psychometrics::domain::{QuizSubmission, RawAnswer};
use crate::psychometrics::repository::{
    RepositoryError, ResultId, ResultRecord, ResultRepository,
};
use crate::psychometrics::service::PsychometricService;

#[derive(Default, Clone)]
pub(super) struct MemoryResults {
    records: Arc<Mutex<HashMap<ResultId, ResultRecord>>>,
}

impl MemoryResults {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("results mutex poisoned").len()
    }
}

impl ResultRepository for MemoryResults {
    fn insert(&self, record: ResultRecord) -> Result<ResultRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("results mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ResultId) -> Result<Option<ResultRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("results mutex poisoned")
            .get(id)
            .cloned())
    }

    fn for_user(&self, user_ref: &str) -> Result<Vec<ResultRecord>, RepositoryError> {
        let guard = self.records.lock().expect("results mutex poisoned");
        let mut records: Vec<_> = guard
            .values()
            .filter(|record| record.user_ref.as_deref() == Some(user_ref))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(records)
    }
}

pub(super) struct UnavailableResults;

impl ResultRepository for UnavailableResults {
    fn insert(&self, _record: ResultRecord) -> Result<ResultRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ResultId) -> Result<Option<ResultRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_user(&self, _user_ref: &str) -> Result<Vec<ResultRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn content_store() -> Arc<ContentStore> {
    let content = PsychometricContent::builtin(Locale::Ru).expect("embedded content parses");
    Arc::new(ContentStore::fixed(content))
}

pub(super) fn build_service() -> (PsychometricService<MemoryResults>, MemoryResults) {
    let repository = MemoryResults::default();
    let service = PsychometricService::new(content_store(), Arc::new(repository.clone()));
    (service, repository)
}

pub(super) fn raw(question_id: Value, value: Value) -> RawAnswer {
    RawAnswer { question_id, value }
}

/// Answers every builtin question so the result leans towards the second letter of each axis.
pub(super) fn introvert_submission() -> QuizSubmission {
    // Positions 1, 3 and 5 of each five-question axis block are primary.
    let answers = (1..=20)
        .map(|id: u32| {
            let primary = matches!(id % 5, 1 | 3 | 0);
            raw(json!(id), json!(if primary { 1 } else { 5 }))
        })
        .collect();

    QuizSubmission {
        locale: Some("en".to_string()),
        user_ref: Some("applicant-17".to_string()),
        answers,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
