use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use talapker::intake::{ContactMessage, ContactRepository, ContactRepositoryError};
use talapker::psychometrics::{RepositoryError, ResultId, ResultRecord, ResultRepository};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local result store until the database adapter lands.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResultRepository {
    records: Arc<Mutex<HashMap<ResultId, ResultRecord>>>,
}

impl ResultRepository for InMemoryResultRepository {
    fn insert(&self, record: ResultRecord) -> Result<ResultRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ResultId) -> Result<Option<ResultRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_user(&self, user_ref: &str) -> Result<Vec<ResultRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<ResultRecord> = guard
            .values()
            .filter(|record| record.user_ref.as_deref() == Some(user_ref))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryContactRepository {
    messages: Arc<Mutex<Vec<ContactMessage>>>,
}

impl ContactRepository for InMemoryContactRepository {
    fn insert(&self, message: ContactMessage) -> Result<ContactMessage, ContactRepositoryError> {
        let mut guard = self.messages.lock().expect("contact mutex poisoned");
        guard.push(message.clone());
        Ok(message)
    }
}
