use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{validate, ContactError, ContactMessage, ContactSubmission, MessageId};
use super::repository::{ContactRepository, ContactRepositoryError};
use crate::i18n::Locale;

static MESSAGE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_message_id() -> MessageId {
    let id = MESSAGE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    MessageId(format!("msg-{id:06}"))
}

pub struct ContactService<C> {
    repository: Arc<C>,
    default_locale: Locale,
}

impl<C> ContactService<C>
where
    C: ContactRepository + 'static,
{
    pub fn new(repository: Arc<C>, default_locale: Locale) -> Self {
        Self {
            repository,
            default_locale,
        }
    }

    pub fn locale_for(&self, submission: &ContactSubmission) -> Locale {
        Locale::normalize(submission.locale.as_deref(), self.default_locale)
    }

    pub fn submit(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, IntakeServiceError> {
        let locale = self.locale_for(&submission);
        let valid = validate(&submission)?;

        let message = ContactMessage {
            id: next_message_id(),
            name: valid.name,
            email: valid.email,
            message: valid.message,
            locale,
            received_at: Utc::now(),
        };

        let stored = self.repository.insert(message)?;
        tracing::info!(message_id = %stored.id.0, %locale, "contact message received");
        Ok(stored)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error(transparent)]
    Invalid(#[from] ContactError),
    #[error(transparent)]
    Repository(#[from] ContactRepositoryError),
}
