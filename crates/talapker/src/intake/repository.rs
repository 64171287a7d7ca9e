use super::domain::ContactMessage;

/// Storage abstraction for contact messages.
pub trait ContactRepository: Send + Sync {
    fn insert(&self, message: ContactMessage) -> Result<ContactMessage, ContactRepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ContactRepositoryError {
    #[error("contact store unavailable: {0}")]
    Unavailable(String),
}
