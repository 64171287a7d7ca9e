//! Contact form intake for prospective applicants.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{ContactError, ContactMessage, ContactSubmission, MessageId};
pub use repository::{ContactRepository, ContactRepositoryError};
pub use router::contact_router;
pub use service::{ContactService, IntakeServiceError};
