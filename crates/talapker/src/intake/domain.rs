use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Contact form as posted by the page. Every field is optional on the wire so that
/// missing fields surface as a validation message rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "lang")]
    pub locale: Option<String>,
}

/// Validated, stored contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub locale: Locale,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

impl ContactError {
    /// Message shown back to the visitor.
    pub fn localized(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ContactError::MissingField(_), Locale::Ru) => "Заполните все поля",
            (ContactError::MissingField(_), Locale::Kk) => "Барлық өрістерді толтырыңыз",
            (ContactError::MissingField(_), Locale::En) => "Please fill in all fields",
            (ContactError::InvalidEmail(_), Locale::Ru) => "Укажите корректный email",
            (ContactError::InvalidEmail(_), Locale::Kk) => "Дұрыс email енгізіңіз",
            (ContactError::InvalidEmail(_), Locale::En) => "Please enter a valid email",
        }
    }
}

pub fn thank_you(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "Спасибо, мы свяжемся с вами.",
        Locale::Kk => "Рахмет, біз сізбен хабарласамыз.",
        Locale::En => "Thank you, we will get in touch.",
    }
}

pub fn try_again_later(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "Не удалось отправить сообщение, попробуйте позже.",
        Locale::Kk => "Хабарлама жіберілмеді, кейінірек қайталап көріңіз.",
        Locale::En => "We could not send your message, please try again later.",
    }
}

/// Fields after trimming; each one is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub(crate) fn validate(submission: &ContactSubmission) -> Result<ValidContact, ContactError> {
    let required = |value: &Option<String>, field: &'static str| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or(ContactError::MissingField(field))
    };

    let name = required(&submission.name, "name")?;
    let email = required(&submission.email, "email")?;
    let message = required(&submission.message, "message")?;

    if !looks_like_email(&email) {
        return Err(ContactError::InvalidEmail(email));
    }

    Ok(ValidContact {
        name,
        email,
        message,
    })
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !value.contains(char::is_whitespace)
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}
