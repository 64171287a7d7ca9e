//! Type code to localized recommendation bundle.
//!
//! Resolution never fails. Unknown codes get the "undetermined" bundle for the requested
//! locale. Known codes resolve each field on its own: requested locale, then the default
//! locale, then [`PLACEHOLDER`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{RecommendationBundle, TypeCode};
use crate::i18n::Locale;

/// Shown when neither the requested nor the default locale defines a text field.
pub const PLACEHOLDER: &str = "n/a";

/// Per-locale fields for a single type. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub strengths: Option<String>,
    #[serde(default)]
    pub professions: Option<Vec<String>>,
}

/// Recommendation document as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationDocument {
    pub types: BTreeMap<String, BTreeMap<String, LocalizedFields>>,
}

#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("recommendation key '{0}' is not a valid type code")]
    InvalidTypeCode(String),
    #[error("recommendation for {code} uses unsupported locale '{tag}'")]
    UnknownLocale { code: String, tag: String },
}

/// Typed lookup `TypeCode -> Locale -> fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationTable {
    default_locale: Locale,
    entries: BTreeMap<TypeCode, BTreeMap<Locale, LocalizedFields>>,
}

impl RecommendationTable {
    pub fn from_document(
        document: RecommendationDocument,
        default_locale: Locale,
    ) -> Result<Self, RecommendationError> {
        let mut entries = BTreeMap::new();

        for (raw_code, locales) in document.types {
            let code = TypeCode::parse(&raw_code)
                .ok_or_else(|| RecommendationError::InvalidTypeCode(raw_code.clone()))?;

            let mut by_locale = BTreeMap::new();
            for (tag, fields) in locales {
                let locale = Locale::parse(&tag).ok_or_else(|| RecommendationError::UnknownLocale {
                    code: raw_code.clone(),
                    tag: tag.clone(),
                })?;
                by_locale.insert(locale, normalize(fields));
            }
            entries.insert(code, by_locale);
        }

        Ok(Self {
            default_locale,
            entries,
        })
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    pub fn contains(&self, code: &TypeCode) -> bool {
        self.entries.contains_key(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &TypeCode> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve any string and any locale to a bundle with non-empty title and description.
    pub fn resolve(&self, type_code: &str, locale: Locale) -> RecommendationBundle {
        match TypeCode::parse(type_code) {
            Some(code) => self.resolve_code(&code, locale),
            None => {
                tracing::debug!(type_code, %locale, "malformed type code, using undetermined text");
                undetermined(type_code.trim(), locale)
            }
        }
    }

    pub fn resolve_code(&self, code: &TypeCode, locale: Locale) -> RecommendationBundle {
        let Some(by_locale) = self.entries.get(code) else {
            tracing::debug!(%code, %locale, "type missing from recommendation table");
            return undetermined(code.as_str(), locale);
        };

        let requested = by_locale.get(&locale);
        let fallback = by_locale.get(&self.default_locale);
        let pick = |field: fn(&LocalizedFields) -> Option<&String>| -> String {
            requested
                .and_then(field)
                .or_else(|| fallback.and_then(field))
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        };

        let professions = requested
            .and_then(|fields| fields.professions.as_ref())
            .or_else(|| fallback.and_then(|fields| fields.professions.as_ref()))
            .cloned()
            .unwrap_or_default();

        RecommendationBundle {
            type_code: code.to_string(),
            locale,
            title: pick(|fields| fields.title.as_ref()),
            description: pick(|fields| fields.description.as_ref()),
            strengths: pick(|fields| fields.strengths.as_ref()),
            professions,
            percentages: BTreeMap::new(),
        }
    }
}

/// Blank strings and empty lists count as missing so fallbacks kick in.
fn normalize(fields: LocalizedFields) -> LocalizedFields {
    let text = |value: Option<String>| value.filter(|text| !text.trim().is_empty());
    LocalizedFields {
        title: text(fields.title),
        description: text(fields.description),
        strengths: text(fields.strengths),
        professions: fields.professions.filter(|list| !list.is_empty()),
    }
}

fn undetermined(type_code: &str, locale: Locale) -> RecommendationBundle {
    let (title, description) = match locale {
        Locale::Ru => (
            "Тип не определён",
            "Не удалось определить тип личности. Пройдите тест ещё раз или обратитесь в приёмную комиссию.",
        ),
        Locale::Kk => (
            "Тип анықталмады",
            "Тұлға типін анықтау мүмкін болмады. Тестті қайта тапсырыңыз немесе қабылдау комиссиясына хабарласыңыз.",
        ),
        Locale::En => (
            "Type undetermined",
            "We could not determine a personality type. Retake the test or contact the admissions office.",
        ),
    };

    RecommendationBundle {
        type_code: type_code.to_string(),
        locale,
        title: title.to_string(),
        description: description.to_string(),
        strengths: PLACEHOLDER.to_string(),
        professions: Vec::new(),
        percentages: BTreeMap::new(),
    }
}
