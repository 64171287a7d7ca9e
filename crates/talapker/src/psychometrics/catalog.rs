use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Axis, LikertValue, Polarity, Question};
use crate::i18n::Locale;

/// One locale's question document as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub locale: String,
    /// Likert labels, lowest value first.
    pub scale: Vec<String>,
    pub questions: Vec<Question>,
}

/// Validation errors raised while assembling a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("question set declares unsupported locale '{0}'")]
    UnknownLocale(String),
    #[error("locale {0} is provided more than once")]
    DuplicateLocale(Locale),
    #[error("locale {locale} scale must have {expected} labels, found {found}")]
    InvalidScale {
        locale: Locale,
        expected: usize,
        found: usize,
    },
    #[error("locale {locale} lists question {id} more than once")]
    DuplicateQuestion { locale: Locale, id: u32 },
    #[error("locale {locale} question {id} has empty text")]
    EmptyText { locale: Locale, id: u32 },
    #[error(
        "question {id} is scored as {expected_axis}/{expected_polarity:?} elsewhere but \
         {found_axis}/{found_polarity:?} in locale {locale}"
    )]
    InconsistentMetadata {
        id: u32,
        locale: Locale,
        expected_axis: Axis,
        expected_polarity: Polarity,
        found_axis: Axis,
        found_polarity: Polarity,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct CatalogEntry {
    axis: Axis,
    polarity: Polarity,
    texts: BTreeMap<Locale, String>,
}

/// Read-only, validated question content for every supported locale.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCatalog {
    default_locale: Locale,
    entries: BTreeMap<u32, CatalogEntry>,
    scales: BTreeMap<Locale, Vec<String>>,
}

impl QuestionCatalog {
    pub fn from_sets(sets: Vec<QuestionSet>, default_locale: Locale) -> Result<Self, CatalogError> {
        let mut entries: BTreeMap<u32, CatalogEntry> = BTreeMap::new();
        let mut scales = BTreeMap::new();

        for set in sets {
            let locale =
                Locale::parse(&set.locale).ok_or_else(|| CatalogError::UnknownLocale(set.locale))?;
            if scales.contains_key(&locale) {
                return Err(CatalogError::DuplicateLocale(locale));
            }

            let expected = usize::from(LikertValue::MAX);
            if set.scale.len() != expected {
                return Err(CatalogError::InvalidScale {
                    locale,
                    expected,
                    found: set.scale.len(),
                });
            }
            scales.insert(locale, set.scale);

            for question in set.questions {
                let Question {
                    id,
                    text,
                    axis,
                    polarity,
                } = question;

                if text.trim().is_empty() {
                    return Err(CatalogError::EmptyText { locale, id });
                }

                let entry = entries.entry(id).or_insert_with(|| CatalogEntry {
                    axis,
                    polarity,
                    texts: BTreeMap::new(),
                });

                if entry.axis != axis || entry.polarity != polarity {
                    return Err(CatalogError::InconsistentMetadata {
                        id,
                        locale,
                        expected_axis: entry.axis,
                        expected_polarity: entry.polarity,
                        found_axis: axis,
                        found_polarity: polarity,
                    });
                }

                if entry.texts.insert(locale, text).is_some() {
                    return Err(CatalogError::DuplicateQuestion { locale, id });
                }
            }
        }

        Ok(Self {
            default_locale,
            entries,
            scales,
        })
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Questions translated into `locale`, ordered by id.
    ///
    /// A supported locale with no content yields an empty list rather than an error.
    pub fn load(&self, locale: Locale) -> Vec<Question> {
        self.entries
            .iter()
            .filter_map(|(id, entry)| {
                entry.texts.get(&locale).map(|text| Question {
                    id: *id,
                    text: text.clone(),
                    axis: entry.axis,
                    polarity: entry.polarity,
                })
            })
            .collect()
    }

    /// Like [`QuestionCatalog::load`] but takes a raw tag; unsupported tags use the default locale.
    pub fn load_tag(&self, tag: Option<&str>) -> (Locale, Vec<Question>) {
        let locale = Locale::normalize(tag, self.default_locale);
        (locale, self.load(locale))
    }

    /// Every question regardless of translation coverage, for server-side scoring.
    pub fn scoring_questions(&self) -> Vec<Question> {
        self.entries
            .iter()
            .map(|(id, entry)| {
                let text = entry
                    .texts
                    .get(&self.default_locale)
                    .or_else(|| entry.texts.values().next())
                    .cloned()
                    .unwrap_or_default();
                Question {
                    id: *id,
                    text,
                    axis: entry.axis,
                    polarity: entry.polarity,
                }
            })
            .collect()
    }

    /// Likert labels for `locale`, falling back to the default locale's labels.
    pub fn scale(&self, locale: Locale) -> &[String] {
        self.scales
            .get(&locale)
            .or_else(|| self.scales.get(&self.default_locale))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn locales(&self) -> Vec<Locale> {
        self.scales.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
