use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use super::catalog::{CatalogError, QuestionCatalog, QuestionSet};
use super::recommendation::{RecommendationDocument, RecommendationError, RecommendationTable};
use crate::config::ContentConfig;
use crate::i18n::{Locale, SUPPORTED_LOCALES};

const EMBEDDED_QUESTIONS: &[(&str, &str)] = &[
    ("ru", include_str!("../../content/questions.ru.json")),
    ("kk", include_str!("../../content/questions.kk.json")),
    ("en", include_str!("../../content/questions.en.json")),
];
const EMBEDDED_RECOMMENDATIONS: &str = include_str!("../../content/recommendations.json");
const RECOMMENDATIONS_FILE: &str = "recommendations.json";

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Recommendations(#[from] RecommendationError),
}

/// Immutable quiz content shared by reference across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct PsychometricContent {
    pub catalog: QuestionCatalog,
    pub recommendations: RecommendationTable,
}

impl PsychometricContent {
    /// Content compiled into the binary.
    pub fn builtin(default_locale: Locale) -> Result<Self, ContentError> {
        let sets = EMBEDDED_QUESTIONS
            .iter()
            .map(|(tag, raw)| parse(&format!("embedded questions.{tag}.json"), raw))
            .collect::<Result<Vec<QuestionSet>, _>>()?;
        let document = parse("embedded recommendations.json", EMBEDDED_RECOMMENDATIONS)?;
        Self::assemble(sets, document, default_locale)
    }

    /// Content read from `dir`. Question files are `questions.<locale>.json`; a missing file
    /// leaves that locale without questions.
    pub fn from_dir(dir: &Path, default_locale: Locale) -> Result<Self, ContentError> {
        let mut sets = Vec::new();
        for locale in SUPPORTED_LOCALES {
            let path = dir.join(format!("questions.{}.json", locale.as_str()));
            if let Some(raw) = read_optional(&path)? {
                sets.push(parse(&path.display().to_string(), &raw)?);
            } else {
                tracing::warn!(path = %path.display(), %locale, "no question file for locale");
            }
        }

        let path = dir.join(RECOMMENDATIONS_FILE);
        let document = match read_optional(&path)? {
            Some(raw) => parse(&path.display().to_string(), &raw)?,
            None => {
                tracing::warn!(path = %path.display(), "no recommendation file, every type is undetermined");
                RecommendationDocument::default()
            }
        };

        Self::assemble(sets, document, default_locale)
    }

    pub fn from_config(config: &ContentConfig) -> Result<Self, ContentError> {
        match &config.content_dir {
            Some(dir) => Self::from_dir(dir, config.default_locale),
            None => Self::builtin(config.default_locale),
        }
    }

    fn assemble(
        sets: Vec<QuestionSet>,
        document: RecommendationDocument,
        default_locale: Locale,
    ) -> Result<Self, ContentError> {
        Ok(Self {
            catalog: QuestionCatalog::from_sets(sets, default_locale)?,
            recommendations: RecommendationTable::from_document(document, default_locale)?,
        })
    }
}

fn parse<T: serde::de::DeserializeOwned>(origin: &str, raw: &str) -> Result<T, ContentError> {
    serde_json::from_str(raw).map_err(|source| ContentError::Parse {
        origin: origin.to_string(),
        source,
    })
}

fn read_optional(path: &Path) -> Result<Option<String>, ContentError> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ContentError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Summary returned after a reload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContentSummary {
    pub locales: Vec<Locale>,
    pub questions: usize,
    pub types: usize,
}

impl From<&PsychometricContent> for ContentSummary {
    fn from(content: &PsychometricContent) -> Self {
        Self {
            locales: content.catalog.locales(),
            questions: content.catalog.len(),
            types: content.recommendations.len(),
        }
    }
}

/// Holds the current content snapshot and swaps it on reload.
///
/// Readers clone the inner `Arc` and never block each other; a failed reload keeps the
/// previous snapshot in place.
#[derive(Debug)]
pub struct ContentStore {
    config: ContentConfig,
    current: RwLock<Arc<PsychometricContent>>,
}

impl ContentStore {
    pub fn load(config: ContentConfig) -> Result<Self, ContentError> {
        let content = PsychometricContent::from_config(&config)?;
        Ok(Self {
            config,
            current: RwLock::new(Arc::new(content)),
        })
    }

    /// Wrap already-built content. Reloads rebuild the embedded content.
    pub fn fixed(content: PsychometricContent) -> Self {
        let config = ContentConfig {
            default_locale: content.catalog.default_locale(),
            content_dir: None,
        };
        Self {
            config,
            current: RwLock::new(Arc::new(content)),
        }
    }

    pub fn snapshot(&self) -> Arc<PsychometricContent> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn reload(&self) -> Result<ContentSummary, ContentError> {
        let content = PsychometricContent::from_config(&self.config)?;
        let summary = ContentSummary::from(&content);

        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::new(content);

        tracing::info!(
            questions = summary.questions,
            types = summary.types,
            "psychometric content reloaded"
        );
        Ok(summary)
    }
}
