//! Supported portal locales and tag normalization.
//!
//! Locale tags arrive from query strings and JSON payloads. Anything outside the
//! supported set is normalized to the configured default and never rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the portal ships content for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    Kk,
    En,
}

/// Ordered list of supported locales, default first.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::Ru, Locale::Kk, Locale::En];

impl Locale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::Kk => "kk",
            Locale::En => "en",
        }
    }

    /// Parse a tag such as `kk`, `EN`, `en-US` or `ru_RU`.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "ru" => Some(Locale::Ru),
            // `kz` is the country code, but users type it for the language too.
            "kk" | "kz" => Some(Locale::Kk),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Total variant of [`Locale::parse`]: unknown or missing tags map to `default`.
    pub fn normalize(value: Option<&str>, default: Locale) -> Locale {
        value.and_then(Locale::parse).unwrap_or(default)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
