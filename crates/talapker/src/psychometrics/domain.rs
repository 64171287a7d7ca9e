use std::fmt;

use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

/// One of the four bipolar scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    EI,
    SN,
    TF,
    JP,
}

impl Axis {
    /// Fixed order in which axis letters are concatenated into a [`TypeCode`].
    pub const ORDER: [Axis; 4] = [Axis::EI, Axis::SN, Axis::TF, Axis::JP];

    /// `(first, second)` letters; the first wins ties.
    pub const fn letters(self) -> (char, char) {
        match self {
            Axis::EI => ('E', 'I'),
            Axis::SN => ('S', 'N'),
            Axis::TF => ('T', 'F'),
            Axis::JP => ('J', 'P'),
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Axis::EI => 0,
            Axis::SN => 1,
            Axis::TF => 2,
            Axis::JP => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Axis::EI => "EI",
            Axis::SN => "SN",
            Axis::TF => "TF",
            Axis::JP => "JP",
        }
    }

    fn accepts(self, letter: char) -> bool {
        let (first, second) = self.letters();
        letter == first || letter == second
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a high answer reinforces the axis's first letter (`Primary`) or its opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Primary,
    Secondary,
}

impl Polarity {
    /// Signed contribution of a midpoint-centered value.
    pub const fn apply(self, centered: i32) -> i32 {
        match self {
            Polarity::Primary => centered,
            Polarity::Secondary => -centered,
        }
    }
}

/// A localized quiz question. Scoring metadata is identical across locales for the same `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub axis: Axis,
    pub polarity: Polarity,
}

/// Likert scale answer in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct LikertValue(u8);

impl LikertValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const MIDPOINT: u8 = 3;

    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Value shifted so the midpoint is zero (`-2..=2`).
    pub const fn centered(self) -> i32 {
        self.0 as i32 - Self::MIDPOINT as i32
    }
}

impl TryFrom<i64> for LikertValue {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        LikertValue::new(value).ok_or_else(|| format!("answer value {value} is outside 1..=5"))
    }
}

impl From<LikertValue> for u8 {
    fn from(value: LikertValue) -> Self {
        value.0
    }
}

/// A validated answer to a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u32,
    pub value: LikertValue,
}

impl Answer {
    pub fn new(question_id: u32, value: LikertValue) -> Self {
        Self { question_id, value }
    }
}

/// Unvalidated answer as posted by the quiz page.
///
/// Older pages post `id` instead of `question_id`; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAnswer {
    #[serde(alias = "id")]
    pub question_id: serde_json::Value,
    pub value: serde_json::Value,
}

/// Submitted quiz payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuizSubmission {
    #[serde(default, alias = "lang")]
    pub locale: Option<String>,
    #[serde(default)]
    pub user_ref: Option<String>,
    /// Required; an explicit empty list is a valid submission.
    pub answers: Vec<RawAnswer>,
}

/// Four-letter personality type, one letter per axis in [`Axis::ORDER`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeCode(String);

impl TypeCode {
    /// Build a code from one letter per axis. Letters must come from each axis's pair.
    pub fn from_letters(letters: [char; 4]) -> Option<Self> {
        let valid = Axis::ORDER
            .iter()
            .zip(letters.iter())
            .all(|(axis, letter)| axis.accepts(*letter));
        valid.then(|| Self(letters.iter().collect()))
    }

    /// Case-insensitive parse; surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        let mut chars = upper.chars();
        let letters = [chars.next()?, chars.next()?, chars.next()?, chars.next()?];
        if chars.next().is_some() {
            return None;
        }
        Self::from_letters(letters)
    }

    /// Code produced when every axis ties, i.e. the first letter of each axis.
    pub fn tie_default() -> Self {
        let letters = Axis::ORDER.map(|axis| axis.letters().0);
        Self(letters.iter().collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn letter(&self, axis: Axis) -> char {
        self.0
            .chars()
            .nth(axis.index())
            .unwrap_or(axis.letters().0)
    }

    /// All sixteen codes in axis order.
    pub fn all() -> Vec<TypeCode> {
        let mut codes = Vec::with_capacity(16);
        for mask in 0u8..16 {
            let letters = Axis::ORDER.map(|axis| {
                let (first, second) = axis.letters();
                if mask & (0b1000 >> axis.index()) == 0 {
                    first
                } else {
                    second
                }
            });
            codes.push(Self(letters.iter().collect()));
        }
        codes
    }
}

impl TryFrom<String> for TypeCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeCode::parse(&value).ok_or_else(|| format!("'{value}' is not a valid type code"))
    }
}

impl From<TypeCode> for String {
    fn from(value: TypeCode) -> Self {
        value.0
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text fields shown alongside a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    pub type_code: String,
    pub locale: Locale,
    pub title: String,
    pub description: String,
    pub strengths: String,
    pub professions: Vec<String>,
    /// Share (0..=100) of each axis's first letter.
    #[serde(default)]
    pub percentages: std::collections::BTreeMap<Axis, u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likert_bounds() {
        assert!(LikertValue::new(0).is_none());
        assert!(LikertValue::new(6).is_none());
        assert_eq!(LikertValue::new(1).map(LikertValue::centered), Some(-2));
        assert_eq!(LikertValue::new(3).map(LikertValue::centered), Some(0));
        assert_eq!(LikertValue::new(5).map(LikertValue::centered), Some(2));
    }

    #[test]
    fn type_code_rejects_letters_from_wrong_axis() {
        assert!(TypeCode::parse("INTJ").is_some());
        assert_eq!(
            TypeCode::parse(" enfp ").map(|code| code.to_string()),
            Some("ENFP".to_string())
        );
        assert!(TypeCode::parse("NITJ").is_none());
        assert!(TypeCode::parse("INT").is_none());
        assert!(TypeCode::parse("INTJX").is_none());
        assert!(TypeCode::parse("").is_none());
    }

    #[test]
    fn enumerates_sixteen_distinct_codes() {
        let codes = TypeCode::all();
        assert_eq!(codes.len(), 16);
        assert_eq!(codes[0], TypeCode::tie_default());
        assert_eq!(codes[15].as_str(), "INFP");
        let mut unique = codes.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn tie_default_is_first_letters() {
        let code = TypeCode::tie_default();
        assert_eq!(code.as_str(), "ESTJ");
        assert_eq!(code.letter(Axis::TF), 'T');
    }

    #[test]
    fn raw_answer_accepts_legacy_id_field() {
        let raw: RawAnswer =
            serde_json::from_str(r#"{"id": 4, "value": 5}"#).expect("legacy payload parses");
        assert_eq!(raw.question_id, serde_json::json!(4));
    }
}
