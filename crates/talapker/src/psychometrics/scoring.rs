//! Likert answers to a four-letter type.
//!
//! Each answer is centered on the scale midpoint (`value - 3`), negated when the question has
//! secondary polarity, and added to its axis accumulator. An axis resolves to
//! its first letter when the accumulator is zero or positive, so ties (including axes nobody
//! answered) favor `E`, `S`, `T` and `J`.
//!
//! Answers that reference a question id missing from the catalog are skipped and reported in
//! [`ScoreSheet::skipped`]; they never influence an axis.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{Answer, Axis, LikertValue, Question, RawAnswer, TypeCode};

/// Per-axis accumulator state after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisTally {
    pub axis: Axis,
    pub score: i32,
    pub answered: u32,
}

impl AxisTally {
    fn new(axis: Axis) -> Self {
        Self {
            axis,
            score: 0,
            answered: 0,
        }
    }

    /// First letter on zero or positive scores, second letter otherwise.
    pub fn letter(&self) -> char {
        let (first, second) = self.axis.letters();
        if self.score >= 0 {
            first
        } else {
            second
        }
    }

    /// Share (0..=100) of the axis's first letter. Untouched axes sit at 50.
    pub fn first_letter_share(&self) -> u8 {
        if self.answered == 0 {
            return 50;
        }
        let max = i64::from(self.answered) * i64::from(LikertValue::MAX - LikertValue::MIDPOINT);
        let share = 50.0 + 50.0 * self.score as f64 / max as f64;
        share.round().clamp(0.0, 100.0) as u8
    }
}

/// Full scoring output: the type plus the trail that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    pub type_code: TypeCode,
    pub axes: [AxisTally; 4],
    /// Question ids that matched nothing in the catalog, in submission order.
    pub skipped: Vec<u32>,
}

impl ScoreSheet {
    pub fn tally(&self, axis: Axis) -> &AxisTally {
        &self.axes[axis.index()]
    }

    pub fn percentages(&self) -> BTreeMap<Axis, u8> {
        self.axes
            .iter()
            .map(|tally| (tally.axis, tally.first_letter_share()))
            .collect()
    }
}

/// Score `answers` against `catalog`, returning only the type.
pub fn score(answers: &[Answer], catalog: &[Question]) -> TypeCode {
    score_sheet(answers, catalog).type_code
}

/// Score `answers` against `catalog`, keeping the per-axis trail.
pub fn score_sheet(answers: &[Answer], catalog: &[Question]) -> ScoreSheet {
    let by_id: HashMap<u32, &Question> = catalog.iter().map(|q| (q.id, q)).collect();
    let mut axes = Axis::ORDER.map(AxisTally::new);
    let mut skipped = Vec::new();

    for answer in answers {
        let Some(question) = by_id.get(&answer.question_id) else {
            skipped.push(answer.question_id);
            continue;
        };

        let tally = &mut axes[question.axis.index()];
        tally.score += question.polarity.apply(answer.value.centered());
        tally.answered += 1;
    }

    let letters = axes.map(|tally| tally.letter());
    // Letters come from each axis's own pair, so construction cannot fail.
    let type_code = TypeCode::from_letters(letters).unwrap_or_else(TypeCode::tie_default);

    ScoreSheet {
        type_code,
        axes,
        skipped,
    }
}

/// A submission that breaks the answer contract. Distinct from an unmatched question id,
/// which is not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("answer #{index}: question_id must be a non-negative integer, got {found}")]
    InvalidQuestionId { index: usize, found: String },
    #[error("answer #{index}: value must be an integer between 1 and 5, got {found}")]
    ValueOutOfRange { index: usize, found: String },
    #[error("malformed submission: {0}")]
    Malformed(String),
}

/// Validate raw answers before scoring. The first offending answer is reported.
pub fn validate_answers(raw: &[RawAnswer]) -> Result<Vec<Answer>, SubmissionError> {
    raw.iter()
        .enumerate()
        .map(|(index, answer)| {
            let question_id = as_integer(&answer.question_id)
                .and_then(|id| u32::try_from(id).ok())
                .ok_or_else(|| SubmissionError::InvalidQuestionId {
                    index,
                    found: answer.question_id.to_string(),
                })?;

            let value = as_integer(&answer.value)
                .and_then(LikertValue::new)
                .ok_or_else(|| SubmissionError::ValueOutOfRange {
                    index,
                    found: answer.value.to_string(),
                })?;

            Ok(Answer::new(question_id, value))
        })
        .collect()
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        _ => None,
    }
}
