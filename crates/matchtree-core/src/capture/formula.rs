//! Derived checks over captured values.
//!
//! Formulas run after a successful match and are independent of the diff
//! model: they answer "do these captured sequences satisfy a relation",
//! not "where did matching fail".

use crate::capture::Captures;
use crate::errors::{MatchTreeError, Result};
use serde::{Deserialize, Serialize};

const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Elementwise relation between two captures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// `left[i] == right[i]` (any scalar kind)
    Equal,
    /// `left[i] + right[i]` is the same for every `i`
    ConstantSum,
    /// `left[i] - right[i]` is the same for every `i`
    ConstantDifference,
    /// `left[i] < right[i]`
    LessThan,
}

/// A post-match check over one or two captures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Formula {
    /// Captured occurrences increase (strictly, or non-decreasing)
    Monotonic { label: String, strict: bool },
    /// Same-position occurrences of two captures satisfy `relation`
    Pairwise {
        left: String,
        right: String,
        relation: Relation,
    },
}

impl Formula {
    pub fn increasing(label: impl Into<String>) -> Self {
        Formula::Monotonic {
            label: label.into(),
            strict: true,
        }
    }

    pub fn non_decreasing(label: impl Into<String>) -> Self {
        Formula::Monotonic {
            label: label.into(),
            strict: false,
        }
    }

    pub fn pairwise(left: impl Into<String>, right: impl Into<String>, relation: Relation) -> Self {
        Formula::Pairwise {
            left: left.into(),
            right: right.into(),
            relation,
        }
    }

    /// Evaluate the formula against recorded captures
    ///
    /// Sequences with fewer than two elements are trivially monotonic, and
    /// empty pairs trivially satisfy every relation.
    ///
    /// # Errors
    /// * `CaptureNotFound` - a label is not declared by the pattern
    /// * `NonNumericCapture` - a numeric relation saw a non-number
    /// * `CaptureLengthMismatch` - pairwise captures differ in length
    pub fn evaluate(&self, captures: &Captures) -> Result<bool> {
        match self {
            Formula::Monotonic { label, strict } => {
                let values = captures.numbers(label)?;
                Ok(values
                    .windows(2)
                    .all(|w| if *strict { w[0] < w[1] } else { w[0] <= w[1] }))
            }
            Formula::Pairwise {
                left,
                right,
                relation,
            } => evaluate_pairwise(captures, left, right, *relation),
        }
    }
}

fn evaluate_pairwise(
    captures: &Captures,
    left: &str,
    right: &str,
    relation: Relation,
) -> Result<bool> {
    let left_len = captures.values(left)?.len();
    let right_len = captures.values(right)?.len();
    if left_len != right_len {
        return Err(MatchTreeError::CaptureLengthMismatch {
            left: left.to_string(),
            left_len,
            right: right.to_string(),
            right_len,
        });
    }

    let holds = match relation {
        Relation::Equal => {
            let l = captures.values(left)?;
            let r = captures.values(right)?;
            l.iter().zip(r.iter()).all(|(a, b)| a == b)
        }
        Relation::ConstantSum => {
            is_constant(numeric_pairs(captures, left, right)?.map(|(a, b)| a + b))
        }
        Relation::ConstantDifference => {
            is_constant(numeric_pairs(captures, left, right)?.map(|(a, b)| a - b))
        }
        Relation::LessThan => numeric_pairs(captures, left, right)?.all(|(a, b)| a < b),
    };
    Ok(holds)
}

fn numeric_pairs(
    captures: &Captures,
    left: &str,
    right: &str,
) -> Result<impl Iterator<Item = (f64, f64)>> {
    Ok(captures
        .numbers(left)?
        .into_iter()
        .zip(captures.numbers(right)?))
}

fn is_constant(mut values: impl Iterator<Item = f64>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| approx_eq(first, v)),
        None => true,
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= RELATIVE_TOLERANCE * scale
}
