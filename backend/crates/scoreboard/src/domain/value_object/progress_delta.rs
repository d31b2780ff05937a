//! Progress Delta Value Object
//!
//! An update request carries two increments, `newScore` and `newEmission`,
//! that are added to the cumulative counters. Clients send them as JSON
//! numbers or numeric strings, and sometimes as booleans, `null` or
//! single-element arrays; this module turns the raw JSON into a pair of
//! finite `f64` under one [`DeltaPolicy`].

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// Wire names of the delta fields, used in error messages
pub const SCORE_FIELD: &str = "newScore";
pub const EMISSION_FIELD: &str = "newEmission";

/// How non-numeric deltas are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeltaPolicy {
    /// Reject the whole update if any delta is non-numeric
    #[default]
    Strict,
    /// Treat non-numeric deltas as zero and apply the rest
    SkipInvalid,
}

impl FromStr for DeltaPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "skip-invalid" | "skip_invalid" => Ok(Self::SkipInvalid),
            other => Err(format!(
                "unknown delta policy '{other}' (expected 'strict' or 'skip-invalid')"
            )),
        }
    }
}

/// One or more deltas could not be read as numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaError {
    pub fields: Vec<&'static str>,
}

impl fmt::Display for DeltaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "non-numeric delta: {}", self.fields.join(", "))
    }
}

impl std::error::Error for DeltaError {}

/// Coerce a JSON value to a finite number, the way clients' `Number()` does
///
/// - numbers pass through
/// - strings are trimmed and parsed (decimal, or `0x`/`0o`/`0b` integers);
///   the empty string is zero
/// - `true` is 1, `false` and `null` are 0
/// - `[]` is 0 and `[x]` is `x` read as a string; longer arrays are invalid
/// - absent fields, objects, and non-finite results are `None`
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_numeric_str(s)?,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null => 0.0,
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [item] => coerce_array_item(item)?,
            _ => return None,
        },
        Value::Object(_) => return None,
    };

    number.is_finite().then_some(number)
}

/// A one-element array converts through its string form: `[null]` is `""`,
/// `[true]` is `"true"`
fn coerce_array_item(item: &Value) -> Option<f64> {
    match item {
        Value::Null => Some(0.0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [inner] => coerce_array_item(inner),
            _ => None,
        },
        Value::Bool(_) | Value::Object(_) => None,
    }
}

fn parse_numeric_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return parse_decimal(trimmed),
    };

    let digits = &trimmed[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, ch| {
        ch.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Decimal literal; Rust's spellings of infinity and NaN are not numbers here
fn parse_decimal(s: &str) -> Option<f64> {
    if s.chars().any(|ch| ch.is_ascii_alphabetic() && ch != 'e' && ch != 'E') {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Increments applied to a user's score and CO2 emission total
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressDelta {
    score: f64,
    emission: f64,
}

impl ProgressDelta {
    pub fn new(score: f64, emission: f64) -> Self {
        Self { score, emission }
    }

    /// Build a delta from the raw request fields
    pub fn from_raw(
        new_score: Option<&Value>,
        new_emission: Option<&Value>,
        policy: DeltaPolicy,
    ) -> Result<Self, DeltaError> {
        let score = coerce_number(new_score);
        let emission = coerce_number(new_emission);

        match policy {
            DeltaPolicy::SkipInvalid => Ok(Self {
                score: score.unwrap_or(0.0),
                emission: emission.unwrap_or(0.0),
            }),
            DeltaPolicy::Strict => match (score, emission) {
                (Some(score), Some(emission)) => Ok(Self { score, emission }),
                _ => {
                    let mut fields = Vec::with_capacity(2);
                    if score.is_none() {
                        fields.push(SCORE_FIELD);
                    }
                    if emission.is_none() {
                        fields.push(EMISSION_FIELD);
                    }
                    Err(DeltaError { fields })
                }
            },
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn emission(&self) -> f64 {
        self.emission
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(coerce_number(Some(&json!(5))), Some(5.0));
        assert_eq!(coerce_number(Some(&json!(-2.5))), Some(-2.5));
    }

    #[test]
    fn test_coerce_strings() {
        assert_eq!(coerce_number(Some(&json!("12"))), Some(12.0));
        assert_eq!(coerce_number(Some(&json!(" 2.5 "))), Some(2.5));
        assert_eq!(coerce_number(Some(&json!("1e2"))), Some(100.0));
        assert_eq!(coerce_number(Some(&json!(""))), Some(0.0));
        assert_eq!(coerce_number(Some(&json!("abc"))), None);
        assert_eq!(coerce_number(Some(&json!("12abc"))), None);
    }

    #[test]
    fn test_coerce_rejects_non_finite() {
        assert_eq!(coerce_number(Some(&json!("NaN"))), None);
        assert_eq!(coerce_number(Some(&json!("inf"))), None);
        assert_eq!(coerce_number(Some(&json!("-infinity"))), None);
    }

    #[test]
    fn test_coerce_other_types() {
        assert_eq!(coerce_number(Some(&json!(true))), Some(1.0));
        assert_eq!(coerce_number(Some(&json!(false))), Some(0.0));
        assert_eq!(coerce_number(Some(&json!(null))), Some(0.0));
        assert_eq!(coerce_number(Some(&json!({ "v": 1 }))), None);
        assert_eq!(coerce_number(None), None);
    }

    #[test]
    fn test_coerce_arrays() {
        assert_eq!(coerce_number(Some(&json!([]))), Some(0.0));
        assert_eq!(coerce_number(Some(&json!([5]))), Some(5.0));
        assert_eq!(coerce_number(Some(&json!(["7"]))), Some(7.0));
        assert_eq!(coerce_number(Some(&json!([null]))), Some(0.0));
        assert_eq!(coerce_number(Some(&json!([[3]]))), Some(3.0));
        assert_eq!(coerce_number(Some(&json!([true]))), None);
        assert_eq!(coerce_number(Some(&json!([1, 2]))), None);
    }

    #[test]
    fn test_coerce_radix_prefixes() {
        assert_eq!(coerce_number(Some(&json!("0x10"))), Some(16.0));
        assert_eq!(coerce_number(Some(&json!("0b101"))), Some(5.0));
        assert_eq!(coerce_number(Some(&json!(" 0o17 "))), Some(15.0));
        assert_eq!(coerce_number(Some(&json!("0x"))), None);
        assert_eq!(coerce_number(Some(&json!("0xZZ"))), None);
        assert_eq!(coerce_number(Some(&json!("-0x10"))), None);
    }

    #[test]
    fn test_strict_accepts_valid_pair() {
        let delta =
            ProgressDelta::from_raw(Some(&json!(5)), Some(&json!("2.5")), DeltaPolicy::Strict)
                .unwrap();
        assert_eq!(delta, ProgressDelta::new(5.0, 2.5));
    }

    #[test]
    fn test_strict_reports_every_bad_field() {
        let err = ProgressDelta::from_raw(Some(&json!("x")), None, DeltaPolicy::Strict)
            .unwrap_err();
        assert_eq!(err.fields, vec![SCORE_FIELD, EMISSION_FIELD]);

        let err = ProgressDelta::from_raw(Some(&json!(1)), Some(&json!("x")), DeltaPolicy::Strict)
            .unwrap_err();
        assert_eq!(err.fields, vec![EMISSION_FIELD]);
    }

    #[test]
    fn test_skip_invalid_zeroes_bad_fields() {
        let delta = ProgressDelta::from_raw(
            Some(&json!("oops")),
            Some(&json!(3)),
            DeltaPolicy::SkipInvalid,
        )
        .unwrap();
        assert_eq!(delta, ProgressDelta::new(0.0, 3.0));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<DeltaPolicy>(), Ok(DeltaPolicy::Strict));
        assert_eq!(
            "Skip-Invalid".parse::<DeltaPolicy>(),
            Ok(DeltaPolicy::SkipInvalid)
        );
        assert!("lenient".parse::<DeltaPolicy>().is_err());
    }
}
