//! Lenient numeric input.

use serde::Deserialize;
use serde::de::IgnoredAny;

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// A client-supplied value that should hold a number.
///
/// Form-driven clients send numbers either as JSON numbers or as numeric strings, so the
/// value stays loosely typed until a validator interprets it. Anything else (booleans,
/// arrays, objects) lands in `Other` and is rejected by the validator that reads it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl NumberInput {
    /// Interpret the value as an integer.
    ///
    /// Integral floats (`4.0`) and integer strings (`"4"`) are accepted; fractional values
    /// and non-numeric text are not.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT_INT => {
                Some(*f as i64)
            }
            Self::Text(s) => s.trim().parse().ok(),
            Self::Float(_) | Self::Other(_) => None,
        }
    }

    /// Interpret the value as a finite float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(f) => Some(*f).filter(|f| f.is_finite()),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            Self::Other(_) => None,
        }
    }
}

impl From<i64> for NumberInput {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for NumberInput {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}
