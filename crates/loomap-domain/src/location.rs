//! Bathroom location fields and their validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::input::NumberInput;

/// Who a bathroom is designated for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    All,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    /// Exact, case-sensitive match against `male`, `female` and `all`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "all" => Ok(Self::All),
            _ => Err(ValidationError::InvalidGender),
        }
    }
}

/// Validate the descriptive fields of a location.
///
/// Checks, in order: `building` is not blank, `floor` is non-negative, `gender` is one of
/// `male`, `female`, `all`. Returns the parsed gender.
pub fn validate_location_fields(
    building: &str,
    floor: i64,
    gender: &str,
) -> Result<Gender, ValidationError> {
    if building.trim().is_empty() {
        return Err(ValidationError::MissingField("building"));
    }
    validate_floor(floor)?;
    gender.parse()
}

/// Non-negative and small enough to store as a 32-bit column.
pub fn validate_floor(floor: i64) -> Result<i32, ValidationError> {
    if floor < 0 {
        return Err(ValidationError::NegativeFloor);
    }
    i32::try_from(floor).map_err(|_| ValidationError::FloorOutOfRange)
}

/// Interpret a loosely-typed floor value.
pub fn parse_floor(input: &NumberInput) -> Result<i64, ValidationError> {
    input
        .as_integer()
        .ok_or(ValidationError::NotAnInteger("floor"))
}
