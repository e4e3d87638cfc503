//! Field validation errors.

use crate::rating::RatingDimension;

/// A malformed or out-of-range input field.
///
/// Every variant names the offending field so callers can surface it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("{0} must be an integer")]
    NotAnInteger(&'static str),
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("floor must be non-negative")]
    NegativeFloor,
    #[error("floor is out of range")]
    FloorOutOfRange,
    #[error("invalid gender designation")]
    InvalidGender,
    #[error("latitude must be within [-90, 90]")]
    LatitudeOutOfRange,
    #[error("longitude must be within [-180, 180]")]
    LongitudeOutOfRange,
    #[error("max_distance must be a positive number of meters")]
    InvalidDistance,
    #[error("{0} rating must be between 1 and 5")]
    RatingOutOfRange(RatingDimension),
    #[error("{0} rating must be an integer")]
    RatingNotInteger(RatingDimension),
    #[error("{0} rating is required")]
    RatingMissing(RatingDimension),
    #[error("rating cannot be combined with cleanliness, privacy and accessibility")]
    MixedRatingForms,
}

impl ValidationError {
    /// The input field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) | Self::NotAnInteger(field) | Self::NotANumber(field) => {
                field
            }
            Self::NegativeFloor | Self::FloorOutOfRange => "floor",
            Self::InvalidGender => "gender",
            Self::LatitudeOutOfRange => "latitude",
            Self::LongitudeOutOfRange => "longitude",
            Self::InvalidDistance => "max_distance",
            Self::RatingOutOfRange(dimension)
            | Self::RatingNotInteger(dimension)
            | Self::RatingMissing(dimension) => dimension.as_str(),
            Self::MixedRatingForms => "rating",
        }
    }
}
