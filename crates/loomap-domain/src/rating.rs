//! Review ratings, their validation, and aggregate computation.
//!
//! A review carries either one overall rating or three detailed sub-ratings. Both forms
//! normalize to a single comparable score, and a location's aggregate rating is the mean of
//! the scores of all its live reviews.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::input::NumberInput;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// One rated aspect of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingDimension {
    /// The single overall rating.
    Rating,
    Cleanliness,
    Privacy,
    Accessibility,
}

impl RatingDimension {
    pub const DETAILED: [Self; 3] = [Self::Cleanliness, Self::Privacy, Self::Accessibility];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Cleanliness => "cleanliness",
            Self::Privacy => "privacy",
            Self::Accessibility => "accessibility",
        }
    }
}

impl fmt::Display for RatingDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated rating value in `MIN_RATING..=MAX_RATING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Validate a raw value for the given dimension.
    pub fn new(dimension: RatingDimension, value: i64) -> Result<Self, ValidationError> {
        if (i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::RatingOutOfRange(dimension))
        }
    }

    /// Interpret and validate a loosely-typed client value.
    pub fn parse(dimension: RatingDimension, input: &NumberInput) -> Result<Self, ValidationError> {
        let value = input
            .as_integer()
            .ok_or(ValidationError::RatingNotInteger(dimension))?;
        Self::new(dimension, value)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// The ratings carried by one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ratings {
    Single {
        rating: Score,
    },
    Detailed {
        cleanliness: Score,
        privacy: Score,
        accessibility: Score,
    },
}

impl Ratings {
    /// Normalized score used for aggregation: the overall rating, or the mean of the three
    /// detailed sub-ratings.
    pub fn score(&self) -> f64 {
        match self {
            Self::Single { rating } => f64::from(rating.get()),
            Self::Detailed {
                cleanliness,
                privacy,
                accessibility,
            } => {
                let sum = u16::from(cleanliness.get())
                    + u16::from(privacy.get())
                    + u16::from(accessibility.get());
                f64::from(sum) / 3.0
            }
        }
    }

    /// Apply validated replacement values.
    ///
    /// A single-rated review accepts a new `rating`, or switches to the detailed form when
    /// all three sub-ratings are given. A detailed review accepts any subset of its
    /// sub-ratings, or switches to the single form when only `rating` is given.
    pub fn patched(self, patch: &RatingsPatch) -> Result<Self, ValidationError> {
        if patch.is_empty() {
            return Ok(self);
        }
        if patch.rating.is_some() && patch.has_detailed() {
            return Err(ValidationError::MixedRatingForms);
        }
        if let Some(rating) = patch.rating {
            return Ok(Self::Single { rating });
        }
        match self {
            Self::Detailed {
                cleanliness,
                privacy,
                accessibility,
            } => Ok(Self::Detailed {
                cleanliness: patch.cleanliness.unwrap_or(cleanliness),
                privacy: patch.privacy.unwrap_or(privacy),
                accessibility: patch.accessibility.unwrap_or(accessibility),
            }),
            Self::Single { .. } => {
                let missing = RatingDimension::DETAILED
                    .into_iter()
                    .find(|dimension| patch.get(*dimension).is_none());
                match (missing, patch.cleanliness, patch.privacy, patch.accessibility) {
                    (None, Some(cleanliness), Some(privacy), Some(accessibility)) => {
                        Ok(Self::Detailed {
                            cleanliness,
                            privacy,
                            accessibility,
                        })
                    }
                    (Some(dimension), ..) => Err(ValidationError::RatingMissing(dimension)),
                    (None, ..) => Err(ValidationError::RatingMissing(RatingDimension::Rating)),
                }
            }
        }
    }
}

/// Raw rating fields as submitted by a client.
///
/// Either `rating` alone, or all of `cleanliness`, `privacy` and `accessibility`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingsInput {
    pub rating: Option<NumberInput>,
    pub cleanliness: Option<NumberInput>,
    pub privacy: Option<NumberInput>,
    pub accessibility: Option<NumberInput>,
}

impl RatingsInput {
    fn get(&self, dimension: RatingDimension) -> Option<&NumberInput> {
        match dimension {
            RatingDimension::Rating => self.rating.as_ref(),
            RatingDimension::Cleanliness => self.cleanliness.as_ref(),
            RatingDimension::Privacy => self.privacy.as_ref(),
            RatingDimension::Accessibility => self.accessibility.as_ref(),
        }
    }

    fn has_detailed(&self) -> bool {
        RatingDimension::DETAILED
            .into_iter()
            .any(|dimension| self.get(dimension).is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && !self.has_detailed()
    }
}

/// Validated replacement values for an existing review's ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingsPatch {
    pub rating: Option<Score>,
    pub cleanliness: Option<Score>,
    pub privacy: Option<Score>,
    pub accessibility: Option<Score>,
}

impl RatingsPatch {
    fn get(&self, dimension: RatingDimension) -> Option<Score> {
        match dimension {
            RatingDimension::Rating => self.rating,
            RatingDimension::Cleanliness => self.cleanliness,
            RatingDimension::Privacy => self.privacy,
            RatingDimension::Accessibility => self.accessibility,
        }
    }

    fn has_detailed(&self) -> bool {
        self.cleanliness.is_some() || self.privacy.is_some() || self.accessibility.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && !self.has_detailed()
    }
}

/// Validate the rating fields of a new review.
///
/// Every supplied dimension must be an integer in `1..=5`; the first failing dimension is
/// named in the error. The single and detailed forms are mutually exclusive, and the
/// detailed form needs all three sub-ratings.
pub fn validate_review_fields(input: &RatingsInput) -> Result<Ratings, ValidationError> {
    let patch = validate_rating_patch(input)?;
    if patch.rating.is_some() && patch.has_detailed() {
        return Err(ValidationError::MixedRatingForms);
    }
    if let Some(rating) = patch.rating {
        return Ok(Ratings::Single { rating });
    }
    if !patch.has_detailed() {
        return Err(ValidationError::RatingMissing(RatingDimension::Rating));
    }
    match (patch.cleanliness, patch.privacy, patch.accessibility) {
        (Some(cleanliness), Some(privacy), Some(accessibility)) => Ok(Ratings::Detailed {
            cleanliness,
            privacy,
            accessibility,
        }),
        _ => {
            let missing = RatingDimension::DETAILED
                .into_iter()
                .find(|dimension| patch.get(*dimension).is_none())
                .unwrap_or(RatingDimension::Rating);
            Err(ValidationError::RatingMissing(missing))
        }
    }
}

/// Validate whichever rating fields are present, without requiring any.
pub fn validate_rating_patch(input: &RatingsInput) -> Result<RatingsPatch, ValidationError> {
    let score = |dimension: RatingDimension| {
        input
            .get(dimension)
            .map(|raw| Score::parse(dimension, raw))
            .transpose()
    };
    Ok(RatingsPatch {
        rating: score(RatingDimension::Rating)?,
        cleanliness: score(RatingDimension::Cleanliness)?,
        privacy: score(RatingDimension::Privacy)?,
        accessibility: score(RatingDimension::Accessibility)?,
    })
}

/// Aggregate rating of a location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    /// Mean review score, or 0 when there are no reviews.
    pub average: f64,
    pub count: u32,
}

impl RatingSummary {
    pub const EMPTY: Self = Self {
        average: 0.0,
        count: 0,
    };
}

/// Mean of the normalized scores of `ratings`, recomputed from scratch.
pub fn aggregate<'a, I>(ratings: I) -> RatingSummary
where
    I: IntoIterator<Item = &'a Ratings>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0.0_f64, 0_u32), |(sum, count), ratings| {
            (sum + ratings.score(), count + 1)
        });
    if count == 0 {
        return RatingSummary::EMPTY;
    }
    RatingSummary {
        average: sum / f64::from(count),
        count,
    }
}
