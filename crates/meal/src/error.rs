//! Meal validation errors.

use thiserror::Error;

use crate::meal::{MAX_RATING, MIN_RATING};

/// A meal constraint was violated during construction or decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The meal name was empty.
    #[error("Meal name must not be empty")]
    EmptyName,

    /// The rating fell outside the inclusive range.
    #[error(
        "Rating {rating} is out of range ({min}..={max})",
        min = MIN_RATING,
        max = MAX_RATING
    )]
    RatingOutOfRange { rating: i64 },
}
