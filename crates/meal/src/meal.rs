//! The meal record.

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Lowest accepted rating.
pub const MIN_RATING: i64 = 0;

/// Highest accepted rating.
pub const MAX_RATING: i64 = 5;

/// A named meal with a photo and a rating.
///
/// A `Meal` can only be obtained through [`Meal::new`] (directly or while
/// deserializing), so every value satisfies the meal constraints:
/// the name is non-empty and the rating lies in `MIN_RATING..=MAX_RATING`.
/// The photo is an opaque byte payload and is never inspected.
///
/// On the wire the photo is carried as standard base64 text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedMeal")]
pub struct Meal {
    name: String,
    #[serde(serialize_with = "photo_serde::serialize")]
    photo: Vec<u8>,
    rating: i64,
}

impl Meal {
    /// Creates a meal, rejecting an empty name or an out-of-range rating.
    pub fn new(
        name: impl Into<String>,
        photo: impl Into<Vec<u8>>,
        rating: i64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ValidationError::RatingOutOfRange { rating });
        }

        Ok(Self {
            name,
            photo: photo.into(),
            rating,
        })
    }

    /// The meal name, which is also its key in a store.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw photo bytes.
    pub fn photo(&self) -> &[u8] {
        &self.photo
    }

    pub fn rating(&self) -> i64 {
        self.rating
    }
}

/// Wire shape of a meal before the constraints are checked.
///
/// Request bodies decode into this first so that malformed JSON and
/// constraint violations can be reported separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncheckedMeal {
    pub name: String,
    #[serde(with = "photo_serde")]
    pub photo: Vec<u8>,
    pub rating: i64,
}

impl TryFrom<UncheckedMeal> for Meal {
    type Error = ValidationError;

    fn try_from(raw: UncheckedMeal) -> Result<Self, Self::Error> {
        Meal::new(raw.name, raw.photo, raw.rating)
    }
}

impl From<Meal> for UncheckedMeal {
    fn from(meal: Meal) -> Self {
        Self {
            name: meal.name,
            photo: meal.photo,
            rating: meal.rating,
        }
    }
}

mod photo_serde {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(photo: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        STANDARD.encode(photo).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
