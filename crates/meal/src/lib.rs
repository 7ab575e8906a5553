//! Meal model for the food tracker backend.
//!
//! This crate provides:
//! - `Meal`, the validated record clients submit (name, photo, rating)
//! - `Summary`, the photo-free projection of a collection of meals
//! - `ValidationError` for records that violate the meal constraints

pub mod error;
pub mod meal;
pub mod summary;

pub use error::ValidationError;
pub use meal::{MAX_RATING, MIN_RATING, Meal, UncheckedMeal};
pub use summary::{Summary, SummaryEntry, summarize};
