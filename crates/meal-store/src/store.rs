use async_trait::async_trait;
use meal::Meal;

use crate::Result;

/// Core trait for meal store implementations.
///
/// A store owns the meal collection, keyed by meal name. Handlers are
/// written against this trait so they run unchanged on either the in-memory
/// or the PostgreSQL implementation. All implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait MealStore: Send + Sync {
    /// Inserts the meal, replacing any meal stored under the same name.
    ///
    /// Returns the meal as stored after the write. A failed write leaves
    /// the store unchanged.
    async fn put(&self, meal: Meal) -> Result<Meal>;

    /// Returns every stored meal.
    ///
    /// The order of the returned meals is unspecified.
    async fn get_all(&self) -> Result<Vec<Meal>>;
}
