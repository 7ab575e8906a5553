use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use meal::Meal;
use tokio::sync::RwLock;

use crate::{Result, store::MealStore};

/// In-memory meal store.
///
/// Meals live for the lifetime of the process. Reads share the lock and a
/// write holds it exclusively, so concurrent puts never lose updates.
#[derive(Clone, Default)]
pub struct InMemoryMealStore {
    meals: Arc<RwLock<HashMap<String, Meal>>>,
}

impl InMemoryMealStore {
    /// Creates a new empty in-memory meal store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of meals stored.
    pub async fn len(&self) -> usize {
        self.meals.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.meals.read().await.is_empty()
    }
}

#[async_trait]
impl MealStore for InMemoryMealStore {
    #[tracing::instrument(skip(self, meal), fields(name = %meal.name()))]
    async fn put(&self, meal: Meal) -> Result<Meal> {
        let mut meals = self.meals.write().await;
        meals.insert(meal.name().to_string(), meal.clone());
        Ok(meal)
    }

    #[tracing::instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Meal>> {
        let meals = self.meals.read().await;
        Ok(meals.values().cloned().collect())
    }
}
