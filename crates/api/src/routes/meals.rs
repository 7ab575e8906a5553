//! Meal create-or-replace and listing endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use meal::Meal;
use meal_store::MealStore;

use crate::error::ApiError;
use crate::extract::MealBody;

/// Shared application state accessible from all handlers.
pub struct AppState<S: MealStore> {
    pub store: S,
}

impl<S: MealStore> AppState<S> {
    pub fn new(store: S) -> Arc<Self> {
        Arc::new(Self { store })
    }
}

/// POST /meals — store a meal, replacing any meal with the same name.
#[tracing::instrument(skip(state, meal), fields(name = %meal.name()))]
pub async fn create<S: MealStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    MealBody(meal): MealBody,
) -> Result<(StatusCode, Json<Meal>), ApiError> {
    let stored = state.store.put(meal).await?;
    metrics::counter!("meals_stored_total").increment(1);
    tracing::info!(rating = stored.rating(), "meal stored");

    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /meals — list every stored meal.
#[tracing::instrument(skip(state))]
pub async fn list<S: MealStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Meal>>, ApiError> {
    let meals = state.store.get_all().await?;
    metrics::counter!("meals_listed_total").increment(1);
    tracing::debug!(count = meals.len(), "meals listed");

    Ok(Json(meals))
}
