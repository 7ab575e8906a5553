//! Meal summary endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use meal::{Summary, summarize};
use meal_store::MealStore;

use crate::error::ApiError;
use crate::routes::meals::AppState;

/// GET /summary — names and ratings of every stored meal, without photos.
#[tracing::instrument(skip(state))]
pub async fn get<S: MealStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Summary>, ApiError> {
    let meals = state.store.get_all().await?;
    let summary = summarize(&meals);
    metrics::counter!("summaries_built_total").increment(1);

    Ok(Json(summary))
}
