//! Request body extractors.

use axum::Json;
use axum::extract::{FromRequest, Request};
use meal::{Meal, UncheckedMeal};

use crate::error::ApiError;

/// A meal decoded from a JSON request body.
///
/// Malformed bodies are rejected with `ApiError::Decoding`; well-formed
/// bodies that break a meal constraint with `ApiError::Validation`.
#[derive(Debug)]
pub struct MealBody(pub Meal);

impl<S> FromRequest<S> for MealBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<UncheckedMeal>::from_request(req, state).await?;
        Ok(MealBody(Meal::try_from(raw)?))
    }
}
