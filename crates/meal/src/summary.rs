//! Photo-free summary of a meal collection.

use serde::{Deserialize, Serialize};

use crate::Meal;

/// One meal reduced to its name and rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub name: String,
    pub rating: i64,
}

impl From<&Meal> for SummaryEntry {
    fn from(meal: &Meal) -> Self {
        Self {
            name: meal.name().to_string(),
            rating: meal.rating(),
        }
    }
}

/// Read-only view of a set of meals with the photos dropped.
///
/// Serializes as `{"summary": [{"name": ..., "rating": ...}, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub summary: Vec<SummaryEntry>,
}

impl Summary {
    pub fn len(&self) -> usize {
        self.summary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }
}

/// Projects each meal to a summary entry, keeping the input order.
pub fn summarize(meals: &[Meal]) -> Summary {
    Summary {
        summary: meals.iter().map(SummaryEntry::from).collect(),
    }
}
