use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::timestamp::{parse_timestamp, TimestampError};

/// Read-only view of a meal consumed by the summary engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MealRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub on_diet: bool,
}

impl MealRecord {
    /// Build a record from a row whose timestamp is still text.
    ///
    /// The Postgres store decodes `TIMESTAMPTZ` straight into [`MealRecord`]
    /// and never needs this; it is the entry point for record sources that
    /// carry `created_at` as a string (exports, fixtures), so a malformed
    /// value fails naming the meal instead of reaching the streak scan.
    pub fn from_raw(
        id: Uuid,
        owner_id: Uuid,
        created_at: &str,
        on_diet: bool,
    ) -> Result<Self, SummaryError> {
        let created_at = parse_timestamp(created_at)
            .map_err(|source| SummaryError::InvalidTimestamp { meal_id: id, source })?;
        Ok(Self {
            id,
            owner_id,
            created_at,
            on_diet,
        })
    }
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Meal {meal_id} has an invalid timestamp: {source}")]
    InvalidTimestamp {
        meal_id: Uuid,
        #[source]
        source: TimestampError,
    },
}

/// Response body for GET /meals/summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    #[serde(rename = "totalMeals")]
    pub total_meals: u64,
    #[serde(rename = "totalMealsOnDiet")]
    pub total_on_diet: u64,
    #[serde(rename = "totalMealsNotOnDiet")]
    pub total_not_on_diet: u64,
    #[serde(rename = "bestSequenceMealsOnDiet")]
    pub best_streak: u64,
}
