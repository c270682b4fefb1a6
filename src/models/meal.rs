use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::timestamp::{parse_timestamp, TimestampError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub belongs_diet: bool,
}

/// Body for POST /meals and PUT /meals/{id}. `createdAt` stays a string until
/// [`MealRequest::validate`] so both accepted layouts can be checked explicitly.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRequest {
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub belongs_diet: bool,
}

/// A [`MealRequest`] whose timestamp has been resolved to an instant.
#[derive(Debug, Clone)]
pub struct MealInput {
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub belongs_diet: bool,
}

impl MealRequest {
    pub fn validate(self) -> Result<MealInput, TimestampError> {
        let created_at = parse_timestamp(&self.created_at)?;
        Ok(MealInput {
            name: self.name,
            description: self.description,
            created_at,
            belongs_diet: self.belongs_diet,
        })
    }
}
