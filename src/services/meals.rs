use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    meal::{Meal, MealInput},
    summary::MealRecord,
};

pub struct MealService;

impl MealService {
    /// All meals of `owner`, oldest first.
    pub async fn list(pool: &PgPool, owner: Uuid) -> anyhow::Result<Vec<Meal>> {
        let meals = sqlx::query_as::<_, Meal>(
            r#"SELECT id, user_id, name, description, created_at, belongs_diet
               FROM meals
               WHERE user_id = $1
               ORDER BY created_at"#,
        )
        .bind(owner)
        .fetch_all(pool)
        .await?;
        Ok(meals)
    }

    pub async fn get(pool: &PgPool, owner: Uuid, id: Uuid) -> anyhow::Result<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"SELECT id, user_id, name, description, created_at, belongs_diet
               FROM meals
               WHERE user_id = $1 AND id = $2"#,
        )
        .bind(owner)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(meal)
    }

    pub async fn create(pool: &PgPool, owner: Uuid, input: &MealInput) -> anyhow::Result<Meal> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"INSERT INTO meals (id, user_id, name, description, created_at, belongs_diet)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, user_id, name, description, created_at, belongs_diet"#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.created_at)
        .bind(input.belongs_diet)
        .fetch_one(pool)
        .await?;
        Ok(meal)
    }

    /// Replace every editable field of a meal. `None` when the owner has no such meal.
    pub async fn update(
        pool: &PgPool,
        owner: Uuid,
        id: Uuid,
        input: &MealInput,
    ) -> anyhow::Result<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"UPDATE meals
               SET name = $1,
                   description = $2,
                   created_at = $3,
                   belongs_diet = $4
               WHERE user_id = $5 AND id = $6
               RETURNING id, user_id, name, description, created_at, belongs_diet"#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.created_at)
        .bind(input.belongs_diet)
        .bind(owner)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(meal)
    }

    /// Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, owner: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE user_id = $1 AND id = $2")
            .bind(owner)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Summary input for `owner`, ascending by `created_at`. Rows sharing a
    /// timestamp keep the order Postgres returns them in.
    pub async fn fetch_ordered_records(pool: &PgPool, owner: Uuid) -> anyhow::Result<Vec<MealRecord>> {
        let rows: Vec<(Uuid, Uuid, chrono::DateTime<chrono::Utc>, bool)> = sqlx::query_as(
            r#"SELECT id, user_id, created_at, belongs_diet
               FROM meals
               WHERE user_id = $1
               ORDER BY created_at"#,
        )
        .bind(owner)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, owner_id, created_at, on_diet)| MealRecord {
                id,
                owner_id,
                created_at,
                on_diet,
            })
            .collect())
    }
}
