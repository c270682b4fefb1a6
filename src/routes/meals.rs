use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    middleware::session::SessionUser,
    models::{
        meal::{MealInput, MealRequest},
        summary::SummaryResult,
    },
    services::{
        meals::MealService,
        metrics::{LAST_BEST_STREAK_GAUGE, MEALS_WRITTEN_COUNTER, SUMMARIES_COUNTER},
        summary,
    },
    AppState,
};

use super::internal_error;

type ApiError = (StatusCode, Json<Value>);

fn meal_not_found() -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Meal not found" })))
}

fn validate(body: MealRequest) -> Result<MealInput, ApiError> {
    body.validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))))
}

/// GET /meals
pub async fn list_meals(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<Value>, ApiError> {
    let meals = MealService::list(&state.db, user.id)
        .await
        .map_err(internal_error)?;
    Ok(Json(json!({ "meals": meals })))
}

/// GET /meals/summary
pub async fn get_summary(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<SummaryResult>, ApiError> {
    let records = MealService::fetch_ordered_records(&state.db, user.id)
        .await
        .map_err(internal_error)?;

    let result = summary::summarize(&records);
    SUMMARIES_COUNTER.inc();
    LAST_BEST_STREAK_GAUGE.set(result.best_streak as f64);
    tracing::debug!(user_id = %user.id, ?result, "Summary computed");

    Ok(Json(result))
}

/// GET /meals/{id}
pub async fn get_meal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    SessionUser(user): SessionUser,
) -> Result<Json<Value>, ApiError> {
    match MealService::get(&state.db, user.id, id).await {
        Ok(Some(meal)) => Ok(Json(json!({ "meal": meal }))),
        Ok(None) => Err(meal_not_found()),
        Err(e) => Err(internal_error(e)),
    }
}

/// POST /meals
pub async fn create_meal(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Json(body): Json<MealRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input = validate(body)?;
    let meal = MealService::create(&state.db, user.id, &input)
        .await
        .map_err(internal_error)?;
    MEALS_WRITTEN_COUNTER.with_label_values(&["create"]).inc();
    Ok((StatusCode::CREATED, Json(json!({ "meal": meal }))))
}

/// PUT /meals/{id}
pub async fn update_meal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    SessionUser(user): SessionUser,
    Json(body): Json<MealRequest>,
) -> Result<StatusCode, ApiError> {
    let input = validate(body)?;
    match MealService::update(&state.db, user.id, id, &input).await {
        Ok(Some(_)) => {
            MEALS_WRITTEN_COUNTER.with_label_values(&["update"]).inc();
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(None) => Err(meal_not_found()),
        Err(e) => Err(internal_error(e)),
    }
}

/// DELETE /meals/{id}
pub async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    SessionUser(user): SessionUser,
) -> Result<StatusCode, ApiError> {
    match MealService::delete(&state.db, user.id, id).await {
        Ok(true) => {
            MEALS_WRITTEN_COUNTER.with_label_values(&["delete"]).inc();
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(meal_not_found()),
        Err(e) => Err(internal_error(e)),
    }
}
