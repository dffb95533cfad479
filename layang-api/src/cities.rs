use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use layang_core::route::City;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

/// GET /api/cities
pub async fn list_cities(State(state): State<AppState>) -> Result<Json<Vec<City>>, AppError> {
    let cities = state
        .city_repo
        .list_cities()
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch cities: {}", e)))?;

    Ok(Json(cities))
}

/// GET /api/cities/{id}
pub async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<City>, AppError> {
    let city = state
        .city_repo
        .get_city(id)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch city: {}", e)))?
        .ok_or_else(|| AppError::NotFoundError("City not found".to_string()))?;

    Ok(Json(city))
}

/// POST /api/cities (admin)
pub async fn create_city(
    State(state): State<AppState>,
    Json(input): Json<CityInput>,
) -> Result<(StatusCode, Json<City>), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::ValidationError("city name is required".to_string()));
    }

    let city = City {
        id: Uuid::new_v4(),
        name: input.name.trim().to_string(),
        description: input.description,
        image_url: input.image_url,
    };

    state
        .city_repo
        .create_city(&city)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to create city: {}", e)))?;

    Ok((StatusCode::CREATED, Json(city)))
}

/// PUT /api/cities/{id} (admin)
pub async fn update_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CityInput>,
) -> Result<Json<City>, AppError> {
    state
        .city_repo
        .get_city(id)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch city: {}", e)))?
        .ok_or_else(|| AppError::NotFoundError("City not found".to_string()))?;

    let city = City {
        id,
        name: input.name.trim().to_string(),
        description: input.description,
        image_url: input.image_url,
    };

    state
        .city_repo
        .update_city(id, &city)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to update city: {}", e)))?;

    Ok(Json(city))
}

/// DELETE /api/cities/{id} (admin)
pub async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .city_repo
        .delete_city(id)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to delete city: {}", e)))?;

    Ok(Json(serde_json::json!({
        "message": "City deleted successfully"
    })))
}
