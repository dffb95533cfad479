use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use layang_core::content::PopularRoute;

use crate::error::AppError;
use crate::flight_routes::with_price_alias;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularRouteInput {
    pub flight_route_id: Uuid,
    #[serde(default)]
    pub display_order: i32,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularRouteUpdate {
    pub display_order: i32,
    pub is_active: bool,
}

/// Serialize the entry with its flight route nested under `flightRoute`,
/// the route carrying the usual price aliases.
fn to_wire(entry: &PopularRoute) -> serde_json::Value {
    let mut value = serde_json::to_value(entry).unwrap_or_default();
    if let (Some(map), Some(route)) = (value.as_object_mut(), entry.flight_route.as_ref()) {
        map.insert("flightRoute".to_string(), with_price_alias(route));
    }
    value
}

/// GET /api/popular-flight-routes
///
/// Active promotions in display order, each with its route joined in. An
/// entry whose route has vanished is skipped, not an error.
pub async fn list_popular_routes(
    State(state): State<AppState>,
) -> Result<Json<Vec<serde_json::Value>>, AppError> {
    let entries = state
        .popular_repo
        .list_popular_routes()
        .await
        .map_err(|e| {
            AppError::InternalServerError(format!("Failed to fetch popular flight routes: {}", e))
        })?;

    let mut out = Vec::with_capacity(entries.len());
    for mut entry in entries {
        match state.route_repo.get_route(entry.flight_route_id).await {
            Ok(Some(route)) => {
                entry.flight_route = Some(route);
                out.push(to_wire(&entry));
            }
            Ok(None) => warn!("popular entry {} points at a missing route", entry.id),
            Err(e) => {
                return Err(AppError::InternalServerError(format!(
                    "Failed to fetch flight route: {}",
                    e
                )))
            }
        }
    }

    Ok(Json(out))
}

/// POST /api/popular-flight-routes (admin)
pub async fn create_popular_route(
    State(state): State<AppState>,
    Json(input): Json<PopularRouteInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let route = state
        .route_repo
        .get_route(input.flight_route_id)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch flight route: {}", e)))?
        .ok_or_else(|| AppError::NotFoundError("Flight route not found".to_string()))?;

    let existing = state
        .popular_repo
        .find_popular_by_route(input.flight_route_id)
        .await
        .map_err(|e| {
            AppError::InternalServerError(format!("Failed to fetch popular flight route: {}", e))
        })?;
    if existing.is_some() {
        return Err(AppError::ConflictError(
            "This flight route is already marked as popular".to_string(),
        ));
    }

    let mut entry = PopularRoute {
        id: Uuid::new_v4(),
        flight_route_id: input.flight_route_id,
        display_order: input.display_order,
        is_active: input.is_active.unwrap_or(true),
        image_url: input.image_url,
        flight_route: None,
    };

    state
        .popular_repo
        .create_popular_route(&entry)
        .await
        .map_err(|e| {
            AppError::InternalServerError(format!("Failed to create popular flight route: {}", e))
        })?;

    entry.flight_route = Some(route);
    Ok((StatusCode::CREATED, Json(to_wire(&entry))))
}

/// PUT /api/popular-flight-routes/{id} (admin)
pub async fn update_popular_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<PopularRouteUpdate>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .popular_repo
        .update_popular_route(id, input.display_order, input.is_active)
        .await
        .map_err(|e| {
            AppError::InternalServerError(format!("Failed to update popular flight route: {}", e))
        })?;

    Ok(Json(serde_json::json!({
        "id": id,
        "displayOrder": input.display_order,
        "isActive": input.is_active,
    })))
}

/// DELETE /api/popular-flight-routes/{id} (admin)
pub async fn delete_popular_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .popular_repo
        .delete_popular_route(id)
        .await
        .map_err(|e| {
            AppError::InternalServerError(format!("Failed to delete popular flight route: {}", e))
        })?;

    Ok(Json(serde_json::json!({
        "message": "Popular flight route deleted successfully"
    })))
}
