use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::debug;
use uuid::Uuid;

use layang_core::filter::{filter_and_sort, similar_routes, FilterSpec, SortMode};
use layang_core::repository::RouteQuery;
use layang_core::route::{validate_itinerary, validate_rating, FeeItem, FlightClass, FlightRoute};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters of the public search endpoint. Everything is optional
/// and parsed leniently: a malformed value drops that one constraint
/// instead of failing the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSearchParams {
    pub departure_city_id: Option<Uuid>,
    pub arrival_city_id: Option<Uuid>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub airline: Option<String>,
    pub min_rating: Option<String>,
    pub min_departure_hour: Option<String>,
    pub max_departure_hour: Option<String>,
    /// Comma-separated, e.g. "4,5".
    pub ratings: Option<String>,
    /// Comma-separated airline names, matched exactly.
    pub airlines: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInput {
    pub departure_city_id: Uuid,
    pub arrival_city_id: Uuid,
    pub departure_date: NaiveDate,
    #[serde(default, deserialize_with = "lenient_optional_date")]
    pub return_date: Option<NaiveDate>,
    pub airline: String,
    pub departure_time: String,
    pub arrival_time: String,
    #[serde(default = "default_rating")]
    pub rating: i32,
    #[serde(default)]
    pub available_seats: i32,
    #[serde(default)]
    pub flight_class: FlightClass,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub other_fees: Vec<FeeItem>,
    #[serde(deserialize_with = "layang_core::fare::lenient_amount", default)]
    pub discount: i64,
}

fn default_rating() -> i32 {
    5
}

/// Accepts "YYYY-MM-DD", a datetime string ("...T..."), empty, or null.
/// Empty and malformed both mean "no date".
fn lenient_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

// ============================================================================
// Query translation
// ============================================================================

fn parse_date(input: &str) -> Option<NaiveDate> {
    let date_part = input.split('T').next().unwrap_or(input).trim();
    if date_part.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(e) => {
            debug!("ignoring unparseable date {:?}: {}", input, e);
            None
        }
    }
}

fn parse_csv_ints(input: &str) -> Vec<i32> {
    input
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

fn parse_csv_strings(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// Split the request into the storage-side narrowing and the in-memory
/// filter specification the engine evaluates.
pub fn translate_params(params: &RouteSearchParams) -> (RouteQuery, FilterSpec) {
    let min_price = params.min_price.as_deref().and_then(|s| s.trim().parse().ok());
    let max_price = params.max_price.as_deref().and_then(|s| s.trim().parse().ok());

    let query = RouteQuery {
        departure_city_id: params.departure_city_id,
        arrival_city_id: params.arrival_city_id,
        departure_date: params.departure_date.as_deref().and_then(parse_date),
        return_date: params.return_date.as_deref().and_then(parse_date),
        min_price,
        max_price,
        airline: params.airline.clone(),
        min_rating: params.min_rating.as_deref().and_then(|s| s.trim().parse().ok()),
    };

    let defaults = FilterSpec::default();
    let spec = FilterSpec {
        price_range: (
            min_price.unwrap_or(defaults.price_range.0),
            max_price.unwrap_or(defaults.price_range.1),
        ),
        departure_time_range: (
            params
                .min_departure_hour
                .as_deref()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.departure_time_range.0),
            params
                .max_departure_hour
                .as_deref()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.departure_time_range.1),
        ),
        ratings: params.ratings.as_deref().map(parse_csv_ints).unwrap_or_default(),
        airlines: params
            .airlines
            .as_deref()
            .map(parse_csv_strings)
            .unwrap_or_default(),
        sort: match params.sort.as_deref() {
            Some("fastest") => SortMode::Fastest,
            _ => SortMode::Cheapest,
        },
    };

    (query, spec)
}

/// The storefront reads the total under `price`; keep both names on the
/// wire, plus the pre-formatted Rupiah string the result cards render.
pub(crate) fn with_price_alias(route: &FlightRoute) -> serde_json::Value {
    let mut value = serde_json::to_value(route).unwrap_or_default();
    if let Some(map) = value.as_object_mut() {
        map.insert("price".to_string(), serde_json::json!(route.total_price));
        map.insert(
            "displayPrice".to_string(),
            serde_json::json!(layang_shared::format_rupiah(route.total_price)),
        );
    }
    value
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/flight-routes
pub async fn list_flight_routes(
    State(state): State<AppState>,
    Query(params): Query<RouteSearchParams>,
) -> Result<Json<Vec<serde_json::Value>>, AppError> {
    let (query, spec) = translate_params(&params);

    let candidates = state
        .route_repo
        .search_routes(&query)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch flight routes: {}", e)))?;

    let ranked = filter_and_sort(candidates, &spec);

    let page: Vec<serde_json::Value> = match params.limit {
        Some(limit) => ranked.iter().take(limit).map(with_price_alias).collect(),
        None => ranked.iter().map(with_price_alias).collect(),
    };

    Ok(Json(page))
}

/// GET /api/flight-routes/{id}
pub async fn get_flight_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let route = state
        .route_repo
        .get_route(id)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch flight route: {}", e)))?
        .ok_or_else(|| AppError::NotFoundError("Flight route not found".to_string()))?;

    Ok(Json(with_price_alias(&route)))
}

/// GET /api/flight-routes/{id}/similar
///
/// Same-city-pair routes shown on a detail page, the reference's own id
/// excluded, with the standard filter/sort parameters applied on top.
pub async fn similar_flight_routes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<RouteSearchParams>,
) -> Result<Json<Vec<serde_json::Value>>, AppError> {
    let reference = state
        .route_repo
        .get_route(id)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch flight route: {}", e)))?
        .ok_or_else(|| AppError::NotFoundError("Flight route not found".to_string()))?;

    let query = RouteQuery {
        departure_city_id: Some(reference.departure_city_id),
        arrival_city_id: Some(reference.arrival_city_id),
        departure_date: Some(reference.departure_date),
        return_date: reference.return_date,
        ..RouteQuery::default()
    };

    let candidates = state
        .route_repo
        .search_routes(&query)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch flight routes: {}", e)))?;

    let (_, spec) = translate_params(&params);
    let ranked = filter_and_sort(similar_routes(&candidates, &reference), &spec);

    let page: Vec<serde_json::Value> = match params.limit {
        Some(limit) => ranked.iter().take(limit).map(with_price_alias).collect(),
        None => ranked.iter().map(with_price_alias).collect(),
    };

    Ok(Json(page))
}

fn build_route(id: Uuid, input: RouteInput) -> Result<FlightRoute, AppError> {
    validate_itinerary(
        input.departure_city_id,
        input.arrival_city_id,
        input.departure_date,
        input.return_date,
    )
    .map_err(|e| AppError::ValidationError(e.to_string()))?;
    validate_rating(input.rating).map_err(|e| AppError::ValidationError(e.to_string()))?;

    let mut route = FlightRoute {
        id,
        departure_city_id: input.departure_city_id,
        arrival_city_id: input.arrival_city_id,
        departure_city: None,
        arrival_city: None,
        departure_date: input.departure_date,
        return_date: input.return_date,
        airline: input.airline,
        departure_time: input.departure_time,
        arrival_time: input.arrival_time,
        duration: String::new(),
        rating: input.rating,
        available_seats: input.available_seats,
        flight_class: input.flight_class,
        image_url: input.image_url,
        description: input.description,
        other_fees: input.other_fees,
        discount: input.discount,
        total_price: 0,
    };
    // The client never supplies total_price or duration; both are derived
    // here so they are persisted atomically with the fee/discount edit.
    route.recompute_derived();
    Ok(route)
}

/// POST /api/flight-routes (admin)
pub async fn create_flight_route(
    State(state): State<AppState>,
    Json(input): Json<RouteInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let route = build_route(Uuid::new_v4(), input)?;

    state
        .route_repo
        .create_route(&route)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to create flight route: {}", e)))?;

    Ok((StatusCode::CREATED, Json(with_price_alias(&route))))
}

/// PUT /api/flight-routes/{id} (admin)
pub async fn update_flight_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<RouteInput>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .route_repo
        .get_route(id)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch flight route: {}", e)))?
        .ok_or_else(|| AppError::NotFoundError("Flight route not found".to_string()))?;

    let route = build_route(id, input)?;

    state
        .route_repo
        .update_route(id, &route)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to update flight route: {}", e)))?;

    Ok(Json(with_price_alias(&route)))
}

/// DELETE /api/flight-routes/{id} (admin)
pub async fn delete_flight_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .route_repo
        .delete_route(id)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to delete flight route: {}", e)))?;

    Ok(Json(serde_json::json!({
        "message": "Flight route deleted successfully"
    })))
}
