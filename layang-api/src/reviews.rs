use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use layang_core::content::CustomerReview;
use layang_core::route::validate_rating;

use crate::error::AppError;
use crate::state::AppState;

/// Image uploads are out of scope; the form submits a URL string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub customer_name: String,
    #[serde(default = "default_rating")]
    pub rating: i32,
    pub comment: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub location: String,
    pub is_active: Option<bool>,
}

fn default_rating() -> i32 {
    5
}

/// GET /api/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerReview>>, AppError> {
    let reviews = state
        .review_repo
        .list_reviews()
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch reviews: {}", e)))?;

    Ok(Json(reviews))
}

/// POST /api/reviews (admin)
pub async fn create_review(
    State(state): State<AppState>,
    Json(input): Json<ReviewInput>,
) -> Result<(StatusCode, Json<CustomerReview>), AppError> {
    if input.customer_name.trim().is_empty() {
        return Err(AppError::ValidationError(
            "customer name is required".to_string(),
        ));
    }
    validate_rating(input.rating).map_err(|e| AppError::ValidationError(e.to_string()))?;

    let review = CustomerReview {
        id: Uuid::new_v4(),
        customer_name: input.customer_name.trim().to_string(),
        rating: input.rating,
        comment: input.comment,
        image_url: input.image_url,
        location: input.location,
        is_active: input.is_active.unwrap_or(true),
        created_at: Utc::now(),
    };

    state
        .review_repo
        .create_review(&review)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to create review: {}", e)))?;

    Ok((StatusCode::CREATED, Json(review)))
}
