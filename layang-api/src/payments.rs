use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use layang_core::payment::{Payment, PaymentStatus};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    pub route_id: Uuid,
    pub user_email: String,
    pub user_name: String,
    #[serde(deserialize_with = "layang_core::fare::lenient_amount", default)]
    pub amount: i64,
    #[serde(default)]
    pub proof_image_url: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentStatusInput {
    pub status: PaymentStatus,
}

/// GET /api/payments (admin)
pub async fn list_payments(State(state): State<AppState>) -> Result<Json<Vec<Payment>>, AppError> {
    let payments = state
        .payment_repo
        .list_payments()
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch payments: {}", e)))?;

    Ok(Json(payments))
}

/// POST /api/payments
///
/// A customer reports a manual bank transfer for a booked route. Records
/// start PENDING; an admin later confirms or rejects them.
pub async fn create_payment(
    State(state): State<AppState>,
    Json(input): Json<PaymentInput>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    if input.user_email.trim().is_empty() {
        return Err(AppError::ValidationError("email is required".to_string()));
    }

    state
        .route_repo
        .get_route(input.route_id)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch flight route: {}", e)))?
        .ok_or_else(|| AppError::NotFoundError("Flight route not found".to_string()))?;

    let payment = Payment {
        id: Uuid::new_v4(),
        route_id: input.route_id,
        user_email: input.user_email.trim().to_string(),
        user_name: input.user_name,
        amount: input.amount,
        status: PaymentStatus::Pending,
        proof_image_url: input.proof_image_url,
        created_at: Utc::now(),
    };

    state
        .payment_repo
        .create_payment(&payment)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to create payment: {}", e)))?;

    Ok((StatusCode::CREATED, Json(payment)))
}

/// PUT /api/payments/{id} (admin)
pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<PaymentStatusInput>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .payment_repo
        .update_payment_status(id, input.status)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to update payment: {}", e)))?;

    Ok(Json(serde_json::json!({
        "id": id,
        "status": input.status,
    })))
}
