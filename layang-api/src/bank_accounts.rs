use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use layang_core::payment::BankAccount;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountInput {
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// GET /api/bank-accounts
pub async fn list_bank_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<BankAccount>>, AppError> {
    let accounts = state
        .bank_account_repo
        .list_bank_accounts()
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch bank accounts: {}", e)))?;

    Ok(Json(accounts))
}

/// POST /api/bank-accounts (admin)
pub async fn create_bank_account(
    State(state): State<AppState>,
    Json(input): Json<BankAccountInput>,
) -> Result<(StatusCode, Json<BankAccount>), AppError> {
    if input.bank_name.trim().is_empty() || input.account_number.trim().is_empty() {
        return Err(AppError::ValidationError(
            "bank name and account number are required".to_string(),
        ));
    }

    let account = BankAccount {
        id: Uuid::new_v4(),
        bank_name: input.bank_name.trim().to_string(),
        account_number: input.account_number.trim().to_string(),
        account_holder: input.account_holder,
        is_active: input.is_active,
    };

    state
        .bank_account_repo
        .create_bank_account(&account)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to create bank account: {}", e)))?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// DELETE /api/bank-accounts/{id} (admin)
pub async fn delete_bank_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .bank_account_repo
        .delete_bank_account(id)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to delete bank account: {}", e)))?;

    Ok(Json(serde_json::json!({
        "message": "Bank account deleted successfully"
    })))
}
