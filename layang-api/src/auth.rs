use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{extract::State, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use layang_core::payment::AdminUser;

use crate::{error::AppError, middleware::auth::AdminClaims, state::AppState};

pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    user: AdminProfile,
}

#[derive(Debug, Serialize)]
struct AdminProfile {
    id: Uuid,
    email: String,
    name: String,
    role: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/register", post(register_admin))
        .route("/api/admin/login", post(login_admin))
}

async fn register_admin(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::ValidationError(
            "email and password are required".to_string(),
        ));
    }

    if state
        .admin_repo
        .find_by_email(&req.email)
        .await
        .map_err(anyhow::Error::from_boxed)?
        .is_some()
    {
        return Err(AppError::ConflictError(
            "an admin with this email already exists".to_string(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))?
        .to_string();

    let admin = AdminUser {
        id: Uuid::new_v4(),
        email: req.email.trim().to_string(),
        name: req.name,
        password_hash,
        created_at: Utc::now(),
    };
    state
        .admin_repo
        .create_admin(&admin)
        .await
        .map_err(anyhow::Error::from_boxed)?;

    issue_token(&state, &admin)
}

async fn login_admin(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let admin = state
        .admin_repo
        .find_by_email(&req.email)
        .await
        .map_err(anyhow::Error::from_boxed)?
        .ok_or_else(|| AppError::AuthenticationError("Invalid credentials".to_string()))?;

    let hash = PasswordHash::new(&admin.password_hash)
        .map_err(|_| AppError::AuthenticationError("Invalid credentials".to_string()))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &hash)
        .map_err(|_| AppError::AuthenticationError("Invalid credentials".to_string()))?;

    issue_token(&state, &admin)
}

fn issue_token(state: &AppState, admin: &AdminUser) -> Result<Json<AuthResponse>, AppError> {
    let claims = AdminClaims {
        sub: admin.id.to_string(),
        email: admin.email.clone(),
        role: ADMIN_ROLE.to_owned(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    // One casing on the wire: the profile role matches the token claim the
    // middleware checks against.
    Ok(Json(AuthResponse {
        token,
        user: AdminProfile {
            id: admin.id,
            email: admin.email.clone(),
            name: admin.name.clone(),
            role: ADMIN_ROLE.to_string(),
        },
    }))
}
