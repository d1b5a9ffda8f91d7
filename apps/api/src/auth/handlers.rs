//! Axum route handlers for the auth API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::middleware::AuthUser;
use crate::auth::password::{hash_password, validate_password, verify_password};
use crate::auth::store;
use crate::auth::token::create_token;
use crate::errors::AppError;
use crate::models::user::PublicUser;
use crate::state::AppState;

const DUPLICATE_USER: &str = "Username or email already exists";
const BAD_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub token: String,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if req.username.trim().is_empty() || req.email.trim().is_empty() {
        return Err(AppError::Validation(
            "Username and email are required".to_string(),
        ));
    }
    validate_password(&req.password)?;

    // Advisory pre-check for the friendly error; the unique constraint below
    // is the authority when two registrations race.
    if store::username_or_email_exists(&state.db, &req.username, &req.email).await? {
        return Err(AppError::Conflict(DUPLICATE_USER.to_string()));
    }

    let password_hash = hash_password(&req.password)?;

    let row = match store::insert_user(
        &state.db,
        &req.username,
        &req.email,
        &req.full_name,
        &password_hash,
    )
    .await
    {
        Ok(row) => row,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(AppError::Conflict(DUPLICATE_USER.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let token = create_token(row.user_id, &row.username, &state.config.jwt_secret)?;

    Ok(Json(AuthResponse {
        user: row.into(),
        token,
    }))
}

/// POST /auth/login
///
/// Unknown username and wrong password yield the same error, so a caller
/// cannot enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let row = store::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

    if !verify_password(&req.password, &row.password_hash) {
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
    }

    store::touch_last_login(&state.db, row.user_id).await?;

    let token = create_token(row.user_id, &row.username, &state.config.jwt_secret)?;

    Ok(Json(AuthResponse {
        user: row.into(),
        token,
    }))
}

/// GET /auth/profile
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let row = store::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(row.into()))
}
