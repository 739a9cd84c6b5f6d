use std::sync::Arc;

use adhyayan_core::models::{
    normalize_email, AuthResponse, LoginRequest, NewUser, RegisterRequest, UserRole,
};
use adhyayan_core::AppError;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::non_blank;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v0/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "register"))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let email = normalize_email(&request.email);
    let role = if state.config.is_admin_email(&email) {
        UserRole::Admin
    } else {
        UserRole::Student
    };

    let password_hash = hash_password(&request.password)?;
    let user = state
        .db
        .users
        .create(NewUser {
            name: request.name.trim().to_string(),
            email,
            password_hash: Some(password_hash),
            role,
            branch: non_blank(request.branch),
            year: non_blank(request.year),
        })
        .await?;

    let (token, expires_at) = state.jwt.issue(&user)?;
    tracing::info!(user_id = %user.id, role = %user.role, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            expires_at,
            user: user.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v0/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "login"))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, HttpAppError> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = state
        .db
        .users
        .find_by_email(&request.email)
        .await?
        .ok_or_else(invalid)?;

    // Accounts created through an external provider have no password.
    let hash = user.password_hash.as_deref().ok_or_else(invalid)?;
    if !verify_password(&request.password, hash)? {
        return Err(invalid().into());
    }

    let (token, expires_at) = state.jwt.issue(&user)?;
    Ok(Json(AuthResponse {
        token,
        expires_at,
        user: user.into(),
    }))
}
