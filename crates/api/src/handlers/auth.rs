//! # Account Handlers
//!
//! Registration, login, email verification and profile lookup.
//!
//! A new account starts unverified. Registration sends a notice with a signed
//! link to `GET /api/auth/verify?token=...`; until that link is followed the
//! account can log in but is refused by the booking routes.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use slotdesk_core::{
    errors::BookingError,
    models::user::{
        LoginRequest, LoginResponse, NewUser, RegisterRequest, RegisterResponse, UserProfile,
        VerifyAccountResponse,
    },
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    ApiState,
    middleware::{
        auth::{CurrentUser, TokenPurpose, hash_password, verify_password},
        error_handling::AppError,
    },
};

/// Creates an unverified account and sends the verification notice
///
/// # Errors
///
/// * `BookingError::InvalidInput` - A field fails validation
/// * `BookingError::Conflict` - Username or email already registered
#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    payload.validate()?;

    let email = payload.email.trim().to_string();
    if state.users.exists(&payload.username, &email).await? {
        return Err(AppError(BookingError::Conflict(
            "Username or email is already registered".to_string(),
        )));
    }

    let user = state
        .users
        .create(NewUser {
            username: payload.username,
            email,
            password_hash: hash_password(&payload.password)?,
            first_name: payload.first_name.trim().to_string(),
            last_name: payload.last_name.trim().to_string(),
            agency_name: payload.agency_name.trim().to_string(),
        })
        .await?;

    let token = state.tokens.issue_verification(user.id)?;
    state
        .dispatcher
        .dispatch(state.composer.account_verification(&user, &token));

    info!(user_id = %user.id, username = %user.username, "Account registered");

    let response = RegisterResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        verified: user.verified,
        message: "Account created. Check your email to verify it.".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchanges username-or-email and password for a bearer token
///
/// Unknown accounts and wrong passwords produce the same error.
#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state
        .users
        .find_by_login(payload.login.trim())
        .await?
        .filter(|user| verify_password(&payload.password, &user.password_hash))
        .ok_or_else(|| {
            warn!("Failed login attempt for '{}'", payload.login);
            BookingError::Unauthenticated("Invalid credentials".to_string())
        })?;

    let (access_token, expires_at) = state.tokens.issue_access(user.id)?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_at,
        user: UserProfile::from(&user),
    }))
}

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub token: String,
}

/// Marks the account named by a verification token as verified
///
/// Following the link twice is harmless.
#[axum::debug_handler]
pub async fn verify_account(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<VerifyQuery>,
) -> Result<Json<VerifyAccountResponse>, AppError> {
    let user_id = state.tokens.verify(&query.token, TokenPurpose::Verify)?;

    let user = state
        .users
        .mark_verified(user_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Account {user_id} not found")))?;

    info!(user_id = %user.id, "Account verified");

    Ok(Json(VerifyAccountResponse {
        id: user.id,
        verified: user.verified,
        message: "Your account is verified. You can now book appointments.".to_string(),
    }))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}
