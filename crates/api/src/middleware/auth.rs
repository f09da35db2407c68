//! # Authentication Module
//!
//! Password hashing, signed tokens and the request extractors that guard the
//! booking routes.
//!
//! Passwords are stored as Argon2 PHC strings. Two kinds of HS256 tokens are
//! issued from the same secret and told apart by their `purpose` claim:
//!
//! - **access** tokens, sent as `Authorization: Bearer <token>`
//! - **verify** tokens, embedded in the account verification link
//!
//! [`CurrentUser`] accepts any authenticated account; [`VerifiedUser`]
//! additionally rejects accounts that have not confirmed their email.

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{DateTime, Duration, Utc};
use eyre::{Result, eyre};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use slotdesk_core::{errors::BookingError, models::user::User};
use tracing::debug;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Lifetime of the link sent at registration.
const VERIFY_TOKEN_TTL_HOURS: i64 = 72;

/// Hashes a password using the Argon2 algorithm
///
/// A fresh random salt is generated for every call and the result is returned
/// in PHC string format (algorithm, version, parameters, salt and hash).
///
/// # Example
///
/// ```rust
/// use slotdesk_api::middleware::auth::{hash_password, verify_password};
///
/// let hashed = hash_password("correct horse").unwrap();
/// assert!(verify_password("correct horse", &hashed));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a stored PHC string. A malformed hash never matches.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    Access,
    Verify,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    purpose: TokenPurpose,
    iat: i64,
    exp: i64,
}

/// Signing material and lifetimes for issued tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, access_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
        }
    }

    /// Issues a bearer token for `user_id`, returning it with its expiry.
    pub fn issue_access(&self, user_id: Uuid) -> Result<(String, DateTime<Utc>)> {
        self.issue(user_id, TokenPurpose::Access, self.access_ttl)
    }

    pub fn issue_verification(&self, user_id: Uuid) -> Result<String> {
        let (token, _) = self.issue(
            user_id,
            TokenPurpose::Verify,
            Duration::hours(VERIFY_TOKEN_TTL_HOURS),
        )?;
        Ok(token)
    }

    fn issue(
        &self,
        user_id: Uuid,
        purpose: TokenPurpose,
        ttl: Duration,
    ) -> Result<(String, DateTime<Utc>)> {
        let issued_at = Utc::now();
        let expires_at = issued_at + ttl;
        let claims = Claims {
            sub: user_id,
            purpose,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| eyre!("Error signing token: {}", e))?;

        Ok((token, expires_at))
    }

    /// Validates signature, expiry and purpose, yielding the subject.
    pub fn verify(&self, token: &str, purpose: TokenPurpose) -> Result<Uuid, BookingError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(|e| {
            debug!("Rejected token: {}", e);
            BookingError::Unauthenticated("Invalid or expired token".to_string())
        })?;

        if data.claims.purpose != purpose {
            return Err(BookingError::Unauthenticated(
                "Token is not valid for this operation".to_string(),
            ));
        }

        Ok(data.claims.sub)
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, BookingError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| BookingError::Unauthenticated("Missing bearer token".to_string()))?;

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| BookingError::Unauthenticated("Malformed authorization header".to_string()))
}

/// The account behind a valid access token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user_id = state.tokens.verify(token, TokenPurpose::Access)?;

        let user = state
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| BookingError::Unauthenticated("Account no longer exists".to_string()))?;

        Ok(CurrentUser(user))
    }
}

/// A [`CurrentUser`] whose email address has been confirmed.
#[derive(Debug, Clone)]
pub struct VerifiedUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for VerifiedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.verified {
            return Err(AppError(BookingError::Unverified(
                "Confirm your email address before booking".to_string(),
            )));
        }

        Ok(VerifiedUser(user))
    }
}
