//! # Error Handling Middleware
//!
//! Maps `BookingError` values to HTTP status codes and a JSON body of the form
//! `{"error": "<message>"}` so that every handler reports failures the same way.
//!
//! | Error | Status |
//! |---|---|
//! | `InvalidInput` | 400 |
//! | `Unauthenticated` | 401 |
//! | `Unverified` | 403 |
//! | `NotFound` | 404 |
//! | `SlotConflict`, `InvalidState`, `Conflict` | 409 |
//! | `LeadTimeViolation`, `AdjacencyViolation` | 422 |
//! | `Database`, `Internal` | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use slotdesk_core::errors::BookingError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotdesk_api::middleware::error_handling::AppError;
/// use slotdesk_core::errors::BookingError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(BookingError::NotFound("appointment".into())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BookingError::LeadTimeViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::SlotConflict(_) => StatusCode::CONFLICT,
            BookingError::AdjacencyViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::InvalidState(_) => StatusCode::CONFLICT,
            BookingError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            BookingError::Unverified(_) => StatusCode::FORBIDDEN,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Store failures are logged in full; the client only sees the summary
        let message = match &self.0 {
            BookingError::Database(report) => {
                error!("Database error: {report:#}");
                "Database error".to_string()
            }
            BookingError::Internal(err) => {
                error!("Internal error: {err}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Infrastructure failures outside the booking engine count as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}

/// Maps a BookingError to an HTTP response
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
