use axum::{Json, extract::State};
use slotdesk_core::{
    errors::BookingError,
    models::status::{CreateStatusCheckRequest, StatusCheck},
};
use std::sync::Arc;

use crate::{ApiState, handlers::contact::LIST_LIMIT, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_status_check(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateStatusCheckRequest>,
) -> Result<Json<StatusCheck>, AppError> {
    if payload.client_name.trim().is_empty() {
        return Err(AppError(BookingError::InvalidInput(
            "client_name is required".to_string(),
        )));
    }

    let check = StatusCheck::new(payload.client_name.trim());
    state.status_checks.insert(&check).await?;

    Ok(Json(check))
}

#[axum::debug_handler]
pub async fn list_status_checks(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<StatusCheck>>, AppError> {
    let checks = state.status_checks.list(LIST_LIMIT).await?;
    Ok(Json(checks))
}
