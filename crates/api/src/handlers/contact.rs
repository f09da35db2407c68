use axum::{Json, extract::State, http::StatusCode};
use slotdesk_core::models::contact::{ContactRequest, ContactResponse, CreateContactRequest};
use std::sync::Arc;
use tracing::{error, info};

use crate::{ApiState, middleware::error_handling::AppError};

/// Most rows returned by the listing endpoints.
pub const LIST_LIMIT: i64 = 1000;

/// Stores a contact form submission
///
/// Validation failures are reported as `400`. A storage failure is logged and
/// answered with a generic `500` body instead of the error taxonomy.
#[axum::debug_handler]
pub async fn submit_contact(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    payload.validate()?;

    let contact = ContactRequest::from_submission(payload);

    if let Err(err) = state.contacts.insert(&contact).await {
        error!(contact_id = %contact.id, "Failed to store contact request: {err}");
        return Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ContactResponse {
                success: false,
                message: "We could not send your message. Please try again later.".to_string(),
                id: None,
            }),
        ));
    }

    info!(contact_id = %contact.id, service = %contact.service, "Contact request received");

    Ok((
        StatusCode::OK,
        Json(ContactResponse {
            success: true,
            message: "Thank you, we will get back to you shortly.".to_string(),
            id: Some(contact.id),
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_contacts(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ContactRequest>>, AppError> {
    let contacts = state.contacts.list(LIST_LIMIT).await?;
    Ok(Json(contacts))
}
