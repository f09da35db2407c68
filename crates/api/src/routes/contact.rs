use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/contact", post(handlers::contact::submit_contact))
        .route("/api/contacts", get(handlers::contact::list_contacts))
}
