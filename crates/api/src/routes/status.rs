use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/status",
        get(handlers::status::list_status_checks).post(handlers::status::create_status_check),
    )
}
