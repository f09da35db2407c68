use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            post(handlers::appointments::create_appointment),
        )
        .route(
            "/api/appointments/mine",
            get(handlers::appointments::list_my_appointments),
        )
        .route(
            "/api/appointments/:id",
            delete(handlers::appointments::cancel_appointment),
        )
        .route(
            "/api/appointments/:id/confirm",
            get(handlers::appointments::confirm_appointment),
        )
        .route(
            "/api/appointments/:id/reject",
            get(handlers::appointments::reject_appointment),
        )
}
