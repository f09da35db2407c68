//! # SlotDesk API
//!
//! The API crate provides the web server for the SlotDesk appointment service.
//! Agencies register, confirm their email, browse the daily slot grid and book
//! appointments; the administrator settles requests through one-click links.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into booking engine calls
//! - **Middleware**: Authentication extractors and error mapping
//! - **Config**: Environment-driven settings
//! - **Notifier**: Mail relay transport for outbound notices
//!
//! Booking rules live in `slotdesk-core`; persistence is reached only through
//! the core store traits, backed by PostgreSQL in production and by in-memory
//! stores in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Outbound notice transports
pub mod notifier;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, StatusCode, header},
};
use eyre::Result;
use slotdesk_core::{
    booking::BookingService,
    clock::Clock,
    config::{BookingConfig, NoticeConfig},
    memory::{MemoryAppointmentStore, MemoryContactStore, MemoryStatusStore, MemoryUserStore},
    notify::{NoticeComposer, NotificationDispatcher, Notifier},
    store::{AppointmentStore, ContactStore, StatusStore, UserStore},
};
use slotdesk_db::{DbPool, PgStore};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::middleware::auth::TokenKeys;

/// The four persistence seams the handlers depend on.
#[derive(Clone)]
pub struct Stores {
    pub appointments: Arc<dyn AppointmentStore>,
    pub users: Arc<dyn UserStore>,
    pub contacts: Arc<dyn ContactStore>,
    pub status_checks: Arc<dyn StatusStore>,
}

impl Stores {
    /// Every store backed by the same PostgreSQL pool.
    pub fn postgres(pool: DbPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self {
            appointments: store.clone(),
            users: store.clone(),
            contacts: store.clone(),
            status_checks: store,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            appointments: Arc::new(MemoryAppointmentStore::new()),
            users: Arc::new(MemoryUserStore::new()),
            contacts: Arc::new(MemoryContactStore::new()),
            status_checks: Arc::new(MemoryStatusStore::new()),
        }
    }
}

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Availability, admission and lifecycle rules
    pub booking: BookingService,
    pub users: Arc<dyn UserStore>,
    pub contacts: Arc<dyn ContactStore>,
    pub status_checks: Arc<dyn StatusStore>,
    /// Signs and checks bearer and verification tokens
    pub tokens: TokenKeys,
    /// Source of `now` for every booking decision
    pub clock: Arc<dyn Clock>,
    pub dispatcher: NotificationDispatcher,
    pub composer: NoticeComposer,
}

impl ApiState {
    pub fn new(
        booking_config: BookingConfig,
        notice_config: NoticeConfig,
        tokens: TokenKeys,
        stores: Stores,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let dispatcher = NotificationDispatcher::new(notifier);
        let composer = NoticeComposer::new(notice_config);
        let booking = BookingService::new(
            booking_config,
            stores.appointments,
            dispatcher.clone(),
            composer.clone(),
        );

        Self {
            booking,
            users: stores.users,
            contacts: stores.contacts,
            status_checks: stores.status_checks,
            tokens,
            clock,
            dispatcher,
            composer,
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Liveness, version and banner
        .merge(routes::health::routes())
        // Registration, login and email verification
        .merge(routes::auth::routes())
        // Daily slot grid
        .merge(routes::availability::routes())
        // Booking, listing, cancelling and settling appointments
        .merge(routes::appointments::routes())
        // Contact form
        .merge(routes::contact::routes())
        // Status check log
        .merge(routes::status::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(allowed)
        .allow_credentials(true)
}

/// Installs the global log subscriber at `level`.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Starts the API server with the provided configuration and state
///
/// Wraps the router with CORS, request tracing and a request timeout, and
/// serves until the listener fails.
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use slotdesk_api::{config::ApiConfig, ApiState, start_server};
/// # async fn run(config: ApiConfig, state: ApiState) -> eyre::Result<()> {
/// start_server(config, Arc::new(state)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    let app = app(state);

    let app = if let Some(origins) = &config.cors_origins {
        app.layer(cors_layer(origins))
    } else {
        app
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(HandleErrorLayer::new(|_: BoxError| async {
                StatusCode::REQUEST_TIMEOUT
            }))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
