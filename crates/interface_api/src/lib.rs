//! HTTP API Layer
//!
//! REST surface for billing charges ("cobranças") using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: thin request handlers delegating to `BillingService`
//! - **Middleware**: request id propagation, request logging, tracing, CORS
//! - **DTOs**: request/response bodies with the Portuguese field aliases
//! - **Error Handling**: rejections map to 400, missing records to 404 and
//!   dependency failures to 500, all with an `ErrorResponse` body
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(records, customers, publisher);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod events;
pub mod extract;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use domain_billing::{BillingRecordPort, BillingService, ConsumptionEventPublisher};
use domain_customer::CustomerPort;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{billing, health};
use crate::middleware::request_logging_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub billing: Arc<BillingService>,
}

impl AppState {
    /// Wires the billing service over the given ports
    pub fn new(
        records: Arc<dyn BillingRecordPort>,
        customers: Arc<dyn CustomerPort>,
        publisher: Arc<dyn ConsumptionEventPublisher>,
    ) -> Self {
        Self {
            billing: Arc::new(BillingService::new(records, customers, publisher)),
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let billing_routes = Router::new()
        .route(
            "/",
            get(billing::list_billing_records)
                .post(billing::create_billing_record)
                .put(billing::create_billing_record_from_query),
        )
        .route("/periodo", get(billing::list_billing_records_by_period))
        .route("/:id", get(billing::get_billing_record));

    Router::new()
        .merge(public_routes)
        .nest("/api/cobrancas", billing_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(request_logging_middleware)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
