//! HTTP API Layer
//!
//! This crate provides the REST API of the invoicing system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each resource
//! - **Services**: Rules spanning several storage ports
//! - **Middleware**: Authentication and audit logging
//! - **DTOs**: Request/Response bodies without a domain counterpart
//! - **Error Handling**: Consistent JSON error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_memory::MemoryStores;
//! use interface_api::{create_router, config::ApiConfig, AppState, Ports};
//!
//! let state = AppState::new(Ports::from(&MemoryStores::new()), ApiConfig::default());
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod services;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_catalog::{CategoryPort, ClientPort, ProductPort};
use domain_identity::{CredentialVerifier, UserPort};
use domain_invoicing::InvoicePort;
use infra_memory::MemoryStores;

use crate::config::ApiConfig;
use crate::handlers::{
    auth as session, categories, clients, dashboard, format, health, invoices, products,
};
use crate::middleware::{audit_middleware, auth_middleware};
use crate::services::{CatalogService, DashboardService, InvoiceService};

/// Storage ports the API runs on
#[derive(Clone)]
pub struct Ports {
    pub clients: Arc<dyn ClientPort>,
    pub categories: Arc<dyn CategoryPort>,
    pub products: Arc<dyn ProductPort>,
    pub invoices: Arc<dyn InvoicePort>,
    pub users: Arc<dyn UserPort>,
    pub credentials: Arc<dyn CredentialVerifier>,
}

impl From<&MemoryStores> for Ports {
    fn from(stores: &MemoryStores) -> Self {
        Self {
            clients: stores.clients.clone(),
            categories: stores.categories.clone(),
            products: stores.products.clone(),
            invoices: stores.invoices.clone(),
            users: stores.users.clone(),
            credentials: stores.users.clone(),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub ports: Ports,
    pub catalog: CatalogService,
    pub invoices: InvoiceService,
    pub dashboard: DashboardService,
}

impl AppState {
    pub fn new(ports: Ports, config: ApiConfig) -> Self {
        let catalog = CatalogService::new(
            ports.clients.clone(),
            ports.categories.clone(),
            ports.products.clone(),
            ports.invoices.clone(),
        );
        let invoices = InvoiceService::new(
            ports.invoices.clone(),
            ports.clients.clone(),
            config.company.clone(),
        );
        let dashboard = DashboardService::new(
            ports.clients.clone(),
            ports.products.clone(),
            ports.invoices.clone(),
        );

        Self {
            config,
            ports,
            catalog,
            invoices,
            dashboard,
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/auth/register", post(session::register))
        .route("/auth/login", post(session::login));

    let client_routes = Router::new()
        .route("/", get(clients::list_clients).post(clients::create_client))
        .route("/search", get(clients::search_clients))
        .route(
            "/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        );

    let category_routes = Router::new()
        .route("/", get(categories::list_categories).post(categories::create_category))
        .route(
            "/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        );

    let product_routes = Router::new()
        .route("/", get(products::list_products).post(products::create_product))
        .route("/search", get(products::search_products))
        .route(
            "/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        );

    let invoice_routes = Router::new()
        .route("/", get(invoices::list_invoices).post(invoices::create_invoice))
        .route("/next-number", get(invoices::next_number))
        .route("/compute", post(invoices::compute_invoice))
        .route(
            "/:id",
            get(invoices::get_invoice)
                .put(invoices::update_invoice)
                .delete(invoices::delete_invoice),
        )
        .route("/:id/preview", get(invoices::preview_invoice));

    let format_routes = Router::new()
        .route("/amount", post(format::format_amount_handler))
        .route("/words", post(format::amount_in_words));

    // Protected API routes
    let api_routes = Router::new()
        .route("/me", get(session::me))
        .route("/dashboard", get(dashboard::dashboard))
        .nest("/clients", client_routes)
        .nest("/categories", category_routes)
        .nest("/products", product_routes)
        .nest("/invoices", invoice_routes)
        .nest("/format", format_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
