//! Registration routes

use axum::{middleware, routing::post, Router};

use super::{handlers, middleware as register_middleware};

/// Creates and returns the registration router
///
/// # Routes
/// - `POST /api/auth/register` - Validate a registration and hand it on
///
/// Layers run outermost first: rules are applied, then `validate` decides
/// whether the handler runs.
pub fn register_routes() -> Router {
    Router::new().route(
        "/api/auth/register",
        post(handlers::register_handler)
            .layer(middleware::from_fn(register_middleware::validate))
            .layer(middleware::from_fn(register_middleware::apply_register_rules)),
    )
}
