//! # Register Module
//!
//! Validation for the registration endpoint:
//! - Declarative rule set per registration form
//! - Rule engine accumulating field errors
//! - Middleware answering 422 when any rule failed

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod rules;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::register_routes;
