pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod mock;
pub mod observability;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod validation;
