//! k8s-hello: a web server for showcasing Kubernetes features.
//!
//! Serves basic information about the deployment, a health check that reports
//! ready after a configurable delay, and endpoints for damaging the server's
//! health, healing it, or killing the process outright.

pub mod app;
pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod kill;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::run;
pub use error::StartupError;
