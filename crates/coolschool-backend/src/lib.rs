//! Backend runtime entry point and public API surface.
//!
//! This crate owns the backend lifecycle, routes bridge messages to services,
//! talks to the platform's HTTP API, and owns the notification queue shared by
//! every workflow.

mod api;
mod app;
mod config;
mod registration;
mod runtime;
mod services;
mod state;
mod workflow;

pub use crate::api::ApiError;
pub use crate::config::ConfigError;
pub use crate::runtime::{SetupError, run};
