//! Backend service handlers for frontend-driven requests.
//!
//! This module groups async request handlers that operate on the shared
//! `AppContext`, perform side effects (network), and report results or
//! notifications back to the frontend.

pub mod catalog_service;
pub mod config_service;
pub mod course_service;
pub mod quiz_service;
pub mod registration_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::app::AppContext>;
