//! Shop Admin Dashboard
//!
//! Staff-facing dashboard over the shop backend's REST API.
//!
//! ## Features
//! - Catalog management: categories, products, product templates, filter groups
//! - Publications with ordered catalog-item variations
//! - Orders, order events and preorder stages
//! - Users and FAQ content
//! - CDEK waybills and the courier map widget
//! - Sales metrics
//!
//! The backend owns every business rule. This crate declares its endpoints,
//! caches query results under tags that mutations invalidate, validates form
//! input before it is sent, and serves the dashboard's JSON surface.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod schema;
pub mod server;
pub mod widgets;

pub use api::AdminApi;
pub use config::AdminConfig;
pub use error::{AdminError, FieldErrors, Result, Toast};
pub use server::{build_router, AppState};
