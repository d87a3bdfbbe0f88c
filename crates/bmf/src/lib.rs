//! BMF, a business management framework web layer.
//!
//! # Features
//!
//! - Module views with ordered permission chains and workflow state gates
//! - Session backed presentation state: dashboards, views, notifications
//! - Cached per-user workspace of categories and modules
//! - Ajax envelopes for forms and rendered fragments
//! - Document listing and downloads, sent directly or by a reverse proxy

// Re-export shared types and adapter traits from bmf-types
pub use bmf_types::blob_adapter;
pub use bmf_types::cache_adapter;
pub use bmf_types::error;
pub use bmf_types::meta_adapter;
pub use bmf_types::session_adapter;
pub use bmf_types::types;

// Feature crate re-exports
pub use bmf_contrib as contrib;
pub use bmf_core::settings;
pub use bmf_document as document;
pub use bmf_module as module;

// Local modules
pub mod app;
pub mod prelude;
pub mod routes;

pub use crate::app::{App, AppBuilder};

// vim: ts=4
