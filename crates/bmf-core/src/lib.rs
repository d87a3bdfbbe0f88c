//! Core infrastructure for the BMF web layer.
//!
//! Request context and session state, permission chains and the dispatch
//! middlewares, the module/category/URL registries, and the ajax helpers
//! shared by the feature crates.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod ajax;
pub mod app;
pub mod category;
pub mod context;
pub mod core_settings;
pub mod extract;
pub mod handler;
pub mod middleware;
pub mod module;
pub mod next;
pub mod perm;
pub mod prelude;
pub mod render;
pub mod session;
pub mod settings;
pub mod urls;
pub mod view;
pub mod workflow;
pub mod workspace;

// Re-export commonly used types
pub use app::{Adapters, App, AppBuilderOpts, AppState};
pub use context::BmfCtx;
pub use extract::Ctx;
pub use middleware::PermissionCheckOutput;

pub fn register_settings(
	registry: &mut settings::SettingsRegistry,
) -> bmf_types::error::ClResult<()> {
	core_settings::register_settings(registry)
}

// vim: ts=4
