//! Built-in BMF applications: accounting, customers and employees.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod categories;
pub mod modules;

use bmf_core::category::CategoryRegistry;
use bmf_core::module::ModuleRegistry;
use bmf_types::error::ClResult;

/// Registers the built-in categories and their modules
pub fn register(categories: &mut CategoryRegistry, modules: &mut ModuleRegistry) -> ClResult<()> {
	categories::register_categories(categories)?;
	modules::register_modules(modules)
}

// vim: ts=4
