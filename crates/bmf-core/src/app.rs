//! App state type

use std::sync::Arc;

use bmf_types::blob_adapter::BlobAdapter;
use bmf_types::cache_adapter::CacheAdapter;
use bmf_types::meta_adapter::MetaAdapter;
use bmf_types::session_adapter::SessionAdapter;

use crate::category::CategoryRegistry;
use crate::module::ModuleRegistry;
use crate::perm::PermissionTable;
use crate::prelude::*;
use crate::render::Renderer;
use crate::settings::FrozenSettingsRegistry;
use crate::urls::UrlRegistry;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,

	// Registries, frozen at startup
	pub settings: Arc<FrozenSettingsRegistry>,
	pub categories: Arc<CategoryRegistry>,
	pub modules: Arc<ModuleRegistry>,
	pub permissions: Arc<PermissionTable>,
	pub urls: Arc<UrlRegistry>,
	pub renderer: Arc<Renderer>,

	pub meta_adapter: Arc<dyn MetaAdapter>,
	pub session_adapter: Arc<dyn SessionAdapter>,
	pub cache_adapter: Arc<dyn CacheAdapter>,
	pub blob_adapter: Arc<dyn BlobAdapter>,
}

impl AppState {
	pub fn default_language(&self) -> &str {
		self.settings.get_str("bmf.default_language").unwrap_or("en")
	}

	pub fn employee_required(&self) -> bool {
		self.settings.get_bool("bmf.employee_required").unwrap_or(false)
	}
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub meta_adapter: Option<Arc<dyn MetaAdapter>>,
	pub session_adapter: Option<Arc<dyn SessionAdapter>>,
	pub cache_adapter: Option<Arc<dyn CacheAdapter>>,
	pub blob_adapter: Option<Arc<dyn BlobAdapter>>,
}

#[derive(Debug, Clone)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// Development mode: proxy file sending is disabled, the running version is reported
	pub debug: bool,
	pub login_url: Box<str>,
	/// Setup wizard for superusers without an employee record
	pub wizard_url: Box<str>,
	pub session_cookie: Box<str>,
	pub session_ttl: i64,
}

impl Default for AppBuilderOpts {
	fn default() -> Self {
		Self {
			listen: "127.0.0.1:8000".into(),
			debug: false,
			login_url: "/accounts/login/".into(),
			wizard_url: "/bmf/wizard/".into(),
			session_cookie: "bmf_session".into(),
			session_ttl: 14 * 24 * 3600,
		}
	}
}

// vim: ts=4
