//! App builder - constructs and runs the BMF application

use axum::Router;
use std::sync::Arc;

use crate::blob_adapter::BlobAdapter;
use crate::cache_adapter::CacheAdapter;
use crate::meta_adapter::MetaAdapter;
use crate::prelude::*;
use crate::routes;
use crate::session_adapter::SessionAdapter;
use crate::settings::SettingsRegistry;
pub use bmf_core::app::{Adapters, App, AppBuilderOpts, AppState, VERSION};
use bmf_core::category::{Category, CategoryRegistry};
use bmf_core::module::{ModuleDef, ModuleRegistry};
use bmf_core::perm::PermissionTable;
use bmf_core::render::Renderer;
use bmf_core::urls::UrlRegistry;

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
	contrib: bool,
	categories: Vec<Category>,
	modules: Vec<ModuleDef>,
	templates: Vec<(Box<str>, Box<str>)>,
	vars: Option<Vec<(String, String)>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		// A subscriber may already be installed by the host
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts::default(),
			adapters: Adapters {
				meta_adapter: None,
				session_adapter: None,
				cache_adapter: None,
				blob_adapter: None,
			},
			contrib: true,
			categories: Vec::new(),
			modules: Vec::new(),
			templates: Vec::new(),
			vars: None,
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn debug(&mut self, debug: bool) -> &mut Self {
		self.opts.debug = debug;
		self
	}
	pub fn login_url(&mut self, login_url: impl Into<Box<str>>) -> &mut Self {
		self.opts.login_url = login_url.into();
		self
	}
	pub fn wizard_url(&mut self, wizard_url: impl Into<Box<str>>) -> &mut Self {
		self.opts.wizard_url = wizard_url.into();
		self
	}
	pub fn session_cookie(&mut self, session_cookie: impl Into<Box<str>>) -> &mut Self {
		self.opts.session_cookie = session_cookie.into();
		self
	}
	pub fn session_ttl(&mut self, seconds: i64) -> &mut Self {
		self.opts.session_ttl = seconds;
		self
	}
	/// Setting overrides. The process environment is used if none are given.
	pub fn vars(&mut self, vars: impl IntoIterator<Item = (String, String)>) -> &mut Self {
		self.vars = Some(vars.into_iter().collect());
		self
	}

	// Applications
	/// Whether the built-in accounting, customer and employee modules are registered
	pub fn contrib(&mut self, contrib: bool) -> &mut Self {
		self.contrib = contrib;
		self
	}
	pub fn category(&mut self, category: Category) -> &mut Self {
		self.categories.push(category);
		self
	}
	pub fn module(&mut self, module: ModuleDef) -> &mut Self {
		self.modules.push(module);
		self
	}
	/// Replaces one of the module view templates
	pub fn template(&mut self, name: impl Into<Box<str>>, template: impl Into<Box<str>>) -> &mut Self {
		self.templates.push((name.into(), template.into()));
		self
	}

	// Adapters
	pub fn meta_adapter(&mut self, meta_adapter: Arc<dyn MetaAdapter>) -> &mut Self {
		self.adapters.meta_adapter = Some(meta_adapter);
		self
	}
	pub fn session_adapter(&mut self, session_adapter: Arc<dyn SessionAdapter>) -> &mut Self {
		self.adapters.session_adapter = Some(session_adapter);
		self
	}
	pub fn cache_adapter(&mut self, cache_adapter: Arc<dyn CacheAdapter>) -> &mut Self {
		self.adapters.cache_adapter = Some(cache_adapter);
		self
	}
	pub fn blob_adapter(&mut self, blob_adapter: Arc<dyn BlobAdapter>) -> &mut Self {
		self.adapters.blob_adapter = Some(blob_adapter);
		self
	}

	/// Builds the app state and its router
	pub fn build(self) -> ClResult<(App, Router)> {
		let Some(meta_adapter) = self.adapters.meta_adapter else {
			error!("FATAL: No meta adapter configured");
			return Err(Error::Internal("No meta adapter configured".to_string()));
		};
		let Some(session_adapter) = self.adapters.session_adapter else {
			error!("FATAL: No session adapter configured");
			return Err(Error::Internal("No session adapter configured".to_string()));
		};
		let Some(cache_adapter) = self.adapters.cache_adapter else {
			error!("FATAL: No cache adapter configured");
			return Err(Error::Internal("No cache adapter configured".to_string()));
		};
		let Some(blob_adapter) = self.adapters.blob_adapter else {
			error!("FATAL: No blob adapter configured");
			return Err(Error::Internal("No blob adapter configured".to_string()));
		};

		// Register settings from all modules
		let mut settings_registry = SettingsRegistry::new();
		bmf_core::register_settings(&mut settings_registry)?;
		bmf_document::register_settings(&mut settings_registry)?;
		info!("Registered {} settings", settings_registry.len());
		let settings = match self.vars {
			Some(vars) => settings_registry.freeze(vars)?,
			None => settings_registry.freeze(std::env::vars())?,
		};

		// Categories and modules
		let mut categories = CategoryRegistry::new();
		let mut modules = ModuleRegistry::new();
		if self.contrib {
			bmf_contrib::register(&mut categories, &mut modules)?;
		}
		for category in self.categories {
			categories.register(category)?;
		}
		for module in self.modules {
			if categories.get(&module.category).is_none() {
				warn!(model = %module.model, category = %module.category, "Module category is not registered");
			}
			modules.register(module)?;
		}
		info!("Registered {} categories, {} modules", categories.len(), modules.len());

		let permissions = PermissionTable::from_modules(&modules);
		let mut urls = UrlRegistry::new();
		bmf_module::register_urls(&mut urls, &modules)?;
		routes::register_urls(&mut urls)?;

		let mut renderer = Renderer::new()?;
		for (name, template) in &self.templates {
			renderer.register_template(name, template)?;
		}

		let module_router = bmf_module::init(&modules, &permissions)?;

		let app: App = Arc::new(AppState {
			opts: self.opts,
			settings: Arc::new(settings),
			categories: Arc::new(categories),
			modules: Arc::new(modules),
			permissions: Arc::new(permissions),
			urls: Arc::new(urls),
			renderer: Arc::new(renderer),
			meta_adapter,
			session_adapter,
			cache_adapter,
			blob_adapter,
		});

		let router = routes::init(app.clone(), module_router);
		Ok((app, router))
	}

	pub async fn run(self) -> ClResult<()> {
		info!(" ____  __  __ _____");
		info!("| __ )|  \\/  |  ___|");
		info!("|  _ \\| |\\/| | |_");
		info!("| |_) | |  | |  _|");
		info!("|____/|_|  |_|_|");
		info!("V{}", VERSION);
		info!("");

		let (app, router) = self.build()?;
		if app.opts.debug {
			warn!("Debug mode: documents are sent directly");
		}

		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on HTTP {}", app.opts.listen);
		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
