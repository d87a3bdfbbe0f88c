//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::sync::Arc;
use tempfile::TempDir;

use bmf_blob_adapter_fs::BlobAdapterFs;
use bmf_cache_adapter_lru::CacheAdapterLru;
use bmf_core::category::{Category, CategoryRegistry};
use bmf_core::context::BmfCtx;
use bmf_core::module::{ModuleDef, ModuleRegistry};
use bmf_core::perm::PermissionTable;
use bmf_core::render::Renderer;
use bmf_core::session::Session;
use bmf_core::settings::SettingsRegistry;
use bmf_core::urls::UrlRegistry;
use bmf_core::workflow::{Workflow, WorkflowState, WorkflowTransition};
use bmf_core::{App, AppBuilderOpts, AppState};
use bmf_meta_adapter_sqlite::MetaAdapterSqlite;
use bmf_session_adapter_memory::SessionAdapterMemory;
use bmf_types::meta_adapter::{CreateUser, User};
use bmf_types::session_adapter::SessionRecord;
use bmf_types::types::{ModelId, Timestamp, UserId};

pub fn customer() -> ModelId {
	ModelId::new("djangobmf_customer", "customer")
}

pub fn invoice() -> ModelId {
	ModelId::new("djangobmf_accounting", "invoice")
}

pub fn invoice_workflow() -> Workflow {
	Workflow::new(
		vec![
			WorkflowState::new("draft", "Draft"),
			WorkflowState::new("paid", "Paid").update(false).delete(false),
		],
		vec![WorkflowTransition::new("pay", "Pay", &["draft"], "paid")],
	)
	.expect("valid workflow")
}

#[derive(Debug, Default)]
pub struct TestOpts {
	pub debug: bool,
	pub vars: Vec<(String, String)>,
}

pub async fn create_test_app(test_opts: TestOpts) -> (App, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let mut settings = SettingsRegistry::new();
	bmf_core::register_settings(&mut settings).expect("core settings");
	let settings = settings.freeze(test_opts.vars).expect("frozen settings");

	let mut categories = CategoryRegistry::new();
	categories.register(Category::new("Transactions", "transactions")).expect("category");
	categories.register(Category::new("Customer", "customer")).expect("category");

	let mut modules = ModuleRegistry::new();
	modules
		.register(
			ModuleDef::builder("djangobmf_customer", "customer")
				.verbose_name("Customer")
				.category("customer")
				.url_namespace("customer")
				.can_clone(true)
				.build()
				.expect("module"),
		)
		.expect("register module");
	modules
		.register(
			ModuleDef::builder("djangobmf_accounting", "invoice")
				.verbose_name("Invoice")
				.category("transactions")
				.url_namespace("invoice")
				.workflow(invoice_workflow())
				.build()
				.expect("module"),
		)
		.expect("register module");

	let mut urls = UrlRegistry::new();
	urls.register("customer:index", "/api/module/djangobmf_customer/customer").expect("route");
	urls.register("customer:detail", "/api/module/djangobmf_customer/customer/{pk}").expect("route");
	urls.register("invoice:index", "/api/module/djangobmf_accounting/invoice").expect("route");

	let permissions = PermissionTable::from_modules(&modules);
	let opts = AppBuilderOpts { debug: test_opts.debug, ..AppBuilderOpts::default() };

	let app = Arc::new(AppState {
		opts,
		settings: Arc::new(settings),
		categories: Arc::new(categories),
		modules: Arc::new(modules),
		permissions: Arc::new(permissions),
		urls: Arc::new(urls),
		renderer: Arc::new(Renderer::new().expect("renderer")),
		meta_adapter: Arc::new(
			MetaAdapterSqlite::new(temp_dir.path().join("db")).await.expect("meta adapter"),
		),
		session_adapter: Arc::new(SessionAdapterMemory::new()),
		cache_adapter: Arc::new(CacheAdapterLru::default()),
		blob_adapter: Arc::new(
			BlobAdapterFs::new(temp_dir.path().join("media").into(), "/media/")
				.await
				.expect("blob adapter"),
		),
	});
	(app, temp_dir)
}

pub async fn create_user(app: &App, user: CreateUser<'_>) -> Arc<User> {
	let user_id = app.meta_adapter.create_user(&user).await.expect("Failed to create user");
	Arc::new(app.meta_adapter.read_user(user_id).await.expect("Failed to read user"))
}

/// Request context of an authenticated user, as built by the session layer
pub fn user_ctx(app: &App, user: &Arc<User>) -> BmfCtx {
	let session = Arc::new(Session::new("test-session", Some(user.user_id)));
	BmfCtx::new(app.clone(), session, Some(user.clone()))
}

/// Stores a session of the user and returns the matching cookie header
pub async fn login(app: &App, user_id: UserId, key: &str) -> String {
	let record = SessionRecord {
		user_id: Some(user_id),
		data: serde_json::Map::new(),
		expires_at: Timestamp::now().add_seconds(3600),
	};
	app.session_adapter.save_session(key, &record).await.expect("Failed to save session");
	format!("{}={}", app.opts.session_cookie, key)
}

// vim: ts=4
