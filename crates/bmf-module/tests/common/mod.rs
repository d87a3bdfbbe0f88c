#![allow(dead_code)]

use axum::{Router, body::Body, http::Request, middleware};
use std::sync::Arc;
use tempfile::TempDir;

use bmf_blob_adapter_fs::BlobAdapterFs;
use bmf_cache_adapter_lru::CacheAdapterLru;
use bmf_core::category::{Category, CategoryRegistry};
use bmf_core::middleware::session_layer;
use bmf_core::module::{ModuleDef, ModuleRegistry};
use bmf_core::perm::PermissionTable;
use bmf_core::render::Renderer;
use bmf_core::settings::SettingsRegistry;
use bmf_core::urls::UrlRegistry;
use bmf_core::workflow::{Workflow, WorkflowState, WorkflowTransition};
use bmf_core::{App, AppBuilderOpts, AppState};
use bmf_meta_adapter_sqlite::MetaAdapterSqlite;
use bmf_session_adapter_memory::SessionAdapterMemory;
use bmf_types::meta_adapter::CreateUser;
use bmf_types::session_adapter::SessionRecord;
use bmf_types::types::{ModelId, Timestamp};

pub fn lead() -> ModelId {
	ModelId::new("crm", "lead")
}

pub struct TestApp {
	pub app: App,
	pub router: Router,
	_tmp: TempDir,
}

pub async fn create_test_app() -> TestApp {
	let tmp = TempDir::new().expect("Failed to create temp directory");

	let mut settings = SettingsRegistry::new();
	bmf_core::register_settings(&mut settings).expect("settings");
	let settings = settings.freeze(Vec::<(String, String)>::new()).expect("settings");

	let mut categories = CategoryRegistry::new();
	categories.register(Category::new("Customer", "customer")).expect("category");

	let workflow = Workflow::new(
		vec![WorkflowState::new("new", "New"), WorkflowState::new("won", "Won").update(false).delete(false)],
		vec![WorkflowTransition::new("win", "Win", &["new"], "won")],
	)
	.expect("workflow");
	let mut modules = ModuleRegistry::new();
	modules
		.register(
			ModuleDef::builder("crm", "lead")
				.verbose_name("Lead")
				.category("customer")
				.url_namespace("lead")
				.create_view("lead", "Lead")
				.can_clone(true)
				.workflow(workflow)
				.build()
				.expect("module"),
		)
		.expect("register");

	let mut urls = UrlRegistry::new();
	bmf_module::register_urls(&mut urls, &modules).expect("urls");
	let permissions = PermissionTable::from_modules(&modules);
	let routes = bmf_module::init(&modules, &permissions).expect("routes");

	let app: App = Arc::new(AppState {
		opts: AppBuilderOpts::default(),
		settings: Arc::new(settings),
		categories: Arc::new(categories),
		modules: Arc::new(modules),
		permissions: Arc::new(permissions),
		urls: Arc::new(urls),
		renderer: Arc::new(Renderer::new().expect("renderer")),
		meta_adapter: Arc::new(MetaAdapterSqlite::new(tmp.path().join("db")).await.expect("meta")),
		session_adapter: Arc::new(SessionAdapterMemory::new()),
		cache_adapter: Arc::new(CacheAdapterLru::default()),
		blob_adapter: Arc::new(
			BlobAdapterFs::new(tmp.path().join("media").into(), "/media").await.expect("blob"),
		),
	});

	let router = routes
		.layer(middleware::from_fn_with_state(app.clone(), session_layer))
		.with_state(app.clone());
	TestApp { app, router, _tmp: tmp }
}

/// Creates a user with a stored session, returns the cookie header
pub async fn login_user(app: &App, username: &str, is_superuser: bool, permissions: &[&str]) -> String {
	let user_id = app
		.meta_adapter
		.create_user(&CreateUser { username, is_superuser, permissions, employee: None })
		.await
		.expect("user");
	let record = SessionRecord {
		user_id: Some(user_id),
		data: serde_json::Map::new(),
		expires_at: Timestamp::now().add_seconds(3600),
	};
	let key = format!("{}-session", username);
	app.session_adapter.save_session(&key, &record).await.expect("session");
	format!("{}={}", app.opts.session_cookie, key)
}

pub fn request(method: &str, uri: &str, cookie: &str, ajax: bool, form: Option<&str>) -> Request<Body> {
	let mut builder = Request::builder().method(method).uri(uri).header("cookie", cookie);
	if ajax {
		builder = builder.header("x-requested-with", "XMLHttpRequest");
	}
	match form {
		Some(form) => builder
			.header("content-type", "application/x-www-form-urlencoded")
			.body(Body::from(form.to_string()))
			.expect("request"),
		None => builder.body(Body::empty()).expect("request"),
	}
}

// vim: ts=4
