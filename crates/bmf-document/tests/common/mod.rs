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
use bmf_core::{App, AppBuilderOpts, AppState};
use bmf_meta_adapter_sqlite::MetaAdapterSqlite;
use bmf_session_adapter_memory::SessionAdapterMemory;
use bmf_types::meta_adapter::{ContentLink, CreateDocument, CreateUser};
use bmf_types::session_adapter::SessionRecord;
use bmf_types::types::{ModelId, Pk, Timestamp};

pub fn lead() -> ModelId {
	ModelId::new("crm", "lead")
}

pub struct TestApp {
	pub app: App,
	pub router: Router,
	pub cookie: String,
	_tmp: TempDir,
}

pub async fn create_test_app(debug: bool, sendtype: Option<&str>) -> TestApp {
	let tmp = TempDir::new().expect("Failed to create temp directory");

	let mut settings = SettingsRegistry::new();
	bmf_core::register_settings(&mut settings).expect("core settings");
	bmf_document::register_settings(&mut settings).expect("document settings");
	let vars: Vec<(String, String)> = sendtype
		.map(|s| ("BMF_DOCUMENT_SENDTYPE".to_string(), s.to_string()))
		.into_iter()
		.collect();
	let settings = settings.freeze(vars).expect("settings");

	let mut categories = CategoryRegistry::new();
	categories.register(Category::new("Customer", "customer")).expect("category");
	let mut modules = ModuleRegistry::new();
	modules
		.register(ModuleDef::builder("crm", "lead").category("customer").build().expect("module"))
		.expect("register");
	let permissions = PermissionTable::from_modules(&modules);

	let app: App = Arc::new(AppState {
		opts: AppBuilderOpts { debug, ..AppBuilderOpts::default() },
		settings: Arc::new(settings),
		categories: Arc::new(categories),
		modules: Arc::new(modules),
		permissions: Arc::new(permissions),
		urls: Arc::new(UrlRegistry::new()),
		renderer: Arc::new(Renderer::new().expect("renderer")),
		meta_adapter: Arc::new(MetaAdapterSqlite::new(tmp.path().join("db")).await.expect("meta")),
		session_adapter: Arc::new(SessionAdapterMemory::new()),
		cache_adapter: Arc::new(CacheAdapterLru::default()),
		blob_adapter: Arc::new(
			BlobAdapterFs::new(tmp.path().join("media").into(), "/media").await.expect("blob"),
		),
	});

	let cookie = login(&app, "alice", &["crm.view_lead"]).await;

	let router = bmf_document::init()
		.layer(middleware::from_fn_with_state(app.clone(), session_layer))
		.with_state(app.clone());
	TestApp { app, router, cookie, _tmp: tmp }
}

/// Creates a user with a session, returns the session cookie
pub async fn login(app: &App, username: &str, permissions: &[&str]) -> String {
	let user_id = app
		.meta_adapter
		.create_user(&CreateUser { username, permissions, ..Default::default() })
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

/// Creates a document, with its file if `data` is given
pub async fn create_document(
	app: &App,
	file: &str,
	data: Option<&[u8]>,
	content: Option<ContentLink>,
) -> Pk {
	if let Some(data) = data {
		app.blob_adapter.create_blob_buf(file, data).await.expect("blob");
	}
	app.meta_adapter
		.create_document(&CreateDocument {
			name: file,
			file,
			mimetype: "application/pdf",
			size: data.map_or(0, |d| d.len() as u64),
			is_static: content.is_none(),
			content,
		})
		.await
		.expect("document")
}

pub fn request(method: &str, uri: &str, cookie: &str) -> Request<Body> {
	Request::builder()
		.method(method)
		.uri(uri)
		.header("cookie", cookie)
		.body(Body::empty())
		.expect("request")
}

// vim: ts=4
