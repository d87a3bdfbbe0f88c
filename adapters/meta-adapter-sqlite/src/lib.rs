//! SQLite-backed metadata adapter for the BMF web layer
//!
//! Stores users and permissions, notifications, dashboards, documents and
//! the objects of the registered models in a single database file.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

mod dashboard;
mod document;
mod module_object;
mod notification;
mod schema;
mod user;
mod utils;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::{fmt::Debug, path::Path};

use bmf_types::meta_adapter::{
	self, CreateDashboardView, CreateDocument, CreateModuleObject, CreateUser, Dashboard,
	DashboardView, Document, ListDocumentOptions, ModuleObject, ObjectFilter, UpdateModuleObject,
	User,
};
use bmf_types::prelude::*;

use crate::schema::init_db;

#[derive(Debug)]
pub struct MetaAdapterSqlite {
	db: SqlitePool,
}

impl MetaAdapterSqlite {
	/// Opens (or creates) `meta.db` in the given directory
	pub async fn new(dir: impl AsRef<Path>) -> ClResult<Self> {
		tokio::fs::create_dir_all(dir.as_ref()).await?;
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(dir.as_ref().join("meta.db"))
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		Ok(Self { db })
	}
}

#[async_trait]
impl meta_adapter::MetaAdapter for MetaAdapterSqlite {
	// Users
	//*******
	async fn read_user(&self, user_id: UserId) -> ClResult<User> {
		user::read(&self.db, user_id).await
	}

	async fn create_user(&self, user: &CreateUser<'_>) -> ClResult<UserId> {
		user::create(&self.db, user).await
	}

	// Notifications
	//***************
	async fn create_notification(&self, user_id: UserId, unread: bool) -> ClResult<Pk> {
		notification::create(&self.db, user_id, unread).await
	}

	async fn count_unread_notifications(&self, user_id: UserId) -> ClResult<u64> {
		notification::count_unread(&self.db, user_id).await
	}

	// Dashboards
	//************
	async fn list_dashboards(&self, user_id: UserId) -> ClResult<Vec<Dashboard>> {
		dashboard::list(&self.db, user_id).await
	}

	async fn create_dashboard(&self, user_id: UserId, name: Option<&str>) -> ClResult<Pk> {
		dashboard::create(&self.db, user_id, name).await
	}

	async fn list_dashboard_views(&self, dashboard: Pk) -> ClResult<Vec<DashboardView>> {
		dashboard::list_views(&self.db, dashboard).await
	}

	async fn create_dashboard_view(&self, view: &CreateDashboardView<'_>) -> ClResult<Pk> {
		dashboard::create_view(&self.db, view).await
	}

	// Documents
	//***********
	async fn read_document(&self, pk: Pk) -> ClResult<Option<Document>> {
		document::read(&self.db, pk).await
	}

	async fn list_documents(&self, opts: &ListDocumentOptions) -> ClResult<Vec<Document>> {
		document::list(&self.db, opts).await
	}

	async fn create_document(&self, doc: &CreateDocument<'_>) -> ClResult<Pk> {
		document::create(&self.db, doc).await
	}

	// Module objects
	//****************
	async fn read_module_object(&self, model: &ModelId, pk: Pk) -> ClResult<Option<ModuleObject>> {
		module_object::read(&self.db, model, pk).await
	}

	async fn list_module_objects(
		&self,
		model: &ModelId,
		filter: &ObjectFilter,
	) -> ClResult<Vec<ModuleObject>> {
		module_object::list(&self.db, model, filter).await
	}

	async fn create_module_object(
		&self,
		model: &ModelId,
		object: &CreateModuleObject<'_>,
	) -> ClResult<Pk> {
		module_object::create(&self.db, model, object).await
	}

	async fn update_module_object(
		&self,
		model: &ModelId,
		pk: Pk,
		object: &UpdateModuleObject<'_>,
	) -> ClResult<()> {
		module_object::update(&self.db, model, pk, object).await
	}

	async fn delete_module_object(&self, model: &ModelId, pk: Pk) -> ClResult<()> {
		module_object::delete(&self.db, model, pk).await
	}
}

// vim: ts=4
