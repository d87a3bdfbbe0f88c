//! Adapter that manages the persisted BMF records: users and their permissions,
//! notifications, dashboards, documents and module objects.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Debug};

use crate::prelude::*;
use crate::types::{ModelId, Pk, Timestamp, UserId};

// Users //
//*******//
#[derive(Debug, Clone)]
pub struct User {
	pub user_id: UserId,
	pub username: Box<str>,
	pub is_active: bool,
	pub is_superuser: bool,
	/// Granted permissions in "<app_label>.<action>_<model_name>" format
	pub permissions: Vec<Box<str>>,
	/// Linked employee record, if any
	pub employee: Option<Pk>,
}

impl User {
	pub fn has_perm(&self, perm: &str) -> bool {
		if !self.is_active {
			return false;
		}
		self.is_superuser || self.permissions.iter().any(|p| p.as_ref() == perm)
	}

	/// Checks that the user holds every permission of the list
	pub fn has_perms<S: AsRef<str>>(&self, perms: &[S]) -> bool {
		perms.iter().all(|p| self.has_perm(p.as_ref()))
	}
}

#[derive(Debug, Clone, Default)]
pub struct CreateUser<'a> {
	pub username: &'a str,
	pub is_superuser: bool,
	pub permissions: &'a [&'a str],
	pub employee: Option<Pk>,
}

// Dashboards //
//************//
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
	pub pk: Pk,
	pub name: Box<str>,
}

/// A view entry of a dashboard. The URL is stored as a route name and its
/// arguments, and reversed when the session's view list is rebuilt.
#[derive(Debug, Clone)]
pub struct DashboardView {
	pub pk: Pk,
	pub dashboard: Pk,
	pub name: Box<str>,
	pub category: Box<str>,
	pub route: Box<str>,
	pub route_kwargs: HashMap<Box<str>, Box<str>>,
}

#[derive(Debug, Clone)]
pub struct CreateDashboardView<'a> {
	pub dashboard: Pk,
	pub name: &'a str,
	pub category: &'a str,
	pub route: &'a str,
	pub route_kwargs: &'a [(&'a str, &'a str)],
}

// Documents //
//***********//
/// Link between a document and the module object owning it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLink {
	pub model: ModelId,
	pub object_pk: Pk,
}

#[derive(Debug, Clone)]
pub struct Document {
	pub pk: Pk,
	pub name: Box<str>,
	/// Storage name of the file, relative to the blob storage root
	pub file: Box<str>,
	pub mimetype: Box<str>,
	pub size: u64,
	pub is_static: bool,
	pub content: Option<ContentLink>,
	pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateDocument<'a> {
	pub name: &'a str,
	pub file: &'a str,
	pub mimetype: &'a str,
	pub size: u64,
	pub is_static: bool,
	pub content: Option<ContentLink>,
}

/// Filter for document listings
#[derive(Debug, Clone, Default)]
pub struct ListDocumentOptions {
	pub is_static: bool,
	pub content: Option<ContentLink>,
}

// Module objects //
//****************//
#[derive(Debug, Clone, Serialize)]
pub struct ModuleObject {
	pub pk: Pk,
	pub model: ModelId,
	pub name: Box<str>,
	/// Current workflow state key, `None` for the workflow's default state
	pub state: Option<Box<str>>,
	pub data: serde_json::Value,
	pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectFilter {
	pub state: Option<Box<str>>,
}

#[derive(Debug, Clone)]
pub struct CreateModuleObject<'a> {
	pub name: &'a str,
	pub state: Option<&'a str>,
	pub data: &'a serde_json::Value,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateModuleObject<'a> {
	pub name: Option<&'a str>,
	pub state: Option<&'a str>,
	pub data: Option<&'a serde_json::Value>,
}

#[async_trait]
pub trait MetaAdapter: Debug + Send + Sync {
	// Users
	async fn read_user(&self, user_id: UserId) -> ClResult<User>;
	async fn create_user(&self, user: &CreateUser<'_>) -> ClResult<UserId>;

	// Notifications
	async fn create_notification(&self, user_id: UserId, unread: bool) -> ClResult<Pk>;
	async fn count_unread_notifications(&self, user_id: UserId) -> ClResult<u64>;

	// Dashboards
	/// Lists the named dashboards of a user
	async fn list_dashboards(&self, user_id: UserId) -> ClResult<Vec<Dashboard>>;
	async fn create_dashboard(&self, user_id: UserId, name: Option<&str>) -> ClResult<Pk>;
	async fn list_dashboard_views(&self, dashboard: Pk) -> ClResult<Vec<DashboardView>>;
	async fn create_dashboard_view(&self, view: &CreateDashboardView<'_>) -> ClResult<Pk>;

	// Documents
	async fn read_document(&self, pk: Pk) -> ClResult<Option<Document>>;
	async fn list_documents(&self, opts: &ListDocumentOptions) -> ClResult<Vec<Document>>;
	async fn create_document(&self, doc: &CreateDocument<'_>) -> ClResult<Pk>;

	// Module objects
	async fn read_module_object(&self, model: &ModelId, pk: Pk) -> ClResult<Option<ModuleObject>>;
	async fn list_module_objects(
		&self,
		model: &ModelId,
		filter: &ObjectFilter,
	) -> ClResult<Vec<ModuleObject>>;
	async fn create_module_object(
		&self,
		model: &ModelId,
		object: &CreateModuleObject<'_>,
	) -> ClResult<Pk>;
	async fn update_module_object(
		&self,
		model: &ModelId,
		pk: Pk,
		object: &UpdateModuleObject<'_>,
	) -> ClResult<()>;
	async fn delete_module_object(&self, model: &ModelId, pk: Pk) -> ClResult<()>;
}


// vim: ts=4
