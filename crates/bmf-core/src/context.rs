//! Per-request BMF context
//!
//! Created by the session middleware for every request and handed to the
//! handlers through the `Ctx` extractor. Holds the session, the authenticated
//! user and the objects already loaded during this request.

use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};

use bmf_types::meta_adapter::{Document, ModuleObject, User};

use crate::perm::PermAction;
use crate::prelude::*;
use crate::session::Session;

/// Objects memoized for the lifetime of one request
#[derive(Debug, Default)]
pub struct RequestCache {
	objects: Mutex<HashMap<(ModelId, Pk), Arc<ModuleObject>>>,
	documents: Mutex<HashMap<Pk, Arc<Document>>>,
}

pub struct BmfCtx {
	pub app: App,
	pub session: Arc<Session>,
	pub user: Option<Arc<User>>,
	pub language: Box<str>,
	pub is_ajax: bool,
	pub host: Option<Box<str>>,
	pub cache: RequestCache,
}

impl BmfCtx {
	pub fn new(app: App, session: Arc<Session>, user: Option<Arc<User>>) -> Self {
		let language = app.default_language().into();
		Self {
			app,
			session,
			user,
			language,
			is_ajax: false,
			host: None,
			cache: RequestCache::default(),
		}
	}

	pub fn with_language(mut self, language: impl Into<Box<str>>) -> Self {
		self.language = language.into();
		self
	}

	pub fn with_ajax(mut self, is_ajax: bool) -> Self {
		self.is_ajax = is_ajax;
		self
	}

	pub fn with_host(mut self, host: Option<&str>) -> Self {
		self.host = host.map(Box::from);
		self
	}

	/// The authenticated user, `Unauthorized` for anonymous requests
	pub fn user(&self) -> ClResult<&User> {
		self.user.as_deref().ok_or(Error::Unauthorized)
	}

	pub fn has_perms<S: AsRef<str>>(&self, perms: &[S]) -> bool {
		self.user.as_ref().is_some_and(|u| u.has_perms(perms))
	}

	/// Whether the user holds the view permission of a registered model
	pub fn can_view(&self, model: &ModelId) -> bool {
		self.app.permissions.get(model, PermAction::View).is_some_and(|perm| self.has_perms(&[perm]))
	}

	/// Loads a module object, at most once per request
	pub async fn get_module_object(&self, model: &ModelId, pk: Pk) -> ClResult<Arc<ModuleObject>> {
		let key = (model.clone(), pk);
		if let Some(object) = self.cache.objects.lock().get(&key) {
			return Ok(object.clone());
		}

		let object = self.app.meta_adapter.read_module_object(model, pk).await?;
		let object = Arc::new(object.ok_or(Error::NotFound)?);
		self.cache.objects.lock().insert(key, object.clone());
		Ok(object)
	}

	/// Loads a document, at most once per request
	pub async fn get_document(&self, pk: Pk) -> ClResult<Arc<Document>> {
		if let Some(doc) = self.cache.documents.lock().get(&pk) {
			return Ok(doc.clone());
		}

		let doc = self.app.meta_adapter.read_document(pk).await?;
		let doc = Arc::new(doc.ok_or(Error::NotFound)?);
		self.cache.documents.lock().insert(pk, doc.clone());
		Ok(doc)
	}
}

impl std::fmt::Debug for BmfCtx {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BmfCtx")
			.field("session", &self.session.key())
			.field("user", &self.user.as_ref().map(|u| u.user_id))
			.field("language", &self.language)
			.field("is_ajax", &self.is_ajax)
			.finish_non_exhaustive()
	}
}

// vim: ts=4
