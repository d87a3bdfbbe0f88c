//! BMF module definitions
//!
//! A module binds a model to its presentation metadata (names, category,
//! create views, workflow). Feature crates register their modules at startup;
//! views, permission tables and the workspace are derived from the registry.

use serde::Serialize;
use std::sync::Arc;

use crate::prelude::*;
use crate::workflow::Workflow;

/// Named create view of a module, e.g. ("invoice", "Invoice")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateView {
	pub key: Box<str>,
	pub name: Box<str>,
}

#[derive(Debug)]
pub struct ModuleDef {
	pub model: ModelId,
	pub verbose_name: Box<str>,
	pub verbose_name_plural: Box<str>,
	pub url_namespace: Box<str>,
	pub category: Box<str>,
	pub create_views: Vec<CreateView>,
	pub has_report: bool,
	pub can_clone: bool,
	pub workflow: Workflow,
}

impl ModuleDef {
	pub fn builder(app_label: &str, model_name: &str) -> ModuleDefBuilder {
		ModuleDefBuilder::new(app_label, model_name)
	}

	/// Route name of the module's list view
	pub fn namespace_index(&self) -> String {
		format!("{}:index", self.url_namespace)
	}

	/// Route name of one of the module's views
	pub fn route(&self, view: &str) -> String {
		format!("{}:{}", self.url_namespace, view)
	}
}

pub struct ModuleDefBuilder {
	model: ModelId,
	verbose_name: Option<Box<str>>,
	verbose_name_plural: Option<Box<str>>,
	url_namespace: Option<Box<str>>,
	category: Option<Box<str>>,
	create_views: Vec<CreateView>,
	has_report: bool,
	can_clone: bool,
	workflow: Option<Workflow>,
}

impl ModuleDefBuilder {
	pub fn new(app_label: &str, model_name: &str) -> Self {
		Self {
			model: ModelId::new(app_label, model_name),
			verbose_name: None,
			verbose_name_plural: None,
			url_namespace: None,
			category: None,
			create_views: Vec::new(),
			has_report: false,
			can_clone: false,
			workflow: None,
		}
	}

	pub fn verbose_name(mut self, name: impl Into<Box<str>>) -> Self {
		self.verbose_name = Some(name.into());
		self
	}

	pub fn verbose_name_plural(mut self, name: impl Into<Box<str>>) -> Self {
		self.verbose_name_plural = Some(name.into());
		self
	}

	pub fn url_namespace(mut self, namespace: impl Into<Box<str>>) -> Self {
		self.url_namespace = Some(namespace.into());
		self
	}

	/// Slug of the category the module is listed under (required)
	pub fn category(mut self, slug: impl Into<Box<str>>) -> Self {
		self.category = Some(slug.into());
		self
	}

	pub fn create_view(mut self, key: impl Into<Box<str>>, name: impl Into<Box<str>>) -> Self {
		self.create_views.push(CreateView { key: key.into(), name: name.into() });
		self
	}

	pub fn has_report(mut self, has_report: bool) -> Self {
		self.has_report = has_report;
		self
	}

	pub fn can_clone(mut self, can_clone: bool) -> Self {
		self.can_clone = can_clone;
		self
	}

	pub fn workflow(mut self, workflow: Workflow) -> Self {
		self.workflow = Some(workflow);
		self
	}

	pub fn build(self) -> ClResult<ModuleDef> {
		let category = self
			.category
			.ok_or_else(|| Error::ConfigError(format!("Module {} has no category", self.model)))?;
		let verbose_name = self.verbose_name.unwrap_or_else(|| self.model.model_name.clone());
		let verbose_name_plural =
			self.verbose_name_plural.unwrap_or_else(|| format!("{}s", verbose_name).into());
		let url_namespace = self.url_namespace.unwrap_or_else(|| {
			format!("module:{}_{}", self.model.app_label, self.model.model_name).into()
		});

		Ok(ModuleDef {
			model: self.model,
			verbose_name,
			verbose_name_plural,
			url_namespace,
			category,
			create_views: self.create_views,
			has_report: self.has_report,
			can_clone: self.can_clone,
			workflow: self.workflow.unwrap_or_default(),
		})
	}
}

#[derive(Debug, Default)]
pub struct ModuleRegistry {
	modules: Vec<Arc<ModuleDef>>,
}

impl ModuleRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, module: ModuleDef) -> ClResult<()> {
		if self.get(&module.model).is_some() {
			return Err(Error::ConfigError(format!("Module {} is already registered", module.model)));
		}
		debug!("Registering module: {}", module.model);
		self.modules.push(Arc::new(module));
		Ok(())
	}

	pub fn get(&self, model: &ModelId) -> Option<&Arc<ModuleDef>> {
		self.modules.iter().find(|m| &m.model == model)
	}

	pub fn get_by_name(&self, app_label: &str, model_name: &str) -> Option<&Arc<ModuleDef>> {
		self.modules
			.iter()
			.find(|m| m.model.app_label.as_ref() == app_label && m.model.model_name.as_ref() == model_name)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Arc<ModuleDef>> {
		self.modules.iter()
	}

	/// Modules listed under a category, in registration order
	pub fn in_category<'a>(&'a self, slug: &'a str) -> impl Iterator<Item = &'a Arc<ModuleDef>> + 'a {
		self.modules.iter().filter(move |m| m.category.as_ref() == slug)
	}

	pub fn len(&self) -> usize {
		self.modules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.modules.is_empty()
	}
}


// vim: ts=4
