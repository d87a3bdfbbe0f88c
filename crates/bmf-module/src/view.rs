//! Model-bound module views
//!
//! A `ModuleView` resolves its objects from a module definition or an
//! explicit queryset, memoizes object lookups per request and builds the
//! `bmfmodule` and `bmfworkflow` contexts.

use serde_json::{Map, Value, json};
use std::sync::Arc;

use bmf_core::BmfCtx;
use bmf_core::module::{ModuleDef, ModuleRegistry};
use bmf_core::perm::PermAction;
use bmf_types::meta_adapter::{ModuleObject, ObjectFilter};

use crate::prelude::*;

/// Objects of a model restricted by a filter
#[derive(Debug, Clone)]
pub struct QuerySet {
	pub model: ModelId,
	pub filter: ObjectFilter,
}

#[derive(Debug)]
pub struct ModuleView {
	module: Arc<ModuleDef>,
	filter: ObjectFilter,
}

impl ModuleView {
	pub fn builder() -> ModuleViewBuilder {
		ModuleViewBuilder::default()
	}

	pub fn module(&self) -> &ModuleDef {
		&self.module
	}

	pub fn model(&self) -> &ModelId {
		&self.module.model
	}

	/// Objects of the view. Users without the view permission get an empty list.
	pub async fn get_queryset(&self, ctx: &BmfCtx) -> ClResult<Vec<ModuleObject>> {
		if !ctx.can_view(self.model()) {
			debug!(model = %self.model(), "No view permission, empty queryset");
			return Ok(Vec::new());
		}
		ctx.app.meta_adapter.list_module_objects(self.model(), &self.filter).await
	}

	pub async fn get_object(&self, ctx: &BmfCtx, pk: Pk) -> ClResult<Arc<ModuleObject>> {
		let object = ctx.get_module_object(self.model(), pk).await?;
		if let Some(state) = &self.filter.state {
			if object.state.as_ref() != Some(state) {
				return Err(Error::NotFound);
			}
		}
		Ok(object)
	}

	/// `bmfmodule` context, plus `bmfworkflow` when an object is given
	pub fn context(&self, ctx: &BmfCtx, object: Option<&ModuleObject>) -> ClResult<Map<String, Value>> {
		let module = &self.module;
		let permissions = &ctx.app.permissions;
		let can_clone = module.can_clone
			&& ctx.has_perms(&[
				permissions.require(&module.model, PermAction::View)?,
				permissions.require(&module.model, PermAction::Clone)?,
			]);

		let mut context = Map::new();
		context.insert(
			"bmfmodule".into(),
			json!({
				"namespace_index": module.namespace_index(),
				"verbose_name_plural": module.verbose_name_plural,
				"create_views": module.create_views,
				"model": module.model.to_string(),
				"has_report": module.has_report,
				"can_clone": can_clone,
			}),
		);

		if let Some(object) = object {
			let workflow = &module.workflow;
			context.insert(
				"bmfworkflow".into(),
				json!({
					"enabled": workflow.enabled(),
					"state": workflow.current_state(object)?,
					"transitions": workflow.from_here(object),
				}),
			);
		}

		Ok(context)
	}
}

#[derive(Debug, Default)]
pub struct ModuleViewBuilder {
	model: Option<ModelId>,
	queryset: Option<QuerySet>,
}

impl ModuleViewBuilder {
	pub fn model(mut self, model: ModelId) -> Self {
		self.model = Some(model);
		self
	}

	/// Restricts the view to a queryset. Takes precedence over `model`.
	pub fn queryset(mut self, queryset: QuerySet) -> Self {
		self.queryset = Some(queryset);
		self
	}

	pub fn build(self, modules: &ModuleRegistry) -> ClResult<ModuleView> {
		let (model, filter) = match (self.queryset, self.model) {
			(Some(queryset), _) => (queryset.model, queryset.filter),
			(None, Some(model)) => (model, ObjectFilter::default()),
			(None, None) => {
				return Err(Error::ConfigError(
					"ModuleView is missing a QuerySet, define a model or a queryset".into(),
				));
			}
		};

		let module = modules
			.get(&model)
			.ok_or_else(|| Error::ConfigError(format!("Module {} is not registered", model)))?;
		Ok(ModuleView { module: module.clone(), filter })
	}
}


// vim: ts=4
