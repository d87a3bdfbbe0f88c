//! Routes of the registered modules
//!
//! Every module is served below `/api/module/<app_label>/<model_name>`. The
//! route names `<namespace>:index|detail|create|update|delete|clone` are
//! registered for URL reversal before the app state is built.

use axum::{Extension, Router, middleware, routing::get};
use std::sync::Arc;

use bmf_core::middleware::{check_perm, check_perm_object, never_cache};
use bmf_core::module::{ModuleDef, ModuleRegistry};
use bmf_core::perm::{PermissionChain, PermissionPolicy, PermissionTable};
use bmf_core::urls::UrlRegistry;

use crate::handler;
use crate::prelude::*;
use crate::view::ModuleView;

pub fn module_base_path(model: &ModelId) -> String {
	format!("/api/module/{}/{}", model.app_label, model.model_name)
}

/// Registers the route names of every module
pub fn register_urls(urls: &mut UrlRegistry, modules: &ModuleRegistry) -> ClResult<()> {
	for module in modules.iter() {
		let base = module_base_path(&module.model);
		urls.register(module.namespace_index(), base.clone())?;
		urls.register(module.route("detail"), format!("{}/{{pk}}", base))?;
		urls.register(module.route("create"), format!("{}/create", base))?;
		urls.register(module.route("update"), format!("{}/{{pk}}/update", base))?;
		urls.register(module.route("delete"), format!("{}/{{pk}}/delete", base))?;
		if module.can_clone {
			urls.register(module.route("clone"), format!("{}/{{pk}}/clone", base))?;
		}
	}
	Ok(())
}

fn chain(
	module: &ModuleDef,
	permissions: &PermissionTable,
	policy: PermissionPolicy,
	ajax_only: bool,
) -> ClResult<Arc<PermissionChain>> {
	let chain = PermissionChain::builder()
		.model(module.model.clone())
		.policy(policy)
		.ajax_only(ajax_only)
		.build(permissions)?;
	Ok(Arc::new(chain))
}

fn module_router(
	module: &ModuleDef,
	modules: &ModuleRegistry,
	permissions: &PermissionTable,
) -> ClResult<Router<App>> {
	let view = Arc::new(ModuleView::builder().model(module.model.clone()).build(modules)?);
	let base = module_base_path(&module.model);

	let list_router = Router::new()
		.route(&base, get(handler::get_list))
		.route_layer(middleware::from_fn(check_perm(chain(
			module,
			permissions,
			PermissionPolicy::ModuleView,
			false,
		)?)));

	let detail_router = Router::new()
		.route(&format!("{}/{{pk}}", base), get(handler::get_detail))
		.route_layer(middleware::from_fn(check_perm_object(chain(
			module,
			permissions,
			PermissionPolicy::ModuleView,
			false,
		)?)));

	let create_router = Router::new()
		.route(&format!("{}/create", base), get(handler::get_create).post(handler::post_create))
		.route_layer(middleware::from_fn(check_perm(chain(
			module,
			permissions,
			PermissionPolicy::ModuleCreate,
			true,
		)?)));

	let update_router = Router::new()
		.route(&format!("{}/{{pk}}/update", base), get(handler::get_update).post(handler::post_update))
		.route_layer(middleware::from_fn(check_perm_object(chain(
			module,
			permissions,
			PermissionPolicy::ModuleUpdate,
			true,
		)?)));

	let delete_router = Router::new()
		.route(&format!("{}/{{pk}}/delete", base), get(handler::get_delete).post(handler::post_delete))
		.route_layer(middleware::from_fn(check_perm_object(chain(
			module,
			permissions,
			PermissionPolicy::ModuleDelete,
			true,
		)?)));

	let mut form_router = Router::new().merge(create_router).merge(update_router).merge(delete_router);
	if module.can_clone {
		let clone_router = Router::new()
			.route(&format!("{}/{{pk}}/clone", base), get(handler::get_clone).post(handler::post_clone))
			.route_layer(middleware::from_fn(check_perm_object(chain(
				module,
				permissions,
				PermissionPolicy::ModuleClone,
				true,
			)?)));
		form_router = form_router.merge(clone_router);
	}

	Ok(Router::new()
		.merge(list_router)
		.merge(detail_router)
		.merge(form_router.layer(never_cache()))
		.layer(Extension(view)))
}

/// Routes of every registered module
pub fn init(modules: &ModuleRegistry, permissions: &PermissionTable) -> ClResult<Router<App>> {
	let mut router = Router::new();
	for module in modules.iter() {
		debug!(model = %module.model, "Adding module routes");
		router = router.merge(module_router(module, modules, permissions)?);
	}
	Ok(router)
}


// vim: ts=4
