//! Module view handlers
//!
//! Lists and details answer with their context as JSON, or with the rendered
//! HTML in the ajax envelope for ajax requests. The forms are ajax only: GET
//! renders the form into the envelope, POST answers `valid` with a redirect
//! target or `error` with the validation message.

use axum::{
	Extension, Form, Json,
	extract::Path,
	response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use std::sync::Arc;

use bmf_core::BmfCtx;
use bmf_core::ajax::{AjaxEnvelope, render_to_response, render_valid_form};
use bmf_core::next::redirect_next;
use bmf_core::render::{TEMPLATE_DELETE, TEMPLATE_DETAIL, TEMPLATE_FORM, TEMPLATE_LIST};
use bmf_types::meta_adapter::{CreateModuleObject, ModuleObject, UpdateModuleObject};
use bmf_types::types::ApiResponse;

use crate::form::{DeleteForm, ObjectForm};
use crate::prelude::*;
use crate::view::ModuleView;

fn respond(ctx: &BmfCtx, template: &str, context: Map<String, Value>, pk: Pk) -> ClResult<Response> {
	if ctx.is_ajax {
		let html = ctx.app.renderer.render(template, &context)?;
		Ok(render_to_response(html).object_pk(pk).into_response())
	} else {
		Ok(Json(ApiResponse::new(context)).into_response())
	}
}

fn view_url(ctx: &BmfCtx, view: &ModuleView, name: &str, pk: Option<Pk>) -> ClResult<String> {
	let route = view.module().route(name);
	match pk {
		Some(pk) => ctx.app.urls.reverse(&route, [("pk", pk.to_string())]),
		None => ctx.app.urls.reverse::<&str, &str>(&route, []),
	}
}

fn render_form(
	ctx: &BmfCtx,
	template: &str,
	action: &str,
	submit: &str,
	object: Option<&ModuleObject>,
) -> ClResult<AjaxEnvelope> {
	let html = ctx
		.app
		.renderer
		.render(template, &json!({ "action": action, "submit": submit, "object": object }))?;
	Ok(render_to_response(html).object_pk(object.map_or(0, |o| o.pk)))
}

fn success_redirect(
	ctx: &BmfCtx,
	view: &ModuleView,
	next: Option<&str>,
	success_url: Option<&str>,
) -> ClResult<String> {
	redirect_next(
		&ctx.app.urls,
		next,
		ctx.host.as_deref(),
		success_url,
		&view.module().namespace_index(),
	)
}

// Views //
//*******//
/// GET /api/module/{app}/{model}
pub async fn get_list(
	ctx: Ctx,
	Extension(view): Extension<Arc<ModuleView>>,
) -> ClResult<Response> {
	let objects = view.get_queryset(&ctx).await?;
	let mut context = view.context(&ctx, None)?;
	context.insert("objects".into(), serde_json::to_value(&objects)?);
	respond(&ctx, TEMPLATE_LIST, context, 0)
}

/// GET /api/module/{app}/{model}/{pk}
pub async fn get_detail(
	ctx: Ctx,
	Extension(view): Extension<Arc<ModuleView>>,
	Path(pk): Path<Pk>,
) -> ClResult<Response> {
	let object = view.get_object(&ctx, pk).await?;
	let mut context = view.context(&ctx, Some(&object))?;
	context.insert("object".into(), serde_json::to_value(object.as_ref())?);
	respond(&ctx, TEMPLATE_DETAIL, context, pk)
}

// Create //
//********//
/// GET /api/module/{app}/{model}/create
pub async fn get_create(
	ctx: Ctx,
	Extension(view): Extension<Arc<ModuleView>>,
) -> ClResult<AjaxEnvelope> {
	let action = view_url(&ctx, &view, "create", None)?;
	render_form(&ctx, TEMPLATE_FORM, &action, "Create", None)
}

/// POST /api/module/{app}/{model}/create
pub async fn post_create(
	ctx: Ctx,
	Extension(view): Extension<Arc<ModuleView>>,
	Form(form): Form<ObjectForm>,
) -> ClResult<AjaxEnvelope> {
	let cleaned = match form.clean() {
		Ok(cleaned) => cleaned,
		Err(message) => return Ok(AjaxEnvelope::error(message)),
	};

	let pk = ctx
		.app
		.meta_adapter
		.create_module_object(
			view.model(),
			&CreateModuleObject { name: &cleaned.name, state: None, data: &cleaned.data },
		)
		.await?;
	info!(model = %view.model(), pk, "Object created");

	let success_url = view_url(&ctx, &view, "detail", Some(pk))?;
	let redirect = success_redirect(&ctx, &view, form.next.as_deref(), Some(&success_url))?;
	Ok(render_valid_form(view.context(&ctx, None)?, redirect).object_pk(pk))
}

// Update //
//********//
/// GET /api/module/{app}/{model}/{pk}/update
pub async fn get_update(
	ctx: Ctx,
	Extension(view): Extension<Arc<ModuleView>>,
	Path(pk): Path<Pk>,
) -> ClResult<AjaxEnvelope> {
	let object = view.get_object(&ctx, pk).await?;
	let action = view_url(&ctx, &view, "update", Some(pk))?;
	render_form(&ctx, TEMPLATE_FORM, &action, "Save", Some(&object))
}

/// POST /api/module/{app}/{model}/{pk}/update
pub async fn post_update(
	ctx: Ctx,
	Extension(view): Extension<Arc<ModuleView>>,
	Path(pk): Path<Pk>,
	Form(form): Form<ObjectForm>,
) -> ClResult<AjaxEnvelope> {
	let object = view.get_object(&ctx, pk).await?;
	let cleaned = match form.clean() {
		Ok(cleaned) => cleaned,
		Err(message) => return Ok(AjaxEnvelope::error(message).object_pk(pk)),
	};

	ctx.app
		.meta_adapter
		.update_module_object(
			view.model(),
			pk,
			&UpdateModuleObject {
				name: Some(&cleaned.name),
				state: None,
				data: Some(&cleaned.data),
			},
		)
		.await?;
	info!(model = %view.model(), pk, "Object updated");

	let success_url = view_url(&ctx, &view, "detail", Some(pk))?;
	let redirect = success_redirect(&ctx, &view, form.next.as_deref(), Some(&success_url))?;
	Ok(render_valid_form(view.context(&ctx, Some(&object))?, redirect).object_pk(pk))
}

// Delete //
//********//
/// GET /api/module/{app}/{model}/{pk}/delete
pub async fn get_delete(
	ctx: Ctx,
	Extension(view): Extension<Arc<ModuleView>>,
	Path(pk): Path<Pk>,
) -> ClResult<AjaxEnvelope> {
	let object = view.get_object(&ctx, pk).await?;
	let action = view_url(&ctx, &view, "delete", Some(pk))?;
	render_form(&ctx, TEMPLATE_DELETE, &action, "Delete", Some(&object))
}

/// POST /api/module/{app}/{model}/{pk}/delete
pub async fn post_delete(
	ctx: Ctx,
	Extension(view): Extension<Arc<ModuleView>>,
	Path(pk): Path<Pk>,
	Form(form): Form<DeleteForm>,
) -> ClResult<AjaxEnvelope> {
	view.get_object(&ctx, pk).await?;
	ctx.app.meta_adapter.delete_module_object(view.model(), pk).await?;
	info!(model = %view.model(), pk, "Object deleted");

	let redirect = success_redirect(&ctx, &view, form.next.as_deref(), None)?;
	Ok(render_valid_form(view.context(&ctx, None)?, redirect).object_pk(pk))
}

// Clone //
//*******//
/// GET /api/module/{app}/{model}/{pk}/clone
pub async fn get_clone(
	ctx: Ctx,
	Extension(view): Extension<Arc<ModuleView>>,
	Path(pk): Path<Pk>,
) -> ClResult<AjaxEnvelope> {
	let object = view.get_object(&ctx, pk).await?;
	let action = view_url(&ctx, &view, "clone", Some(pk))?;
	render_form(&ctx, TEMPLATE_FORM, &action, "Clone", Some(&object))
}

/// POST /api/module/{app}/{model}/{pk}/clone
///
/// Creates a new object from the submitted values. The copy starts in the
/// initial workflow state.
pub async fn post_clone(
	ctx: Ctx,
	Extension(view): Extension<Arc<ModuleView>>,
	Path(pk): Path<Pk>,
	Form(form): Form<ObjectForm>,
) -> ClResult<AjaxEnvelope> {
	view.get_object(&ctx, pk).await?;
	let cleaned = match form.clean() {
		Ok(cleaned) => cleaned,
		Err(message) => return Ok(AjaxEnvelope::error(message).object_pk(pk)),
	};

	let clone_pk = ctx
		.app
		.meta_adapter
		.create_module_object(
			view.model(),
			&CreateModuleObject { name: &cleaned.name, state: None, data: &cleaned.data },
		)
		.await?;
	info!(model = %view.model(), pk, clone = clone_pk, "Object cloned");

	let success_url = view_url(&ctx, &view, "detail", Some(clone_pk))?;
	let redirect = success_redirect(&ctx, &view, form.next.as_deref(), Some(&success_url))?;
	Ok(render_valid_form(view.context(&ctx, None)?, redirect).object_pk(clone_pk))
}

// vim: ts=4
