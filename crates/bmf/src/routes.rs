use axum::{
	Router, middleware,
	routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use bmf_core::handler;
use bmf_core::middleware::{check_perm, session_layer};
use bmf_core::perm::PermissionChain;
use bmf_core::urls::UrlRegistry;

use crate::prelude::*;

/// Route names of the BMF endpoints
pub fn register_urls(urls: &mut UrlRegistry) -> ClResult<()> {
	urls.register("bmf:context", "/api/bmf/context")?;
	urls.register("bmf:workspace", "/api/bmf/workspace")?;
	urls.register("bmf:dashboard", "/api/bmf/dashboard/{pk}")?;
	urls.register("bmf:notification", "/api/bmf/notification")?;
	urls.register("documents:index", "/api/documents")?;
	urls.register("documents:detail", "/api/documents/detail/{pk}")?;
	urls.register("documents:download", "/api/documents/download/{pk}")?;
	Ok(())
}

pub fn init(app: App, module_router: Router<App>) -> Router {
	let bmf_router = Router::new()
		.route("/api/bmf/context", get(handler::get_context))
		.route("/api/bmf/workspace", get(handler::get_workspace))
		.route("/api/bmf/dashboard/{pk}", post(handler::post_dashboard))
		.route("/api/bmf/notification", post(handler::post_notification))
		.route_layer(middleware::from_fn(check_perm(Arc::new(PermissionChain::base()))));

	Router::new()
		.merge(bmf_router)
		.merge(bmf_document::init())
		.merge(module_router)
		.layer(middleware::from_fn_with_state(app.clone(), session_layer))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
