//! Document subsystem. Lists the documents of the BMF and of module
//! objects, serves their files directly or through a reverse proxy.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod handler;
pub mod send;
pub mod settings;

mod prelude;

use axum::{
	Router, middleware,
	routing::{get, post},
};
use std::sync::Arc;

use bmf_core::middleware::check_perm;
use bmf_core::perm::PermissionChain;

use prelude::*;

pub fn register_settings(registry: &mut bmf_core::settings::SettingsRegistry) -> ClResult<()> {
	settings::register_settings(registry)
}

/// Document routes. Access needs a logged in user only.
pub fn init() -> Router<App> {
	Router::new()
		.route("/api/documents", get(handler::list_documents).post(handler::post_document))
		.route(
			"/api/documents/{app}/{model}/{pk}",
			get(handler::list_object_documents).post(handler::post_object_document),
		)
		.route(
			"/api/documents/detail/{pk}",
			get(handler::get_document).put(handler::put_document).delete(handler::delete_document),
		)
		.route("/api/documents/detail/{pk}/file", post(handler::put_document_file))
		.route("/api/documents/download/{pk}", get(handler::get_download))
		.route_layer(middleware::from_fn(check_perm(Arc::new(PermissionChain::base()))))
}

// vim: ts=4
