//! Session and permission middlewares
//!
//! `session_layer` runs for every BMF request: it loads the session, resolves
//! the user and installs the per-request context. The permission middlewares
//! built by `check_perm` / `check_perm_object` then dispatch in this order:
//!
//! 1. anonymous requests are redirected to the login URL with `?next=`
//! 2. the chain's request/object checks and permission strings, else 403
//! 3. the employee gate: superusers are sent to the setup wizard, others get 403

use axum::{
	extract::{Path, Request, State},
	http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
	middleware::Next,
	response::{IntoResponse, Response},
};
use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};
use tower_http::set_header::SetResponseHeaderLayer;

use bmf_types::meta_adapter::User;

use crate::ajax::is_ajax;
use crate::context::BmfCtx;
use crate::extract::Ctx;
use crate::perm::PermissionChain;
use crate::prelude::*;
use crate::session::Session;
use crate::workflow::WorkflowState;

pub type PermissionCheckOutput = Pin<Box<dyn Future<Output = Result<Response, Error>> + Send>>;

// Session //
//*********//
pub async fn session_layer(State(app): State<App>, mut req: Request, next: Next) -> ClResult<Response> {
	let cookie = session_cookie(req.headers(), &app.opts.session_cookie).map(ToString::to_string);
	let session = match cookie {
		Some(key) => match app.session_adapter.load_session(&key).await? {
			Some(record) => Session::from_record(key, record),
			None => Session::new(uuid::Uuid::new_v4().simple().to_string(), None),
		},
		None => Session::new(uuid::Uuid::new_v4().simple().to_string(), None),
	};
	let session = Arc::new(session);

	let user = match session.user_id() {
		Some(user_id) => match app.meta_adapter.read_user(user_id).await {
			Ok(user) if user.is_active => Some(Arc::new(user)),
			Ok(_) | Err(Error::NotFound) => {
				debug!(user = %user_id, "Session user is not active");
				None
			}
			Err(err) => return Err(err),
		},
		None => None,
	};

	let headers = req.headers();
	let language = request_language(headers).unwrap_or_else(|| app.default_language().to_string());
	let ctx = BmfCtx::new(app.clone(), session.clone(), user)
		.with_language(language)
		.with_ajax(is_ajax(headers))
		.with_host(headers.get(header::HOST).and_then(|h| h.to_str().ok()));
	req.extensions_mut().insert(Ctx(Arc::new(ctx)));

	let mut res = next.run(req).await;

	if session.is_modified() {
		let expires_at = Timestamp::now().add_seconds(app.opts.session_ttl);
		if let Err(err) = app.session_adapter.save_session(session.key(), &session.to_record(expires_at)).await {
			warn!("Failed to save session: {}", err);
			return Ok(res);
		}
		if session.is_new() {
			let cookie = format!(
				"{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
				app.opts.session_cookie,
				session.key(),
				app.opts.session_ttl
			);
			match HeaderValue::from_str(&cookie) {
				Ok(value) => {
					res.headers_mut().append(header::SET_COOKIE, value);
				}
				Err(err) => warn!("Invalid session cookie: {}", err),
			}
		}
	}

	Ok(res)
}

fn session_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
	headers
		.get_all(header::COOKIE)
		.iter()
		.filter_map(|h| h.to_str().ok())
		.flat_map(|h| h.split(';'))
		.filter_map(|c| c.trim().split_once('='))
		.find(|(k, _)| *k == name)
		.map(|(_, v)| v)
}

/// Primary language of the `Accept-Language` header, e.g. "de-at"
fn request_language(headers: &HeaderMap) -> Option<String> {
	let lang = headers
		.get(header::ACCEPT_LANGUAGE)?
		.to_str()
		.ok()?
		.split(',')
		.next()?
		.split(';')
		.next()?
		.trim();
	if lang.is_empty() || lang == "*" { None } else { Some(lang.to_ascii_lowercase()) }
}

// Permission dispatch //
//*********************//
/// Middleware factory for permission chains without an object
pub fn check_perm(
	chain: Arc<PermissionChain>,
) -> impl Fn(Ctx, Request, Next) -> PermissionCheckOutput + Clone {
	move |ctx, req, next| Box::pin(dispatch(ctx, None, req, next, chain.clone()))
}

/// Middleware factory for permission chains checked against the object
/// addressed by the `pk` path parameter
pub fn check_perm_object(
	chain: Arc<PermissionChain>,
) -> impl Fn(Ctx, Path<HashMap<String, String>>, Request, Next) -> PermissionCheckOutput + Clone {
	move |ctx, path: Path<HashMap<String, String>>, req, next| {
		let Path(params) = path;
		let pk = params.get("pk").map(|pk| pk.parse::<Pk>().map_err(|_| Error::NotFound));
		let chain = chain.clone();
		Box::pin(async move {
			let pk = match pk {
				Some(pk) => Some(pk?),
				None => None,
			};
			dispatch(ctx, pk, req, next, chain).await
		})
	}
}

async fn dispatch(
	Ctx(ctx): Ctx,
	pk: Option<Pk>,
	req: Request,
	next: Next,
	chain: Arc<PermissionChain>,
) -> Result<Response, Error> {
	let Some(user) = ctx.user.clone() else {
		return Ok(login_redirect(&ctx.app.opts.login_url, req.uri()));
	};

	// permission strings first, objects are only looked up for permitted users
	if !user.has_perms(chain.get_permissions()) {
		return Err(permission_denied(&ctx, &chain, &user, None));
	}

	let state = match (pk, chain.model()) {
		(Some(pk), Some(model)) if chain.needs_object() => {
			let module = ctx.app.modules.get(model).ok_or_else(|| {
				Error::Internal(format!("Module {} is not registered", model))
			})?;
			let object = ctx.get_module_object(model, pk).await?;
			Some(module.workflow.current_state(&object)?.clone())
		}
		_ => None,
	};

	if !chain.is_allowed(&user, ctx.is_ajax, state.as_ref()) {
		return Err(permission_denied(&ctx, &chain, &user, state.as_ref()));
	}

	if ctx.app.employee_required() && user.employee.is_none() {
		debug!(user = %user.user_id, "User does not have permission to access djangobmf");
		if user.is_superuser {
			return Ok(redirect(&ctx.app.opts.wizard_url));
		}
		return Err(Error::PermissionDenied);
	}

	Ok(next.run(req).await)
}

fn permission_denied(
	ctx: &BmfCtx,
	chain: &PermissionChain,
	user: &User,
	state: Option<&WorkflowState>,
) -> Error {
	warn!(
		user = %user.user_id,
		model = ?chain.model().map(ToString::to_string),
		permissions = ?chain.get_permissions(),
		is_ajax = ctx.is_ajax,
		state = ?state.map(|s| &s.key),
		"Permission denied"
	);
	Error::PermissionDenied
}

fn redirect(location: &str) -> Response {
	match HeaderValue::from_str(location) {
		Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
		Err(_) => Error::Internal(format!("invalid redirect target '{}'", location)).into_response(),
	}
}

fn login_redirect(login_url: &str, uri: &Uri) -> Response {
	let path = uri.path_and_query().map_or("/", |p| p.as_str());
	let next: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
	redirect(&format!("{}?next={}", login_url, next))
}

// Caching //
//*********//
/// Response headers disabling client and proxy caching
pub fn never_cache() -> SetResponseHeaderLayer<HeaderValue> {
	SetResponseHeaderLayer::overriding(
		header::CACHE_CONTROL,
		HeaderValue::from_static("max-age=0, no-cache, no-store, must-revalidate, private"),
	)
}


// vim: ts=4
