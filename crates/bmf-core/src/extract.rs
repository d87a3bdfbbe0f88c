//! Custom extractors for BMF-specific data

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;

use crate::context::BmfCtx;
use crate::prelude::*;

// Ctx //
//*****//
/// Per-request context inserted by the session middleware
#[derive(Debug, Clone)]
pub struct Ctx(pub Arc<BmfCtx>);

impl<S> FromRequestParts<S> for Ctx
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(ctx) = parts.extensions.get::<Ctx>().cloned() {
			Ok(ctx)
		} else {
			error!("BMF context missing, is the session layer installed?");
			Err(Error::Internal("missing request context".into()))
		}
	}
}

impl std::ops::Deref for Ctx {
	type Target = BmfCtx;

	fn deref(&self) -> &BmfCtx {
		&self.0
	}
}

// vim: ts=4
