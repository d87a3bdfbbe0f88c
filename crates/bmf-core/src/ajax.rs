//! Ajax response envelope
//!
//! Ajax views answer with a JSON envelope instead of a page:
//! `{object_pk, status, html, message, redirect}`. The status is `ok` for
//! rendered HTML, `valid` for accepted forms and `error` for rejected ones.

use axum::{
	Json,
	http::HeaderMap,
	response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::prelude::*;

pub const AJAX_HEADER: &str = "x-requested-with";

pub fn is_ajax(headers: &HeaderMap) -> bool {
	headers.get(AJAX_HEADER).and_then(|h| h.to_str().ok()) == Some("XMLHttpRequest")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AjaxStatus {
	#[default]
	Ok,
	Valid,
	Error,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AjaxEnvelope {
	pub object_pk: Pk,
	pub status: AjaxStatus,
	pub html: String,
	pub message: String,
	pub redirect: String,
	/// Additional context merged into the envelope
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl AjaxEnvelope {
	/// Envelope carrying rendered HTML
	pub fn html(html: impl Into<String>) -> Self {
		Self { html: html.into(), ..Self::default() }
	}

	/// Envelope of an accepted form
	pub fn valid(redirect: impl Into<String>) -> Self {
		Self { status: AjaxStatus::Valid, redirect: redirect.into(), ..Self::default() }
	}

	/// Envelope of a rejected form
	pub fn error(message: impl Into<String>) -> Self {
		Self { status: AjaxStatus::Error, message: message.into(), ..Self::default() }
	}

	pub fn object_pk(mut self, pk: Pk) -> Self {
		self.object_pk = pk;
		self
	}

	/// Merges context entries. Entries named like an envelope field are ignored.
	pub fn merge(mut self, context: Map<String, Value>) -> Self {
		const FIELDS: [&str; 5] = ["object_pk", "status", "html", "message", "redirect"];
		for (key, value) in context {
			if !FIELDS.contains(&key.as_str()) {
				self.extra.insert(key, value);
			}
		}
		self
	}
}

impl IntoResponse for AjaxEnvelope {
	fn into_response(self) -> Response {
		render_to_json_response(&self)
	}
}

/// Serializes a context as `application/json` response
pub fn render_to_json_response<T: Serialize>(context: &T) -> Response {
	Json(context).into_response()
}

/// Wraps rendered HTML into the envelope
pub fn render_to_response(html: impl Into<String>) -> AjaxEnvelope {
	AjaxEnvelope::html(html)
}

/// Envelope of a valid form: status `valid`, the given context and the
/// redirect target
pub fn render_valid_form(context: Map<String, Value>, redirect: impl Into<String>) -> AjaxEnvelope {
	AjaxEnvelope::valid(redirect).merge(context)
}


// vim: ts=4
