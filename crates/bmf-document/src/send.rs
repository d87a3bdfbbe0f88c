//! Download strategies
//!
//! Behind nginx or a server with mod_xsendfile the file is not sent by the
//! application: the response only carries the header naming the file and the
//! proxy sends it. The proxy strategies are never used in debug mode.

use axum::{
	body::Body,
	http::{HeaderValue, header},
	response::Response,
};
use std::{path::Path, str::FromStr};

use bmf_types::meta_adapter::Document;

use crate::prelude::*;
use crate::settings::SENDTYPE;

pub const X_ACCEL_REDIRECT: &str = "X-Accel-Redirect";
pub const X_SENDFILE: &str = "X-Sendfile";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendType {
	XAccel,
	XSendfile,
	Direct,
}

impl FromStr for SendType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"xaccel" => Ok(SendType::XAccel),
			"xsendfile" => Ok(SendType::XSendfile),
			"direct" => Ok(SendType::Direct),
			_ => Err(Error::ValidationError(format!("unknown send type '{}'", s))),
		}
	}
}

impl SendType {
	/// Send type in effect for the app
	pub fn effective(app: &App) -> SendType {
		if app.opts.debug {
			return SendType::Direct;
		}
		app.settings.get_str(SENDTYPE).ok().and_then(|s| s.parse().ok()).unwrap_or(SendType::Direct)
	}
}

fn attachment(doc: &Document) -> String {
	let name = Path::new(&*doc.file).file_name().and_then(|n| n.to_str()).unwrap_or(&doc.file);
	format!("attachment; filename={}", name)
}

/// Builds the download response of a document whose file exists and has `size` bytes
pub async fn download_response(app: &App, doc: &Document, size: u64) -> ClResult<Response> {
	let blob = &app.blob_adapter;
	let send_type = SendType::effective(app);
	debug!(document = doc.pk, ?send_type, "Sending document");

	let builder = Response::builder().header(header::CONTENT_DISPOSITION, attachment(doc));
	let response = match send_type {
		SendType::XAccel => builder
			.header(header::CONTENT_TYPE, HeaderValue::from_static("application/force-download"))
			.header(X_ACCEL_REDIRECT, blob.blob_url(&doc.file)?)
			.body(Body::empty())?,
		SendType::XSendfile => builder
			.header(header::CONTENT_TYPE, HeaderValue::from_static("application/force-download"))
			.header(X_SENDFILE, blob.blob_path(&doc.file)?.to_string_lossy().into_owned())
			.body(Body::empty())?,
		SendType::Direct => {
			let stream = blob.read_blob_stream(&doc.file).await?;
			builder
				.header(header::CONTENT_TYPE, &*doc.mimetype)
				.header(header::CONTENT_LENGTH, size)
				.body(Body::from_stream(stream))?
		}
	};
	Ok(response)
}


// vim: ts=4
