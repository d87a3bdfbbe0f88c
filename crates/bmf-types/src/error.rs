//! Error type shared by every BMF crate and adapter

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde_json::json;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	Unauthorized,
	DbError,
	Parse,
	ValidationError(String),
	/// Invalid setup detected while building registries or views
	ConfigError(String),
	/// A named route could not be reversed into an URL
	NoReverseMatch(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	fn status(&self) -> StatusCode {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::Unauthorized => StatusCode::UNAUTHORIZED,
			Error::Parse => StatusCode::BAD_REQUEST,
			Error::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
			Error::DbError
			| Error::ConfigError(_)
			| Error::NoReverseMatch(_)
			| Error::Internal(_)
			| Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "E-NOTFOUND",
			Error::PermissionDenied => "E-PERM",
			Error::Unauthorized => "E-AUTH",
			Error::DbError => "E-DB",
			Error::Parse => "E-PARSE",
			Error::ValidationError(_) => "E-VALIDATION",
			Error::ConfigError(_) => "E-CONFIG",
			Error::NoReverseMatch(_) => "E-URL",
			Error::Internal(_) => "E-INTERNAL",
			Error::Io(_) => "E-IO",
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		tracing::warn!("JSON error: {}", err);
		Self::Parse
	}
}

impl From<axum::http::Error> for Error {
	fn from(err: axum::http::Error) -> Self {
		Self::Internal(format!("http error: {}", err))
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "improperly configured: {}", msg),
			Error::NoReverseMatch(msg) => write!(f, "no reverse match: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
			_ => write!(f, "{:?}", self),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status();
		let message = match &self {
			// Internal details stay in the log
			Error::DbError | Error::Internal(_) | Error::Io(_) | Error::ConfigError(_) => {
				tracing::error!("Request failed: {}", self);
				"internal server error".to_string()
			}
			_ => self.to_string(),
		};

		(status, Json(json!({ "error": { "code": self.code(), "message": message } })))
			.into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_mapping() {
		assert_eq!(Error::NotFound.status(), StatusCode::NOT_FOUND);
		assert_eq!(Error::PermissionDenied.status(), StatusCode::FORBIDDEN);
		assert_eq!(
			Error::ConfigError("missing queryset".into()).status(),
			StatusCode::INTERNAL_SERVER_ERROR
		);
	}

	#[test]
	fn test_display() {
		let err = Error::NoReverseMatch("bmf:missing".into());
		assert_eq!(err.to_string(), "no reverse match: bmf:missing");
		assert_eq!(Error::NotFound.to_string(), "NotFound");
	}
}

// vim: ts=4
