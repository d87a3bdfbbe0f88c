//! Common types used throughout the BMF crates.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Primary key of a persisted record
pub type Pk = i64;

// UserId //
//********//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl std::fmt::Display for UserId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(res.as_secs().try_into().unwrap_or(i64::MAX))
	}

	pub fn add_seconds(&self, seconds: i64) -> Timestamp {
		Timestamp(self.0.saturating_add(seconds))
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

// ModelId //
//*********//
/// Identifies a BMF model by its application label and model name
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId {
	pub app_label: Box<str>,
	pub model_name: Box<str>,
}

impl ModelId {
	pub fn new(app_label: impl Into<Box<str>>, model_name: impl Into<Box<str>>) -> Self {
		Self { app_label: app_label.into(), model_name: model_name.into() }
	}
}

impl std::fmt::Display for ModelId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}", self.app_label, self.model_name)
	}
}

// ApiResponse //
//*************//
/// Envelope for JSON API responses
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
	pub data: T,
}

impl<T> ApiResponse<T> {
	pub fn new(data: T) -> Self {
		Self { data }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_model_id_display() {
		let model = ModelId::new("djangobmf_customer", "customer");
		assert_eq!(model.to_string(), "djangobmf_customer.customer");
	}

	#[test]
	fn test_timestamp_add_seconds() {
		assert_eq!(Timestamp(100).add_seconds(600), Timestamp(700));
		assert!(Timestamp::now().0 > 0);
	}

	#[test]
	fn test_api_response_envelope() {
		let res = ApiResponse::new(vec![1, 2]);
		let json = serde_json::to_value(&res).unwrap_or_default();
		assert_eq!(json, serde_json::json!({ "data": [1, 2] }));
	}
}

// vim: ts=4
