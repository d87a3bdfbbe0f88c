//! Adapter for the process-wide key-value cache.
//!
//! Cache entries are advisory: a missing or expired entry is never an error,
//! callers recompute the value and store it again.

use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

#[async_trait]
pub trait CacheAdapter: Debug + Send + Sync {
	/// Returns the value stored under `key` if it exists and has not expired
	async fn get(&self, key: &str) -> Option<serde_json::Value>;

	/// Stores a value that expires after `timeout`
	async fn set(&self, key: &str, value: serde_json::Value, timeout: Duration);

	async fn delete(&self, key: &str);
}

// vim: ts=4
