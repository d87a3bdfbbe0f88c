//! Adapter that persists session records between requests.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::types::{Timestamp, UserId};

/// Session data as stored by a session adapter
#[derive(Debug, Clone, Default)]
pub struct SessionRecord {
	pub user_id: Option<UserId>,
	pub data: serde_json::Map<String, serde_json::Value>,
	pub expires_at: Timestamp,
}

#[async_trait]
pub trait SessionAdapter: Debug + Send + Sync {
	/// Loads a session. Expired sessions are reported as missing.
	async fn load_session(&self, session_key: &str) -> ClResult<Option<SessionRecord>>;

	/// Stores a session, replacing any previous record under the same key
	async fn save_session(&self, session_key: &str, record: &SessionRecord) -> ClResult<()>;

	async fn delete_session(&self, session_key: &str) -> ClResult<()>;
}

// vim: ts=4
