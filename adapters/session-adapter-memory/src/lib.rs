//! In-memory session store
//!
//! Sessions are kept in a map guarded by a read-write lock. Expired records
//! are dropped when they are loaded, and swept from the whole map every
//! `PURGE_INTERVAL` saves.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use bmf_types::prelude::*;
use bmf_types::session_adapter::{SessionAdapter, SessionRecord};

/// Number of saves between two sweeps of expired sessions
pub const PURGE_INTERVAL: usize = 64;

#[derive(Debug, Default)]
pub struct SessionAdapterMemory {
	sessions: RwLock<HashMap<Box<str>, SessionRecord>>,
	saves: AtomicUsize,
}

impl SessionAdapterMemory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Removes every expired session, returns the number of removed records
	pub fn purge_expired(&self) -> usize {
		let now = Timestamp::now();
		let mut sessions = self.sessions.write();
		let before = sessions.len();
		sessions.retain(|_, record| record.expires_at > now);
		before - sessions.len()
	}
}

#[async_trait]
impl SessionAdapter for SessionAdapterMemory {
	async fn load_session(&self, session_key: &str) -> ClResult<Option<SessionRecord>> {
		let now = Timestamp::now();
		{
			let sessions = self.sessions.read();
			match sessions.get(session_key) {
				Some(record) if record.expires_at > now => return Ok(Some(record.clone())),
				Some(_) => {}
				None => return Ok(None),
			}
		}

		debug!("Session expired: {}", session_key);
		self.sessions.write().remove(session_key);
		Ok(None)
	}

	async fn save_session(&self, session_key: &str, record: &SessionRecord) -> ClResult<()> {
		self.sessions.write().insert(session_key.into(), record.clone());

		if self.saves.fetch_add(1, Ordering::Relaxed) % PURGE_INTERVAL == PURGE_INTERVAL - 1 {
			let purged = self.purge_expired();
			if purged > 0 {
				debug!("Purged {} expired sessions", purged);
			}
		}
		Ok(())
	}

	async fn delete_session(&self, session_key: &str) -> ClResult<()> {
		self.sessions.write().remove(session_key);
		Ok(())
	}
}

// vim: ts=4
