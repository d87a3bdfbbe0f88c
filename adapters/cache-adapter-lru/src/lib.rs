//! In-memory cache adapter
//!
//! Entries live in an LRU cache with a fixed capacity. Every entry carries
//! its own deadline and is dropped when read after it.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use std::{
	num::NonZeroUsize,
	time::{Duration, Instant},
};

use bmf_types::cache_adapter::CacheAdapter;
use bmf_types::prelude::*;

const DEFAULT_CACHE_CAPACITY: usize = 1000;

#[derive(Debug)]
struct CacheEntry {
	value: serde_json::Value,
	expires_at: Instant,
}

#[derive(Debug)]
pub struct CacheAdapterLru {
	entries: Mutex<LruCache<String, CacheEntry>>,
}

impl CacheAdapterLru {
	pub fn new(max_entries: usize) -> Self {
		let capacity = NonZeroUsize::new(max_entries.max(1)).unwrap_or(NonZeroUsize::MIN);
		Self { entries: Mutex::new(LruCache::new(capacity)) }
	}

	pub fn len(&self) -> usize {
		self.entries.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}
}

impl Default for CacheAdapterLru {
	fn default() -> Self {
		Self::new(DEFAULT_CACHE_CAPACITY)
	}
}

#[async_trait]
impl CacheAdapter for CacheAdapterLru {
	async fn get(&self, key: &str) -> Option<serde_json::Value> {
		let mut entries = self.entries.lock();
		let expired = match entries.get(key) {
			Some(entry) if entry.expires_at > Instant::now() => return Some(entry.value.clone()),
			Some(_) => true,
			None => false,
		};
		if expired {
			debug!("Cache entry expired: {}", key);
			entries.pop(key);
		}
		None
	}

	async fn set(&self, key: &str, value: serde_json::Value, timeout: Duration) {
		let expires_at = Instant::now() + timeout;
		self.entries.lock().put(key.to_string(), CacheEntry { value, expires_at });
	}

	async fn delete(&self, key: &str) {
		self.entries.lock().pop(key);
	}
}

// vim: ts=4
