//! Adapter for the file storage holding document contents.

use async_trait::async_trait;
use futures_core::Stream;
use std::{fmt::Debug, path::PathBuf, pin::Pin};

use crate::prelude::*;

pub type BlobStream = Pin<Box<dyn Stream<Item = Result<axum::body::Bytes, std::io::Error>> + Send>>;

#[async_trait]
pub trait BlobAdapter: Debug + Send + Sync {
	/// Absolute path of a stored file on the local filesystem
	fn blob_path(&self, name: &str) -> ClResult<PathBuf>;

	/// Public URL of a stored file (used for reverse-proxy redirects)
	fn blob_url(&self, name: &str) -> ClResult<String>;

	/// Checks if a file exists, returns its size
	async fn stat_blob(&self, name: &str) -> Option<u64>;

	/// Creates a file from a buffer
	async fn create_blob_buf(&self, name: &str, data: &[u8]) -> ClResult<()>;

	/// Opens a file as a byte stream
	async fn read_blob_stream(&self, name: &str) -> ClResult<BlobStream>;
}

// vim: ts=4
