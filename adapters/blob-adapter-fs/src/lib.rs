//! Filesystem storage of document files
//!
//! Files are addressed by their storage name, a relative path below the base
//! directory (e.g. `documents/2015/offer.pdf`). The same name appended to the
//! base URL is the public URL a reverse proxy serves the file from.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::{
	fs::{File, create_dir_all, metadata},
	io::AsyncWriteExt,
};
use tokio_util::io::ReaderStream;

use bmf_types::{blob_adapter, prelude::*};

/// Resolves a storage name below `base_dir`. Absolute names and names
/// leaving the base directory are rejected.
fn obj_file_path(base_dir: &Path, name: &str) -> ClResult<PathBuf> {
	let rel = Path::new(name);
	if name.is_empty() || !rel.components().all(|c| matches!(c, Component::Normal(_))) {
		warn!("Invalid storage name: {:?}", name);
		return Err(Error::Parse);
	}
	Ok(base_dir.join(rel))
}

#[derive(Debug)]
pub struct BlobAdapterFs {
	base_dir: Box<Path>,
	base_url: Box<str>,
}

impl BlobAdapterFs {
	pub async fn new(base_dir: Box<Path>, base_url: impl Into<Box<str>>) -> Result<Self, Error> {
		create_dir_all(&base_dir).await?;
		let base_url = base_url.into();
		let base_url = if base_url.ends_with('/') { base_url } else { format!("{}/", base_url).into() };
		Ok(Self { base_dir, base_url })
	}
}

#[async_trait]
impl blob_adapter::BlobAdapter for BlobAdapterFs {
	fn blob_path(&self, name: &str) -> ClResult<PathBuf> {
		obj_file_path(&self.base_dir, name)
	}

	fn blob_url(&self, name: &str) -> ClResult<String> {
		obj_file_path(&self.base_dir, name)?;
		Ok(format!("{}{}", self.base_url, name))
	}

	/// Checks if a file exists, returns its size
	async fn stat_blob(&self, name: &str) -> Option<u64> {
		let path = obj_file_path(&self.base_dir, name).ok()?;
		let file_metadata = metadata(&path).await.ok()?;
		file_metadata.is_file().then(|| file_metadata.len())
	}

	/// Creates a file from a buffer
	async fn create_blob_buf(&self, name: &str, data: &[u8]) -> ClResult<()> {
		let path = obj_file_path(&self.base_dir, name)?;
		debug!("create_blob_buf: {:?}", path);
		if let Some(dir) = path.parent() {
			create_dir_all(dir).await?;
		}

		let mut file = File::create(&path).await?;
		file.write_all(data).await?;
		file.sync_all().await?;

		Ok(())
	}

	/// Opens a file as a byte stream
	async fn read_blob_stream(&self, name: &str) -> ClResult<blob_adapter::BlobStream> {
		let path = obj_file_path(&self.base_dir, name)?;
		let file = File::open(&path).await.map_err(|_| Error::NotFound)?;
		let stream = ReaderStream::new(file);

		Ok(Box::pin(stream))
	}
}

#[cfg(test)]
mod test {
	use std::path::{Path, PathBuf};

	use crate::obj_file_path;

	#[test]
	fn test_obj_file_path() {
		let path = obj_file_path(Path::new("media"), "documents/offer.pdf").unwrap_or_default();
		assert_eq!(path, PathBuf::from("media/documents/offer.pdf"));
	}

	#[test]
	fn test_obj_file_path_rejects_escapes() {
		assert!(obj_file_path(Path::new("media"), "../secret").is_err());
		assert!(obj_file_path(Path::new("media"), "documents/../../secret").is_err());
		assert!(obj_file_path(Path::new("media"), "/etc/passwd").is_err());
		assert!(obj_file_path(Path::new("media"), "").is_err());
	}
}

// vim: ts=4
