//! Blob adapter streaming tests

use bmf_blob_adapter_fs::BlobAdapterFs;
use bmf_types::blob_adapter::{BlobAdapter, BlobStream};
use futures_core::Stream;
use std::future::poll_fn;
use tempfile::TempDir;

async fn create_test_adapter() -> (BlobAdapterFs, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = BlobAdapterFs::new(temp_dir.path().into(), "/media")
		.await
		.expect("Failed to create adapter");
	(adapter, temp_dir)
}

async fn collect(mut stream: BlobStream) -> Vec<u8> {
	let mut data = Vec::new();
	while let Some(chunk) = poll_fn(|cx| stream.as_mut().poll_next(cx)).await {
		data.extend_from_slice(&chunk.expect("Failed to read chunk"));
	}
	data
}

#[tokio::test]
async fn test_read_blob_as_stream() {
	let (adapter, _temp) = create_test_adapter().await;
	let test_data = b"Data to read as stream";

	adapter.create_blob_buf("stream.txt", test_data).await.expect("Failed to create blob");

	let stream = adapter.read_blob_stream("stream.txt").await.expect("Failed to read blob stream");
	assert_eq!(collect(stream).await, test_data);
}

#[tokio::test]
async fn test_read_large_blob_as_stream() {
	let (adapter, _temp) = create_test_adapter().await;
	let test_data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();

	adapter.create_blob_buf("large.bin", &test_data).await.expect("Failed to create blob");

	let stream = adapter.read_blob_stream("large.bin").await.expect("Failed to read blob stream");
	assert_eq!(collect(stream).await, test_data);
}
