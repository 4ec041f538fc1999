//! Filesystem blob adapter tests

use learnhub::blob_adapter::BlobAdapter;
use learnhub_blob_adapter_fs::BlobAdapterFs;
use tempfile::TempDir;
use tokio_stream::StreamExt;

async fn create_test_adapter() -> (BlobAdapterFs, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = BlobAdapterFs::new(temp_dir.path().into())
		.await
		.expect("Failed to create adapter");
	(adapter, temp_dir)
}

#[tokio::test]
async fn test_create_and_retrieve_blob() {
	let (adapter, _temp) = create_test_adapter().await;
	let key = "tr-1.webp";
	let test_data = b"not really a webp";

	adapter.create_blob_buf(key, test_data).await.expect("Failed to create blob");

	let size = adapter.stat_blob(key).await.expect("Failed to stat blob");
	assert_eq!(size as usize, test_data.len());

	let buf = adapter.read_blob_buf(key).await.expect("Failed to read blob");
	assert_eq!(buf.as_ref(), test_data);
}

#[tokio::test]
async fn test_create_replaces_existing_blob() {
	let (adapter, _temp) = create_test_adapter().await;
	let key = "mo-5.png";

	adapter.create_blob_buf(key, b"first").await.unwrap();
	adapter.create_blob_buf(key, b"second version").await.unwrap();

	let buf = adapter.read_blob_buf(key).await.unwrap();
	assert_eq!(buf.as_ref(), b"second version");
}

#[tokio::test]
async fn test_read_blob_stream() {
	let (adapter, _temp) = create_test_adapter().await;
	let key = "pay-3.jpeg";
	let test_data = b"receipt photo bytes";

	adapter.create_blob_buf(key, test_data).await.unwrap();

	let mut stream = adapter.read_blob_stream(key).await.expect("Failed to open stream");
	let mut collected = Vec::new();
	while let Some(chunk) = stream.next().await {
		collected.extend_from_slice(&chunk.expect("Stream chunk failed"));
	}
	assert_eq!(collected, test_data);
}

#[tokio::test]
async fn test_missing_blob() {
	let (adapter, _temp) = create_test_adapter().await;

	assert!(adapter.stat_blob("tr-999.webp").await.is_none());
	assert!(adapter.read_blob_buf("tr-999.webp").await.is_err());
	assert!(adapter.read_blob_stream("tr-999.webp").await.is_err());
}

#[tokio::test]
async fn test_delete_blob_is_idempotent() {
	let (adapter, _temp) = create_test_adapter().await;
	let key = "sm-2.webp";

	adapter.create_blob_buf(key, b"data").await.unwrap();
	adapter.delete_blob(key).await.expect("Failed to delete blob");
	assert!(adapter.stat_blob(key).await.is_none());

	// Deleting again is fine
	adapter.delete_blob(key).await.expect("Second delete should not fail");
}

#[tokio::test]
async fn test_rejects_bad_keys() {
	let (adapter, _temp) = create_test_adapter().await;

	assert!(adapter.create_blob_buf("../escape.webp", b"x").await.is_err());
	assert!(adapter.read_blob_buf("tr/1.webp").await.is_err());
}

// vim: ts=4
