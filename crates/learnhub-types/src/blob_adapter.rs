//! Adapter that stores uploaded binary objects (thumbnails, receipt photos).

use async_trait::async_trait;
use axum::body::Bytes;
use futures_core::Stream;
use std::{fmt::Debug, pin::Pin};

use crate::prelude::*;

pub type BlobStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Builds the storage key of an uploaded photo, e.g. `tr-42.webp`.
/// The kind prefix groups keys by owning entity (`tr`, `mo`, `sm`, `le`,
/// `pay`, `ref`).
pub fn photo_key(kind: &str, id: i64, ext: &str) -> LhResult<Box<str>> {
	if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
		return Err(Error::Validation("invalid file extension".into()));
	}
	Ok(format!("{}-{}.{}", kind, id, ext.to_ascii_lowercase()).into())
}

pub fn content_type_from_key(key: &str) -> &'static str {
	match key.rsplit('.').next() {
		Some("jpg") | Some("jpeg") => "image/jpeg",
		Some("png") => "image/png",
		Some("webp") => "image/webp",
		Some("avif") => "image/avif",
		Some("pdf") => "application/pdf",
		_ => "application/octet-stream",
	}
}

#[async_trait]
pub trait BlobAdapter: Debug + Send + Sync {
	/// Creates (or replaces) a blob from a buffer
	async fn create_blob_buf(&self, key: &str, data: &[u8]) -> LhResult<()>;

	/// Checks if a blob exists, returns its size
	async fn stat_blob(&self, key: &str) -> Option<u64>;

	/// Reads a blob into memory
	async fn read_blob_buf(&self, key: &str) -> LhResult<Box<[u8]>>;

	/// Reads a blob as a stream
	async fn read_blob_stream(&self, key: &str) -> LhResult<BlobStream>;

	/// Removes a blob; removing a missing blob is not an error
	async fn delete_blob(&self, key: &str) -> LhResult<()>;
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn photo_key_format() {
		assert_eq!(photo_key("tr", 42, "WEBP").unwrap().as_ref(), "tr-42.webp");
		assert_eq!(photo_key("pay", 7, "jpeg").unwrap().as_ref(), "pay-7.jpeg");
	}

	#[test]
	fn photo_key_rejects_path_tricks() {
		assert!(photo_key("tr", 1, "").is_err());
		assert!(photo_key("tr", 1, "../x").is_err());
		assert!(photo_key("tr", 1, "png/..").is_err());
	}

	#[test]
	fn content_types() {
		assert_eq!(content_type_from_key("tr-42.webp"), "image/webp");
		assert_eq!(content_type_from_key("pay-7.bin"), "application/octet-stream");
	}
}

// vim: ts=4
