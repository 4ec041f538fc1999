use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{
	fs::{create_dir_all, metadata, remove_file, File},
	io::{AsyncReadExt, AsyncWriteExt},
};
use tokio_util::io::ReaderStream;

use learnhub::blob_adapter::{self, BlobStream};
use learnhub::prelude::*;

/// Blobs are sharded by their kind prefix: `tr-42.webp` lives in
/// `<base_dir>/tr/tr-42.webp`.
fn blob_path(base_dir: &Path, key: &str) -> LhResult<PathBuf> {
	if key.is_empty()
		|| !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
		|| key.contains("..")
	{
		return Err(Error::Parse);
	}
	let kind = key.split('-').next().ok_or(Error::Parse)?;
	if kind.is_empty() || kind == key {
		return Err(Error::Parse);
	}

	Ok(PathBuf::from(base_dir).join(kind).join(key))
}

#[derive(Debug)]
pub struct BlobAdapterFs {
	base_dir: Box<Path>,
}

impl BlobAdapterFs {
	pub async fn new(base_dir: Box<Path>) -> LhResult<Self> {
		create_dir_all(&base_dir).await?;
		Ok(Self { base_dir })
	}
}

#[async_trait]
impl blob_adapter::BlobAdapter for BlobAdapterFs {
	async fn create_blob_buf(&self, key: &str, data: &[u8]) -> LhResult<()> {
		let path = blob_path(&self.base_dir, key)?;
		debug!("create_blob_buf: {:?}", path);
		if let Some(dir) = path.parent() {
			create_dir_all(dir).await?;
		}

		let mut file = File::create(&path).await?;
		file.write_all(data).await?;
		file.sync_all().await?;

		Ok(())
	}

	async fn stat_blob(&self, key: &str) -> Option<u64> {
		let path = blob_path(&self.base_dir, key).ok()?;
		let file_metadata = metadata(&path).await.ok()?;
		Some(file_metadata.len())
	}

	async fn read_blob_buf(&self, key: &str) -> LhResult<Box<[u8]>> {
		let path = blob_path(&self.base_dir, key)?;
		let mut file = File::open(&path).await.map_err(|_| Error::NotFound)?;
		let mut buf: Vec<u8> = Vec::new();
		file.read_to_end(&mut buf).await?;

		Ok(buf.into_boxed_slice())
	}

	async fn read_blob_stream(&self, key: &str) -> LhResult<BlobStream> {
		let path = blob_path(&self.base_dir, key)?;
		let file = File::open(&path).await.map_err(|_| Error::NotFound)?;
		let stream = ReaderStream::new(file);

		Ok(Box::pin(stream))
	}

	async fn delete_blob(&self, key: &str) -> LhResult<()> {
		let path = blob_path(&self.base_dir, key)?;
		match remove_file(&path).await {
			Ok(()) => Ok(()),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(err) => Err(err.into()),
		}
	}
}

#[cfg(test)]
mod test {
	use std::path::{Path, PathBuf};

	use crate::blob_path;

	#[test]
	fn test_blob_path_sharding() {
		let path = blob_path(Path::new("data"), "tr-42.webp").unwrap_or_default();
		assert_eq!(path, PathBuf::from("data/tr/tr-42.webp"));
		let path = blob_path(Path::new("data"), "pay-7.jpeg").unwrap_or_default();
		assert_eq!(path, PathBuf::from("data/pay/pay-7.jpeg"));
	}

	#[test]
	fn test_blob_path_rejects_traversal() {
		assert!(blob_path(Path::new("data"), "../etc/passwd").is_err());
		assert!(blob_path(Path::new("data"), "tr-..").is_err());
		assert!(blob_path(Path::new("data"), "tr/42.webp").is_err());
		assert!(blob_path(Path::new("data"), "").is_err());
		assert!(blob_path(Path::new("data"), "nodash.webp").is_err());
	}
}

// vim: ts=4
