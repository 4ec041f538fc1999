pub mod handler;

use crate::prelude::*;
use learnhub_types::blob_adapter::photo_key;

/// Stores an uploaded photo and returns its key (e.g. `tr-42.webp`).
pub async fn store_photo(
	app: &App,
	kind: &str,
	id: i64,
	ext: &str,
	data: &[u8],
) -> LhResult<Box<str>> {
	if data.is_empty() {
		return Err(Error::Validation("empty upload".into()));
	}
	let key = photo_key(kind, id, ext)?;
	app.blob_adapter.create_blob_buf(&key, data).await?;

	Ok(key)
}

/// URL a stored key is served under.
pub fn store_url(key: &str) -> Box<str> {
	format!("/api/store/{}", key).into()
}

// vim: ts=4
