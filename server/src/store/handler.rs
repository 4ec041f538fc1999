use axum::{
	body::Body,
	extract::{Path, State},
	response,
};

use crate::prelude::*;
use learnhub_types::blob_adapter::content_type_from_key;

/// # GET /api/store/{key}
///
/// Streams a stored photo with its content type.
pub async fn get_blob(
	State(app): State<App>,
	Path(key): Path<Box<str>>,
) -> LhResult<response::Response<Body>> {
	let size = app.blob_adapter.stat_blob(&key).await.ok_or(Error::NotFound)?;
	let stream = app.blob_adapter.read_blob_stream(&key).await?;

	let response = response::Response::builder()
		.header(axum::http::header::CONTENT_TYPE, content_type_from_key(&key))
		.header(axum::http::header::CONTENT_LENGTH, size);

	Ok(response.body(Body::from_stream(stream))?)
}

// vim: ts=4
