use axum::{
	body::Bytes,
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};
use serde::{Deserialize, Serialize};

use crate::core::{AdminAuth, Auth};
use crate::prelude::*;
use crate::store;
use learnhub_types::meta_adapter::{
	CreateTraining, ListTrainingOptions, Training, UpdateTraining,
};
use learnhub_types::pagination::{Page, PageRequest};

/// # POST /api/trainings
pub async fn post_training(
	State(app): State<App>,
	_admin: AdminAuth,
	Json(req): Json<CreateTraining>,
) -> LhResult<(StatusCode, Json<Training>)> {
	if req.title.trim().is_empty() {
		return Err(Error::Validation("title must not be empty".into()));
	}

	let training_id = app.meta_adapter.create_training(&req).await?;
	let training = app.meta_adapter.read_training(training_id).await?;

	Ok((StatusCode::CREATED, Json(training)))
}

/// # GET /api/trainings/{id}
pub async fn get_training(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(training_id): Path<i64>,
) -> LhResult<Json<Training>> {
	let training = app.meta_adapter.read_training(training_id).await?;

	Ok(Json(training))
}

/// # PATCH /api/trainings/{id}
pub async fn patch_training(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(training_id): Path<i64>,
	Json(req): Json<UpdateTraining>,
) -> LhResult<Json<Training>> {
	if let Patch::Value(title) = &req.title {
		if title.trim().is_empty() {
			return Err(Error::Validation("title must not be empty".into()));
		}
	}

	app.meta_adapter.update_training(training_id, &req).await?;
	let training = app.meta_adapter.read_training(training_id).await?;

	Ok(Json(training))
}

/// # GET /api/trainings
pub async fn list_trainings(
	State(app): State<App>,
	_admin: AdminAuth,
	Query(opts): Query<ListTrainingOptions>,
	Query(page): Query<PageRequest>,
) -> LhResult<Json<Page<Training>>> {
	let spec = app.opts.page.resolve(&page);
	let trainings = app.meta_adapter.list_trainings(&opts, spec).await?;

	Ok(Json(trainings))
}

/// # GET /api/my/trainings
pub async fn list_my_trainings(
	State(app): State<App>,
	Auth(ctx): Auth,
	Query(page): Query<PageRequest>,
) -> LhResult<Json<Page<Training>>> {
	let spec = app.opts.page.resolve(&page);
	let trainings = app.meta_adapter.list_trainings_for_user(ctx.user_id, spec).await?;

	Ok(Json(trainings))
}

// Thumbnail upload //
//******************//
#[derive(Deserialize)]
pub struct UploadQuery {
	pub ext: Box<str>,
}

#[derive(Serialize)]
pub struct UploadRes {
	#[serde(rename = "thumbnailKey")]
	pub key: Box<str>,
	#[serde(rename = "thumbnailUrl")]
	pub url: Box<str>,
}

/// # PUT /api/trainings/{id}/thumbnail
pub async fn put_thumbnail(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(training_id): Path<i64>,
	Query(query): Query<UploadQuery>,
	body: Bytes,
) -> LhResult<Json<UploadRes>> {
	app.meta_adapter.read_training(training_id).await?;

	let key = store::store_photo(&app, "tr", training_id, &query.ext, &body).await?;
	let update =
		UpdateTraining { thumbnail: Patch::Value(key.clone()), ..Default::default() };
	app.meta_adapter.update_training(training_id, &update).await?;

	Ok(Json(UploadRes { url: store::store_url(&key), key }))
}

// vim: ts=4
