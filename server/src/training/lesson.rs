use axum::{
	body::Bytes,
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};

use crate::core::AdminAuth;
use crate::prelude::*;
use crate::store;
use crate::training::handler::{UploadQuery, UploadRes};
use learnhub_types::meta_adapter::{CreateLesson, Lesson, ListLessonOptions, UpdateLesson};
use learnhub_types::pagination::{Page, PageRequest};

/// # POST /api/lessons
pub async fn post_lesson(
	State(app): State<App>,
	_admin: AdminAuth,
	Json(req): Json<CreateLesson>,
) -> LhResult<(StatusCode, Json<Lesson>)> {
	if req.title.trim().is_empty() {
		return Err(Error::Validation("title must not be empty".into()));
	}

	let lesson_id = app.meta_adapter.create_lesson(&req).await?;
	let lesson = app.meta_adapter.read_lesson(lesson_id).await?;

	Ok((StatusCode::CREATED, Json(lesson)))
}

/// # GET /api/lessons/{id}
pub async fn get_lesson(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(lesson_id): Path<i64>,
) -> LhResult<Json<Lesson>> {
	let lesson = app.meta_adapter.read_lesson(lesson_id).await?;

	Ok(Json(lesson))
}

/// # PATCH /api/lessons/{id}
pub async fn patch_lesson(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(lesson_id): Path<i64>,
	Json(req): Json<UpdateLesson>,
) -> LhResult<Json<Lesson>> {
	if let Patch::Value(title) = &req.title {
		if title.trim().is_empty() {
			return Err(Error::Validation("title must not be empty".into()));
		}
	}

	app.meta_adapter.update_lesson(lesson_id, &req).await?;
	let lesson = app.meta_adapter.read_lesson(lesson_id).await?;

	Ok(Json(lesson))
}

/// # GET /api/lessons
pub async fn list_lessons(
	State(app): State<App>,
	_admin: AdminAuth,
	Query(opts): Query<ListLessonOptions>,
	Query(page): Query<PageRequest>,
) -> LhResult<Json<Page<Lesson>>> {
	let spec = app.opts.page.resolve(&page);
	let lessons = app.meta_adapter.list_lessons(&opts, spec).await?;

	Ok(Json(lessons))
}

/// # PUT /api/lessons/{id}/thumbnail
pub async fn put_thumbnail(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(lesson_id): Path<i64>,
	Query(query): Query<UploadQuery>,
	body: Bytes,
) -> LhResult<Json<UploadRes>> {
	app.meta_adapter.read_lesson(lesson_id).await?;

	let key = store::store_photo(&app, "le", lesson_id, &query.ext, &body).await?;
	let update = UpdateLesson { thumbnail: Patch::Value(key.clone()), ..Default::default() };
	app.meta_adapter.update_lesson(lesson_id, &update).await?;

	Ok(Json(UploadRes { url: store::store_url(&key), key }))
}

// vim: ts=4
