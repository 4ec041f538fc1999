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
use learnhub_types::meta_adapter::{
	CreateSubmodule, ListSubmoduleOptions, Submodule, UpdateSubmodule,
};
use learnhub_types::pagination::{Page, PageRequest};

/// # POST /api/submodules
pub async fn post_submodule(
	State(app): State<App>,
	_admin: AdminAuth,
	Json(req): Json<CreateSubmodule>,
) -> LhResult<(StatusCode, Json<Submodule>)> {
	if req.title.trim().is_empty() {
		return Err(Error::Validation("title must not be empty".into()));
	}

	let submodule_id = app.meta_adapter.create_submodule(&req).await?;
	let submodule = app.meta_adapter.read_submodule(submodule_id).await?;

	Ok((StatusCode::CREATED, Json(submodule)))
}

/// # GET /api/submodules/{id}
pub async fn get_submodule(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(submodule_id): Path<i64>,
) -> LhResult<Json<Submodule>> {
	let submodule = app.meta_adapter.read_submodule(submodule_id).await?;

	Ok(Json(submodule))
}

/// # PATCH /api/submodules/{id}
pub async fn patch_submodule(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(submodule_id): Path<i64>,
	Json(req): Json<UpdateSubmodule>,
) -> LhResult<Json<Submodule>> {
	if let Patch::Value(title) = &req.title {
		if title.trim().is_empty() {
			return Err(Error::Validation("title must not be empty".into()));
		}
	}

	app.meta_adapter.update_submodule(submodule_id, &req).await?;
	let submodule = app.meta_adapter.read_submodule(submodule_id).await?;

	Ok(Json(submodule))
}

/// # GET /api/submodules
pub async fn list_submodules(
	State(app): State<App>,
	_admin: AdminAuth,
	Query(opts): Query<ListSubmoduleOptions>,
	Query(page): Query<PageRequest>,
) -> LhResult<Json<Page<Submodule>>> {
	let spec = app.opts.page.resolve(&page);
	let submodules = app.meta_adapter.list_submodules(&opts, spec).await?;

	Ok(Json(submodules))
}

/// # PUT /api/submodules/{id}/thumbnail
pub async fn put_thumbnail(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(submodule_id): Path<i64>,
	Query(query): Query<UploadQuery>,
	body: Bytes,
) -> LhResult<Json<UploadRes>> {
	app.meta_adapter.read_submodule(submodule_id).await?;

	let key = store::store_photo(&app, "sm", submodule_id, &query.ext, &body).await?;
	let update = UpdateSubmodule { thumbnail: Patch::Value(key.clone()), ..Default::default() };
	app.meta_adapter.update_submodule(submodule_id, &update).await?;

	Ok(Json(UploadRes { url: store::store_url(&key), key }))
}

// vim: ts=4
