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
use learnhub_types::meta_adapter::{CreateModule, ListModuleOptions, Module, UpdateModule};
use learnhub_types::pagination::{Page, PageRequest};

/// # POST /api/modules
pub async fn post_module(
	State(app): State<App>,
	_admin: AdminAuth,
	Json(req): Json<CreateModule>,
) -> LhResult<(StatusCode, Json<Module>)> {
	if req.title.trim().is_empty() {
		return Err(Error::Validation("title must not be empty".into()));
	}

	let module_id = app.meta_adapter.create_module(&req).await?;
	let module = app.meta_adapter.read_module(module_id).await?;

	Ok((StatusCode::CREATED, Json(module)))
}

/// # GET /api/modules/{id}
pub async fn get_module(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(module_id): Path<i64>,
) -> LhResult<Json<Module>> {
	let module = app.meta_adapter.read_module(module_id).await?;

	Ok(Json(module))
}

/// # PATCH /api/modules/{id}
pub async fn patch_module(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(module_id): Path<i64>,
	Json(req): Json<UpdateModule>,
) -> LhResult<Json<Module>> {
	if let Patch::Value(title) = &req.title {
		if title.trim().is_empty() {
			return Err(Error::Validation("title must not be empty".into()));
		}
	}

	app.meta_adapter.update_module(module_id, &req).await?;
	let module = app.meta_adapter.read_module(module_id).await?;

	Ok(Json(module))
}

/// # GET /api/modules
pub async fn list_modules(
	State(app): State<App>,
	_admin: AdminAuth,
	Query(opts): Query<ListModuleOptions>,
	Query(page): Query<PageRequest>,
) -> LhResult<Json<Page<Module>>> {
	let spec = app.opts.page.resolve(&page);
	let modules = app.meta_adapter.list_modules(&opts, spec).await?;

	Ok(Json(modules))
}

/// # PUT /api/modules/{id}/thumbnail
pub async fn put_thumbnail(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(module_id): Path<i64>,
	Query(query): Query<UploadQuery>,
	body: Bytes,
) -> LhResult<Json<UploadRes>> {
	app.meta_adapter.read_module(module_id).await?;

	let key = store::store_photo(&app, "mo", module_id, &query.ext, &body).await?;
	let update = UpdateModule { thumbnail: Patch::Value(key.clone()), ..Default::default() };
	app.meta_adapter.update_module(module_id, &update).await?;

	Ok(Json(UploadRes { url: store::store_url(&key), key }))
}

// vim: ts=4
