//! Permission routes for hierarchy nodes. The heavy lifting (cascade
//! planning and the transactional apply) happens in the meta adapter.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use serde::Serialize;

use crate::core::AdminAuth;
use crate::prelude::*;
use learnhub_types::meta_adapter::{PermLevel, PermissionChange};

#[derive(Serialize)]
pub struct PermissionsRes {
	pub users: Vec<UserId>,
}

async fn update(
	app: &App,
	level: PermLevel,
	node_id: i64,
	change: PermissionChange,
) -> LhResult<StatusCode> {
	if change.added_users.is_empty() && change.removed_users.is_empty() {
		return Err(Error::Validation("no users given".into()));
	}

	app.meta_adapter.update_permissions(level, node_id, &change).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn list(app: &App, level: PermLevel, node_id: i64) -> LhResult<Json<PermissionsRes>> {
	let users = app.meta_adapter.list_permissions(level, node_id).await?;

	Ok(Json(PermissionsRes { users }))
}

/// # POST /api/trainings/{id}/permissions
pub async fn post_training_permissions(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(training_id): Path<i64>,
	Json(change): Json<PermissionChange>,
) -> LhResult<StatusCode> {
	update(&app, PermLevel::Training, training_id, change).await
}

/// # GET /api/trainings/{id}/permissions
pub async fn get_training_permissions(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(training_id): Path<i64>,
) -> LhResult<Json<PermissionsRes>> {
	list(&app, PermLevel::Training, training_id).await
}

/// # POST /api/modules/{id}/permissions
pub async fn post_module_permissions(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(module_id): Path<i64>,
	Json(change): Json<PermissionChange>,
) -> LhResult<StatusCode> {
	update(&app, PermLevel::Module, module_id, change).await
}

/// # GET /api/modules/{id}/permissions
pub async fn get_module_permissions(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(module_id): Path<i64>,
) -> LhResult<Json<PermissionsRes>> {
	list(&app, PermLevel::Module, module_id).await
}

/// # POST /api/submodules/{id}/permissions
pub async fn post_submodule_permissions(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(submodule_id): Path<i64>,
	Json(change): Json<PermissionChange>,
) -> LhResult<StatusCode> {
	update(&app, PermLevel::Submodule, submodule_id, change).await
}

/// # GET /api/submodules/{id}/permissions
pub async fn get_submodule_permissions(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(submodule_id): Path<i64>,
) -> LhResult<Json<PermissionsRes>> {
	list(&app, PermLevel::Submodule, submodule_id).await
}

// vim: ts=4
