use axum::{
	extract::{Query, State},
	http::StatusCode,
	Json,
};
use serde::Deserialize;

use crate::core::{crypto, AdminAuth, Auth};
use crate::prelude::*;
use learnhub_types::meta_adapter::{CreateUser, ListUserOptions, Profile, User};
use learnhub_types::pagination::{Page, PageRequest};

/// # GET /api/me
pub async fn get_me(State(app): State<App>, Auth(ctx): Auth) -> LhResult<Json<User>> {
	let user = app.meta_adapter.read_user(ctx.user_id).await?;

	Ok(Json(user))
}

/// # POST /api/users
#[derive(Deserialize)]
pub struct CreateUserReq {
	name: Box<str>,
	email: Box<str>,
	password: Box<str>,
	profile: Profile,
}

pub async fn post_user(
	State(app): State<App>,
	_admin: AdminAuth,
	Json(req): Json<CreateUserReq>,
) -> LhResult<(StatusCode, Json<User>)> {
	if req.name.trim().is_empty() {
		return Err(Error::Validation("name must not be empty".into()));
	}
	if req.email.trim().is_empty() || !req.email.contains('@') {
		return Err(Error::Validation("invalid email address".into()));
	}
	if req.password.len() < 8 {
		return Err(Error::Validation("password must be at least 8 characters".into()));
	}

	let password_hash = crypto::generate_password_hash(req.password).await?;
	let user_id = app
		.meta_adapter
		.create_user(&CreateUser {
			name: req.name,
			email: req.email,
			password_hash,
			profile: req.profile,
		})
		.await?;
	let user = app.meta_adapter.read_user(user_id).await?;

	Ok((StatusCode::CREATED, Json(user)))
}

/// # GET /api/users
pub async fn list_users(
	State(app): State<App>,
	_admin: AdminAuth,
	Query(opts): Query<ListUserOptions>,
	Query(page): Query<PageRequest>,
) -> LhResult<Json<Page<User>>> {
	let spec = app.opts.page.resolve(&page);
	let users = app.meta_adapter.list_users(&opts, spec).await?;

	Ok(Json(users))
}

// vim: ts=4
