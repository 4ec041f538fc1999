use axum::{
	extract::State,
	http::StatusCode,
	Json,
};
use serde::{Deserialize, Serialize};

use crate::core::{crypto, route_auth};
use crate::prelude::*;
use learnhub_types::meta_adapter::User;

/// # POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginReq {
	email: Box<str>,
	password: Box<str>,
}

#[derive(Serialize)]
pub struct Login {
	token: Box<str>,
	user: User,
}

pub async fn post_login(
	State(app): State<App>,
	Json(login): Json<LoginReq>,
) -> LhResult<(StatusCode, Json<Login>)> {
	let auth = async {
		let auth = app.meta_adapter.read_user_auth(&login.email).await?;
		crypto::check_password(login.password.clone(), auth.password_hash.clone()).await?;
		Ok::<_, Error>(auth)
	}
	.await;

	match auth {
		Ok(auth) => {
			let token =
				route_auth::generate_access_token(&app.opts.jwt_secret, auth.user_id, auth.profile)?;
			let user = app.meta_adapter.read_user(auth.user_id).await?;

			Ok((StatusCode::OK, Json(Login { token, user })))
		}
		Err(_) => {
			// Slow down credential guessing
			tokio::time::sleep(std::time::Duration::from_secs(1)).await;
			Err(Error::PermissionDenied)
		}
	}
}

// vim: ts=4
