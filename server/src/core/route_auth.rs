const TOKEN_EXPIRE: u64 = 8; /* hours */

use axum::{
	body::Body,
	extract::State,
	http::{response::Response, Request},
	middleware::Next,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::time;

use crate::core::extract::{Auth, AuthCtx};
use crate::prelude::*;
use learnhub_types::meta_adapter::Profile;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthToken {
	pub sub: i64,
	pub exp: u64,
	pub r: Profile,
}

pub fn generate_access_token(secret: &str, user_id: UserId, profile: Profile) -> LhResult<Box<str>> {
	let expire = time::SystemTime::now()
		.duration_since(time::UNIX_EPOCH).map_err(|_| Error::PermissionDenied)?
		.as_secs() + 3600 * TOKEN_EXPIRE;

	let token = jsonwebtoken::encode(
		&jsonwebtoken::Header::new(Algorithm::HS256),
		&AuthToken { sub: user_id.0, exp: expire, r: profile },
		&jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
	).map_err(|_| Error::PermissionDenied)?.into();

	Ok(token)
}

fn validate_token(secret: &str, token: &str) -> LhResult<AuthCtx> {
	let decoding_key = DecodingKey::from_secret(secret.as_bytes());

	let token_data = decode::<AuthToken>(
		token,
		&decoding_key,
		&Validation::new(Algorithm::HS256),
	).map_err(|_| Error::PermissionDenied)?;

	Ok(AuthCtx {
		user_id: UserId(token_data.claims.sub),
		profile: token_data.claims.r,
	})
}

pub async fn require_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> LhResult<Response<Body>> {
	let auth_header = req
		.headers()
		.get("Authorization")
		.and_then(|h| h.to_str().ok())
		.ok_or(Error::PermissionDenied)?;

	let token = auth_header.strip_prefix("Bearer ").ok_or(Error::PermissionDenied)?;
	let ctx = validate_token(&app.opts.jwt_secret, token)?;

	req.extensions_mut().insert(Auth(ctx));

	Ok(next.run(req).await)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn token_round_trip() {
		let token = generate_access_token("s3cret", UserId(42), Profile::Admin).unwrap();
		let ctx = validate_token("s3cret", &token).unwrap();
		assert_eq!(ctx.user_id, UserId(42));
		assert_eq!(ctx.profile, Profile::Admin);
	}

	#[test]
	fn wrong_secret_is_rejected() {
		let token = generate_access_token("s3cret", UserId(42), Profile::Collaborator).unwrap();
		assert!(validate_token("other", &token).is_err());
	}

	#[test]
	fn garbage_token_is_rejected() {
		assert!(validate_token("s3cret", "not.a.jwt").is_err());
	}
}

// vim: ts=4
