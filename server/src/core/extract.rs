use axum::{extract::FromRequestParts, http::request::Parts};

use crate::prelude::*;
use learnhub_types::meta_adapter::Profile;

// Extractors //
//************//

// Auth //
//******//
#[derive(Clone, Debug)]
pub struct AuthCtx {
	pub user_id: UserId,
	pub profile: Profile,
}

#[derive(Clone, Debug)]
pub struct Auth(pub AuthCtx);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<Auth>().cloned() {
			Ok(auth)
		} else {
			Err(Error::PermissionDenied)
		}
	}
}

// AdminAuth //
//***********//
/// Same as [`Auth`], but only admits users with the Admin profile.
#[derive(Clone, Debug)]
pub struct AdminAuth(pub AuthCtx);

impl<S> FromRequestParts<S> for AdminAuth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		let Auth(ctx) = Auth::from_request_parts(parts, state).await?;
		if ctx.profile != Profile::Admin {
			return Err(Error::PermissionDenied);
		}
		Ok(AdminAuth(ctx))
	}
}

// vim: ts=4
