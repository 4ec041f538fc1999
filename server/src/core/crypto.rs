const BCRYPT_COST: u32 = 10;

use crate::prelude::*;

fn generate_password_hash_sync(password: Box<str>) -> LhResult<Box<str>> {
	let hash = bcrypt::hash(password.as_ref(), BCRYPT_COST).map_err(|_| Error::PermissionDenied)?;

	Ok(hash.into())
}

/// Hashes a password. Bcrypt is CPU heavy, so the work runs off the runtime.
pub async fn generate_password_hash(password: Box<str>) -> LhResult<Box<str>> {
	tokio::task::spawn_blocking(move || generate_password_hash_sync(password))
		.await
		.map_err(|_| Error::PermissionDenied)?
}

fn check_password_sync(password: Box<str>, password_hash: Box<str>) -> LhResult<()> {
	let res =
		bcrypt::verify(password.as_ref(), &password_hash).map_err(|_| Error::PermissionDenied)?;
	if !res {
		Err(Error::PermissionDenied)
	} else {
		Ok(())
	}
}

pub async fn check_password(password: Box<str>, password_hash: Box<str>) -> LhResult<()> {
	tokio::task::spawn_blocking(move || check_password_sync(password, password_hash))
		.await
		.map_err(|_| Error::PermissionDenied)?
}

#[cfg(test)]
mod test {
	use super::*;

	#[tokio::test]
	async fn password_round_trip() {
		let hash = generate_password_hash("hunter2".into()).await.unwrap();
		assert!(check_password("hunter2".into(), hash.clone()).await.is_ok());
		assert!(check_password("hunter3".into(), hash).await.is_err());
	}
}

// vim: ts=4
