//! User account operations

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::utils::*;
use learnhub::meta_adapter::*;
use learnhub::pagination::{Page, PageSpec};
use learnhub::prelude::*;

pub(crate) fn profile_code(profile: Profile) -> &'static str {
	match profile {
		Profile::Admin => "A",
		Profile::Collaborator => "C",
	}
}

pub(crate) fn profile_from_code(code: &str) -> Result<Profile, sqlx::Error> {
	match code {
		"A" => Ok(Profile::Admin),
		"C" => Ok(Profile::Collaborator),
		_ => Err(decode_err("unknown profile code")),
	}
}

fn from_row(row: SqliteRow) -> Result<User, sqlx::Error> {
	Ok(User {
		user_id: UserId(row.try_get("user_id")?),
		name: row.try_get("name")?,
		email: row.try_get("email")?,
		profile: profile_from_code(row.try_get("profile")?)?,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(db: &SqlitePool, user: &CreateUser) -> LhResult<UserId> {
	let res = sqlx::query(
		"INSERT INTO users (name, email, password_hash, profile) VALUES (?, ?, ?, ?)
		 RETURNING user_id",
	)
	.bind(user.name.as_ref())
	.bind(user.email.as_ref())
	.bind(user.password_hash.as_ref())
	.bind(profile_code(user.profile))
	.fetch_one(db)
	.await;

	// A duplicate email is a caller error, not a store failure
	if let Err(sqlx::Error::Database(err)) = &res {
		if err.is_unique_violation() {
			return Err(Error::Validation("email already registered".into()));
		}
	}
	map_res(res, |row| row.try_get("user_id").map(UserId))
}

pub(crate) async fn read(db: &SqlitePool, user_id: UserId) -> LhResult<User> {
	let res = sqlx::query(
		"SELECT user_id, name, email, profile, created_at FROM users WHERE user_id = ?",
	)
	.bind(user_id.0)
	.fetch_one(db)
	.await;

	map_res(res, from_row)
}

pub(crate) async fn read_auth(db: &SqlitePool, email: &str) -> LhResult<UserAuth> {
	let res = sqlx::query(
		"SELECT user_id, name, profile, password_hash FROM users WHERE email = ?",
	)
	.bind(email)
	.fetch_one(db)
	.await;

	map_res(res, |row| {
		Ok(UserAuth {
			user_id: UserId(row.try_get("user_id")?),
			name: row.try_get("name")?,
			profile: profile_from_code(row.try_get("profile")?)?,
			password_hash: row.try_get("password_hash")?,
		})
	})
}

pub(crate) async fn list(
	db: &SqlitePool,
	opts: &ListUserOptions,
	spec: PageSpec,
) -> LhResult<Page<User>> {
	let mut query = PagedQuery::new(
		"SELECT user_id, name, email, profile, created_at FROM users",
		"SELECT count(*) FROM users",
		"created_at, user_id",
	);
	if let Some(name) = &opts.name {
		query = query.contains("instr(name, ?) > 0", name);
	}
	if let Some(profile) = opts.profile {
		query = query.eq_str("profile = ?", profile_code(profile));
	}

	query.fetch(db, spec, from_row).await
}

pub(crate) async fn count(db: &SqlitePool) -> LhResult<u64> {
	let total: i64 = sqlx::query_scalar("SELECT count(*) FROM users")
		.fetch_one(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	Ok(total.max(0) as u64)
}

// vim: ts=4
