//! Submodule operations (third level of the content hierarchy)

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::utils::*;
use learnhub::meta_adapter::*;
use learnhub::pagination::{Page, PageSpec};
use learnhub::prelude::*;

fn from_row(row: SqliteRow) -> Result<Submodule, sqlx::Error> {
	Ok(Submodule {
		submodule_id: row.try_get("submodule_id")?,
		module_id: row.try_get("module_id")?,
		title: row.try_get("title")?,
		description: row.try_get("description")?,
		thumbnail: row.try_get("thumbnail")?,
		ord: row.try_get("ord")?,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(db: &SqlitePool, submodule: &CreateSubmodule) -> LhResult<i64> {
	let parent: Option<i64> =
		sqlx::query_scalar("SELECT module_id FROM modules WHERE module_id = ?")
			.bind(submodule.module_id)
			.fetch_optional(db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
	if parent.is_none() {
		return Err(Error::NotFound);
	}

	let res = sqlx::query(
		"INSERT INTO submodules (module_id, title, description, ord) VALUES (?, ?, ?, ?)
		 RETURNING submodule_id",
	)
	.bind(submodule.module_id)
	.bind(submodule.title.as_ref())
	.bind(submodule.description.as_deref())
	.bind(submodule.ord.unwrap_or(0))
	.fetch_one(db)
	.await;

	map_res(res, |row| row.try_get("submodule_id"))
}

pub(crate) async fn read(db: &SqlitePool, submodule_id: i64) -> LhResult<Submodule> {
	let res = sqlx::query(
		"SELECT submodule_id, module_id, title, description, thumbnail, ord, created_at
		 FROM submodules WHERE submodule_id = ?",
	)
	.bind(submodule_id)
	.fetch_one(db)
	.await;

	map_res(res, from_row)
}

pub(crate) async fn update(
	db: &SqlitePool,
	submodule_id: i64,
	submodule: &UpdateSubmodule,
) -> LhResult<()> {
	let mut query = sqlx::QueryBuilder::new("UPDATE submodules SET ");
	let mut has_updates = false;

	has_updates = push_patch!(query, has_updates, "title", &submodule.title, |v| v.as_ref());
	has_updates =
		push_patch!(query, has_updates, "description", &submodule.description, |v| v.as_ref());
	has_updates = push_patch!(query, has_updates, "ord", &submodule.ord, |v| *v);
	has_updates =
		push_patch!(query, has_updates, "thumbnail", &submodule.thumbnail, |v| v.as_ref());

	if !has_updates {
		return read(db, submodule_id).await.map(|_| ());
	}

	query.push(" WHERE submodule_id=").push_bind(submodule_id);

	let res = query.build().execute(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn list(
	db: &SqlitePool,
	opts: &ListSubmoduleOptions,
	spec: PageSpec,
) -> LhResult<Page<Submodule>> {
	let mut query = PagedQuery::new(
		"SELECT submodule_id, module_id, title, description, thumbnail, ord, created_at
		 FROM submodules",
		"SELECT count(*) FROM submodules",
		"ord, submodule_id",
	);
	if let Some(module_id) = opts.module_id {
		query = query.eq_int("module_id = ?", module_id);
	}
	if let Some(title) = &opts.title {
		query = query.contains("instr(title, ?) > 0", title);
	}

	query.fetch(db, spec, from_row).await
}

// vim: ts=4
