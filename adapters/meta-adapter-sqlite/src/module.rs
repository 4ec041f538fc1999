//! Module operations (second level of the content hierarchy)

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::utils::*;
use learnhub::meta_adapter::*;
use learnhub::pagination::{Page, PageSpec};
use learnhub::prelude::*;

fn from_row(row: SqliteRow) -> Result<Module, sqlx::Error> {
	Ok(Module {
		module_id: row.try_get("module_id")?,
		training_id: row.try_get("training_id")?,
		title: row.try_get("title")?,
		description: row.try_get("description")?,
		thumbnail: row.try_get("thumbnail")?,
		ord: row.try_get("ord")?,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(db: &SqlitePool, module: &CreateModule) -> LhResult<i64> {
	// The owning training must resolve; an orphan module is a caller error
	let parent: Option<i64> =
		sqlx::query_scalar("SELECT training_id FROM trainings WHERE training_id = ?")
			.bind(module.training_id)
			.fetch_optional(db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
	if parent.is_none() {
		return Err(Error::NotFound);
	}

	let res = sqlx::query(
		"INSERT INTO modules (training_id, title, description, ord) VALUES (?, ?, ?, ?)
		 RETURNING module_id",
	)
	.bind(module.training_id)
	.bind(module.title.as_ref())
	.bind(module.description.as_deref())
	.bind(module.ord.unwrap_or(0))
	.fetch_one(db)
	.await;

	map_res(res, |row| row.try_get("module_id"))
}

pub(crate) async fn read(db: &SqlitePool, module_id: i64) -> LhResult<Module> {
	let res = sqlx::query(
		"SELECT module_id, training_id, title, description, thumbnail, ord, created_at
		 FROM modules WHERE module_id = ?",
	)
	.bind(module_id)
	.fetch_one(db)
	.await;

	map_res(res, from_row)
}

pub(crate) async fn update(db: &SqlitePool, module_id: i64, module: &UpdateModule) -> LhResult<()> {
	let mut query = sqlx::QueryBuilder::new("UPDATE modules SET ");
	let mut has_updates = false;

	has_updates = push_patch!(query, has_updates, "title", &module.title, |v| v.as_ref());
	has_updates =
		push_patch!(query, has_updates, "description", &module.description, |v| v.as_ref());
	has_updates = push_patch!(query, has_updates, "ord", &module.ord, |v| *v);
	has_updates = push_patch!(query, has_updates, "thumbnail", &module.thumbnail, |v| v.as_ref());

	if !has_updates {
		return read(db, module_id).await.map(|_| ());
	}

	query.push(" WHERE module_id=").push_bind(module_id);

	let res = query.build().execute(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn list(
	db: &SqlitePool,
	opts: &ListModuleOptions,
	spec: PageSpec,
) -> LhResult<Page<Module>> {
	let mut query = PagedQuery::new(
		"SELECT module_id, training_id, title, description, thumbnail, ord, created_at
		 FROM modules",
		"SELECT count(*) FROM modules",
		"ord, module_id",
	);
	if let Some(training_id) = opts.training_id {
		query = query.eq_int("training_id = ?", training_id);
	}
	if let Some(title) = &opts.title {
		query = query.contains("instr(title, ?) > 0", title);
	}

	query.fetch(db, spec, from_row).await
}

// vim: ts=4
