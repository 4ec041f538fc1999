//! Lesson operations (leaf level; lessons carry no permission records)

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::utils::*;
use learnhub::meta_adapter::*;
use learnhub::pagination::{Page, PageSpec};
use learnhub::prelude::*;

fn from_row(row: SqliteRow) -> Result<Lesson, sqlx::Error> {
	Ok(Lesson {
		lesson_id: row.try_get("lesson_id")?,
		submodule_id: row.try_get("submodule_id")?,
		title: row.try_get("title")?,
		content_url: row.try_get("content_url")?,
		thumbnail: row.try_get("thumbnail")?,
		ord: row.try_get("ord")?,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(db: &SqlitePool, lesson: &CreateLesson) -> LhResult<i64> {
	let parent: Option<i64> =
		sqlx::query_scalar("SELECT submodule_id FROM submodules WHERE submodule_id = ?")
			.bind(lesson.submodule_id)
			.fetch_optional(db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
	if parent.is_none() {
		return Err(Error::NotFound);
	}

	let res = sqlx::query(
		"INSERT INTO lessons (submodule_id, title, content_url, ord) VALUES (?, ?, ?, ?)
		 RETURNING lesson_id",
	)
	.bind(lesson.submodule_id)
	.bind(lesson.title.as_ref())
	.bind(lesson.content_url.as_deref())
	.bind(lesson.ord.unwrap_or(0))
	.fetch_one(db)
	.await;

	map_res(res, |row| row.try_get("lesson_id"))
}

pub(crate) async fn read(db: &SqlitePool, lesson_id: i64) -> LhResult<Lesson> {
	let res = sqlx::query(
		"SELECT lesson_id, submodule_id, title, content_url, thumbnail, ord, created_at
		 FROM lessons WHERE lesson_id = ?",
	)
	.bind(lesson_id)
	.fetch_one(db)
	.await;

	map_res(res, from_row)
}

pub(crate) async fn update(db: &SqlitePool, lesson_id: i64, lesson: &UpdateLesson) -> LhResult<()> {
	let mut query = sqlx::QueryBuilder::new("UPDATE lessons SET ");
	let mut has_updates = false;

	has_updates = push_patch!(query, has_updates, "title", &lesson.title, |v| v.as_ref());
	has_updates =
		push_patch!(query, has_updates, "content_url", &lesson.content_url, |v| v.as_ref());
	has_updates = push_patch!(query, has_updates, "ord", &lesson.ord, |v| *v);
	has_updates = push_patch!(query, has_updates, "thumbnail", &lesson.thumbnail, |v| v.as_ref());

	if !has_updates {
		return read(db, lesson_id).await.map(|_| ());
	}

	query.push(" WHERE lesson_id=").push_bind(lesson_id);

	let res = query.build().execute(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn list(
	db: &SqlitePool,
	opts: &ListLessonOptions,
	spec: PageSpec,
) -> LhResult<Page<Lesson>> {
	let mut query = PagedQuery::new(
		"SELECT lesson_id, submodule_id, title, content_url, thumbnail, ord, created_at
		 FROM lessons",
		"SELECT count(*) FROM lessons",
		"ord, lesson_id",
	);
	if let Some(submodule_id) = opts.submodule_id {
		query = query.eq_int("submodule_id = ?", submodule_id);
	}
	if let Some(title) = &opts.title {
		query = query.contains("instr(title, ?) > 0", title);
	}

	query.fetch(db, spec, from_row).await
}

// vim: ts=4
