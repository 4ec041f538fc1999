//! Training operations: CRUD, admin listing, and the collaborator view.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::utils::*;
use learnhub::meta_adapter::*;
use learnhub::pagination::{Page, PageSpec};
use learnhub::prelude::*;

pub(crate) fn status_code(status: TrainingStatus) -> &'static str {
	match status {
		TrainingStatus::Draft => "D",
		TrainingStatus::Published => "P",
	}
}

fn status_from_code(code: &str) -> Result<TrainingStatus, sqlx::Error> {
	match code {
		"D" => Ok(TrainingStatus::Draft),
		"P" => Ok(TrainingStatus::Published),
		_ => Err(decode_err("unknown training status")),
	}
}

fn from_row(row: SqliteRow) -> Result<Training, sqlx::Error> {
	Ok(Training {
		training_id: row.try_get("training_id")?,
		title: row.try_get("title")?,
		description: row.try_get("description")?,
		tutor: row.try_get("tutor")?,
		thumbnail: row.try_get("thumbnail")?,
		status: status_from_code(row.try_get("status")?)?,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(db: &SqlitePool, training: &CreateTraining) -> LhResult<i64> {
	let res = sqlx::query(
		"INSERT INTO trainings (title, description, tutor, status) VALUES (?, ?, ?, ?)
		 RETURNING training_id",
	)
	.bind(training.title.as_ref())
	.bind(training.description.as_deref())
	.bind(training.tutor.as_deref())
	.bind(status_code(training.status.unwrap_or(TrainingStatus::Draft)))
	.fetch_one(db)
	.await;

	map_res(res, |row| row.try_get("training_id"))
}

pub(crate) async fn read(db: &SqlitePool, training_id: i64) -> LhResult<Training> {
	let res = sqlx::query(
		"SELECT training_id, title, description, tutor, thumbnail, status, created_at
		 FROM trainings WHERE training_id = ?",
	)
	.bind(training_id)
	.fetch_one(db)
	.await;

	map_res(res, from_row)
}

pub(crate) async fn update(
	db: &SqlitePool,
	training_id: i64,
	training: &UpdateTraining,
) -> LhResult<()> {
	let mut query = sqlx::QueryBuilder::new("UPDATE trainings SET ");
	let mut has_updates = false;

	has_updates = push_patch!(query, has_updates, "title", &training.title, |v| v.as_ref());
	has_updates =
		push_patch!(query, has_updates, "description", &training.description, |v| v.as_ref());
	has_updates = push_patch!(query, has_updates, "tutor", &training.tutor, |v| v.as_ref());
	has_updates =
		push_patch!(query, has_updates, "status", &training.status, |v| status_code(*v));
	has_updates =
		push_patch!(query, has_updates, "thumbnail", &training.thumbnail, |v| v.as_ref());

	if !has_updates {
		// No fields to update, but the id must still resolve
		return read(db, training_id).await.map(|_| ());
	}

	query.push(" WHERE training_id=").push_bind(training_id);

	let res = query
		.build()
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn list(
	db: &SqlitePool,
	opts: &ListTrainingOptions,
	spec: PageSpec,
) -> LhResult<Page<Training>> {
	let mut query = PagedQuery::new(
		"SELECT training_id, title, description, tutor, thumbnail, status, created_at
		 FROM trainings",
		"SELECT count(*) FROM trainings",
		"created_at, training_id",
	);
	if let Some(title) = &opts.title {
		query = query.contains("instr(title, ?) > 0", title);
	}
	if let Some(status) = opts.status {
		query = query.eq_str("status = ?", status_code(status));
	}

	query.fetch(db, spec, from_row).await
}

pub(crate) async fn list_for_user(
	db: &SqlitePool,
	user_id: UserId,
	spec: PageSpec,
) -> LhResult<Page<Training>> {
	let query = PagedQuery::new(
		"SELECT t.training_id, t.title, t.description, t.tutor, t.thumbnail, t.status, t.created_at
		 FROM trainings t
		 JOIN permission_user_training p ON p.training_id = t.training_id",
		"SELECT count(*)
		 FROM trainings t
		 JOIN permission_user_training p ON p.training_id = t.training_id",
		"t.created_at, t.training_id",
	)
	.eq_int("p.user_id = ?", user_id.0)
	.eq_str("t.status = ?", status_code(TrainingStatus::Published));

	query.fetch(db, spec, from_row).await
}

// vim: ts=4
