//! Meeting operations

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::utils::*;
use learnhub::meta_adapter::*;
use learnhub::pagination::{Page, PageSpec};
use learnhub::prelude::*;

fn from_row(row: SqliteRow) -> Result<Meeting, sqlx::Error> {
	Ok(Meeting {
		meeting_id: row.try_get("meeting_id")?,
		title: row.try_get("title")?,
		description: row.try_get("description")?,
		meet_url: row.try_get("meet_url")?,
		scheduled_at: row.try_get::<Option<i64>, _>("scheduled_at")?.map(Timestamp),
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(db: &SqlitePool, meeting: &CreateMeeting) -> LhResult<i64> {
	let res = sqlx::query(
		"INSERT INTO meetings (title, description, meet_url, scheduled_at) VALUES (?, ?, ?, ?)
		 RETURNING meeting_id",
	)
	.bind(meeting.title.as_ref())
	.bind(meeting.description.as_deref())
	.bind(meeting.meet_url.as_deref())
	.bind(meeting.scheduled_at.map(|t| t.0))
	.fetch_one(db)
	.await;

	map_res(res, |row| row.try_get("meeting_id"))
}

pub(crate) async fn read(db: &SqlitePool, meeting_id: i64) -> LhResult<Meeting> {
	let res = sqlx::query(
		"SELECT meeting_id, title, description, meet_url, scheduled_at, created_at
		 FROM meetings WHERE meeting_id = ?",
	)
	.bind(meeting_id)
	.fetch_one(db)
	.await;

	map_res(res, from_row)
}

pub(crate) async fn update(
	db: &SqlitePool,
	meeting_id: i64,
	meeting: &UpdateMeeting,
) -> LhResult<()> {
	let mut query = sqlx::QueryBuilder::new("UPDATE meetings SET ");
	let mut has_updates = false;

	has_updates = push_patch!(query, has_updates, "title", &meeting.title, |v| v.as_ref());
	has_updates =
		push_patch!(query, has_updates, "description", &meeting.description, |v| v.as_ref());
	has_updates = push_patch!(query, has_updates, "meet_url", &meeting.meet_url, |v| v.as_ref());
	has_updates =
		push_patch!(query, has_updates, "scheduled_at", &meeting.scheduled_at, |v| v.0);

	if !has_updates {
		return read(db, meeting_id).await.map(|_| ());
	}

	query.push(" WHERE meeting_id=").push_bind(meeting_id);

	let res = query.build().execute(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn list(
	db: &SqlitePool,
	opts: &ListMeetingOptions,
	spec: PageSpec,
) -> LhResult<Page<Meeting>> {
	let mut query = PagedQuery::new(
		"SELECT meeting_id, title, description, meet_url, scheduled_at, created_at FROM meetings",
		"SELECT count(*) FROM meetings",
		"created_at, meeting_id",
	);
	if let Some(title) = &opts.title {
		query = query.contains("instr(title, ?) > 0", title);
	}

	query.fetch(db, spec, from_row).await
}

// vim: ts=4
