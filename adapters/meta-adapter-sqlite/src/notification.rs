//! Notification operations: creation with per-user fan-out in one
//! transaction, per-user listing, and the read flag.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::utils::*;
use learnhub::meta_adapter::*;
use learnhub::pagination::{Page, PageSpec};
use learnhub::prelude::*;

fn from_row(row: SqliteRow) -> Result<NotificationView, sqlx::Error> {
	let read: i64 = row.try_get("read")?;
	Ok(NotificationView {
		notification_id: row.try_get("notification_id")?,
		title: row.try_get("title")?,
		content: row.try_get("content")?,
		read: read != 0,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(db: &SqlitePool, notification: &CreateNotification) -> LhResult<i64> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	let notification_id: i64 = sqlx::query_scalar(
		"INSERT INTO notifications (title, content) VALUES (?, ?) RETURNING notification_id",
	)
	.bind(notification.title.as_ref())
	.bind(notification.content.as_deref())
	.fetch_one(&mut *tx)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	for user_id in &notification.users {
		sqlx::query(
			"INSERT OR IGNORE INTO notification_users (notification_id, user_id) VALUES (?, ?)",
		)
		.bind(notification_id)
		.bind(user_id.0)
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	}

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	Ok(notification_id)
}

pub(crate) async fn list_for_user(
	db: &SqlitePool,
	user_id: UserId,
	spec: PageSpec,
) -> LhResult<Page<NotificationView>> {
	let query = PagedQuery::new(
		"SELECT n.notification_id, n.title, n.content, nu.read, n.created_at
		 FROM notifications n
		 JOIN notification_users nu ON nu.notification_id = n.notification_id",
		"SELECT count(*)
		 FROM notifications n
		 JOIN notification_users nu ON nu.notification_id = n.notification_id",
		"n.created_at, n.notification_id",
	)
	.eq_int("nu.user_id = ?", user_id.0);

	query.fetch(db, spec, from_row).await
}

pub(crate) async fn mark_read(
	db: &SqlitePool,
	user_id: UserId,
	notification_id: i64,
) -> LhResult<()> {
	let res = sqlx::query(
		"UPDATE notification_users SET read = 1 WHERE notification_id = ? AND user_id = ?",
	)
	.bind(notification_id)
	.bind(user_id.0)
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

// vim: ts=4
