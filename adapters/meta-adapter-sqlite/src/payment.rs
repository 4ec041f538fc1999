//! Payment request and refund operations. Both share one shape; `MoneyKind`
//! selects the table.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::utils::*;
use learnhub::meta_adapter::*;
use learnhub::pagination::{Page, PageSpec};
use learnhub::prelude::*;

fn table(kind: MoneyKind) -> &'static str {
	match kind {
		MoneyKind::Payment => "payment_requests",
		MoneyKind::Refund => "refunds",
	}
}

pub(crate) fn status_code(status: RequestStatus) -> &'static str {
	match status {
		RequestStatus::Pending => "P",
		RequestStatus::Paid => "A",
		RequestStatus::Cancelled => "C",
	}
}

fn status_from_code(code: &str) -> Result<RequestStatus, sqlx::Error> {
	match code {
		"P" => Ok(RequestStatus::Pending),
		"A" => Ok(RequestStatus::Paid),
		"C" => Ok(RequestStatus::Cancelled),
		_ => Err(decode_err("unknown request status")),
	}
}

fn from_row(row: SqliteRow) -> Result<MoneyRequest, sqlx::Error> {
	Ok(MoneyRequest {
		id: row.try_get("id")?,
		user_id: UserId(row.try_get("user_id")?),
		value: row.try_get("value")?,
		status: status_from_code(row.try_get("status")?)?,
		photo: row.try_get("photo")?,
		approved_photo: row.try_get("approved_photo")?,
		reason: row.try_get("reason")?,
		type_id: row.try_get("type_id")?,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(
	db: &SqlitePool,
	kind: MoneyKind,
	user_id: UserId,
	req: &CreateMoneyRequest,
) -> LhResult<i64> {
	let sql = format!(
		"INSERT INTO {} (user_id, value, status, type_id) VALUES (?, ?, 'P', ?) RETURNING id",
		table(kind)
	);
	let res = sqlx::query(&sql)
		.bind(user_id.0)
		.bind(req.value)
		.bind(req.type_id)
		.fetch_one(db)
		.await;

	map_res(res, |row| row.try_get("id"))
}

pub(crate) async fn read(db: &SqlitePool, kind: MoneyKind, id: i64) -> LhResult<MoneyRequest> {
	let sql = format!(
		"SELECT id, user_id, value, status, photo, approved_photo, reason, type_id, created_at
		 FROM {} WHERE id = ?",
		table(kind)
	);
	let res = sqlx::query(&sql).bind(id).fetch_one(db).await;

	map_res(res, from_row)
}

pub(crate) async fn update(
	db: &SqlitePool,
	kind: MoneyKind,
	id: i64,
	req: &UpdateMoneyRequest,
) -> LhResult<()> {
	let mut query = sqlx::QueryBuilder::new(format!("UPDATE {} SET ", table(kind)));
	let mut has_updates = false;

	has_updates = push_patch!(query, has_updates, "status", &req.status, |v| status_code(*v));
	has_updates = push_patch!(query, has_updates, "reason", &req.reason, |v| v.as_ref());
	has_updates = push_patch!(query, has_updates, "photo", &req.photo, |v| v.as_ref());
	has_updates =
		push_patch!(query, has_updates, "approved_photo", &req.approved_photo, |v| v.as_ref());

	if !has_updates {
		return read(db, kind, id).await.map(|_| ());
	}

	query.push(" WHERE id=").push_bind(id);

	let res = query.build().execute(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn list(
	db: &SqlitePool,
	kind: MoneyKind,
	opts: &ListMoneyOptions,
	spec: PageSpec,
) -> LhResult<Page<MoneyRequest>> {
	let select = format!(
		"SELECT id, user_id, value, status, photo, approved_photo, reason, type_id, created_at
		 FROM {}",
		table(kind)
	);
	let count = format!("SELECT count(*) FROM {}", table(kind));
	let mut query = PagedQuery::new(&select, &count, "created_at, id");

	if let Some(status) = opts.status {
		query = query.eq_str("status = ?", status_code(status));
	}
	if let Some(user) = opts.user {
		query = query.eq_int("user_id = ?", user.0);
	}

	query.fetch(db, spec, from_row).await
}

// vim: ts=4
