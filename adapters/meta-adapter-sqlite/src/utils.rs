//! Shared helpers for the SQLite adapter: error mapping, the `push_patch!`
//! macro for PATCH updates, and the paged query wrapper used by every list
//! operation.

use learnhub::pagination::{Page, PageMeta, PageSpec};
use learnhub::prelude::*;
use sqlx::{sqlite::SqliteRow, SqlitePool};

/// Applies a Patch field to an UPDATE query with proper binding.
/// Returns true if a SET clause was added (for tracking has_updates).
macro_rules! push_patch {
	// For bindable values (strings, numbers, bools)
	($query:expr, $has_updates:expr, $field:literal, $patch:expr) => {{
		match $patch {
			Patch::Undefined => $has_updates,
			Patch::Null => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=NULL"));
				true
			}
			Patch::Value(v) => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=")).push_bind(v);
				true
			}
		}
	}};
	// For fields that need conversion before binding
	($query:expr, $has_updates:expr, $field:literal, $patch:expr, |$v:ident| $convert:expr) => {{
		match $patch {
			Patch::Undefined => $has_updates,
			Patch::Null => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=NULL"));
				true
			}
			Patch::Value($v) => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=")).push_bind($convert);
				true
			}
		}
	}};
}

pub(crate) use push_patch;

/// Log database error for debugging
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Map a single-row query result, translating SQL errors to LhResult
pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> LhResult<T>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

/// Collect an iterator of row-mapping results, translating errors
pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>>,
) -> LhResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

pub(crate) fn decode_err(msg: &'static str) -> sqlx::Error {
	sqlx::Error::Decode(msg.into())
}

/// Bindable filter value for [`PagedQuery`]
pub(crate) enum Bind {
	Int(i64),
	Str(Box<str>),
}

/// Reusable paged list query: a base SELECT and COUNT over the same FROM,
/// optional `contains`/equality conditions, a fixed ascending order, and
/// LIMIT/OFFSET derived from the resolved page. Both queries share the same
/// WHERE clause and bind list, so the metadata always matches the data.
pub(crate) struct PagedQuery {
	select: String,
	count: String,
	conds: Vec<(&'static str, Bind)>,
	order: &'static str,
}

impl PagedQuery {
	pub(crate) fn new(select: &str, count: &str, order: &'static str) -> Self {
		Self { select: select.into(), count: count.into(), conds: Vec::new(), order }
	}

	/// Case-sensitive substring match (SQLite `instr`; LIKE would fold case)
	pub(crate) fn contains(mut self, cond: &'static str, needle: &str) -> Self {
		self.conds.push((cond, Bind::Str(needle.into())));
		self
	}

	pub(crate) fn eq_int(mut self, cond: &'static str, value: i64) -> Self {
		self.conds.push((cond, Bind::Int(value)));
		self
	}

	pub(crate) fn eq_str(mut self, cond: &'static str, value: &str) -> Self {
		self.conds.push((cond, Bind::Str(value.into())));
		self
	}

	fn where_clause(&self) -> String {
		if self.conds.is_empty() {
			String::new()
		} else {
			let conds: Vec<&str> = self.conds.iter().map(|(sql, _)| *sql).collect();
			format!(" WHERE {}", conds.join(" AND "))
		}
	}

	/// Runs the COUNT and the page SELECT, then maps each row through `f`.
	pub(crate) async fn fetch<T, F>(
		self,
		db: &SqlitePool,
		spec: PageSpec,
		f: F,
	) -> LhResult<Page<T>>
	where
		F: Fn(SqliteRow) -> Result<T, sqlx::Error>,
	{
		let where_sql = self.where_clause();

		let count_sql = format!("{}{}", self.count, where_sql);
		let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
		for (_, bind) in &self.conds {
			count_query = match bind {
				Bind::Int(v) => count_query.bind(*v),
				Bind::Str(v) => count_query.bind(v.as_ref()),
			};
		}
		let total =
			count_query.fetch_one(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

		let select_sql =
			format!("{}{} ORDER BY {} LIMIT ? OFFSET ?", self.select, where_sql, self.order);
		let mut select_query = sqlx::query(&select_sql);
		for (_, bind) in &self.conds {
			select_query = match bind {
				Bind::Int(v) => select_query.bind(*v),
				Bind::Str(v) => select_query.bind(v.as_ref()),
			};
		}
		let rows = select_query
			.bind(spec.limit())
			.bind(spec.offset())
			.fetch_all(db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		let data = collect_res(rows.into_iter().map(f))?;
		Ok(Page { data, meta: PageMeta::new(total.max(0) as u64, spec) })
	}
}

/// Returns NotFound when a node id does not resolve in `table`
pub(crate) async fn require_row(
	tx: &mut sqlx::SqliteConnection,
	sql: &str,
	id: i64,
) -> LhResult<()> {
	let found: Option<i64> = sqlx::query_scalar(sql)
		.bind(id)
		.fetch_optional(tx)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	found.map(|_| ()).ok_or(Error::NotFound)
}

// vim: ts=4
