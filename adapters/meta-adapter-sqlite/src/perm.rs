//! Permission store access and the transactional cascade.
//!
//! A permission change (with or without cascade) runs inside a single
//! transaction: the target node is verified, the relatives are fetched, the
//! plan from [`cascade_plan`] is applied in full, and only then does the
//! transaction commit. A failure anywhere rolls the whole change back.

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use learnhub::meta_adapter::*;
use learnhub::prelude::*;

fn perm_table(level: PermLevel) -> (&'static str, &'static str) {
	match level {
		PermLevel::Training => ("permission_user_training", "training_id"),
		PermLevel::Module => ("permission_user_module", "module_id"),
		PermLevel::Submodule => ("permission_user_submodule", "submodule_id"),
	}
}

fn node_check_sql(level: PermLevel) -> &'static str {
	match level {
		PermLevel::Training => "SELECT training_id FROM trainings WHERE training_id = ?",
		PermLevel::Module => "SELECT module_id FROM modules WHERE module_id = ?",
		PermLevel::Submodule => "SELECT submodule_id FROM submodules WHERE submodule_id = ?",
	}
}

async fn fetch_relatives(
	tx: &mut sqlx::SqliteConnection,
	level: PermLevel,
	node_id: i64,
) -> LhResult<CascadeRelatives> {
	let mut relatives = CascadeRelatives::default();

	match level {
		PermLevel::Training => {
			relatives.module_ids =
				sqlx::query_scalar("SELECT module_id FROM modules WHERE training_id = ?")
					.bind(node_id)
					.fetch_all(&mut *tx)
					.await
					.inspect_err(inspect)
					.map_err(|_| Error::DbError)?;
			relatives.submodule_ids = sqlx::query_scalar(
				"SELECT submodule_id FROM submodules WHERE module_id IN
				 (SELECT module_id FROM modules WHERE training_id = ?)",
			)
			.bind(node_id)
			.fetch_all(&mut *tx)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
		}
		PermLevel::Module => {
			relatives.parent_training =
				sqlx::query_scalar("SELECT training_id FROM modules WHERE module_id = ?")
					.bind(node_id)
					.fetch_optional(&mut *tx)
					.await
					.inspect_err(inspect)
					.map_err(|_| Error::DbError)?;
			relatives.submodule_ids =
				sqlx::query_scalar("SELECT submodule_id FROM submodules WHERE module_id = ?")
					.bind(node_id)
					.fetch_all(&mut *tx)
					.await
					.inspect_err(inspect)
					.map_err(|_| Error::DbError)?;
		}
		PermLevel::Submodule => {}
	}

	Ok(relatives)
}

/// All granted ids must resolve to user rows; the permission tables carry
/// no foreign keys.
async fn require_users(tx: &mut sqlx::SqliteConnection, users: &[UserId]) -> LhResult<()> {
	let mut ids: Vec<i64> = users.iter().map(|user| user.0).collect();
	ids.sort_unstable();
	ids.dedup();

	let mut query = sqlx::QueryBuilder::new("SELECT count(*) FROM users WHERE user_id IN (");
	let mut sep = query.separated(", ");
	for id in &ids {
		sep.push_bind(*id);
	}
	query.push(")");

	let found: i64 = query
		.build_query_scalar()
		.fetch_one(&mut *tx)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	if found as usize != ids.len() {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn update(
	db: &SqlitePool,
	level: PermLevel,
	node_id: i64,
	change: &PermissionChange,
) -> LhResult<()> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	require_row(&mut tx, node_check_sql(level), node_id).await?;
	if !change.added_users.is_empty() {
		require_users(&mut tx, &change.added_users).await?;
	}

	let relatives = if change.cascade {
		fetch_relatives(&mut tx, level, node_id).await?
	} else {
		CascadeRelatives::default()
	};

	for op in cascade_plan(level, node_id, change, &relatives) {
		let (table, col) = perm_table(op.level);
		match op.action {
			PermAction::Grant => {
				// The composite primary key makes re-grants a no-op
				let sql =
					format!("INSERT OR IGNORE INTO {} (user_id, {}) VALUES (?, ?)", table, col);
				sqlx::query(&sql)
					.bind(op.user_id.0)
					.bind(op.node_id)
					.execute(&mut *tx)
					.await
					.inspect_err(inspect)
					.map_err(|_| Error::DbError)?;
			}
			PermAction::Revoke => {
				let sql = format!("DELETE FROM {} WHERE user_id = ? AND {} = ?", table, col);
				sqlx::query(&sql)
					.bind(op.user_id.0)
					.bind(op.node_id)
					.execute(&mut *tx)
					.await
					.inspect_err(inspect)
					.map_err(|_| Error::DbError)?;
			}
		}
	}

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	Ok(())
}

pub(crate) async fn list(db: &SqlitePool, level: PermLevel, node_id: i64) -> LhResult<Vec<UserId>> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	require_row(&mut tx, node_check_sql(level), node_id).await?;

	let (table, col) = perm_table(level);
	let sql = format!("SELECT user_id FROM {} WHERE {} = ? ORDER BY user_id", table, col);
	let rows = sqlx::query(&sql)
		.bind(node_id)
		.fetch_all(&mut *tx)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	collect_res(rows.into_iter().map(|row| row.try_get("user_id").map(UserId)))
}

// vim: ts=4
