//! Database schema bootstrap. All tables are created on startup with
//! `CREATE TABLE IF NOT EXISTS`; there is no migration machinery.

use sqlx::SqlitePool;

pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Users //
	///////////
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS users (
		user_id integer PRIMARY KEY AUTOINCREMENT,
		name text NOT NULL,
		email text NOT NULL UNIQUE,
		password_hash text NOT NULL,
		profile char(1) NOT NULL,			-- 'A' - Admin, 'C' - Collaborator
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Content hierarchy //
	///////////////////////
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS trainings (
		training_id integer PRIMARY KEY AUTOINCREMENT,
		title text NOT NULL,
		description text,
		tutor text,
		thumbnail text,
		status char(1) NOT NULL DEFAULT 'D',	-- 'D' - Draft, 'P' - Published
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS modules (
		module_id integer PRIMARY KEY AUTOINCREMENT,
		training_id integer NOT NULL,
		title text NOT NULL,
		description text,
		thumbnail text,
		ord integer NOT NULL DEFAULT 0,
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_modules_training ON modules(training_id)")
		.execute(&mut *tx)
		.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS submodules (
		submodule_id integer PRIMARY KEY AUTOINCREMENT,
		module_id integer NOT NULL,
		title text NOT NULL,
		description text,
		thumbnail text,
		ord integer NOT NULL DEFAULT 0,
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_submodules_module ON submodules(module_id)")
		.execute(&mut *tx)
		.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS lessons (
		lesson_id integer PRIMARY KEY AUTOINCREMENT,
		submodule_id integer NOT NULL,
		title text NOT NULL,
		content_url text,
		thumbnail text,
		ord integer NOT NULL DEFAULT 0,
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_lessons_submodule ON lessons(submodule_id)")
		.execute(&mut *tx)
		.await?;

	// Permission records //
	////////////////////////
	// Composite primary keys make (user, node) pairs unique; grants use
	// INSERT OR IGNORE against them.
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS permission_user_training (
		user_id integer NOT NULL,
		training_id integer NOT NULL,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id, training_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS permission_user_module (
		user_id integer NOT NULL,
		module_id integer NOT NULL,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id, module_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS permission_user_submodule (
		user_id integer NOT NULL,
		submodule_id integer NOT NULL,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id, submodule_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Payment requests / refunds //
	////////////////////////////////
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS payment_requests (
		id integer PRIMARY KEY AUTOINCREMENT,
		user_id integer NOT NULL,
		value integer NOT NULL,				-- cents
		status char(1) NOT NULL DEFAULT 'P',	-- 'P' - Pending, 'A' - Paid, 'C' - Cancelled
		photo text,
		approved_photo text,
		reason text,
		type_id integer,
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_payment_requests_user ON payment_requests(user_id)")
		.execute(&mut *tx)
		.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS refunds (
		id integer PRIMARY KEY AUTOINCREMENT,
		user_id integer NOT NULL,
		value integer NOT NULL,				-- cents
		status char(1) NOT NULL DEFAULT 'P',	-- 'P' - Pending, 'A' - Paid, 'C' - Cancelled
		photo text,
		approved_photo text,
		reason text,
		type_id integer,
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_refunds_user ON refunds(user_id)")
		.execute(&mut *tx)
		.await?;

	// Notifications //
	///////////////////
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS notifications (
		notification_id integer PRIMARY KEY AUTOINCREMENT,
		title text NOT NULL,
		content text,
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS notification_users (
		notification_id integer NOT NULL,
		user_id integer NOT NULL,
		read boolean NOT NULL DEFAULT 0,
		PRIMARY KEY(notification_id, user_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_notification_users_user ON notification_users(user_id)",
	)
	.execute(&mut *tx)
	.await?;

	// Meetings //
	//////////////
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS meetings (
		meeting_id integer PRIMARY KEY AUTOINCREMENT,
		title text NOT NULL,
		description text,
		meet_url text,
		scheduled_at datetime,
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
