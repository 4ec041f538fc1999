//! SQLite implementation of the [`MetaAdapter`] trait.
//!
//! Each domain lives in its own module; this file only wires the pool
//! and delegates the trait calls.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};

use learnhub::meta_adapter::{self, *};
use learnhub::pagination::{Page, PageSpec};
use learnhub::prelude::*;

mod lesson;
mod meeting;
mod module;
mod notification;
mod payment;
mod perm;
mod schema;
mod submodule;
mod training;
mod user;
mod utils;

#[derive(Debug)]
pub struct MetaAdapterSqlite {
	db: SqlitePool,
}

impl MetaAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> LhResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DB: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db).await.inspect_err(|err| error!("DB: {:#?}", err)).or(Err(Error::DbError))?;

		Ok(Self { db })
	}

	/// In-memory instance. A single connection, so the database lives as
	/// long as the pool does.
	pub async fn new_in_memory() -> LhResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new().in_memory(true);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(1)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DB: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db).await.inspect_err(|err| error!("DB: {:#?}", err)).or(Err(Error::DbError))?;

		Ok(Self { db })
	}
}

#[async_trait]
impl meta_adapter::MetaAdapter for MetaAdapterSqlite {
	// Users
	//*******
	async fn create_user(&self, user: &CreateUser) -> LhResult<UserId> {
		user::create(&self.db, user).await
	}

	async fn read_user(&self, user_id: UserId) -> LhResult<User> {
		user::read(&self.db, user_id).await
	}

	async fn read_user_auth(&self, email: &str) -> LhResult<UserAuth> {
		user::read_auth(&self.db, email).await
	}

	async fn list_users(&self, opts: &ListUserOptions, page: PageSpec) -> LhResult<Page<User>> {
		user::list(&self.db, opts, page).await
	}

	async fn count_users(&self) -> LhResult<u64> {
		user::count(&self.db).await
	}

	// Trainings
	//***********
	async fn create_training(&self, training: &CreateTraining) -> LhResult<i64> {
		training::create(&self.db, training).await
	}

	async fn read_training(&self, training_id: i64) -> LhResult<Training> {
		training::read(&self.db, training_id).await
	}

	async fn update_training(&self, training_id: i64, training: &UpdateTraining) -> LhResult<()> {
		training::update(&self.db, training_id, training).await
	}

	async fn list_trainings(
		&self,
		opts: &ListTrainingOptions,
		page: PageSpec,
	) -> LhResult<Page<Training>> {
		training::list(&self.db, opts, page).await
	}

	async fn list_trainings_for_user(
		&self,
		user_id: UserId,
		page: PageSpec,
	) -> LhResult<Page<Training>> {
		training::list_for_user(&self.db, user_id, page).await
	}

	// Modules
	//*********
	async fn create_module(&self, module: &CreateModule) -> LhResult<i64> {
		module::create(&self.db, module).await
	}

	async fn read_module(&self, module_id: i64) -> LhResult<Module> {
		module::read(&self.db, module_id).await
	}

	async fn update_module(&self, module_id: i64, module: &UpdateModule) -> LhResult<()> {
		module::update(&self.db, module_id, module).await
	}

	async fn list_modules(
		&self,
		opts: &ListModuleOptions,
		page: PageSpec,
	) -> LhResult<Page<Module>> {
		module::list(&self.db, opts, page).await
	}

	// Submodules
	//************
	async fn create_submodule(&self, submodule: &CreateSubmodule) -> LhResult<i64> {
		submodule::create(&self.db, submodule).await
	}

	async fn read_submodule(&self, submodule_id: i64) -> LhResult<Submodule> {
		submodule::read(&self.db, submodule_id).await
	}

	async fn update_submodule(
		&self,
		submodule_id: i64,
		submodule: &UpdateSubmodule,
	) -> LhResult<()> {
		submodule::update(&self.db, submodule_id, submodule).await
	}

	async fn list_submodules(
		&self,
		opts: &ListSubmoduleOptions,
		page: PageSpec,
	) -> LhResult<Page<Submodule>> {
		submodule::list(&self.db, opts, page).await
	}

	// Lessons
	//*********
	async fn create_lesson(&self, lesson: &CreateLesson) -> LhResult<i64> {
		lesson::create(&self.db, lesson).await
	}

	async fn read_lesson(&self, lesson_id: i64) -> LhResult<Lesson> {
		lesson::read(&self.db, lesson_id).await
	}

	async fn update_lesson(&self, lesson_id: i64, lesson: &UpdateLesson) -> LhResult<()> {
		lesson::update(&self.db, lesson_id, lesson).await
	}

	async fn list_lessons(
		&self,
		opts: &ListLessonOptions,
		page: PageSpec,
	) -> LhResult<Page<Lesson>> {
		lesson::list(&self.db, opts, page).await
	}

	// Permissions
	//*************
	async fn update_permissions(
		&self,
		level: PermLevel,
		node_id: i64,
		change: &PermissionChange,
	) -> LhResult<()> {
		perm::update(&self.db, level, node_id, change).await
	}

	async fn list_permissions(&self, level: PermLevel, node_id: i64) -> LhResult<Vec<UserId>> {
		perm::list(&self.db, level, node_id).await
	}

	// Payment requests / refunds
	//****************************
	async fn create_money_request(
		&self,
		kind: MoneyKind,
		user_id: UserId,
		req: &CreateMoneyRequest,
	) -> LhResult<i64> {
		payment::create(&self.db, kind, user_id, req).await
	}

	async fn read_money_request(&self, kind: MoneyKind, id: i64) -> LhResult<MoneyRequest> {
		payment::read(&self.db, kind, id).await
	}

	async fn update_money_request(
		&self,
		kind: MoneyKind,
		id: i64,
		req: &UpdateMoneyRequest,
	) -> LhResult<()> {
		payment::update(&self.db, kind, id, req).await
	}

	async fn list_money_requests(
		&self,
		kind: MoneyKind,
		opts: &ListMoneyOptions,
		page: PageSpec,
	) -> LhResult<Page<MoneyRequest>> {
		payment::list(&self.db, kind, opts, page).await
	}

	// Notifications
	//***************
	async fn create_notification(&self, notification: &CreateNotification) -> LhResult<i64> {
		notification::create(&self.db, notification).await
	}

	async fn list_notifications_for_user(
		&self,
		user_id: UserId,
		page: PageSpec,
	) -> LhResult<Page<NotificationView>> {
		notification::list_for_user(&self.db, user_id, page).await
	}

	async fn mark_notification_read(&self, user_id: UserId, notification_id: i64) -> LhResult<()> {
		notification::mark_read(&self.db, user_id, notification_id).await
	}

	// Meetings
	//**********
	async fn create_meeting(&self, meeting: &CreateMeeting) -> LhResult<i64> {
		meeting::create(&self.db, meeting).await
	}

	async fn read_meeting(&self, meeting_id: i64) -> LhResult<Meeting> {
		meeting::read(&self.db, meeting_id).await
	}

	async fn update_meeting(&self, meeting_id: i64, meeting: &UpdateMeeting) -> LhResult<()> {
		meeting::update(&self.db, meeting_id, meeting).await
	}

	async fn list_meetings(
		&self,
		opts: &ListMeetingOptions,
		page: PageSpec,
	) -> LhResult<Page<Meeting>> {
		meeting::list(&self.db, opts, page).await
	}
}

// vim: ts=4
