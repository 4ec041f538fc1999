//! Adapter that stores and queries all application metadata: users, the
//! training content hierarchy, permission records, payment/refund requests,
//! notifications and meetings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::pagination::{Page, PageSpec};
use crate::prelude::*;

// Users //
//*******//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profile {
	Admin,
	Collaborator,
}

#[derive(Debug, Serialize)]
pub struct User {
	#[serde(rename = "id")]
	pub user_id: UserId,
	pub name: Box<str>,
	pub email: Box<str>,
	pub profile: Profile,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

/// Credential row used by the login flow only, never serialized.
#[derive(Debug)]
pub struct UserAuth {
	pub user_id: UserId,
	pub name: Box<str>,
	pub profile: Profile,
	pub password_hash: Box<str>,
}

#[derive(Debug)]
pub struct CreateUser {
	pub name: Box<str>,
	pub email: Box<str>,
	/// Already hashed by the caller; adapters never see plaintext passwords.
	pub password_hash: Box<str>,
	pub profile: Profile,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListUserOptions {
	pub name: Option<Box<str>>,
	pub profile: Option<Profile>,
}

// Training hierarchy //
//********************//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainingStatus {
	Draft,
	Published,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct Training {
	#[serde(rename = "id")]
	pub training_id: i64,
	pub title: Box<str>,
	pub description: Option<Box<str>>,
	pub tutor: Option<Box<str>>,
	#[serde(rename = "thumbnailKey")]
	pub thumbnail: Option<Box<str>>,
	pub status: TrainingStatus,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateTraining {
	pub title: Box<str>,
	pub description: Option<Box<str>>,
	pub tutor: Option<Box<str>>,
	pub status: Option<TrainingStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTraining {
	#[serde(default)]
	pub title: Patch<Box<str>>,
	#[serde(default)]
	pub description: Patch<Box<str>>,
	#[serde(default)]
	pub tutor: Patch<Box<str>>,
	#[serde(default)]
	pub status: Patch<TrainingStatus>,
	#[serde(default, skip)]
	pub thumbnail: Patch<Box<str>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListTrainingOptions {
	pub title: Option<Box<str>>,
	pub status: Option<TrainingStatus>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct Module {
	#[serde(rename = "id")]
	pub module_id: i64,
	#[serde(rename = "trainingId")]
	pub training_id: i64,
	pub title: Box<str>,
	pub description: Option<Box<str>>,
	#[serde(rename = "thumbnailKey")]
	pub thumbnail: Option<Box<str>>,
	pub ord: i64,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateModule {
	#[serde(rename = "trainingId")]
	pub training_id: i64,
	pub title: Box<str>,
	pub description: Option<Box<str>>,
	pub ord: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateModule {
	#[serde(default)]
	pub title: Patch<Box<str>>,
	#[serde(default)]
	pub description: Patch<Box<str>>,
	#[serde(default)]
	pub ord: Patch<i64>,
	#[serde(default, skip)]
	pub thumbnail: Patch<Box<str>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListModuleOptions {
	#[serde(rename = "trainingId")]
	pub training_id: Option<i64>,
	pub title: Option<Box<str>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct Submodule {
	#[serde(rename = "id")]
	pub submodule_id: i64,
	#[serde(rename = "moduleId")]
	pub module_id: i64,
	pub title: Box<str>,
	pub description: Option<Box<str>>,
	#[serde(rename = "thumbnailKey")]
	pub thumbnail: Option<Box<str>>,
	pub ord: i64,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubmodule {
	#[serde(rename = "moduleId")]
	pub module_id: i64,
	pub title: Box<str>,
	pub description: Option<Box<str>>,
	pub ord: Option<i64>,
}

pub type UpdateSubmodule = UpdateModule;

#[derive(Debug, Default, Deserialize)]
pub struct ListSubmoduleOptions {
	#[serde(rename = "moduleId")]
	pub module_id: Option<i64>,
	pub title: Option<Box<str>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct Lesson {
	#[serde(rename = "id")]
	pub lesson_id: i64,
	#[serde(rename = "submoduleId")]
	pub submodule_id: i64,
	pub title: Box<str>,
	#[serde(rename = "contentUrl")]
	pub content_url: Option<Box<str>>,
	#[serde(rename = "thumbnailKey")]
	pub thumbnail: Option<Box<str>>,
	pub ord: i64,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateLesson {
	#[serde(rename = "submoduleId")]
	pub submodule_id: i64,
	pub title: Box<str>,
	#[serde(rename = "contentUrl")]
	pub content_url: Option<Box<str>>,
	pub ord: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateLesson {
	#[serde(default)]
	pub title: Patch<Box<str>>,
	#[serde(default, rename = "contentUrl")]
	pub content_url: Patch<Box<str>>,
	#[serde(default)]
	pub ord: Patch<i64>,
	#[serde(default, skip)]
	pub thumbnail: Patch<Box<str>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListLessonOptions {
	#[serde(rename = "submoduleId")]
	pub submodule_id: Option<i64>,
	pub title: Option<Box<str>>,
}

// Permissions //
//*************//
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermLevel {
	Training,
	Module,
	Submodule,
}

#[derive(Debug, Default, Deserialize)]
pub struct PermissionChange {
	#[serde(default, rename = "addedUsers")]
	pub added_users: Vec<UserId>,
	#[serde(default, rename = "removedUsers")]
	pub removed_users: Vec<UserId>,
	#[serde(default, rename = "addRelatives")]
	pub cascade: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermAction {
	Grant,
	Revoke,
}

/// One permission-store write, as planned by [`cascade_plan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermOp {
	pub level: PermLevel,
	pub node_id: i64,
	pub user_id: UserId,
	pub action: PermAction,
}

/// Structural context for a cascade: the relatives of the target node.
/// For a training this is its modules and their submodules; for a module
/// its submodules plus the owning training; for a submodule nothing.
#[derive(Debug, Default)]
pub struct CascadeRelatives {
	pub parent_training: Option<i64>,
	pub module_ids: Vec<i64>,
	pub submodule_ids: Vec<i64>,
}

/// Computes the full set of grant/revoke operations for a permission change.
///
/// Rules: the target node is always touched. When `cascade` is set,
/// revocations propagate downward only, additions propagate downward and,
/// from module level, upward to the owning training. Lessons carry no
/// permission records and are never part of a plan.
pub fn cascade_plan(
	level: PermLevel,
	node_id: i64,
	change: &PermissionChange,
	relatives: &CascadeRelatives,
) -> Vec<PermOp> {
	let mut plan = Vec::new();

	for &user_id in &change.removed_users {
		plan.push(PermOp { level, node_id, user_id, action: PermAction::Revoke });
	}
	for &user_id in &change.added_users {
		plan.push(PermOp { level, node_id, user_id, action: PermAction::Grant });
	}

	if !change.cascade {
		return plan;
	}

	let mut fan_out = |target: PermLevel, ids: &[i64], revoke_too: bool| {
		for &id in ids {
			if revoke_too {
				for &user_id in &change.removed_users {
					plan.push(PermOp {
						level: target,
						node_id: id,
						user_id,
						action: PermAction::Revoke,
					});
				}
			}
			for &user_id in &change.added_users {
				plan.push(PermOp { level: target, node_id: id, user_id, action: PermAction::Grant });
			}
		}
	};

	match level {
		PermLevel::Training => {
			fan_out(PermLevel::Module, &relatives.module_ids, true);
			fan_out(PermLevel::Submodule, &relatives.submodule_ids, true);
		}
		PermLevel::Module => {
			fan_out(PermLevel::Submodule, &relatives.submodule_ids, true);
			// Upward: a module grant is unreachable without the training,
			// but a module revoke must not strip the whole training.
			if let Some(training_id) = relatives.parent_training {
				fan_out(PermLevel::Training, &[training_id], false);
			}
		}
		PermLevel::Submodule => {}
	}

	plan
}

// Payment requests / refunds //
//****************************//
/// Payment requests and refunds share one shape; `MoneyKind` selects the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoneyKind {
	Payment,
	Refund,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
	Pending,
	Paid,
	Cancelled,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct MoneyRequest {
	pub id: i64,
	#[serde(rename = "userId")]
	pub user_id: UserId,
	/// Amount in cents.
	pub value: i64,
	pub status: RequestStatus,
	#[serde(rename = "photoKey")]
	pub photo: Option<Box<str>>,
	#[serde(rename = "approvedPhotoKey")]
	pub approved_photo: Option<Box<str>>,
	pub reason: Option<Box<str>>,
	#[serde(rename = "typeId")]
	pub type_id: Option<i64>,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateMoneyRequest {
	/// Amount in cents.
	pub value: i64,
	#[serde(rename = "typeId")]
	pub type_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMoneyRequest {
	#[serde(default)]
	pub status: Patch<RequestStatus>,
	#[serde(default)]
	pub reason: Patch<Box<str>>,
	#[serde(default, skip)]
	pub photo: Patch<Box<str>>,
	#[serde(default, skip)]
	pub approved_photo: Patch<Box<str>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListMoneyOptions {
	pub status: Option<RequestStatus>,
	pub user: Option<UserId>,
}

// Notifications //
//***************//
#[derive(Debug, Serialize)]
pub struct NotificationView {
	#[serde(rename = "id")]
	pub notification_id: i64,
	pub title: Box<str>,
	pub content: Option<Box<str>>,
	pub read: bool,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateNotification {
	pub title: Box<str>,
	pub content: Option<Box<str>>,
	pub users: Vec<UserId>,
}

// Meetings //
//**********//
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct Meeting {
	#[serde(rename = "id")]
	pub meeting_id: i64,
	pub title: Box<str>,
	pub description: Option<Box<str>>,
	#[serde(rename = "meetUrl")]
	pub meet_url: Option<Box<str>>,
	#[serde(rename = "scheduledAt")]
	pub scheduled_at: Option<Timestamp>,
	#[serde(rename = "createdAt")]
	pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateMeeting {
	pub title: Box<str>,
	pub description: Option<Box<str>>,
	#[serde(rename = "meetUrl")]
	pub meet_url: Option<Box<str>>,
	#[serde(rename = "scheduledAt")]
	pub scheduled_at: Option<Timestamp>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMeeting {
	#[serde(default)]
	pub title: Patch<Box<str>>,
	#[serde(default)]
	pub description: Patch<Box<str>>,
	#[serde(default, rename = "meetUrl")]
	pub meet_url: Patch<Box<str>>,
	#[serde(default, rename = "scheduledAt")]
	pub scheduled_at: Patch<Timestamp>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListMeetingOptions {
	pub title: Option<Box<str>>,
}

// Adapter trait //
//***************//
#[async_trait]
pub trait MetaAdapter: Debug + Send + Sync {
	// # Users
	async fn create_user(&self, user: &CreateUser) -> LhResult<UserId>;
	async fn read_user(&self, user_id: UserId) -> LhResult<User>;
	async fn read_user_auth(&self, email: &str) -> LhResult<UserAuth>;
	async fn list_users(&self, opts: &ListUserOptions, page: PageSpec) -> LhResult<Page<User>>;
	async fn count_users(&self) -> LhResult<u64>;

	// # Trainings
	async fn create_training(&self, training: &CreateTraining) -> LhResult<i64>;
	async fn read_training(&self, training_id: i64) -> LhResult<Training>;
	async fn update_training(&self, training_id: i64, training: &UpdateTraining) -> LhResult<()>;
	async fn list_trainings(
		&self,
		opts: &ListTrainingOptions,
		page: PageSpec,
	) -> LhResult<Page<Training>>;
	/// Trainings the user holds a permission record on, published only.
	async fn list_trainings_for_user(
		&self,
		user_id: UserId,
		page: PageSpec,
	) -> LhResult<Page<Training>>;

	// # Modules
	async fn create_module(&self, module: &CreateModule) -> LhResult<i64>;
	async fn read_module(&self, module_id: i64) -> LhResult<Module>;
	async fn update_module(&self, module_id: i64, module: &UpdateModule) -> LhResult<()>;
	async fn list_modules(&self, opts: &ListModuleOptions, page: PageSpec)
		-> LhResult<Page<Module>>;

	// # Submodules
	async fn create_submodule(&self, submodule: &CreateSubmodule) -> LhResult<i64>;
	async fn read_submodule(&self, submodule_id: i64) -> LhResult<Submodule>;
	async fn update_submodule(
		&self,
		submodule_id: i64,
		submodule: &UpdateSubmodule,
	) -> LhResult<()>;
	async fn list_submodules(
		&self,
		opts: &ListSubmoduleOptions,
		page: PageSpec,
	) -> LhResult<Page<Submodule>>;

	// # Lessons
	async fn create_lesson(&self, lesson: &CreateLesson) -> LhResult<i64>;
	async fn read_lesson(&self, lesson_id: i64) -> LhResult<Lesson>;
	async fn update_lesson(&self, lesson_id: i64, lesson: &UpdateLesson) -> LhResult<()>;
	async fn list_lessons(&self, opts: &ListLessonOptions, page: PageSpec)
		-> LhResult<Page<Lesson>>;

	// # Permissions
	/// Applies a permission change, including the cascade when requested.
	/// The whole change is a single transaction: it either fully applies or
	/// the call fails with nothing written.
	async fn update_permissions(
		&self,
		level: PermLevel,
		node_id: i64,
		change: &PermissionChange,
	) -> LhResult<()>;
	async fn list_permissions(&self, level: PermLevel, node_id: i64) -> LhResult<Vec<UserId>>;

	// # Payment requests / refunds
	async fn create_money_request(
		&self,
		kind: MoneyKind,
		user_id: UserId,
		req: &CreateMoneyRequest,
	) -> LhResult<i64>;
	async fn read_money_request(&self, kind: MoneyKind, id: i64) -> LhResult<MoneyRequest>;
	async fn update_money_request(
		&self,
		kind: MoneyKind,
		id: i64,
		req: &UpdateMoneyRequest,
	) -> LhResult<()>;
	async fn list_money_requests(
		&self,
		kind: MoneyKind,
		opts: &ListMoneyOptions,
		page: PageSpec,
	) -> LhResult<Page<MoneyRequest>>;

	// # Notifications
	/// Creates the notification and fans it out to the given users in one
	/// transaction.
	async fn create_notification(&self, notification: &CreateNotification) -> LhResult<i64>;
	async fn list_notifications_for_user(
		&self,
		user_id: UserId,
		page: PageSpec,
	) -> LhResult<Page<NotificationView>>;
	async fn mark_notification_read(&self, user_id: UserId, notification_id: i64) -> LhResult<()>;

	// # Meetings
	async fn create_meeting(&self, meeting: &CreateMeeting) -> LhResult<i64>;
	async fn read_meeting(&self, meeting_id: i64) -> LhResult<Meeting>;
	async fn update_meeting(&self, meeting_id: i64, meeting: &UpdateMeeting) -> LhResult<()>;
	async fn list_meetings(
		&self,
		opts: &ListMeetingOptions,
		page: PageSpec,
	) -> LhResult<Page<Meeting>>;
}

#[cfg(test)]
mod test {
	use super::*;

	fn change(added: &[i64], removed: &[i64], cascade: bool) -> PermissionChange {
		PermissionChange {
			added_users: added.iter().map(|&id| UserId(id)).collect(),
			removed_users: removed.iter().map(|&id| UserId(id)).collect(),
			cascade,
		}
	}

	fn count(plan: &[PermOp], level: PermLevel, action: PermAction) -> usize {
		plan.iter().filter(|op| op.level == level && op.action == action).count()
	}

	#[test]
	fn no_cascade_touches_only_the_target() {
		let relatives = CascadeRelatives {
			module_ids: vec![10, 11],
			submodule_ids: vec![100],
			..Default::default()
		};
		let plan = cascade_plan(PermLevel::Training, 1, &change(&[7], &[8], false), &relatives);
		assert_eq!(plan.len(), 2);
		assert!(plan.iter().all(|op| op.level == PermLevel::Training && op.node_id == 1));
	}

	#[test]
	fn training_cascade_reaches_modules_and_submodules() {
		let relatives = CascadeRelatives {
			module_ids: vec![10, 11],
			submodule_ids: vec![100, 101, 102],
			..Default::default()
		};
		let plan = cascade_plan(PermLevel::Training, 1, &change(&[7], &[], true), &relatives);
		assert_eq!(count(&plan, PermLevel::Training, PermAction::Grant), 1);
		assert_eq!(count(&plan, PermLevel::Module, PermAction::Grant), 2);
		assert_eq!(count(&plan, PermLevel::Submodule, PermAction::Grant), 3);
	}

	#[test]
	fn training_cascade_with_no_relatives_is_just_the_target() {
		let plan = cascade_plan(
			PermLevel::Training,
			1,
			&change(&[7], &[], true),
			&CascadeRelatives::default(),
		);
		assert_eq!(plan.len(), 1);
		assert_eq!(plan[0].node_id, 1);
	}

	#[test]
	fn module_add_cascades_up_but_revoke_does_not() {
		let relatives = CascadeRelatives {
			parent_training: Some(1),
			submodule_ids: vec![100],
			..Default::default()
		};
		let plan = cascade_plan(PermLevel::Module, 10, &change(&[7], &[8], true), &relatives);
		assert_eq!(count(&plan, PermLevel::Training, PermAction::Grant), 1);
		assert_eq!(count(&plan, PermLevel::Training, PermAction::Revoke), 0);
		assert_eq!(count(&plan, PermLevel::Submodule, PermAction::Grant), 1);
		assert_eq!(count(&plan, PermLevel::Submodule, PermAction::Revoke), 1);
	}

	#[test]
	fn permission_change_uses_camel_case_wire_names() {
		let change: PermissionChange = serde_json::from_str(
			r#"{"addedUsers": [7, 8], "removedUsers": [9], "addRelatives": true}"#,
		)
		.unwrap();
		assert_eq!(change.added_users, [UserId(7), UserId(8)]);
		assert_eq!(change.removed_users, [UserId(9)]);
		assert!(change.cascade);

		// Every field is optional on the wire
		let change: PermissionChange = serde_json::from_str("{}").unwrap();
		assert!(change.added_users.is_empty());
		assert!(change.removed_users.is_empty());
		assert!(!change.cascade);
	}

	#[test]
	fn submodule_cascade_stops_at_the_submodule() {
		let plan = cascade_plan(
			PermLevel::Submodule,
			100,
			&change(&[7], &[8], true),
			&CascadeRelatives { parent_training: Some(1), ..Default::default() },
		);
		assert_eq!(plan.len(), 2);
		assert!(plan.iter().all(|op| op.level == PermLevel::Submodule));
	}
}

// vim: ts=4
