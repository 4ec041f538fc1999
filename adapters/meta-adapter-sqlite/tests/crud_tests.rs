//! End-to-end adapter tests against an in-memory database.

use learnhub_meta_adapter_sqlite::MetaAdapterSqlite;
use learnhub::meta_adapter::*;
use learnhub::pagination::PageSpec;
use learnhub::types::{Patch, UserId};

async fn create_test_adapter() -> MetaAdapterSqlite {
	MetaAdapterSqlite::new_in_memory().await.expect("Failed to create adapter")
}

fn spec(page: u32, per_page: u32) -> PageSpec {
	PageSpec { page, per_page }
}

async fn seed_user(adapter: &MetaAdapterSqlite, name: &str) -> UserId {
	adapter
		.create_user(&CreateUser {
			name: name.into(),
			email: format!("{}@example.com", name.to_lowercase()).into(),
			password_hash: "h".into(),
			profile: Profile::Collaborator,
		})
		.await
		.unwrap()
}

fn training(title: &str) -> CreateTraining {
	CreateTraining {
		title: title.into(),
		description: None,
		tutor: None,
		status: Some(TrainingStatus::Published),
	}
}

async fn seed_hierarchy(adapter: &MetaAdapterSqlite) -> (i64, i64, i64) {
	let training_id = adapter.create_training(&training("Rust basics")).await.unwrap();
	let module_id = adapter
		.create_module(&CreateModule {
			training_id,
			title: "Ownership".into(),
			description: None,
			ord: Some(1),
		})
		.await
		.unwrap();
	let submodule_id = adapter
		.create_submodule(&CreateSubmodule {
			module_id,
			title: "Borrowing".into(),
			description: None,
			ord: Some(1),
		})
		.await
		.unwrap();
	(training_id, module_id, submodule_id)
}

#[tokio::test]
async fn test_user_create_read_and_duplicate_email() {
	let adapter = create_test_adapter().await;

	let user_id = adapter
		.create_user(&CreateUser {
			name: "Alice".into(),
			email: "alice@example.com".into(),
			password_hash: "h".into(),
			profile: Profile::Admin,
		})
		.await
		.expect("Should create user");

	let user = adapter.read_user(user_id).await.expect("Should read user back");
	assert_eq!(user.name.as_ref(), "Alice");
	assert_eq!(user.profile, Profile::Admin);

	let dup = adapter
		.create_user(&CreateUser {
			name: "Alice again".into(),
			email: "alice@example.com".into(),
			password_hash: "h".into(),
			profile: Profile::Collaborator,
		})
		.await;
	assert!(matches!(dup, Err(learnhub::error::Error::Validation(_))));

	assert_eq!(adapter.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_training_list_pagination() {
	let adapter = create_test_adapter().await;

	for i in 1..=15 {
		adapter.create_training(&training(&format!("Training {:02}", i))).await.unwrap();
	}

	let page = adapter
		.list_trainings(&ListTrainingOptions::default(), spec(2, 10))
		.await
		.unwrap();
	assert_eq!(page.data.len(), 5);
	assert_eq!(page.meta.total, 15);
	assert_eq!(page.meta.page, 2);
	assert_eq!(page.meta.last_page, 2);

	// Past the last page: empty data, meta still describes the whole set
	let beyond = adapter
		.list_trainings(&ListTrainingOptions::default(), spec(5, 10))
		.await
		.unwrap();
	assert!(beyond.data.is_empty());
	assert_eq!(beyond.meta.total, 15);
	assert_eq!(beyond.meta.last_page, 2);
}

#[tokio::test]
async fn test_training_title_filter_is_case_sensitive_contains() {
	let adapter = create_test_adapter().await;

	adapter.create_training(&training("Advanced Rust")).await.unwrap();
	adapter.create_training(&training("advanced cooking")).await.unwrap();
	adapter.create_training(&training("Intro")).await.unwrap();

	let opts = ListTrainingOptions { title: Some("Advanced".into()), status: None };
	let page = adapter.list_trainings(&opts, spec(1, 20)).await.unwrap();
	assert_eq!(page.data.len(), 1);
	assert_eq!(page.data[0].title.as_ref(), "Advanced Rust");
}

#[tokio::test]
async fn test_training_patch_update() {
	let adapter = create_test_adapter().await;
	let training_id = adapter.create_training(&training("Old title")).await.unwrap();

	let update = UpdateTraining {
		title: Patch::Value("New title".into()),
		description: Patch::Null,
		..Default::default()
	};
	adapter.update_training(training_id, &update).await.unwrap();

	let read = adapter.read_training(training_id).await.unwrap();
	assert_eq!(read.title.as_ref(), "New title");
	assert!(read.description.is_none());
	// Untouched field survives
	assert_eq!(read.status, TrainingStatus::Published);

	// Empty patch against a bad id still reports NotFound
	let missing = adapter.update_training(9999, &UpdateTraining::default()).await;
	assert!(matches!(missing, Err(learnhub::error::Error::NotFound)));
}

#[tokio::test]
async fn test_module_requires_existing_training() {
	let adapter = create_test_adapter().await;

	let orphan = adapter
		.create_module(&CreateModule {
			training_id: 42,
			title: "Orphan".into(),
			description: None,
			ord: None,
		})
		.await;
	assert!(matches!(orphan, Err(learnhub::error::Error::NotFound)));
}

#[tokio::test]
async fn test_modules_list_ordered_by_ord() {
	let adapter = create_test_adapter().await;
	let training_id = adapter.create_training(&training("T")).await.unwrap();

	for (title, ord) in [("Third", 3), ("First", 1), ("Second", 2)] {
		adapter
			.create_module(&CreateModule {
				training_id,
				title: title.into(),
				description: None,
				ord: Some(ord),
			})
			.await
			.unwrap();
	}

	let opts = ListModuleOptions { training_id: Some(training_id), title: None };
	let page = adapter.list_modules(&opts, spec(1, 20)).await.unwrap();
	let titles: Vec<&str> = page.data.iter().map(|m| m.title.as_ref()).collect();
	assert_eq!(titles, ["First", "Second", "Third"]);
}

#[tokio::test]
async fn test_training_grant_with_cascade_reaches_descendants() {
	let adapter = create_test_adapter().await;
	let (training_id, module_id, submodule_id) = seed_hierarchy(&adapter).await;
	let user = seed_user(&adapter, "Dana").await;

	let change = PermissionChange { added_users: vec![user], removed_users: vec![], cascade: true };
	adapter.update_permissions(PermLevel::Training, training_id, &change).await.unwrap();

	// Once the call returns, the whole subtree is already granted
	assert_eq!(adapter.list_permissions(PermLevel::Training, training_id).await.unwrap(), [user]);
	assert_eq!(adapter.list_permissions(PermLevel::Module, module_id).await.unwrap(), [user]);
	assert_eq!(adapter.list_permissions(PermLevel::Submodule, submodule_id).await.unwrap(), [user]);
}

#[tokio::test]
async fn test_training_revoke_with_cascade_strips_descendants() {
	let adapter = create_test_adapter().await;
	let (training_id, module_id, submodule_id) = seed_hierarchy(&adapter).await;
	let keep = seed_user(&adapter, "Keep").await;
	let strip = seed_user(&adapter, "Strip").await;

	let grant = PermissionChange {
		added_users: vec![keep, strip],
		removed_users: vec![],
		cascade: true,
	};
	adapter.update_permissions(PermLevel::Training, training_id, &grant).await.unwrap();

	let revoke =
		PermissionChange { added_users: vec![], removed_users: vec![strip], cascade: true };
	adapter.update_permissions(PermLevel::Training, training_id, &revoke).await.unwrap();

	assert_eq!(adapter.list_permissions(PermLevel::Training, training_id).await.unwrap(), [keep]);
	assert_eq!(adapter.list_permissions(PermLevel::Module, module_id).await.unwrap(), [keep]);
	assert_eq!(adapter.list_permissions(PermLevel::Submodule, submodule_id).await.unwrap(), [keep]);
}

#[tokio::test]
async fn test_module_grant_cascades_up_to_training_and_down_to_submodules() {
	let adapter = create_test_adapter().await;
	let (training_id, module_id, submodule_id) = seed_hierarchy(&adapter).await;
	let user = seed_user(&adapter, "Erin").await;

	let change = PermissionChange { added_users: vec![user], removed_users: vec![], cascade: true };
	adapter.update_permissions(PermLevel::Module, module_id, &change).await.unwrap();

	assert_eq!(adapter.list_permissions(PermLevel::Module, module_id).await.unwrap(), [user]);
	assert_eq!(adapter.list_permissions(PermLevel::Submodule, submodule_id).await.unwrap(), [user]);
	assert_eq!(adapter.list_permissions(PermLevel::Training, training_id).await.unwrap(), [user]);
}

#[tokio::test]
async fn test_module_revoke_does_not_touch_the_training() {
	let adapter = create_test_adapter().await;
	let (training_id, module_id, _submodule_id) = seed_hierarchy(&adapter).await;
	let user = seed_user(&adapter, "Frank").await;

	let grant = PermissionChange { added_users: vec![user], removed_users: vec![], cascade: true };
	adapter.update_permissions(PermLevel::Training, training_id, &grant).await.unwrap();

	let revoke = PermissionChange { added_users: vec![], removed_users: vec![user], cascade: true };
	adapter.update_permissions(PermLevel::Module, module_id, &revoke).await.unwrap();

	assert!(adapter.list_permissions(PermLevel::Module, module_id).await.unwrap().is_empty());
	// Training access survives a module-level revoke
	assert_eq!(adapter.list_permissions(PermLevel::Training, training_id).await.unwrap(), [user]);
}

#[tokio::test]
async fn test_cascade_on_empty_training_touches_only_the_training() {
	let adapter = create_test_adapter().await;
	let training_id = adapter.create_training(&training("Bare")).await.unwrap();
	let user = seed_user(&adapter, "Grace").await;

	let change = PermissionChange { added_users: vec![user], removed_users: vec![], cascade: true };
	adapter.update_permissions(PermLevel::Training, training_id, &change).await.unwrap();

	assert_eq!(adapter.list_permissions(PermLevel::Training, training_id).await.unwrap(), [user]);
}

#[tokio::test]
async fn test_grant_to_unknown_user_fails_and_rolls_back() {
	let adapter = create_test_adapter().await;
	let (training_id, module_id, _submodule_id) = seed_hierarchy(&adapter).await;
	let known = seed_user(&adapter, "Ivan").await;

	let change = PermissionChange {
		added_users: vec![known, UserId(999)],
		removed_users: vec![],
		cascade: true,
	};
	let res = adapter.update_permissions(PermLevel::Training, training_id, &change).await;
	assert!(matches!(res, Err(learnhub::error::Error::NotFound)));

	// Nothing landed, not even for the known user
	assert!(adapter.list_permissions(PermLevel::Training, training_id).await.unwrap().is_empty());
	assert!(adapter.list_permissions(PermLevel::Module, module_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_permission_update_on_missing_node_fails() {
	let adapter = create_test_adapter().await;

	let change =
		PermissionChange { added_users: vec![UserId(1)], removed_users: vec![], cascade: false };
	let res = adapter.update_permissions(PermLevel::Training, 404, &change).await;
	assert!(matches!(res, Err(learnhub::error::Error::NotFound)));
}

#[tokio::test]
async fn test_granted_trainings_show_up_for_user_published_only() {
	let adapter = create_test_adapter().await;
	let user = seed_user(&adapter, "Heidi").await;

	let published = adapter.create_training(&training("Visible")).await.unwrap();
	let draft = adapter
		.create_training(&CreateTraining {
			title: "Hidden".into(),
			description: None,
			tutor: None,
			status: Some(TrainingStatus::Draft),
		})
		.await
		.unwrap();

	let change = PermissionChange { added_users: vec![user], removed_users: vec![], cascade: false };
	adapter.update_permissions(PermLevel::Training, published, &change).await.unwrap();
	adapter.update_permissions(PermLevel::Training, draft, &change).await.unwrap();

	let page = adapter.list_trainings_for_user(user, spec(1, 20)).await.unwrap();
	assert_eq!(page.data.len(), 1);
	assert_eq!(page.data[0].training_id, published);
}

#[tokio::test]
async fn test_money_request_lifecycle() {
	let adapter = create_test_adapter().await;
	let user = UserId(1);

	let id = adapter
		.create_money_request(
			MoneyKind::Payment,
			user,
			&CreateMoneyRequest { value: 12_50, type_id: Some(2) },
		)
		.await
		.unwrap();

	let req = adapter.read_money_request(MoneyKind::Payment, id).await.unwrap();
	assert_eq!(req.status, RequestStatus::Pending);
	assert_eq!(req.value, 12_50);
	assert_eq!(req.user_id, user);

	let update = UpdateMoneyRequest {
		status: Patch::Value(RequestStatus::Paid),
		..Default::default()
	};
	adapter.update_money_request(MoneyKind::Payment, id, &update).await.unwrap();
	let req = adapter.read_money_request(MoneyKind::Payment, id).await.unwrap();
	assert_eq!(req.status, RequestStatus::Paid);

	// Payment ids never leak into the refund table
	let refund = adapter.read_money_request(MoneyKind::Refund, id).await;
	assert!(matches!(refund, Err(learnhub::error::Error::NotFound)));
}

#[tokio::test]
async fn test_money_request_list_filters() {
	let adapter = create_test_adapter().await;

	for user in [UserId(1), UserId(1), UserId(2)] {
		adapter
			.create_money_request(
				MoneyKind::Refund,
				user,
				&CreateMoneyRequest { value: 100, type_id: None },
			)
			.await
			.unwrap();
	}

	let opts = ListMoneyOptions { status: None, user: Some(UserId(1)) };
	let page = adapter.list_money_requests(MoneyKind::Refund, &opts, spec(1, 20)).await.unwrap();
	assert_eq!(page.meta.total, 2);

	let opts = ListMoneyOptions { status: Some(RequestStatus::Paid), user: None };
	let page = adapter.list_money_requests(MoneyKind::Refund, &opts, spec(1, 20)).await.unwrap();
	assert_eq!(page.meta.total, 0);
}

#[tokio::test]
async fn test_notification_fan_out_and_mark_read() {
	let adapter = create_test_adapter().await;
	let (alice, bob, carol) = (UserId(1), UserId(2), UserId(3));

	let id = adapter
		.create_notification(&CreateNotification {
			title: "Maintenance".into(),
			content: Some("Friday night".into()),
			users: vec![alice, bob],
		})
		.await
		.unwrap();

	let page = adapter.list_notifications_for_user(alice, spec(1, 20)).await.unwrap();
	assert_eq!(page.data.len(), 1);
	assert!(!page.data[0].read);

	// Not a recipient
	let page = adapter.list_notifications_for_user(carol, spec(1, 20)).await.unwrap();
	assert!(page.data.is_empty());

	adapter.mark_notification_read(alice, id).await.unwrap();
	let page = adapter.list_notifications_for_user(alice, spec(1, 20)).await.unwrap();
	assert!(page.data[0].read);

	// Bob's copy is untouched
	let page = adapter.list_notifications_for_user(bob, spec(1, 20)).await.unwrap();
	assert!(!page.data[0].read);

	let res = adapter.mark_notification_read(carol, id).await;
	assert!(matches!(res, Err(learnhub::error::Error::NotFound)));
}

#[tokio::test]
async fn test_meeting_crud() {
	let adapter = create_test_adapter().await;

	let id = adapter
		.create_meeting(&CreateMeeting {
			title: "Kickoff".into(),
			description: None,
			meet_url: Some("https://meet.example.com/kickoff".into()),
			scheduled_at: None,
		})
		.await
		.unwrap();

	let meeting = adapter.read_meeting(id).await.unwrap();
	assert_eq!(meeting.title.as_ref(), "Kickoff");

	adapter
		.update_meeting(
			id,
			&UpdateMeeting { title: Patch::Value("Kickoff (moved)".into()), ..Default::default() },
		)
		.await
		.unwrap();
	let meeting = adapter.read_meeting(id).await.unwrap();
	assert_eq!(meeting.title.as_ref(), "Kickoff (moved)");

	let page = adapter
		.list_meetings(&ListMeetingOptions { title: Some("Kickoff".into()) }, spec(1, 20))
		.await
		.unwrap();
	assert_eq!(page.meta.total, 1);
}

// vim: ts=4
