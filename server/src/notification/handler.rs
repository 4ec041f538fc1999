use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};
use serde_json::json;

use crate::core::{AdminAuth, Auth};
use crate::prelude::*;
use learnhub_types::meta_adapter::{CreateNotification, NotificationView};
use learnhub_types::pagination::{Page, PageRequest};

/// # POST /api/notifications
///
/// Creates the notification and fans it out to the listed users in one
/// transaction.
pub async fn post_notification(
	State(app): State<App>,
	_admin: AdminAuth,
	Json(req): Json<CreateNotification>,
) -> LhResult<(StatusCode, Json<serde_json::Value>)> {
	if req.title.trim().is_empty() {
		return Err(Error::Validation("title must not be empty".into()));
	}
	if req.users.is_empty() {
		return Err(Error::Validation("no recipients given".into()));
	}

	let notification_id = app.meta_adapter.create_notification(&req).await?;

	Ok((StatusCode::CREATED, Json(json!({ "id": notification_id }))))
}

/// # GET /api/notifications
pub async fn list_notifications(
	State(app): State<App>,
	Auth(ctx): Auth,
	Query(page): Query<PageRequest>,
) -> LhResult<Json<Page<NotificationView>>> {
	let spec = app.opts.page.resolve(&page);
	let notifications = app.meta_adapter.list_notifications_for_user(ctx.user_id, spec).await?;

	Ok(Json(notifications))
}

/// # POST /api/notifications/{id}/read
pub async fn post_read(
	State(app): State<App>,
	Auth(ctx): Auth,
	Path(notification_id): Path<i64>,
) -> LhResult<StatusCode> {
	app.meta_adapter.mark_notification_read(ctx.user_id, notification_id).await?;

	Ok(StatusCode::NO_CONTENT)
}

// vim: ts=4
