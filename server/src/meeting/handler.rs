use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};

use crate::core::AdminAuth;
use crate::prelude::*;
use learnhub_types::meta_adapter::{CreateMeeting, ListMeetingOptions, Meeting, UpdateMeeting};
use learnhub_types::pagination::{Page, PageRequest};

/// # POST /api/meetings
pub async fn post_meeting(
	State(app): State<App>,
	_admin: AdminAuth,
	Json(req): Json<CreateMeeting>,
) -> LhResult<(StatusCode, Json<Meeting>)> {
	if req.title.trim().is_empty() {
		return Err(Error::Validation("title must not be empty".into()));
	}

	let meeting_id = app.meta_adapter.create_meeting(&req).await?;
	let meeting = app.meta_adapter.read_meeting(meeting_id).await?;

	Ok((StatusCode::CREATED, Json(meeting)))
}

/// # GET /api/meetings/{id}
pub async fn get_meeting(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(meeting_id): Path<i64>,
) -> LhResult<Json<Meeting>> {
	let meeting = app.meta_adapter.read_meeting(meeting_id).await?;

	Ok(Json(meeting))
}

/// # PATCH /api/meetings/{id}
pub async fn patch_meeting(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(meeting_id): Path<i64>,
	Json(req): Json<UpdateMeeting>,
) -> LhResult<Json<Meeting>> {
	if let Patch::Value(title) = &req.title {
		if title.trim().is_empty() {
			return Err(Error::Validation("title must not be empty".into()));
		}
	}

	app.meta_adapter.update_meeting(meeting_id, &req).await?;
	let meeting = app.meta_adapter.read_meeting(meeting_id).await?;

	Ok(Json(meeting))
}

/// # GET /api/meetings
pub async fn list_meetings(
	State(app): State<App>,
	Query(opts): Query<ListMeetingOptions>,
	Query(page): Query<PageRequest>,
) -> LhResult<Json<Page<Meeting>>> {
	let spec = app.opts.page.resolve(&page);
	let meetings = app.meta_adapter.list_meetings(&opts, spec).await?;

	Ok(Json(meetings))
}

// vim: ts=4
