use axum::{
	body::Bytes,
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};

use crate::core::{AdminAuth, Auth};
use crate::prelude::*;
use crate::store;
use crate::training::handler::{UploadQuery, UploadRes};
use learnhub_types::meta_adapter::{
	CreateMoneyRequest, ListMoneyOptions, MoneyKind, MoneyRequest, Profile, UpdateMoneyRequest,
};
use learnhub_types::pagination::{Page, PageRequest};

fn photo_kind(kind: MoneyKind) -> &'static str {
	match kind {
		MoneyKind::Payment => "pay",
		MoneyKind::Refund => "ref",
	}
}

async fn create(
	app: &App,
	auth: Auth,
	kind: MoneyKind,
	req: CreateMoneyRequest,
) -> LhResult<(StatusCode, Json<MoneyRequest>)> {
	if req.value <= 0 {
		return Err(Error::Validation("value must be positive".into()));
	}

	let id = app.meta_adapter.create_money_request(kind, auth.0.user_id, &req).await?;
	let request = app.meta_adapter.read_money_request(kind, id).await?;

	Ok((StatusCode::CREATED, Json(request)))
}

async fn list(
	app: &App,
	kind: MoneyKind,
	opts: ListMoneyOptions,
	page: PageRequest,
) -> LhResult<Json<Page<MoneyRequest>>> {
	let spec = app.opts.page.resolve(&page);
	let requests = app.meta_adapter.list_money_requests(kind, &opts, spec).await?;

	Ok(Json(requests))
}

async fn list_own(
	app: &App,
	auth: Auth,
	kind: MoneyKind,
	page: PageRequest,
) -> LhResult<Json<Page<MoneyRequest>>> {
	let opts = ListMoneyOptions { status: None, user: Some(auth.0.user_id) };
	list(app, kind, opts, page).await
}

async fn patch(
	app: &App,
	kind: MoneyKind,
	id: i64,
	req: UpdateMoneyRequest,
) -> LhResult<Json<MoneyRequest>> {
	app.meta_adapter.update_money_request(kind, id, &req).await?;
	let request = app.meta_adapter.read_money_request(kind, id).await?;

	Ok(Json(request))
}

/// Receipt photo, uploaded by the requester.
async fn put_photo(
	app: &App,
	auth: Auth,
	kind: MoneyKind,
	id: i64,
	ext: &str,
	data: &[u8],
) -> LhResult<Json<UploadRes>> {
	let request = app.meta_adapter.read_money_request(kind, id).await?;
	if request.user_id != auth.0.user_id && auth.0.profile != Profile::Admin {
		return Err(Error::PermissionDenied);
	}

	let key = store::store_photo(app, photo_kind(kind), id, ext, data).await?;
	let update = UpdateMoneyRequest { photo: Patch::Value(key.clone()), ..Default::default() };
	app.meta_adapter.update_money_request(kind, id, &update).await?;

	Ok(Json(UploadRes { url: store::store_url(&key), key }))
}

/// Proof-of-payment photo, uploaded by an admin on approval.
async fn put_approved_photo(
	app: &App,
	kind: MoneyKind,
	id: i64,
	ext: &str,
	data: &[u8],
) -> LhResult<Json<UploadRes>> {
	app.meta_adapter.read_money_request(kind, id).await?;

	let key = store::store_photo(app, photo_kind(kind), id, ext, data).await?;
	let update =
		UpdateMoneyRequest { approved_photo: Patch::Value(key.clone()), ..Default::default() };
	app.meta_adapter.update_money_request(kind, id, &update).await?;

	Ok(Json(UploadRes { url: store::store_url(&key), key }))
}

// Payment requests //
//******************//

/// # POST /api/payment-requests
pub async fn post_payment(
	State(app): State<App>,
	auth: Auth,
	Json(req): Json<CreateMoneyRequest>,
) -> LhResult<(StatusCode, Json<MoneyRequest>)> {
	create(&app, auth, MoneyKind::Payment, req).await
}

/// # GET /api/payment-requests
pub async fn list_payments(
	State(app): State<App>,
	_admin: AdminAuth,
	Query(opts): Query<ListMoneyOptions>,
	Query(page): Query<PageRequest>,
) -> LhResult<Json<Page<MoneyRequest>>> {
	list(&app, MoneyKind::Payment, opts, page).await
}

/// # GET /api/my/payment-requests
pub async fn list_my_payments(
	State(app): State<App>,
	auth: Auth,
	Query(page): Query<PageRequest>,
) -> LhResult<Json<Page<MoneyRequest>>> {
	list_own(&app, auth, MoneyKind::Payment, page).await
}

/// # PATCH /api/payment-requests/{id}
pub async fn patch_payment(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(id): Path<i64>,
	Json(req): Json<UpdateMoneyRequest>,
) -> LhResult<Json<MoneyRequest>> {
	patch(&app, MoneyKind::Payment, id, req).await
}

/// # PUT /api/payment-requests/{id}/photo
pub async fn put_payment_photo(
	State(app): State<App>,
	auth: Auth,
	Path(id): Path<i64>,
	Query(query): Query<UploadQuery>,
	body: Bytes,
) -> LhResult<Json<UploadRes>> {
	put_photo(&app, auth, MoneyKind::Payment, id, &query.ext, &body).await
}

/// # PUT /api/payment-requests/{id}/approved-photo
pub async fn put_payment_approved_photo(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(id): Path<i64>,
	Query(query): Query<UploadQuery>,
	body: Bytes,
) -> LhResult<Json<UploadRes>> {
	put_approved_photo(&app, MoneyKind::Payment, id, &query.ext, &body).await
}

// Refunds //
//*********//

/// # POST /api/refunds
pub async fn post_refund(
	State(app): State<App>,
	auth: Auth,
	Json(req): Json<CreateMoneyRequest>,
) -> LhResult<(StatusCode, Json<MoneyRequest>)> {
	create(&app, auth, MoneyKind::Refund, req).await
}

/// # GET /api/refunds
pub async fn list_refunds(
	State(app): State<App>,
	_admin: AdminAuth,
	Query(opts): Query<ListMoneyOptions>,
	Query(page): Query<PageRequest>,
) -> LhResult<Json<Page<MoneyRequest>>> {
	list(&app, MoneyKind::Refund, opts, page).await
}

/// # GET /api/my/refunds
pub async fn list_my_refunds(
	State(app): State<App>,
	auth: Auth,
	Query(page): Query<PageRequest>,
) -> LhResult<Json<Page<MoneyRequest>>> {
	list_own(&app, auth, MoneyKind::Refund, page).await
}

/// # PATCH /api/refunds/{id}
pub async fn patch_refund(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(id): Path<i64>,
	Json(req): Json<UpdateMoneyRequest>,
) -> LhResult<Json<MoneyRequest>> {
	patch(&app, MoneyKind::Refund, id, req).await
}

/// # PUT /api/refunds/{id}/photo
pub async fn put_refund_photo(
	State(app): State<App>,
	auth: Auth,
	Path(id): Path<i64>,
	Query(query): Query<UploadQuery>,
	body: Bytes,
) -> LhResult<Json<UploadRes>> {
	put_photo(&app, auth, MoneyKind::Refund, id, &query.ext, &body).await
}

/// # PUT /api/refunds/{id}/approved-photo
pub async fn put_refund_approved_photo(
	State(app): State<App>,
	_admin: AdminAuth,
	Path(id): Path<i64>,
	Query(query): Query<UploadQuery>,
	body: Bytes,
) -> LhResult<Json<UploadRes>> {
	put_approved_photo(&app, MoneyKind::Refund, id, &query.ext, &body).await
}

// vim: ts=4
