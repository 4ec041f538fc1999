use axum::{middleware, routing::{get, post, put}, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::route_auth::require_auth;
use crate::{auth, meeting, notification, payment, store, training, user, App};

// Admin-only handlers enforce the profile themselves through the AdminAuth
// extractor, so a single authenticated router covers both roles.
fn protected_routes(state: App) -> Router<App> {
	Router::new()
		// users
		.route("/api/me", get(user::handler::get_me))
		.route("/api/users", get(user::handler::list_users).post(user::handler::post_user))
		// trainings
		.route("/api/trainings", get(training::handler::list_trainings).post(training::handler::post_training))
		.route("/api/trainings/{id}", get(training::handler::get_training).patch(training::handler::patch_training))
		.route("/api/trainings/{id}/thumbnail", put(training::handler::put_thumbnail))
		.route("/api/trainings/{id}/permissions",
			get(training::perm::get_training_permissions).post(training::perm::post_training_permissions))
		.route("/api/my/trainings", get(training::handler::list_my_trainings))
		// modules
		.route("/api/modules", get(training::module::list_modules).post(training::module::post_module))
		.route("/api/modules/{id}", get(training::module::get_module).patch(training::module::patch_module))
		.route("/api/modules/{id}/thumbnail", put(training::module::put_thumbnail))
		.route("/api/modules/{id}/permissions",
			get(training::perm::get_module_permissions).post(training::perm::post_module_permissions))
		// submodules
		.route("/api/submodules", get(training::submodule::list_submodules).post(training::submodule::post_submodule))
		.route("/api/submodules/{id}", get(training::submodule::get_submodule).patch(training::submodule::patch_submodule))
		.route("/api/submodules/{id}/thumbnail", put(training::submodule::put_thumbnail))
		.route("/api/submodules/{id}/permissions",
			get(training::perm::get_submodule_permissions).post(training::perm::post_submodule_permissions))
		// lessons (no permission records)
		.route("/api/lessons", get(training::lesson::list_lessons).post(training::lesson::post_lesson))
		.route("/api/lessons/{id}", get(training::lesson::get_lesson).patch(training::lesson::patch_lesson))
		.route("/api/lessons/{id}/thumbnail", put(training::lesson::put_thumbnail))
		// payment requests / refunds
		.route("/api/payment-requests",
			get(payment::handler::list_payments).post(payment::handler::post_payment))
		.route("/api/payment-requests/{id}", axum::routing::patch(payment::handler::patch_payment))
		.route("/api/payment-requests/{id}/photo", put(payment::handler::put_payment_photo))
		.route("/api/payment-requests/{id}/approved-photo", put(payment::handler::put_payment_approved_photo))
		.route("/api/refunds", get(payment::handler::list_refunds).post(payment::handler::post_refund))
		.route("/api/refunds/{id}", axum::routing::patch(payment::handler::patch_refund))
		.route("/api/refunds/{id}/photo", put(payment::handler::put_refund_photo))
		.route("/api/refunds/{id}/approved-photo", put(payment::handler::put_refund_approved_photo))
		.route("/api/my/payment-requests", get(payment::handler::list_my_payments))
		.route("/api/my/refunds", get(payment::handler::list_my_refunds))
		// notifications
		.route("/api/notifications",
			get(notification::handler::list_notifications).post(notification::handler::post_notification))
		.route("/api/notifications/{id}/read", post(notification::handler::post_read))
		// meetings
		.route("/api/meetings", get(meeting::handler::list_meetings).post(meeting::handler::post_meeting))
		.route("/api/meetings/{id}", get(meeting::handler::get_meeting).patch(meeting::handler::patch_meeting))
		// stored photos
		.route("/api/store/{key}", get(store::handler::get_blob))
		.layer(middleware::from_fn_with_state(state, require_auth))
}

pub fn init(state: App) -> Router {
	let public_router = Router::new()
		.route("/api/auth/login", post(auth::handler::post_login));

	Router::new()
		.merge(public_router)
		.merge(protected_routes(state.clone()))
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(state)
}

// vim: ts=4
