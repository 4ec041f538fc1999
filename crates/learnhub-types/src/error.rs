use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub type LhResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Entity id did not resolve. Surfaced to the user as "invalid ID".
	NotFound,
	PermissionDenied,
	Validation(Box<str>),
	DbError,
	Parse,

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<axum::http::Error> for Error {
	fn from(_err: axum::http::Error) -> Self {
		Self::Parse
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "invalid ID"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Validation(msg) => write!(f, "validation: {}", msg),
			Error::DbError => write!(f, "database error"),
			Error::Parse => write!(f, "parse error"),
			Error::Io(err) => write!(f, "io: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let (status, message) = match &self {
			Error::NotFound => (StatusCode::NOT_FOUND, "invalid ID".to_string()),
			Error::PermissionDenied => (StatusCode::FORBIDDEN, "permission denied".to_string()),
			Error::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.to_string()),
			_ => (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string()),
		};
		(status, Json(json!({ "error": message }))).into_response()
	}
}

// vim: ts=4
