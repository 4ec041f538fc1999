//! Common types used throughout the LearnHub platform.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

// UserId //
//********//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for UserId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for UserId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(UserId(i64::deserialize(deserializer)?))
	}
}

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub i64);

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

pub fn now() -> Timestamp {
	let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
	Timestamp(res.as_secs() as i64)
}

// Patch //
//*******//
/// Three-state PATCH field: absent (leave untouched), null (clear), value (set).
///
/// Deserializes through `#[serde(default)]`: a missing field stays
/// `Undefined`, an explicit `null` becomes `Null`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Patch<T> {
	#[default]
	Undefined,
	Null,
	Value(T),
}

impl<T> Patch<T> {
	pub fn is_undefined(&self) -> bool {
		matches!(self, Patch::Undefined)
	}

	pub fn as_ref(&self) -> Patch<&T> {
		match self {
			Patch::Undefined => Patch::Undefined,
			Patch::Null => Patch::Null,
			Patch::Value(v) => Patch::Value(v),
		}
	}
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
	T: Deserialize<'de>,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		match Option::<T>::deserialize(deserializer)? {
			Some(v) => Ok(Patch::Value(v)),
			None => Ok(Patch::Null),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use serde::Deserialize;

	#[derive(Deserialize)]
	struct Body {
		#[serde(default)]
		title: Patch<String>,
	}

	#[test]
	fn patch_absent_is_undefined() {
		let body: Body = serde_json::from_str("{}").unwrap();
		assert_eq!(body.title, Patch::Undefined);
	}

	#[test]
	fn patch_null_clears() {
		let body: Body = serde_json::from_str(r#"{"title":null}"#).unwrap();
		assert_eq!(body.title, Patch::Null);
	}

	#[test]
	fn patch_value_sets() {
		let body: Body = serde_json::from_str(r#"{"title":"Onboarding"}"#).unwrap();
		assert_eq!(body.title, Patch::Value("Onboarding".into()));
	}
}

// vim: ts=4
