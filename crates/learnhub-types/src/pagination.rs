//! Page-based pagination policy shared by every admin list endpoint.
//!
//! The source of truth for defaults and ceilings is a single [`PageConfig`]
//! injected into the app state instead of per-endpoint constants.

use serde::{Deserialize, Serialize};

/// Raw, unvalidated paging parameters as they arrive on the query string.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct PageRequest {
	pub page: Option<u32>,
	pub per_page: Option<u32>,
}

/// Paging policy. Resolves raw requests into a usable page/per_page pair.
#[derive(Clone, Copy, Debug)]
pub struct PageConfig {
	pub default_per_page: u32,
	pub max_per_page: u32,
}

impl Default for PageConfig {
	fn default() -> Self {
		Self { default_per_page: 20, max_per_page: 100 }
	}
}

/// A resolved page selection: `page` is 1-based, `per_page` is within policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSpec {
	pub page: u32,
	pub per_page: u32,
}

impl PageSpec {
	pub fn offset(&self) -> i64 {
		(self.page as i64 - 1) * self.per_page as i64
	}

	pub fn limit(&self) -> i64 {
		self.per_page as i64
	}
}

impl PageConfig {
	/// Clamp a raw request into policy: page >= 1, 1 <= per_page <= max.
	pub fn resolve(&self, req: &PageRequest) -> PageSpec {
		let page = req.page.unwrap_or(1).max(1);
		let per_page = match req.per_page {
			None | Some(0) => self.default_per_page,
			Some(n) => n.min(self.max_per_page),
		};
		PageSpec { page, per_page: per_page.max(1) }
	}
}

/// Paging metadata returned next to every page of data.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
	pub total: u64,
	pub page: u32,
	pub per_page: u32,
	pub last_page: u32,
}

impl PageMeta {
	pub fn new(total: u64, spec: PageSpec) -> Self {
		let last_page = (total.div_ceil(spec.per_page as u64) as u32).max(1);
		Self { total, page: spec.page, per_page: spec.per_page, last_page }
	}
}

/// The list response envelope: `{ data: [...], meta: {...} }`.
#[derive(Debug, Serialize)]
pub struct Page<T> {
	pub data: Vec<T>,
	pub meta: PageMeta,
}

#[cfg(test)]
mod test {
	use super::*;

	fn spec(page: u32, per_page: u32) -> PageSpec {
		PageSpec { page, per_page }
	}

	#[test]
	fn last_page_is_ceil() {
		assert_eq!(PageMeta::new(15, spec(1, 10)).last_page, 2);
		assert_eq!(PageMeta::new(20, spec(1, 10)).last_page, 2);
		assert_eq!(PageMeta::new(21, spec(1, 10)).last_page, 3);
	}

	#[test]
	fn empty_result_still_has_one_page() {
		let meta = PageMeta::new(0, spec(1, 10));
		assert_eq!(meta.last_page, 1);
		assert_eq!(meta.total, 0);
	}

	#[test]
	fn resolve_clamps_out_of_policy_values() {
		let cfg = PageConfig::default();
		assert_eq!(cfg.resolve(&PageRequest::default()), spec(1, 20));
		assert_eq!(cfg.resolve(&PageRequest { page: Some(0), per_page: Some(0) }), spec(1, 20));
		assert_eq!(cfg.resolve(&PageRequest { page: Some(3), per_page: Some(500) }), spec(3, 100));
	}

	#[test]
	fn page_request_parses_from_query_string() {
		let req: PageRequest = serde_urlencoded::from_str("page=2&per_page=10").unwrap();
		assert_eq!(req.page, Some(2));
		assert_eq!(req.per_page, Some(10));
	}
}

// vim: ts=4
