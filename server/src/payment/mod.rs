//! Payment requests and refunds. The two share one shape and one set of
//! handlers; the route decides the [`learnhub_types::meta_adapter::MoneyKind`].

pub mod handler;

// vim: ts=4
