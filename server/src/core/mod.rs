//! Core subsystem: app state, route middleware and extractors.

pub mod app;
pub mod crypto;
pub mod extract;
pub mod route_auth;

pub use crate::core::extract::{AdminAuth, Auth};

// vim: ts=4
