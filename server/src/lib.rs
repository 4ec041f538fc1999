//! LearnHub is a learning-management / HR-operations backend.
//!
//! # Features
//!
//! - Training catalog with a training → module → submodule → lesson hierarchy
//! - Per-user permissions on hierarchy nodes, with `addRelatives` cascade
//! - Payment requests and refunds with receipt photos
//! - Notifications fanned out to selected users
//! - Meeting schedule
//!
//! The server is adapter-driven: metadata lives behind [`meta_adapter::MetaAdapter`],
//! uploaded photos behind [`blob_adapter::BlobAdapter`]. See the
//! `learnhub-basic-server` crate for a wired-up binary.

#![forbid(unsafe_code)]

pub mod core;
pub mod auth;
pub mod user;
pub mod training;
pub mod payment;
pub mod notification;
pub mod meeting;
pub mod store;
pub mod prelude;
pub mod routes;

pub use learnhub_types::{blob_adapter, error, meta_adapter, pagination, types};

pub use crate::core::app::{App, AppBuilder, AppState};

// vim: ts=4
