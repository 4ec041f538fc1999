//! Shared types, adapter traits, and core utilities for the LearnHub platform.
//!
//! This crate contains the foundational types shared between the server crate
//! and the adapter implementations: the error type, pagination policy, the
//! permission-cascade planner, and the storage adapter traits.

pub mod blob_adapter;
pub mod error;
pub mod meta_adapter;
pub mod pagination;
pub mod prelude;
pub mod types;

// vim: ts=4
