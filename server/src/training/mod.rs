//! Training content hierarchy: trainings own modules, modules own
//! submodules, submodules own lessons.

pub mod handler;
pub mod lesson;
pub mod module;
pub mod perm;
pub mod submodule;

// vim: ts=4
