//! Client state layer for a residential development website.
//!
//! The public site gets a persisted Russian/Uzbek language selection; the
//! admin area gets auth gating, a shared live-update connection and its own
//! language selection; both read the projects resource through a cache that
//! invalidates on every successful mutation.

pub mod api;
pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod i18n;
pub mod layout;
pub mod query;
pub mod retry;
pub mod router;
pub mod storage;
