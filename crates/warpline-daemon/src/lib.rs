//! Warpline Daemon Library
//!
//! Core functionality for the Warpline daemon:
//! - `SQLite` storage for the local account and the endpoint catalog
//! - Registration client for the remote provisioning API
//! - Account get-or-create and field updates
//! - Endpoint filtering by loss/delay thresholds

pub mod account;
pub mod clock;
pub mod endpoints;
pub mod error;
pub mod registration;
pub mod storage;

pub use error::ServiceError;
