//! `SQLite` storage for the Warpline daemon.
//!
//! Persists the local account record and the endpoint catalog.

mod db;
mod models;
mod queries;
mod stores;

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests;

pub use db::{DatabaseError, WarplineDatabase};
pub use models::*;
