//! Database connection and initialization.

pub use warpline_core::db::DatabaseError;

warpline_core::define_database!(WarplineDatabase, "Warpline database migrations complete");
