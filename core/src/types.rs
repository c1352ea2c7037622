//! Shared primitive types used across the generator.

/// A generated row's primary key. SQLite rowids are i64.
pub type RowId = i64;

/// The canonical generation-run identifier.
pub type RunId = String;
