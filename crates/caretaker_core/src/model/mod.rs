//! Domain model for plant care records.
//!
//! # Responsibility
//! - Define the persisted care record shape and the built-in plant set.
//! - Keep display formatting next to the data it formats, free of UI types.
//!
//! # Invariants
//! - Plant names are case-sensitive keys; capitalization is display-only.
//! - Interval fields are inert metadata and never drive behavior.

pub mod plant;
