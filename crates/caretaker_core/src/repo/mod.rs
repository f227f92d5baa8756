//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract for the plant book.
//! - Isolate file format details from service orchestration.
//!
//! # Invariants
//! - `load` never returns a book missing a built-in plant.
//! - Unparseable persisted data is reported, not propagated as a hard failure.

pub mod plant_repo;
