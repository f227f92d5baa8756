//! Terminal presentation shell for the plant caretaker.
//!
//! The binary in `main.rs` only wires config, logging and the terminal;
//! everything testable lives here.

pub mod app;
pub mod config;

pub use app::{ActionButton, App, Modal, ModalKind, PlantRow};
pub use config::AppConfig;
