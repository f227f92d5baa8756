//! Core domain logic for the plant caretaker.
//! This crate is the single source of truth for care records and persistence.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, LogSession};
pub use model::plant::{
    confirmation_message, display_name, reconcile, status_line, CareAction, CareRecord,
    CareTimestamp, PlantBook, TIMESTAMP_FORMAT,
};
pub use repo::plant_repo::{
    JsonFileRepository, LoadOutcome, PlantRepository, StoreError, StoreResult, DATA_FILE_NAME,
};
pub use service::care_service::{CareError, CareReceipt, CareResult, CareService};
