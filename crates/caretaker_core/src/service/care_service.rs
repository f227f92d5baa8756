//! Care action use-case service.
//!
//! # Responsibility
//! - Own the live plant book together with its repository.
//! - Record water/fertilize actions and persist after every mutation.
//!
//! # Invariants
//! - Unknown plants are rejected before any mutation or write.
//! - Every successful mutation is followed by a synchronous full save.
//! - A failed save keeps the in-memory update; the disk copy stays stale.

use crate::model::plant::{CareAction, CareRecord, CareTimestamp, PlantBook};
use crate::repo::plant_repo::{PlantRepository, StoreError};
use chrono::NaiveDateTime;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CareResult<T> = Result<T, CareError>;

/// Service error for care actions.
#[derive(Debug)]
pub enum CareError {
    /// Target plant is not in the plant book.
    PlantNotFound(String),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for CareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlantNotFound(name) => write!(f, "plant not found: `{name}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CareError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PlantNotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for CareError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// What a successful care action recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareReceipt {
    pub plant: String,
    pub action: CareAction,
    pub at: CareTimestamp,
}

/// Application state: the live plant book and where it persists.
pub struct CareService<R: PlantRepository> {
    repo: R,
    plants: PlantBook,
}

impl<R: PlantRepository> CareService<R> {
    /// Creates a service over an already loaded plant book.
    pub fn new(repo: R, plants: PlantBook) -> Self {
        Self { repo, plants }
    }

    /// Loads the plant book through `repo`.
    ///
    /// Never fails: unusable persisted data (corrupted or unreadable) falls
    /// back to the built-in defaults and is returned as a notice for the
    /// caller to surface.
    pub fn open(repo: R) -> (Self, Option<StoreError>) {
        match repo.load() {
            Ok(outcome) => (Self::new(repo, outcome.plants), outcome.recovered),
            Err(err) => {
                warn!(
                    "event=service_open module=service status=recovered error={}",
                    err
                );
                (Self::new(repo, PlantBook::defaults()), Some(err))
            }
        }
    }

    pub fn plants(&self) -> &PlantBook {
        &self.plants
    }

    pub fn record(&self, name: &str) -> Option<&CareRecord> {
        self.plants.get(name)
    }

    /// Plant names in display order.
    pub fn plant_names(&self) -> Vec<String> {
        self.plants.display_order()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Records `action` on `name` at the current local time, then saves.
    pub fn record_action(&mut self, name: &str, action: CareAction) -> CareResult<CareReceipt> {
        self.stamp_and_save(name, action, CareTimestamp::now())
    }

    /// Same as [`Self::record_action`] with an explicit timestamp.
    pub fn record_action_at(
        &mut self,
        name: &str,
        action: CareAction,
        at: NaiveDateTime,
    ) -> CareResult<CareReceipt> {
        self.stamp_and_save(name, action, CareTimestamp::from_datetime(at))
    }

    fn stamp_and_save(
        &mut self,
        name: &str,
        action: CareAction,
        at: CareTimestamp,
    ) -> CareResult<CareReceipt> {
        let Some(record) = self.plants.get_mut(name) else {
            warn!(
                "event=care_action module=service status=error action={} error_code=plant_not_found",
                action.as_str()
            );
            return Err(CareError::PlantNotFound(name.to_string()));
        };
        record.stamp(action, at.clone());

        if let Err(err) = self.repo.save(&self.plants) {
            error!(
                "event=care_action module=service status=error action={} error_code=save_failed",
                action.as_str()
            );
            return Err(err.into());
        }

        info!(
            "event=care_action module=service status=ok action={} at={}",
            action.as_str(),
            at
        );
        Ok(CareReceipt {
            plant: name.to_string(),
            action,
            at,
        })
    }
}
