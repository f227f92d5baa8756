//! Plant book repository contracts and JSON file implementation.
//!
//! # Responsibility
//! - Load the plant book from a JSON data file, repairing missing defaults.
//! - Save the full plant book back, replacing the file contents.
//!
//! # Invariants
//! - A missing file yields the built-in defaults, not an error.
//! - A corrupted file yields the built-in defaults plus a `Corrupted` notice;
//!   the file itself is left untouched until the next save.
//! - Saves always write every plant and every field.

use crate::model::plant::{reconcile, PlantBook};
use log::{error, info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Default data file name, resolved against the working directory by callers.
pub const DATA_FILE_NAME: &str = "plant_data.json";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for plant book load/save operations.
#[derive(Debug)]
pub enum StoreError {
    /// The data file exists but is not a valid plant book.
    Corrupted {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The data file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The in-memory book could not be encoded.
    Serialize(serde_json::Error),
}

impl StoreError {
    /// Whether this error was recovered by falling back to defaults on load.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Corrupted { .. })
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Corrupted { path, source } => {
                write!(f, "data file `{}` is corrupted: {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "cannot access data file `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to encode plant data: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Corrupted { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

/// Result of a successful load.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Reconciled plant book, always containing every built-in plant.
    pub plants: PlantBook,
    /// Set when persisted data was unusable and defaults were substituted.
    pub recovered: Option<StoreError>,
}

impl LoadOutcome {
    fn clean(plants: PlantBook) -> Self {
        Self {
            plants,
            recovered: None,
        }
    }
}

/// Repository interface for plant book persistence.
pub trait PlantRepository {
    fn load(&self) -> StoreResult<LoadOutcome>;
    fn save(&self, plants: &PlantBook) -> StoreResult<()>;
}

/// JSON-file-backed plant repository.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PlantRepository for JsonFileRepository {
    fn load(&self) -> StoreResult<LoadOutcome> {
        let started_at = Instant::now();
        let defaults = PlantBook::defaults();

        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=store_load module=repo status=ok source=defaults plants={} duration_ms={}",
                    defaults.len(),
                    started_at.elapsed().as_millis()
                );
                return Ok(LoadOutcome::clean(defaults));
            }
            Err(err) => {
                error!(
                    "event=store_load module=repo status=error error_code=read_failed error={}",
                    err
                );
                return Err(self.io_error(err));
            }
        };

        match serde_json::from_str::<PlantBook>(&contents) {
            Ok(loaded) => {
                let loaded_count = loaded.len();
                let plants = reconcile(&defaults, loaded);
                info!(
                    "event=store_load module=repo status=ok source=file plants={} repaired={} duration_ms={}",
                    plants.len(),
                    plants.len() - loaded_count,
                    started_at.elapsed().as_millis()
                );
                Ok(LoadOutcome::clean(plants))
            }
            Err(err) => {
                warn!(
                    "event=store_load module=repo status=recovered error_code=data_corrupted line={} column={}",
                    err.line(),
                    err.column()
                );
                Ok(LoadOutcome {
                    plants: defaults,
                    recovered: Some(StoreError::Corrupted {
                        path: self.path.clone(),
                        source: err,
                    }),
                })
            }
        }
    }

    fn save(&self, plants: &PlantBook) -> StoreResult<()> {
        let started_at = Instant::now();
        let encoded = encode_pretty(plants).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        match std::fs::write(&self.path, encoded) {
            Ok(()) => {
                info!(
                    "event=store_save module=repo status=ok plants={} duration_ms={}",
                    plants.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=repo status=error error_code=write_failed error={}",
                    err
                );
                Err(self.io_error(err))
            }
        }
    }
}

/// Encodes with four-space indentation and a trailing newline.
fn encode_pretty(plants: &PlantBook) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    plants.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}
