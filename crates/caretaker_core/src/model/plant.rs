//! Plant care record model.
//!
//! # Responsibility
//! - Define `CareRecord`, `CareAction` and the `PlantBook` mapping.
//! - Provide the built-in default plant set and the pure `reconcile` merge.
//! - Format status lines and confirmations shown by presentation layers.
//!
//! # Invariants
//! - `PlantBook::defaults()` always contains exactly the built-in plants.
//! - `reconcile` never drops a loaded entry and never overrides one.
//! - Timestamps are stored verbatim so persisted values round-trip unchanged.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Wire and display format for care timestamps (local time, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NEVER_TEXT: &str = "Never";

/// Built-in plants in display order: `(name, water_days, fertilize_days)`.
static DEFAULT_PLANTS: [(&str, u32, u32); 3] =
    [("cactus", 7, 30), ("fern", 3, 15), ("aloe vera", 14, 45)];

/// Last-action timestamp as persisted, e.g. `2026-10-19 08:30:00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CareTimestamp(String);

impl CareTimestamp {
    /// Current local wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    pub fn from_datetime(at: NaiveDateTime) -> Self {
        Self(at.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for CareTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two care actions a user can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CareAction {
    Water,
    Fertilize,
}

impl CareAction {
    pub const ALL: [CareAction; 2] = [CareAction::Water, CareAction::Fertilize];

    /// Stable lowercase name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Fertilize => "fertilize",
        }
    }

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::Water => "Water",
            Self::Fertilize => "Fertilize",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Water => "watered",
            Self::Fertilize => "fertilized",
        }
    }
}

/// Care state for one plant.
///
/// Serialized field names match the data file schema, not the Rust names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareRecord {
    /// Informational only; never compared against elapsed time.
    #[serde(rename = "water_days")]
    pub water_interval_days: u32,
    /// Informational only.
    #[serde(rename = "fertilize_days")]
    pub fertilize_interval_days: u32,
    pub last_watered: Option<CareTimestamp>,
    pub last_fertilized: Option<CareTimestamp>,
}

impl CareRecord {
    /// Creates a record that has never been watered or fertilized.
    pub fn new(water_interval_days: u32, fertilize_interval_days: u32) -> Self {
        Self {
            water_interval_days,
            fertilize_interval_days,
            last_watered: None,
            last_fertilized: None,
        }
    }

    /// Stamps `at` onto the field owned by `action`; the other field is untouched.
    pub fn stamp(&mut self, action: CareAction, at: CareTimestamp) {
        match action {
            CareAction::Water => self.last_watered = Some(at),
            CareAction::Fertilize => self.last_fertilized = Some(at),
        }
    }

    pub fn last(&self, action: CareAction) -> Option<&CareTimestamp> {
        match action {
            CareAction::Water => self.last_watered.as_ref(),
            CareAction::Fertilize => self.last_fertilized.as_ref(),
        }
    }
}

/// Mapping from plant name to care record.
///
/// Backed by a `BTreeMap` so persisted output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantBook {
    plants: BTreeMap<String, CareRecord>,
}

impl PlantBook {
    /// Fresh copy of the built-in plant set with all timestamps absent.
    pub fn defaults() -> Self {
        DEFAULT_PLANTS
            .iter()
            .map(|(name, water, fertilize)| {
                ((*name).to_string(), CareRecord::new(*water, *fertilize))
            })
            .collect()
    }

    /// Names of the built-in plants in display order.
    pub fn default_names() -> impl Iterator<Item = &'static str> {
        DEFAULT_PLANTS.iter().map(|(name, _, _)| *name)
    }

    pub fn get(&self, name: &str) -> Option<&CareRecord> {
        self.plants.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut CareRecord> {
        self.plants.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plants.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, record: CareRecord) -> Option<CareRecord> {
        self.plants.insert(name.into(), record)
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    /// Iterates entries in key order (the persisted order).
    pub fn iter(&self) -> btree_map::Iter<'_, String, CareRecord> {
        self.plants.iter()
    }

    /// Plant names in display order: built-in plants first in their fixed
    /// order, then any extra plants sorted by name.
    pub fn display_order(&self) -> Vec<String> {
        let mut names: Vec<String> = Self::default_names()
            .filter(|name| self.plants.contains_key(*name))
            .map(str::to_string)
            .collect();
        names.extend(
            self.plants
                .keys()
                .filter(|name| !Self::default_names().any(|default| default == name.as_str()))
                .cloned(),
        );
        names
    }
}

impl FromIterator<(String, CareRecord)> for PlantBook {
    fn from_iter<I: IntoIterator<Item = (String, CareRecord)>>(iter: I) -> Self {
        Self {
            plants: iter.into_iter().collect(),
        }
    }
}

/// Merges `defaults` into `loaded`.
///
/// Loaded entries win on every key they contain; defaults only fill gaps.
/// Entries present only in `loaded` are kept as-is.
pub fn reconcile(defaults: &PlantBook, loaded: PlantBook) -> PlantBook {
    let mut merged = loaded;
    for (name, record) in defaults.iter() {
        if !merged.contains(name) {
            merged.insert(name.clone(), record.clone());
        }
    }
    merged
}

/// Capitalizes a plant name for display: first character upper, rest lower.
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// One-line summary of a plant's care state.
///
/// Format: `<Name> -> Last Watered: <ts|Never>, Last Fertilized: <ts|Never>`.
///
/// Absent and empty timestamps both read as `Never`.
pub fn status_line(name: &str, record: &CareRecord) -> String {
    format!(
        "{} -> Last Watered: {}, Last Fertilized: {}",
        display_name(name),
        shown(record.last_watered.as_ref()),
        shown(record.last_fertilized.as_ref()),
    )
}

fn shown(stamp: Option<&CareTimestamp>) -> &str {
    stamp
        .map(CareTimestamp::as_str)
        .filter(|text| !text.is_empty())
        .unwrap_or(NEVER_TEXT)
}

/// Confirmation text shown after a successful action.
pub fn confirmation_message(name: &str, action: CareAction) -> String {
    format!("{} has been {}!", display_name(name), action.past_tense())
}
