//! Tabular value estimates keyed by (board signature, coordinate), with
//! file-backed persistence.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::Coordinate;
use crate::signature::BoardSignature;

/// Bumped whenever the on-disk layout changes.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Errors raised while reading or writing a persisted value store.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("model data could not be decoded: {0}")]
    Decode(#[from] bincode::Error),
    #[error("unsupported model format version {0}")]
    UnsupportedVersion(u32),
}

impl PersistError {
    fn io(path: &Path, source: io::Error) -> Self {
        PersistError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result of reading a persisted store.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file existed and decoded cleanly.
    Loaded(ValueStore),
    /// No prior save at the given location.
    Missing,
    /// The file exists but could not be read or decoded.
    Corrupt(PersistError),
}

#[derive(Serialize, Deserialize)]
struct ModelFile {
    version: u32,
    entries: HashMap<BoardSignature, HashMap<Coordinate, f64>>,
}

/// Mapping from (signature, coordinate) to a learned desirability.
///
/// Absent entries read as 0. Entries are created or updated, never removed,
/// except by [`ValueStore::prune_non_positive`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueStore {
    entries: HashMap<BoardSignature, HashMap<Coordinate, f64>>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value, 0 when absent.
    pub fn get(&self, state: &BoardSignature, action: Coordinate) -> f64 {
        self.entries
            .get(state)
            .and_then(|actions| actions.get(&action))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, state: BoardSignature, action: Coordinate, value: f64) {
        self.entries.entry(state).or_default().insert(action, value);
    }

    /// Add `delta` to the stored value, creating the entry at 0 first.
    pub fn add(&mut self, state: BoardSignature, action: Coordinate, delta: f64) -> f64 {
        let slot = self.entries.entry(state).or_default().entry(action).or_insert(0.0);
        *slot += delta;
        *slot
    }

    /// Returns `true` if any action is stored for `state`.
    pub fn has_state(&self, state: &BoardSignature) -> bool {
        self.entries.get(state).is_some_and(|a| !a.is_empty())
    }

    /// Stored actions for `state`.
    pub fn actions(&self, state: &BoardSignature) -> Option<&HashMap<Coordinate, f64>> {
        self.entries.get(state)
    }

    /// Largest value among `candidates` in `state`, absent entries counting as 0.
    /// Returns 0 when there are no candidates.
    pub fn max_value<I>(&self, state: &BoardSignature, candidates: I) -> f64
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let Some(actions) = self.entries.get(state) else {
            return 0.0;
        };
        candidates
            .into_iter()
            .map(|c| actions.get(&c).copied().unwrap_or(0.0))
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// Number of stored (state, action) entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct board signatures with at least one entry.
    pub fn state_count(&self) -> usize {
        self.entries.values().filter(|a| !a.is_empty()).count()
    }

    /// Iterate every entry.
    pub fn iter(&self) -> impl Iterator<Item = (&BoardSignature, Coordinate, f64)> {
        self.entries
            .iter()
            .flat_map(|(s, actions)| actions.iter().map(move |(a, v)| (s, *a, *v)))
    }

    /// Drop every entry whose value is ≤ 0. Returns how many were removed.
    pub fn prune_non_positive(&mut self) -> usize {
        let before = self.len();
        for actions in self.entries.values_mut() {
            actions.retain(|_, v| *v > 0.0);
        }
        self.entries.retain(|_, actions| !actions.is_empty());
        before - self.len()
    }

    /// Insert every entry of `other` that `self` does not already hold.
    pub fn merge_from(&mut self, other: ValueStore) -> usize {
        let mut added = 0;
        for (state, actions) in other.entries {
            let mine = self.entries.entry(state).or_default();
            for (action, value) in actions {
                mine.entry(action).or_insert_with(|| {
                    added += 1;
                    value
                });
            }
        }
        added
    }

    /// Read a store previously written by [`ValueStore::save_to`].
    pub fn load_from(path: &Path) -> LoadOutcome {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return LoadOutcome::Missing,
            Err(e) => return LoadOutcome::Corrupt(PersistError::io(path, e)),
        };
        let decoded: Result<ModelFile, bincode::Error> =
            bincode::deserialize_from(BufReader::new(file));
        match decoded {
            Ok(model) if model.version == MODEL_FORMAT_VERSION => {
                let store = ValueStore {
                    entries: model.entries,
                };
                info!("loaded {} value entries from {}", store.len(), path.display());
                LoadOutcome::Loaded(store)
            }
            Ok(model) => LoadOutcome::Corrupt(PersistError::UnsupportedVersion(model.version)),
            Err(e) => LoadOutcome::Corrupt(PersistError::Decode(e)),
        }
    }

    /// Write the store to `path`, dropping non-positive entries when `prune`
    /// is set. Returns the number of entries written.
    ///
    /// Data goes to a sibling temporary file that is renamed over `path`
    /// once fully flushed, so a failed save leaves the previous file intact.
    pub fn save_to(&self, path: &Path, prune: bool) -> Result<usize, PersistError> {
        let entries = if prune {
            let mut pruned = self.clone();
            let dropped = pruned.prune_non_positive();
            debug!("pruned {} non-positive entries before saving", dropped);
            pruned.entries
        } else {
            self.entries.clone()
        };
        let model = ModelFile {
            version: MODEL_FORMAT_VERSION,
            entries,
        };
        let written = model.entries.values().map(HashMap::len).sum();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| PersistError::io(dir, e))?;
        }
        let tmp = path.with_extension("tmp");
        {
            let file = File::create(&tmp).map_err(|e| PersistError::io(&tmp, e))?;
            let mut writer = BufWriter::new(file);
            bincode::serialize_into(&mut writer, &model)?;
            writer.flush().map_err(|e| PersistError::io(&tmp, e))?;
        }
        fs::rename(&tmp, path).map_err(|e| PersistError::io(path, e))?;
        info!("saved {} value entries to {}", written, path.display());
        Ok(written)
    }
}
