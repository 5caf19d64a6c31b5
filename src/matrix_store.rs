//! Durable storage for the transit matrix.
//!
//! The matrix is kept as a JSON file holding a two-level mapping from origin port to destination
//! port to transit time in days, e.g. `{"VVO": {"KRB": 1.2}}`. It is stored independently of any
//! one model, so edits persist across runs.
use crate::get_portcall_config_dir;
use crate::port::PortID;
use crate::transit::TransitMatrix;
use crate::units::Days;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// The key under which the matrix is stored
pub const MATRIX_STORE_KEY: &str = "vessel-transition-days";

/// The layout of the stored matrix
type StoredMatrix = IndexMap<String, IndexMap<String, Value>>;

/// A persisted transit matrix
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixStore {
    file_path: PathBuf,
}

/// Get the path to where the transit matrix is stored by default
pub fn get_matrix_store_path() -> PathBuf {
    let mut path = get_portcall_config_dir();
    path.push(format!("{MATRIX_STORE_KEY}.json"));

    path
}

impl Default for MatrixStore {
    fn default() -> Self {
        Self::new(get_matrix_store_path())
    }
}

impl MatrixStore {
    /// Create a store backed by the given file
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    /// The location of the stored matrix
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load the stored matrix, layered on top of `defaults`.
    ///
    /// If nothing is stored or the stored data is malformed, `defaults` is returned unchanged.
    /// Individual entries which are not finite, non-negative numbers are ignored, so the default
    /// applies for those pairs.
    pub fn load(&self, defaults: &TransitMatrix) -> TransitMatrix {
        let mut matrix = defaults.clone();
        if let Some(stored) = self.load_stored() {
            matrix.overlay(&stored);
        }

        matrix
    }

    /// Load only the entries which have been stored
    pub fn load_stored(&self) -> Option<TransitMatrix> {
        let contents = fs::read_to_string(&self.file_path).ok()?;
        match serde_json::from_str::<StoredMatrix>(&contents) {
            Ok(stored) => Some(matrix_from_stored(stored)),
            Err(err) => {
                warn!(
                    "Saved transit matrix at {} is invalid and will be ignored: {err}",
                    self.file_path.display()
                );
                None
            }
        }
    }

    /// Save the entries of `matrix`, replacing whatever was stored before
    pub fn save(&self, matrix: &TransitMatrix) -> Result<()> {
        let mut stored: IndexMap<&str, IndexMap<&str, f64>> = IndexMap::new();
        for (from, to, days) in matrix.iter() {
            stored
                .entry(from.0.as_ref())
                .or_default()
                .insert(to.0.as_ref(), days.value());
        }

        if let Some(dir_path) = self.file_path.parent() {
            fs::create_dir_all(dir_path)
                .with_context(|| format!("Failed to create directory: {}", dir_path.display()))?;
        }

        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.file_path, json).with_context(|| {
            format!(
                "Failed to save transit matrix to {}",
                self.file_path.display()
            )
        })?;
        debug!("Saved transit matrix to {}", self.file_path.display());

        Ok(())
    }

    /// Replace a single entry in the stored matrix
    pub fn set_entry(&self, from: PortID, to: PortID, days: Days) -> Result<()> {
        let mut matrix = self.load_stored().unwrap_or_default();
        matrix.set(from, to, days)?;
        self.save(&matrix)
    }

    /// Delete the stored matrix, so that defaults are used from now on.
    ///
    /// Returns whether there was anything to delete.
    pub fn reset(&self) -> Result<bool> {
        if !self.file_path.exists() {
            return Ok(false);
        }

        fs::remove_file(&self.file_path).with_context(|| {
            format!(
                "Failed to delete saved transit matrix: {}",
                self.file_path.display()
            )
        })?;

        Ok(true)
    }
}

/// Convert stored data into a matrix, dropping values which aren't valid transit times
fn matrix_from_stored(stored: StoredMatrix) -> TransitMatrix {
    let mut matrix = TransitMatrix::new();
    for (from, row) in stored {
        for (to, value) in row {
            let Some(days) = value.as_f64() else {
                warn!("Ignoring saved transit time from {from} to {to}: not a number");
                continue;
            };

            if let Err(err) = matrix.set(from.as_str().into(), to.into(), Days(days)) {
                warn!("Ignoring saved transit time from {from}: {err}");
            }
        }
    }

    matrix
}
