//! Common routines for handling input data.
use crate::id::{HasID, IDLike};
use crate::model::Model;
use crate::units::Days;
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use log::warn;
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use std::fs;
use std::path::Path;

pub mod eta_override;
pub use eta_override::read_overrides;
pub mod port;
use port::read_ports;
pub mod rotation;
pub mod transit;
use transit::read_transit_times;
pub mod vessel;
use vessel::read_vessels;

/// Read a series of type `T`s from a CSV file.
///
/// Will raise an error if the file is empty.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let records = read_csv_optional(file_path)?;
    ensure!(
        !records.is_empty(),
        "CSV file {} cannot be empty",
        file_path.display()
    );

    Ok(records)
}

/// Read a series of type `T`s from a CSV file.
///
/// Unlike [`read_csv`], the file may contain no records.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv_optional<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(file_path)
        .with_context(|| input_err_msg(file_path))?;

    reader
        .deserialize()
        .map(|record| record.with_context(|| input_err_msg(file_path)))
        .collect()
}

/// Read a CSV file of items with IDs into a map keyed by ID.
///
/// The order of the items in the file is preserved. Duplicate IDs and empty files are errors.
pub fn read_csv_id_file<ID, T>(file_path: &Path) -> Result<IndexMap<ID, T>>
where
    ID: IDLike,
    T: HasID<ID> + DeserializeOwned,
{
    let mut map = IndexMap::new();
    for record in read_csv::<T>(file_path)? {
        let id = record.get_id().clone();
        ensure!(
            map.insert(id.clone(), record).is_none(),
            "Duplicate ID found: {id} (in {})",
            file_path.display()
        );
    }

    Ok(map)
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Format an error message to include the file path.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Parse a number of days, replacing anything which isn't a finite, non-negative number with zero
pub fn parse_days_or_zero(s: &str) -> Days {
    match s.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Days(value),
        _ => {
            warn!("Invalid number of days \"{s}\"; using 0 instead");
            Days::ZERO
        }
    }
}

/// Read a number of days, replacing invalid values with zero
pub fn deserialise_days_or_zero<'de, D>(deserialiser: D) -> Result<Days, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserialiser)?;
    Ok(parse_days_or_zero(&raw))
}

/// Read a model from the specified directory.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
///
/// # Returns
///
/// The loaded [`Model`] or an error if any of the input files are invalid.
pub fn load_model<P: AsRef<Path>>(model_dir: P) -> Result<Model> {
    let model_dir = model_dir.as_ref();
    let parameters = crate::model::ModelParameters::from_path(model_dir)?;
    let ports = read_ports(model_dir)?;
    let vessels = read_vessels(model_dir, &ports)?;
    let transit_times = read_transit_times(model_dir, &ports)?;
    let vessel_ids = vessels.keys().cloned().collect();
    let overrides = read_overrides(model_dir, &vessel_ids)?;

    Model::new(
        model_dir,
        parameters,
        ports,
        vessels,
        transit_times,
        overrides,
    )
}
