//! Code for reading pre-tuned transit times, which form the model's default transit matrix.
use super::{input_err_msg, read_csv_optional};
use crate::id::IDCollection;
use crate::port::PortMap;
use crate::transit::TransitMatrix;
use crate::units::Days;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

const TRANSIT_TIMES_FILE_NAME: &str = "transit_times.csv";

/// A transit time for one pair of ports as read from the CSV file
#[derive(PartialEq, Debug, Deserialize)]
struct TransitTimeRaw {
    from_port_id: String,
    to_port_id: String,
    days: f64,
}

/// Read the model's default transit matrix.
///
/// This is the dense default matrix for the model's ports with any entries given in
/// `transit_times.csv` applied on top. The file is optional.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
/// * `ports` - All known ports
pub fn read_transit_times(model_dir: &Path, ports: &PortMap) -> Result<TransitMatrix> {
    let file_path = model_dir.join(TRANSIT_TIMES_FILE_NAME);
    let mut matrix = TransitMatrix::with_defaults(ports);
    if !file_path.exists() {
        return Ok(matrix);
    }

    let entries = read_csv_optional::<TransitTimeRaw>(&file_path)?;
    read_transit_times_from_iter(&mut matrix, entries.into_iter(), ports)
        .with_context(|| input_err_msg(&file_path))?;

    Ok(matrix)
}

fn read_transit_times_from_iter<I>(
    matrix: &mut TransitMatrix,
    iter: I,
    ports: &PortMap,
) -> Result<()>
where
    I: Iterator<Item = TransitTimeRaw>,
{
    for entry in iter {
        let from = ports.get_id_by_str(&entry.from_port_id)?;
        let to = ports.get_id_by_str(&entry.to_port_id)?;
        matrix
            .set(from, to, Days(entry.days))
            .with_context(|| {
                format!(
                    "Invalid transit time from {} to {}",
                    entry.from_port_id, entry.to_port_id
                )
            })?;
    }

    Ok(())
}
