//! Code for reading vessel rotations from a CSV file.
use super::{deserialise_days_or_zero, input_err_msg, read_csv_optional};
use crate::id::IDCollection;
use crate::port::PortMap;
use crate::rotation::{Rotation, RouteStop};
use crate::units::Days;
use crate::vessel::VesselID;
use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use std::path::Path;

const ROTATIONS_FILE_NAME: &str = "rotations.csv";

/// A single stop in a rotation as read from the CSV file
#[derive(PartialEq, Debug, Deserialize)]
struct RouteStopRaw {
    vessel_id: String,
    port_id: String,
    #[serde(deserialize_with = "deserialise_days_or_zero")]
    dwell_days: Days,
}

/// Read the rotation of every vessel.
///
/// The stops of each vessel's rotation appear in the same order as in the file. Vessels with no
/// rows are given an empty rotation.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
/// * `vessel_ids` - The IDs of all vessels
/// * `ports` - All known ports
pub fn read_rotations(
    model_dir: &Path,
    vessel_ids: &IndexSet<VesselID>,
    ports: &PortMap,
) -> Result<IndexMap<VesselID, Rotation>> {
    let file_path = model_dir.join(ROTATIONS_FILE_NAME);
    let stops = read_csv_optional::<RouteStopRaw>(&file_path)?;
    read_rotations_from_iter(stops.into_iter(), vessel_ids, ports)
        .with_context(|| input_err_msg(&file_path))
}

fn read_rotations_from_iter<I>(
    iter: I,
    vessel_ids: &IndexSet<VesselID>,
    ports: &PortMap,
) -> Result<IndexMap<VesselID, Rotation>>
where
    I: Iterator<Item = RouteStopRaw>,
{
    let mut rotations: IndexMap<VesselID, Rotation> = vessel_ids
        .iter()
        .map(|id| (id.clone(), Rotation::default()))
        .collect();

    for stop in iter {
        let vessel_id = vessel_ids.get_id_by_str(&stop.vessel_id)?;
        let port_id = ports.get_id_by_str(&stop.port_id)?;
        rotations[&vessel_id].push(RouteStop::new(port_id, stop.dwell_days));
    }

    Ok(rotations)
}
