//! Code for reading vessels and their rotations.
use super::read_csv_id_file;
use super::rotation::read_rotations;
use crate::id::define_id_getter;
use crate::port::PortMap;
use crate::vessel::{Vessel, VesselID, VesselMap};
use anyhow::Result;
use indexmap::IndexSet;
use serde::Deserialize;
use std::path::Path;

const VESSELS_FILE_NAME: &str = "vessels.csv";

/// A vessel as read from the CSV file, without its rotation
#[derive(PartialEq, Debug, Deserialize)]
struct VesselRaw {
    id: VesselID,
    name: String,
}
define_id_getter! {VesselRaw, VesselID}

/// Read vessels and their rotations from the model directory.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
/// * `ports` - All known ports
///
/// # Returns
///
/// A map of vessels keyed by vessel ID, in file order, or an error
pub fn read_vessels(model_dir: &Path, ports: &PortMap) -> Result<VesselMap> {
    let raw = read_csv_id_file::<VesselID, VesselRaw>(&model_dir.join(VESSELS_FILE_NAME))?;
    let vessel_ids: IndexSet<VesselID> = raw.keys().cloned().collect();
    let mut rotations = read_rotations(model_dir, &vessel_ids, ports)?;

    let vessels = raw
        .into_values()
        .map(|vessel| {
            // Every vessel has an entry, even if it is empty
            let rotation = rotations.swap_remove(&vessel.id).unwrap_or_default();
            let vessel = Vessel {
                id: vessel.id,
                name: vessel.name,
                rotation,
            };
            (vessel.id.clone(), vessel)
        })
        .collect();

    Ok(vessels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::ports;
    use crate::rotation::RouteStop;
    use crate::units::Days;
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    #[rstest]
    fn test_read_vessels(ports: PortMap) {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(VESSELS_FILE_NAME),
            "id,name\nship1,Ship One\nship2,Ship Two",
        )
        .unwrap();
        fs::write(
            dir.path().join("rotations.csv"),
            "vessel_id,port_id,dwell_days\nship2,A,1\nship2,C,abc\nship1,B,2",
        )
        .unwrap();

        let vessels = read_vessels(dir.path(), &ports).unwrap();
        assert_eq!(
            vessels.keys().map(ToString::to_string).collect::<Vec<_>>(),
            ["ship1", "ship2"]
        );

        let ship2 = &vessels[&VesselID::new("ship2")];
        assert_eq!(ship2.name, "Ship Two");
        assert_eq!(
            ship2.rotation.iter().cloned().collect::<Vec<_>>(),
            [
                RouteStop::new("A".into(), Days(1.0)),
                RouteStop::new("C".into(), Days::ZERO)
            ]
        );
        assert_eq!(vessels[&VesselID::new("ship1")].rotation.len(), 1);
    }

    #[rstest]
    fn test_read_vessels_no_rotations_file(ports: PortMap) {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(VESSELS_FILE_NAME), "id,name\nship1,Ship One").unwrap();

        // A missing rotations file is an error
        assert!(read_vessels(dir.path(), &ports).is_err());
    }
}
