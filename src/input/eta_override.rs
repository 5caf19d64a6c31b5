//! Code for reading manual corrections of arrival times.
use super::{input_err_msg, read_csv_optional};
use crate::calendar::parse_instant_or_now;
use crate::id::IDCollection;
use crate::schedule::OverrideMap;
use crate::vessel::VesselID;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use std::path::Path;

const OVERRIDES_FILE_NAME: &str = "overrides.csv";

/// An override as read from the CSV file
#[derive(PartialEq, Debug, Deserialize)]
struct EtaOverrideRaw {
    vessel_id: String,
    index: usize,
    eta: String,
}

/// Read the arrival time overrides for every vessel.
///
/// The file is optional. Rows with an empty `eta` are ignored. An `eta` which cannot be parsed is
/// replaced with the current time. Vessels without overrides have no entry in the returned map.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
/// * `vessel_ids` - The IDs of all vessels
pub fn read_overrides(
    model_dir: &Path,
    vessel_ids: &IndexSet<VesselID>,
) -> Result<IndexMap<VesselID, OverrideMap>> {
    let file_path = model_dir.join(OVERRIDES_FILE_NAME);
    if !file_path.exists() {
        return Ok(IndexMap::new());
    }

    let overrides = read_csv_optional::<EtaOverrideRaw>(&file_path)?;
    read_overrides_from_iter(overrides.into_iter(), vessel_ids)
        .with_context(|| input_err_msg(&file_path))
}

fn read_overrides_from_iter<I>(
    iter: I,
    vessel_ids: &IndexSet<VesselID>,
) -> Result<IndexMap<VesselID, OverrideMap>>
where
    I: Iterator<Item = EtaOverrideRaw>,
{
    let mut overrides: IndexMap<VesselID, OverrideMap> = IndexMap::new();
    for raw in iter {
        let vessel_id = vessel_ids.get_id_by_str(&raw.vessel_id)?;
        if raw.eta.is_empty() {
            continue;
        }

        overrides
            .entry(vessel_id)
            .or_default()
            .insert(raw.index, parse_instant_or_now(&raw.eta));
    }

    Ok(overrides)
}

/// Parse an override given on the command line in the form `INDEX=INSTANT`.
///
/// Returns `None` for an empty instant, which means that no override is applied.
pub fn parse_override_arg(arg: &str) -> Result<Option<(usize, NaiveDateTime)>> {
    let (index, eta) = arg
        .split_once('=')
        .with_context(|| format!("Override must be in the form INDEX=INSTANT: {arg}"))?;
    let index = index
        .trim()
        .parse()
        .ok()
        .with_context(|| format!("Invalid override index: {index}"))?;
    let eta = eta.trim();
    if eta.is_empty() {
        return Ok(None);
    }

    Ok(Some((index, parse_instant_or_now(eta))))
}

/// Add overrides given on the command line to `overrides`.
///
/// These take precedence over overrides read from the model directory.
pub fn apply_override_args<S: AsRef<str>>(overrides: &mut OverrideMap, args: &[S]) -> Result<()> {
    for arg in args {
        if let Some((index, eta)) = parse_override_arg(arg.as_ref())? {
            overrides.insert(index, eta);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use indexmap::indexmap;
    use map_macro::btree_map;
    use std::fs;
    use tempfile::tempdir;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn vessel_ids() -> IndexSet<VesselID> {
        ["ship1".into(), "ship2".into()].into_iter().collect()
    }

    #[test]
    fn test_read_overrides() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(OVERRIDES_FILE_NAME),
            "vessel_id,index,eta
ship1,1,2024-01-10T00:00
ship2,2,2024-01-11T00:00
ship1,5,
ship1,7,2024-02-01 12:30",
        )
        .unwrap();

        let overrides = read_overrides(dir.path(), &vessel_ids()).unwrap();
        assert_eq!(
            overrides,
            indexmap! {
                "ship1".into() => btree_map! {
                    1 => dt("2024-01-10T00:00"),
                    7 => dt("2024-02-01T12:30"),
                },
                "ship2".into() => btree_map! {
                    2 => dt("2024-01-11T00:00"),
                },
            }
        );
    }

    #[test]
    fn test_read_overrides_no_file() {
        let dir = tempdir().unwrap();
        assert!(read_overrides(dir.path(), &vessel_ids()).unwrap().is_empty());
    }

    #[test]
    fn test_read_overrides_bad_index() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(OVERRIDES_FILE_NAME),
            "vessel_id,index,eta\nship1,first,2024-01-10T00:00",
        )
        .unwrap();
        assert!(read_overrides(dir.path(), &vessel_ids()).is_err());
    }

    #[test]
    fn test_read_overrides_unknown_vessel() {
        let overrides = [EtaOverrideRaw {
            vessel_id: "ship3".into(),
            index: 1,
            eta: "2024-01-10T00:00".into(),
        }];
        assert_error!(
            read_overrides_from_iter(overrides.into_iter(), &vessel_ids()),
            "Unknown ID ship3 found"
        );
    }

    #[test]
    fn test_parse_override_arg() {
        assert_eq!(
            parse_override_arg("3=2024-01-10T00:00").unwrap(),
            Some((3, dt("2024-01-10T00:00")))
        );
        assert_eq!(parse_override_arg("3=").unwrap(), None);
        assert_error!(
            parse_override_arg("2024-01-10"),
            "Override must be in the form INDEX=INSTANT: 2024-01-10"
        );
        assert_error!(
            parse_override_arg("x=2024-01-10"),
            "Invalid override index: x"
        );
    }

    #[test]
    fn test_apply_override_args() {
        let mut overrides = btree_map! {
            1 => dt("2024-01-10T00:00"),
            2 => dt("2024-01-12T00:00"),
        };
        apply_override_args(&mut overrides, &["1=2024-01-09T06:00", "2=", "4=2024-01-20"]).unwrap();
        assert_eq!(
            overrides,
            btree_map! {
                1 => dt("2024-01-09T06:00"),
                2 => dt("2024-01-12T00:00"),
                4 => dt("2024-01-20T00:00"),
            }
        );
    }
}
