//! The module responsible for writing output data to disk.
use crate::calendar::format_for_timetable;
use crate::port::{PortID, PortMap, port_name};
use crate::rotation::Rotation;
use crate::schedule::ScheduleStop;
use crate::timetable::Timetable;
use crate::units::Days;
use anyhow::{Context, Result, ensure};
use chrono::NaiveDateTime;
use csv::{QuoteStyle, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The root folder in which model-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "portcall_results";

/// The output file name for the flat list of port calls
pub const SCHEDULE_FILE_NAME: &str = "schedule.csv";

/// The output file name for the timetable
pub const TIMETABLE_FILE_NAME: &str = "timetable.csv";

/// The column heading for arrival times in the timetable
const ARRIVAL_HEADING: &str = "Arrival";

/// The column heading for departure times in the timetable
const DEPARTURE_HEADING: &str = "Departure";

/// Get the default output directory for the model in the specified directory
pub fn get_output_dir(model_dir: &Path) -> Result<PathBuf> {
    // NB: the path may be "."
    let model_dir = model_dir
        .canonicalize()
        .context("Could not resolve path to model")?;

    let model_name = model_dir
        .file_name()
        .context("Model cannot be in root folder")?
        .to_str()
        .context("Invalid chars in model dir name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, model_name].iter().collect())
}

/// Create a new output directory for the model, optionally overwriting existing data
///
/// # Arguments
///
/// * `output_dir` - The output directory to create/overwrite
/// * `allow_overwrite` - Whether to delete and recreate the folder if it is non-empty
///
/// # Returns
///
/// True if the output dir contained existing data that was deleted, false if not, or an error.
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    let has_contents = fs::read_dir(output_dir).is_ok_and(|mut entries| entries.next().is_some());
    if has_contents {
        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. \
            Please delete the folder or pass the --overwrite command-line option."
        );
        fs::remove_dir_all(output_dir)?;
    }

    fs::create_dir_all(output_dir)?;

    Ok(has_contents)
}

/// Represents a row in the schedule CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct ScheduleRow {
    index: usize,
    port_id: PortID,
    port_name: String,
    eta: NaiveDateTime,
    etd: NaiveDateTime,
    transit_days: Days,
    dwell_days: Days,
}

impl ScheduleRow {
    /// Create a new [`ScheduleRow`]
    fn new(stop: &ScheduleStop, ports: &PortMap) -> Self {
        Self {
            index: stop.index,
            port_id: stop.port_id.clone(),
            port_name: port_name(ports, &stop.port_id).to_string(),
            eta: stop.eta,
            etd: stop.etd,
            transit_days: stop.transit_days,
            dwell_days: stop.dwell_days,
        }
    }
}

/// Write every projected port call to a CSV file, one row per call
///
/// # Arguments
///
/// * `output_path` - Folder where the file will be saved
/// * `stops` - The projected schedule
/// * `ports` - Ports, for looking up display names
pub fn write_schedule(output_path: &Path, stops: &[ScheduleStop], ports: &PortMap) -> Result<()> {
    let file_path = output_path.join(SCHEDULE_FILE_NAME);
    let mut writer = csv::Writer::from_path(&file_path)?;
    for stop in stops {
        writer.serialize(ScheduleRow::new(stop, ports))?;
    }
    writer.flush()?;

    Ok(())
}

/// Write the timetable in the layout used for publishing.
///
/// The file is semicolon-delimited with every cell quoted. After a title row and a blank row there
/// are two header rows: the name of each port in the rotation, then "Arrival" and "Departure" for
/// each port. These are followed by one row per cycle of the rotation.
///
/// # Arguments
///
/// * `output_path` - Folder where the file will be saved
/// * `title` - Text for the title row
/// * `timetable` - The schedule arranged by rotation cycle
/// * `rotation` - The rotation the schedule was projected from
/// * `ports` - Ports, for looking up display names
pub fn write_timetable(
    output_path: &Path,
    title: &str,
    timetable: &Timetable,
    rotation: &Rotation,
    ports: &PortMap,
) -> Result<()> {
    let file_path = output_path.join(TIMETABLE_FILE_NAME);
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Always)
        .flexible(true)
        .from_path(&file_path)?;

    writer.write_record([title])?;
    writer.write_record([""])?;
    writer.write_record(
        rotation
            .iter()
            .flat_map(|stop| [port_name(ports, &stop.port_id), ""]),
    )?;
    writer.write_record(
        rotation
            .iter()
            .flat_map(|_| [ARRIVAL_HEADING, DEPARTURE_HEADING]),
    )?;

    for row in timetable.rows() {
        writer.write_record(row.iter().flat_map(|cell| match cell {
            Some(stop) => [
                format_for_timetable(stop.eta),
                format_for_timetable(stop.etd),
            ],
            None => [String::new(), String::new()],
        }))?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{matrix, ports, rotation, start};
    use crate::schedule::{OverrideMap, project};
    use crate::transit::TransitMatrix;
    use chrono::TimeDelta;
    use itertools::{Itertools, assert_equal};
    use rstest::rstest;
    use tempfile::tempdir;

    #[rstest]
    fn test_write_schedule(
        rotation: Rotation,
        matrix: TransitMatrix,
        start: NaiveDateTime,
        ports: PortMap,
    ) {
        let stops = project(
            &rotation,
            &matrix,
            start,
            start + TimeDelta::days(10),
            &OverrideMap::new(),
        );
        let dir = tempdir().unwrap();
        write_schedule(dir.path(), &stops, &ports).unwrap();

        // Read back and compare
        let expected = stops.iter().map(|stop| ScheduleRow::new(stop, &ports));
        let records: Vec<ScheduleRow> = csv::Reader::from_path(dir.path().join(SCHEDULE_FILE_NAME))
            .unwrap()
            .into_deserialize()
            .try_collect()
            .unwrap();
        assert_equal(records, expected);
    }

    #[rstest]
    fn test_write_timetable(
        rotation: Rotation,
        matrix: TransitMatrix,
        start: NaiveDateTime,
        ports: PortMap,
    ) {
        let stops = project(
            &rotation,
            &matrix,
            start,
            start + TimeDelta::days(10),
            &OverrideMap::new(),
        );
        let timetable = Timetable::new(&stops, rotation.len());
        let dir = tempdir().unwrap();
        write_timetable(dir.path(), "Schedule Ship", &timetable, &rotation, &ports).unwrap();

        let contents = fs::read_to_string(dir.path().join(TIMETABLE_FILE_NAME)).unwrap();
        assert_equal(
            contents.lines(),
            [
                r#""Schedule Ship""#,
                r#""""#,
                r#""Port A";"";"Port B";"";"Port C";"""#,
                r#""Arrival";"Departure";"Arrival";"Departure";"Arrival";"Departure""#,
                r#""01.01.2024 08:00";"02.01.2024 08:00";"03.01.2024 08:00";"04.01.2024 08:00";"05.01.2024 08:00";"07.01.2024 08:00""#,
                r#""09.01.2024 08:00";"10.01.2024 08:00";"11.01.2024 08:00";"12.01.2024 08:00";"";"""#,
            ],
        );
    }

    #[rstest]
    fn test_write_timetable_empty_rotation(ports: PortMap) {
        let timetable = Timetable::new(&[], 0);
        let dir = tempdir().unwrap();
        write_timetable(dir.path(), "Title", &timetable, &Rotation::default(), &ports).unwrap();

        let contents = fs::read_to_string(dir.path().join(TIMETABLE_FILE_NAME)).unwrap();
        assert_eq!(contents.lines().next(), Some(r#""Title""#));
    }

    #[test]
    fn test_create_output_directory() {
        let temp_dir = tempdir().unwrap();
        let output_dir = temp_dir.path().join("results");

        // Created from scratch, then reused while still empty
        assert!(!create_output_directory(&output_dir, false).unwrap());
        assert!(!create_output_directory(&output_dir, false).unwrap());
        assert!(output_dir.is_dir());
    }

    #[test]
    fn test_create_output_directory_not_empty() {
        let temp_dir = tempdir().unwrap();
        let output_dir = temp_dir.path().join("results");
        let old_file = output_dir.join(SCHEDULE_FILE_NAME);
        fs::create_dir(&output_dir).unwrap();
        fs::write(&old_file, "index").unwrap();

        assert!(
            create_output_directory(&output_dir, false)
                .unwrap_err()
                .to_string()
                .starts_with("Output folder already exists and is not empty")
        );
        assert!(old_file.exists());

        assert!(create_output_directory(&output_dir, true).unwrap());
        assert!(output_dir.is_dir());
        assert!(!old_file.exists());
    }

    #[test]
    fn test_get_output_dir() {
        let temp_dir = tempdir().unwrap();
        let model_dir = temp_dir.path().join("far_east");
        fs::create_dir(&model_dir).unwrap();
        assert_eq!(
            get_output_dir(&model_dir).unwrap(),
            PathBuf::from(OUTPUT_DIRECTORY_ROOT).join("far_east")
        );
        assert!(get_output_dir(&temp_dir.path().join("missing")).is_err());
    }
}
