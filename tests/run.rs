//! Integration tests for the `run` command.
use portcall::cli::{RunOpts, handle_run_command};
use portcall::settings::Settings;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

/// Get the path to the example model.
fn get_model_dir() -> PathBuf {
    PathBuf::from("demos/far_east")
}

/// An integration test for the `run` command.
///
/// Projects the schedule for a vessel other than the model's default, with an arrival time
/// given on the command line.
#[test]
fn test_handle_run_command() {
    unsafe { std::env::set_var("PORTCALL_LOG_LEVEL", "off") };

    let tempdir = tempdir().unwrap();
    // Save results to non-existent directory to check that directory creation works
    let output_dir = tempdir.path().join("results");
    let opts = RunOpts {
        output_dir: Some(output_dir.clone()),
        vessel: Some("dv-25-12".into()),
        eta: vec!["1=2025-01-08T06:00".into()],
        matrix_file: Some(tempdir.path().join("transit.json")),
        ..Default::default()
    };
    handle_run_command(&get_model_dir(), &opts, Some(Settings::default())).unwrap();

    let schedule = fs::read_to_string(output_dir.join("schedule.csv")).unwrap();
    let mut lines = schedule.lines().skip(1);
    assert_eq!(
        lines.next().unwrap(),
        "0,VVO,Vladivostok,2025-01-06T08:00:00,2025-01-07T08:00:00,0.0,1.0"
    );
    assert_eq!(
        lines.next().unwrap(),
        "1,KSK,Korsakov (Sakhalin),2025-01-08T06:00:00,2025-01-10T06:00:00,1.0,2.0"
    );

    let timetable = fs::read_to_string(output_dir.join("timetable.csv")).unwrap();
    assert_eq!(
        timetable.lines().next().unwrap(),
        "\"Schedule for Mekhanik Kraskovsky (DV-25/12)\""
    );
    assert!(output_dir.join("portcall_info.log").is_file());

    // Output folder is not empty, so running again without --overwrite fails
    assert!(handle_run_command(&get_model_dir(), &opts, Some(Settings::default())).is_err());
}
