//! Common functionality for portcall.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod calendar;
pub mod cli;
pub mod id;
pub mod input;
pub mod log;
pub mod matrix_store;
pub mod model;
pub mod output;
pub mod port;
pub mod rotation;
pub mod schedule;
pub mod settings;
pub mod timetable;
pub mod transit;
pub mod units;
pub mod vessel;

#[cfg(test)]
mod fixture;

/// Get config dir for program.
///
/// This is platform dependent, but for Linux it will be `~/.config/portcall`.
pub fn get_portcall_config_dir() -> PathBuf {
    let Some(mut config_dir) = dirs::config_dir() else {
        // No config dir available on this platform, so use the current working directory
        return PathBuf::new();
    };

    config_dir.push("portcall");
    config_dir
}
