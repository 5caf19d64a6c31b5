//! Defines the `ModelParameters` struct, which represents the contents of `model.toml`.
use crate::calendar::{default_start, parse_instant_or_now};
use crate::input::{input_err_msg, read_toml};
use anyhow::{Context, Result, ensure};
use chrono::NaiveDateTime;
use log::warn;
use serde::Deserialize;
use std::path::Path;

const MODEL_PARAMETERS_FILE_NAME: &str = "model.toml";

/// The smallest permitted horizon, in months
pub const MIN_HORIZON_MONTHS: u32 = 1;

/// The largest permitted horizon, in months
pub const MAX_HORIZON_MONTHS: u32 = 12;

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

define_param_default!(default_horizon_months, i64, 6);
define_param_default!(default_schedule_title, String, "Vessel schedule".into());

/// Represents the contents of the entire model file.
#[derive(Debug, Deserialize, PartialEq)]
pub struct ModelParameters {
    /// The vessel whose schedule is projected. Defaults to the first vessel.
    pub vessel_id: Option<String>,
    /// The instant at which the first call arrives.
    ///
    /// Defaults to 08:00 today.
    pub start: Option<String>,
    /// How far ahead to project the schedule, in calendar months
    #[serde(default = "default_horizon_months")]
    pub horizon_months: i64,
    /// Title written at the top of the exported timetable
    #[serde(default = "default_schedule_title")]
    pub schedule_title: String,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            vessel_id: None,
            start: None,
            horizon_months: default_horizon_months(),
            schedule_title: default_schedule_title(),
        }
    }
}

/// Clamp a horizon to the permitted range.
///
/// Zero is treated as unset and replaced with the default.
pub fn clamp_horizon_months(months: i64) -> u32 {
    let months = if months == 0 {
        default_horizon_months()
    } else {
        months
    };

    if months < i64::from(MIN_HORIZON_MONTHS) {
        return MIN_HORIZON_MONTHS;
    }

    u32::try_from(months).map_or(MAX_HORIZON_MONTHS, |months| months.min(MAX_HORIZON_MONTHS))
}

impl ModelParameters {
    /// Read a model file from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model configuration files
    ///
    /// # Returns
    ///
    /// The model file contents as a [`ModelParameters`] struct or an error if the file is invalid
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<ModelParameters> {
        let file_path = model_dir.as_ref().join(MODEL_PARAMETERS_FILE_NAME);
        let model_params: ModelParameters = read_toml(&file_path)?;

        model_params
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(model_params)
    }

    /// Validate parameters after reading in file
    fn validate(&self) -> Result<()> {
        if let Some(vessel_id) = &self.vessel_id {
            ensure!(!vessel_id.trim().is_empty(), "vessel_id cannot be empty");
        }

        let months = self.horizon_months();
        if i64::from(months) != self.horizon_months {
            warn!(
                "horizon_months must be between {MIN_HORIZON_MONTHS} and {MAX_HORIZON_MONTHS}; \
                using {months}"
            );
        }

        Ok(())
    }

    /// The horizon in months, clamped to the permitted range
    pub fn horizon_months(&self) -> u32 {
        clamp_horizon_months(self.horizon_months)
    }

    /// The start instant for the schedule.
    ///
    /// If no start is given, 08:00 today is used. If it cannot be parsed, the current time is used.
    pub fn start(&self) -> NaiveDateTime {
        self.start
            .as_deref()
            .map_or_else(default_start, parse_instant_or_now)
    }
}
