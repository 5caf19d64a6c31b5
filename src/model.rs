//! The model represents the reference data loaded from a model directory.
use crate::id::IDCollection;
use crate::port::PortMap;
use crate::schedule::OverrideMap;
use crate::transit::TransitMatrix;
use crate::vessel::{Vessel, VesselID, VesselMap};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

pub mod parameters;
pub use parameters::ModelParameters;

/// Model definition
#[derive(Debug)]
pub struct Model {
    /// Path to model folder
    pub model_path: PathBuf,
    /// Parameters from the model TOML file
    pub parameters: ModelParameters,
    /// Ports
    pub ports: PortMap,
    /// Vessels and their rotations
    pub vessels: VesselMap,
    /// The default transit matrix for the model's ports
    pub transit_times: TransitMatrix,
    /// Manual corrections of arrival times, for vessels which have any
    pub overrides: IndexMap<VesselID, OverrideMap>,
}

impl Model {
    /// Create a new [`Model`], checking that the parameters refer to valid data
    pub fn new(
        model_path: &Path,
        parameters: ModelParameters,
        ports: PortMap,
        vessels: VesselMap,
        transit_times: TransitMatrix,
        overrides: IndexMap<VesselID, OverrideMap>,
    ) -> Result<Self> {
        if let Some(vessel_id) = &parameters.vessel_id {
            vessels
                .get_id_by_str(vessel_id)
                .context("Invalid vessel_id in model parameters")?;
        }

        Ok(Self {
            model_path: model_path.to_path_buf(),
            parameters,
            ports,
            vessels,
            transit_times,
            overrides,
        })
    }

    /// The arrival time overrides for the given vessel (empty if it has none)
    pub fn overrides_for(&self, vessel_id: &VesselID) -> OverrideMap {
        self.overrides.get(vessel_id).cloned().unwrap_or_default()
    }

    /// Get the vessel to project.
    ///
    /// If `vessel_id` is `None`, the vessel given in the model parameters is used, or the first
    /// vessel if none is given there.
    pub fn select_vessel(&self, vessel_id: Option<&str>) -> Result<&Vessel> {
        match vessel_id.or(self.parameters.vessel_id.as_deref()) {
            Some(id) => self
                .vessels
                .get(id)
                .with_context(|| format!("Unknown vessel: {id}")),
            None => self
                .vessels
                .first()
                .map(|(_, vessel)| vessel)
                .context("Model contains no vessels"),
        }
    }
}
