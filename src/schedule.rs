//! Projection of a vessel's rotation forward in time into a sequence of port calls.
//!
//! The schedule is a pure function of its inputs: the rotation, the transit matrix, the start
//! instant, the horizon and any manual overrides of arrival times. Whenever any of these changes
//! the whole schedule is recomputed from the first call, so an override of one arrival cascades to
//! every later call.
use crate::calendar::add_saturating;
use crate::port::PortID;
use crate::rotation::Rotation;
use crate::transit::TransitMatrix;
use crate::units::Days;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// The largest occurrence index which will be projected.
///
/// Projection always stops after this call, even if the horizon has not yet been reached, which
/// guards against configurations which would never reach the horizon.
pub const MAX_STOP_INDEX: usize = 2000;

/// Manual corrections of arrival times, keyed by occurrence index
pub type OverrideMap = BTreeMap<usize, NaiveDateTime>;

/// A single projected port call
#[derive(Debug, PartialEq, Clone)]
pub struct ScheduleStop {
    /// The position of the call in the unrolled sequence of calls
    pub index: usize,
    /// The port being called at
    pub port_id: PortID,
    /// Estimated time of arrival
    pub eta: NaiveDateTime,
    /// Estimated time of departure
    pub etd: NaiveDateTime,
    /// Transit time from the previous call (zero for the first call)
    pub transit_days: Days,
    /// Time spent in port
    pub dwell_days: Days,
}

/// A projected schedule, along with how the projection ended
#[derive(Debug, PartialEq)]
pub struct Projection {
    /// The projected calls, in order
    pub stops: Vec<ScheduleStop>,
    /// Whether a call after [`MAX_STOP_INDEX`] would still have arrived by the horizon, i.e. the
    /// schedule was cut short by the limit rather than by the horizon
    pub stopped_at_limit: bool,
}

impl Projection {
    /// Project the calls a vessel will make between `start` and `horizon`.
    ///
    /// The first call arrives exactly at `start`. Each later call arrives at the previous
    /// departure plus the transit time between the two ports. An entry in `overrides` replaces the
    /// computed arrival for that call, and later calls are computed from it. Every call departs
    /// after its dwell time.
    ///
    /// The first call arriving after `horizon` is not included. At most [`MAX_STOP_INDEX`] + 1
    /// calls are returned and an empty rotation gives an empty schedule.
    pub fn new(
        rotation: &Rotation,
        matrix: &TransitMatrix,
        start: NaiveDateTime,
        horizon: NaiveDateTime,
        overrides: &OverrideMap,
    ) -> Self {
        let mut stops = Vec::new();
        let mut previous: Option<(&PortID, NaiveDateTime)> = None;

        // One index past the limit is visited to find out whether the limit cut the schedule short
        for index in 0..=MAX_STOP_INDEX + 1 {
            let Some(stop) = rotation.stop_for_occurrence(index) else {
                break;
            };

            let (transit_days, mut eta) = match previous {
                None => (Days::ZERO, start),
                Some((previous_port, previous_etd)) => {
                    let transit = matrix.lookup(previous_port, &stop.port_id);
                    (transit, add_saturating(previous_etd, transit.to_time_delta()))
                }
            };

            if let Some(instant) = overrides.get(&index) {
                eta = *instant;
            }

            if eta > horizon {
                break;
            }

            if index > MAX_STOP_INDEX {
                return Self {
                    stops,
                    stopped_at_limit: true,
                };
            }

            let etd = add_saturating(eta, stop.dwell.to_time_delta());
            stops.push(ScheduleStop {
                index,
                port_id: stop.port_id.clone(),
                eta,
                etd,
                transit_days,
                dwell_days: stop.dwell,
            });
            previous = Some((&stop.port_id, etd));
        }

        Self {
            stops,
            stopped_at_limit: false,
        }
    }
}

/// Project the calls a vessel will make between `start` and `horizon`.
///
/// See [`Projection::new`] for how the calls are computed.
pub fn project(
    rotation: &Rotation,
    matrix: &TransitMatrix,
    start: NaiveDateTime,
    horizon: NaiveDateTime,
    overrides: &OverrideMap,
) -> Vec<ScheduleStop> {
    Projection::new(rotation, matrix, start, horizon, overrides).stops
}
