//! A rotation is the cyclically repeating list of port calls followed by a vessel.
use crate::port::PortID;
use crate::units::Days;

/// A single call in a rotation
#[derive(Debug, PartialEq, Clone)]
pub struct RouteStop {
    /// The port being called at
    pub port_id: PortID,
    /// How long the vessel stays in port after arrival
    pub dwell: Days,
}

impl RouteStop {
    /// Create a new [`RouteStop`]
    pub fn new(port_id: PortID, dwell: Days) -> Self {
        Self { port_id, dwell }
    }
}

/// An ordered, cyclic sequence of [`RouteStop`]s.
///
/// After the last stop, the next call is at the first stop again.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Rotation(Vec<RouteStop>);

impl Rotation {
    /// Create a new [`Rotation`] from its stops
    pub fn new(stops: Vec<RouteStop>) -> Self {
        Self(stops)
    }

    /// The number of stops in one cycle of the rotation
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the rotation has no stops
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the stop for the given occurrence index in the unrolled sequence of calls.
    ///
    /// Returns `None` if the rotation is empty.
    pub fn stop_for_occurrence(&self, index: usize) -> Option<&RouteStop> {
        if self.0.is_empty() {
            return None;
        }

        self.0.get(index % self.0.len())
    }

    /// Iterate over the stops of one cycle
    pub fn iter(&self) -> impl Iterator<Item = &RouteStop> {
        self.0.iter()
    }

    /// Add a stop to the end of the rotation
    pub fn push(&mut self, stop: RouteStop) {
        self.0.push(stop);
    }
}

impl FromIterator<RouteStop> for Rotation {
    fn from_iter<I: IntoIterator<Item = RouteStop>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
