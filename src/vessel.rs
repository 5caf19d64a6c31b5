//! Vessels and the rotations they follow.
use crate::id::{define_id_getter, define_id_type};
use crate::rotation::Rotation;
use indexmap::IndexMap;

define_id_type! {VesselID}

/// A map of [`Vessel`]s, keyed by vessel ID
pub type VesselMap = IndexMap<VesselID, Vessel>;

/// A vessel which repeatedly follows a fixed rotation of ports
#[derive(Debug, PartialEq, Clone)]
pub struct Vessel {
    /// A unique identifier for the vessel
    pub id: VesselID,
    /// The vessel's display name
    pub name: String,
    /// The route the vessel follows
    pub rotation: Rotation,
}
define_id_getter! {Vessel, VesselID}
