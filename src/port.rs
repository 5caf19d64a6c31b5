//! Ports are the places at which vessels call.
use crate::id::{define_id_getter, define_id_type};
use indexmap::IndexMap;
use serde::Deserialize;

define_id_type! {PortID}

/// A map of [`Port`]s, keyed by port ID
pub type PortMap = IndexMap<PortID, Port>;

/// Represents a port with a code and a display name.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Port {
    /// A unique code for the port (e.g. "VVO").
    pub id: PortID,
    /// A display name for the port (e.g. "Vladivostok").
    pub name: String,
}
define_id_getter! {Port, PortID}

/// Get the display name for a port, falling back on its code if the port is unknown
pub fn port_name<'a>(ports: &'a PortMap, port_id: &'a PortID) -> &'a str {
    ports
        .get(port_id)
        .map_or_else(|| port_id.0.as_ref(), |port| port.name.as_str())
}
