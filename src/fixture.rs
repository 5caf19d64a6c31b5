//! Fixtures for tests

use crate::port::{Port, PortMap};
use crate::rotation::{Rotation, RouteStop};
use crate::transit::TransitMatrix;
use crate::units::Days;
use crate::vessel::{Vessel, VesselMap};
use chrono::NaiveDateTime;
use indexmap::indexmap;
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn ports() -> PortMap {
    ["A", "B", "C"]
        .into_iter()
        .map(|id| {
            let port = Port {
                id: id.into(),
                name: format!("Port {id}"),
            };
            (port.id.clone(), port)
        })
        .collect()
}

/// The rotation A (1 day) -> B (1 day) -> C (2 days)
#[fixture]
pub fn rotation() -> Rotation {
    [("A", 1.0), ("B", 1.0), ("C", 2.0)]
        .into_iter()
        .map(|(port, dwell)| RouteStop::new(port.into(), Days(dwell)))
        .collect()
}

/// Transit times A -> B = 1, B -> C = 1, C -> A = 2
#[fixture]
pub fn matrix() -> TransitMatrix {
    let mut matrix = TransitMatrix::new();
    for (from, to, days) in [("A", "B", 1.0), ("B", "C", 1.0), ("C", "A", 2.0)] {
        matrix.set(from.into(), to.into(), Days(days)).unwrap();
    }

    matrix
}

#[fixture]
pub fn start() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-01-01T08:00", "%Y-%m-%dT%H:%M").unwrap()
}

#[fixture]
pub fn vessels(rotation: Rotation) -> VesselMap {
    indexmap! {
        "ship1".into() => Vessel {
            id: "ship1".into(),
            name: "Ship One".into(),
            rotation,
        }
    }
}
