//! The transit matrix gives the time taken to sail between any pair of ports.
use crate::port::{PortID, PortMap};
use crate::units::Days;
use anyhow::{Result, ensure};
use indexmap::IndexMap;
use itertools::Itertools;

/// The transit time used for pairs of ports with no entry in the matrix
pub const DEFAULT_FALLBACK_TRANSIT: Days = Days(2.0);

/// Directed transit times between ports.
///
/// Entries are stored as a two-level map from origin to destination. The matrix is fully
/// addressable: looking up a pair with no entry gives zero for a port to itself and the fallback
/// transit time otherwise.
#[derive(Debug, PartialEq, Clone)]
pub struct TransitMatrix {
    entries: IndexMap<PortID, IndexMap<PortID, Days>>,
    fallback: Days,
}

impl Default for TransitMatrix {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            fallback: DEFAULT_FALLBACK_TRANSIT,
        }
    }
}

/// Check that a transit time is a finite, non-negative number of days
pub fn check_transit_days(days: Days) -> Result<()> {
    ensure!(
        days.is_finite() && days >= Days::ZERO,
        "Transit time must be a finite, non-negative number of days (got {days})"
    );

    Ok(())
}

impl TransitMatrix {
    /// Create an empty matrix with the default fallback transit time
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty matrix with the given fallback transit time
    pub fn with_fallback(fallback: Days) -> Result<Self> {
        check_transit_days(fallback)?;

        Ok(Self {
            entries: IndexMap::new(),
            fallback,
        })
    }

    /// Create the dense default matrix for the given ports.
    ///
    /// Every port is given an entry to every other port equal to the fallback transit time and an
    /// entry of zero to itself.
    pub fn with_defaults(ports: &PortMap) -> Self {
        let mut matrix = Self::new();
        for (from, to) in ports.keys().cartesian_product(ports.keys()) {
            let days = if from == to {
                Days::ZERO
            } else {
                matrix.fallback
            };
            matrix.insert(from.clone(), to.clone(), days);
        }

        matrix
    }

    /// The transit time used for pairs with no entry
    pub fn fallback(&self) -> Days {
        self.fallback
    }

    /// Look up the transit time from one port to another.
    ///
    /// Never fails: if there is no entry for the pair, zero is returned for a port to itself and
    /// the fallback value otherwise.
    pub fn lookup(&self, from: &PortID, to: &PortID) -> Days {
        if let Some(days) = self.entries.get(from).and_then(|row| row.get(to)) {
            return *days;
        }

        if from == to {
            Days::ZERO
        } else {
            self.fallback
        }
    }

    /// Replace the entry for the given pair of ports
    pub fn set(&mut self, from: PortID, to: PortID, days: Days) -> Result<()> {
        check_transit_days(days)?;
        self.insert(from, to, days);

        Ok(())
    }

    /// Insert an entry which is already known to be valid
    fn insert(&mut self, from: PortID, to: PortID, days: Days) {
        self.entries.entry(from).or_default().insert(to, days);
    }

    /// Copy every entry of `other` into this matrix, replacing existing entries
    pub fn overlay(&mut self, other: &TransitMatrix) {
        for (from, to, days) in other.iter() {
            self.insert(from.clone(), to.clone(), days);
        }
    }

    /// Iterate over the stored entries as `(from, to, days)`
    pub fn iter(&self) -> impl Iterator<Item = (&PortID, &PortID, Days)> {
        self.entries
            .iter()
            .flat_map(|(from, row)| row.iter().map(move |(to, days)| (from, to, *days)))
    }

    /// The number of stored entries
    pub fn len(&self) -> usize {
        self.entries.values().map(IndexMap::len).sum()
    }

    /// Whether the matrix has no stored entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, ports};
    use rstest::rstest;

    #[rstest]
    fn test_lookup_fallback(ports: PortMap) {
        let matrix = TransitMatrix::new();
        for (from, to) in ports.keys().cartesian_product(ports.keys()) {
            let expected = if from == to {
                Days::ZERO
            } else {
                DEFAULT_FALLBACK_TRANSIT
            };
            assert_eq!(matrix.lookup(from, to), expected);
        }
    }

    #[test]
    fn test_lookup_custom_fallback() {
        let matrix = TransitMatrix::with_fallback(Days(3.5)).unwrap();
        assert_eq!(matrix.lookup(&"A".into(), &"B".into()), Days(3.5));
        assert_eq!(matrix.lookup(&"A".into(), &"A".into()), Days::ZERO);
    }

    #[test]
    fn test_lookup_is_directed() {
        let mut matrix = TransitMatrix::new();
        matrix.set("A".into(), "B".into(), Days(1.2)).unwrap();
        assert_eq!(matrix.lookup(&"A".into(), &"B".into()), Days(1.2));
        assert_eq!(matrix.lookup(&"B".into(), &"A".into()), DEFAULT_FALLBACK_TRANSIT);
    }

    #[test]
    fn test_set_replaces_entry() {
        let mut matrix = TransitMatrix::new();
        matrix.set("A".into(), "B".into(), Days(1.0)).unwrap();
        matrix.set("A".into(), "B".into(), Days(4.0)).unwrap();
        assert_eq!(matrix.lookup(&"A".into(), &"B".into()), Days(4.0));
        assert_eq!(matrix.len(), 1);
    }

    #[test]
    fn test_set_self_pair() {
        let mut matrix = TransitMatrix::new();
        matrix.set("A".into(), "A".into(), Days(0.25)).unwrap();
        assert_eq!(matrix.lookup(&"A".into(), &"A".into()), Days(0.25));
    }

    #[rstest]
    #[case(-0.1)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_set_invalid(#[case] days: f64) {
        let mut matrix = TransitMatrix::new();
        assert!(matrix.set("A".into(), "B".into(), Days(days)).is_err());
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_with_fallback_invalid() {
        assert_error!(
            TransitMatrix::with_fallback(Days(-1.0)),
            "Transit time must be a finite, non-negative number of days (got -1)"
        );
    }

    #[rstest]
    fn test_with_defaults(ports: PortMap) {
        let matrix = TransitMatrix::with_defaults(&ports);
        assert_eq!(matrix.len(), ports.len() * ports.len());
        assert_eq!(matrix.lookup(&"A".into(), &"A".into()), Days::ZERO);
        assert_eq!(matrix.lookup(&"A".into(), &"C".into()), DEFAULT_FALLBACK_TRANSIT);
    }

    #[test]
    fn test_overlay() {
        let mut base = TransitMatrix::new();
        base.set("A".into(), "B".into(), Days(1.0)).unwrap();
        base.set("B".into(), "C".into(), Days(1.0)).unwrap();
        let mut other = TransitMatrix::new();
        other.set("B".into(), "C".into(), Days(0.5)).unwrap();

        base.overlay(&other);
        assert_eq!(base.lookup(&"A".into(), &"B".into()), Days(1.0));
        assert_eq!(base.lookup(&"B".into(), &"C".into()), Days(0.5));
    }
}
