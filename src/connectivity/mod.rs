//! Cross-zone connectivity: periodic and partition-interface records.
//!
//! Both builders read the [`NodeRegistry`](crate::registry::NodeRegistry)
//! after every zone has been written and produce records in mirrored pairs:
//! whenever `(pA, pB)` holds `iA -> iB`, `(pB, pA)` holds `iB -> iA`.

pub mod interface;
pub mod periodic;

pub use interface::InterfaceConnectivity;
pub use periodic::{PeriodicConnectivity, PeriodicKey};

use crate::io::ZoneIndex;
use crate::zone::naming::UniqueNames;
use std::collections::BTreeMap;

/// Two equal-length point lists: donor indices in the zone holding the
/// record, receiver indices in the target zone.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConnectivityRecord {
    pub donor: Vec<u64>,
    pub receiver: Vec<u64>,
}

impl ConnectivityRecord {
    pub fn push(&mut self, donor: u64, receiver: u64) {
        self.donor.push(donor);
        self.receiver.push(receiver);
    }

    pub fn len(&self) -> usize {
        self.donor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donor.is_empty()
    }

    /// `(donor, receiver)` edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.donor.iter().copied().zip(self.receiver.iter().copied())
    }

    /// Whether `other` holds exactly the reversed edges of `self`.
    pub fn mirrors(&self, other: &ConnectivityRecord) -> bool {
        self.donor == other.receiver && self.receiver == other.donor
    }
}

/// Connectivity names already used in each zone.
#[derive(Debug, Clone)]
pub struct ConnectionNames {
    limit: usize,
    zones: BTreeMap<ZoneIndex, UniqueNames>,
}

impl ConnectionNames {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            zones: BTreeMap::new(),
        }
    }

    /// Unique name for a record stored in `zone`.
    pub fn claim(&mut self, zone: ZoneIndex, raw: &str) -> String {
        let limit = self.limit;
        self.zones
            .entry(zone)
            .or_insert_with(|| UniqueNames::new(limit))
            .claim(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrored_records() {
        let mut ab = ConnectivityRecord::default();
        let mut ba = ConnectivityRecord::default();
        ab.push(3, 8);
        ba.push(8, 3);
        assert!(ab.mirrors(&ba));
        ab.push(4, 9);
        assert!(!ab.mirrors(&ba));
        assert_eq!(ab.edges().collect::<Vec<_>>(), vec![(3, 8), (4, 9)]);
    }

    #[test]
    fn names_are_unique_per_zone_only() {
        let mut names = ConnectionNames::new(32);
        assert_eq!(names.claim(ZoneIndex(1), "Part1_Part2"), "Part1_Part2");
        assert_eq!(names.claim(ZoneIndex(2), "Part1_Part2"), "Part1_Part2");
        assert_eq!(names.claim(ZoneIndex(1), "Part1_Part2"), "Part1_Part2~1");
    }
}
