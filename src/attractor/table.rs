use crate::attractor::{Attractor, Classification};
use crate::error::DynamicsError;
use crate::model::{SUnitId, SUnitMap};
use std::collections::{BTreeMap, BTreeSet};

/// Visitation statistics of one attractor.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttractorRecord {
    /// Number of seeds that reached this attractor.
    pub count: usize,
    /// Every cycle length observed for this attractor.
    pub lengths: BTreeSet<usize>,
}

/// A seed that could not be simulated.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedFailure {
    pub seed: Vec<SUnitId>,
    pub error: DynamicsError,
}

/// Frequency table of attractors reached by a collection of seeds.
///
/// Counts only ever grow. Two tables built from disjoint seed collections can be combined
/// with [`AttractorTable::merge`].
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttractorTable {
    #[cfg_attr(feature = "serde", serde(with = "attractor_entries"))]
    attractors: BTreeMap<Attractor, AttractorRecord>,
    convergence_times: BTreeSet<usize>,
    unconverged: usize,
    failures: Vec<SeedFailure>,
}

impl AttractorTable {
    pub fn new() -> AttractorTable {
        AttractorTable::default()
    }

    /// Fold one classified trajectory of `steps` macro-steps into the table.
    pub fn record(&mut self, classification: Classification, steps: usize) {
        let length = classification.reported_length();
        if !classification.converged() {
            self.unconverged += 1;
        }
        let record = self.attractors.entry(classification.attractor).or_default();
        record.count += 1;
        record.lengths.insert(length);
        self.convergence_times.insert(steps);
    }

    pub fn record_failure(&mut self, seed: Vec<SUnitId>, error: DynamicsError) {
        self.failures.push(SeedFailure { seed, error });
    }

    /// Add all observations of `other` to this table.
    pub fn merge(&mut self, other: AttractorTable) {
        for (attractor, record) in other.attractors {
            let current = self.attractors.entry(attractor).or_default();
            current.count += record.count;
            current.lengths.extend(record.lengths);
        }
        self.convergence_times.extend(other.convergence_times);
        self.unconverged += other.unconverged;
        self.failures.extend(other.failures);
    }

    pub fn get(&self, attractor: &Attractor) -> Option<&AttractorRecord> {
        self.attractors.get(attractor)
    }

    pub fn count(&self, attractor: &Attractor) -> usize {
        self.get(attractor).map(|it| it.count).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Attractor, &AttractorRecord)> {
        self.attractors.iter()
    }

    pub fn attractors(&self) -> impl Iterator<Item = &Attractor> {
        self.attractors.keys()
    }

    /// Number of distinct attractors.
    pub fn len(&self) -> usize {
        self.attractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attractors.is_empty()
    }

    /// Number of successfully classified seeds.
    pub fn total_count(&self) -> usize {
        self.attractors.values().map(|it| it.count).sum()
    }

    /// Distinct numbers of macro-steps after which runs terminated.
    pub fn convergence_times(&self) -> &BTreeSet<usize> {
        &self.convergence_times
    }

    /// The worst observed convergence time.
    pub fn max_convergence_time(&self) -> Option<usize> {
        self.convergence_times.last().copied()
    }

    /// Number of runs that ended without a repeated snapshot.
    pub fn unconverged(&self) -> usize {
        self.unconverged
    }

    pub fn failures(&self) -> &[SeedFailure] {
        &self.failures
    }

    /// One line per attractor, e.g. `3× {a-1, b-0} (lengths: [1])`.
    pub fn format(&self, units: &SUnitMap) -> Vec<String> {
        self.iter()
            .map(|(attractor, record)| {
                format!(
                    "{}× {} (lengths: {:?})",
                    record.count,
                    attractor.format(units),
                    record.lengths
                )
            })
            .collect()
    }
}

/// Attractors are not string-like, so the map is stored as a sequence of entries.
#[cfg(feature = "serde")]
mod attractor_entries {
    use crate::attractor::{Attractor, AttractorRecord};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        attractors: &BTreeMap<Attractor, AttractorRecord>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(attractors.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<Attractor, AttractorRecord>, D::Error> {
        let entries = Vec::<(Attractor, AttractorRecord)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
