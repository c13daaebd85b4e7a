use crate::error::DynamicsError;
use crate::model::{NodeId, SUnitId, SUnitMap};
use cancel_this::is_cancelled;
use computation_process::{Completable, Generator, GeneratorStep, Stateful};
use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{BTreeSet, HashSet};

/// Maximal number of free variables of one [`SeedSpace`].
pub const MAX_FREE_VARIABLES: usize = 63;

/// Number of random draws allowed per requested sample in [`sample_seeds`].
pub const SAMPLE_ATTEMPTS_PER_SEED: usize = 100;

/// Free variables and pinned s-units of a free-variable-exponential search.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedSpace {
    free: Vec<NodeId>,
    pinned: Vec<SUnitId>,
}

impl SeedSpace {
    /// Create a seed space over `free` variables (default: every variable that is not pinned).
    ///
    /// Duplicate pinned units are merged. Fails if `pinned` is contradictory or unknown, if a
    /// free variable is unknown or pinned, or if there are more than [`MAX_FREE_VARIABLES`]
    /// free variables.
    pub fn new(
        units: &SUnitMap,
        pinned: &[SUnitId],
        free: Option<&[NodeId]>,
    ) -> Result<SeedSpace, DynamicsError> {
        let configuration = units.configuration(pinned)?;
        let free = match free {
            None => configuration.unresolved_nodes(),
            Some(free) => {
                let mut result = BTreeSet::new();
                for node in free {
                    if node.to_index() >= units.num_nodes() {
                        return Err(DynamicsError::UnknownVariable(node.to_string()));
                    }
                    if configuration.get(*node).is_some() {
                        return Err(DynamicsError::Contradiction(
                            units.variable_name(*node).to_string(),
                        ));
                    }
                    result.insert(*node);
                }
                result.into_iter().collect()
            }
        };
        if free.len() > MAX_FREE_VARIABLES {
            return Err(DynamicsError::TooManyFreeVariables(free.len()));
        }
        let pinned = pinned.iter().copied().collect::<BTreeSet<_>>();
        Ok(SeedSpace {
            free,
            pinned: pinned.into_iter().collect(),
        })
    }

    pub fn free(&self) -> &[NodeId] {
        &self.free
    }

    pub fn pinned(&self) -> &[SUnitId] {
        &self.pinned
    }

    /// Number of seeds in this space (`2^|free|`).
    pub fn num_seeds(&self) -> u64 {
        1u64 << self.free.len()
    }

    /// The seed of the given state number: free variables first (the first free variable is
    /// the most significant bit), followed by the pinned s-units.
    pub fn seed(&self, statenum: u64) -> Vec<SUnitId> {
        let width = self.free.len();
        let mut seed = Vec::with_capacity(width + self.pinned.len());
        for (i, node) in self.free.iter().enumerate() {
            let bit = (statenum >> (width - 1 - i)) & 1 == 1;
            seed.push(SUnitId::new(*node, bit));
        }
        seed.extend_from_slice(&self.pinned);
        seed
    }
}

/// Position of [`FreeVariableSeeds`] within its [`SeedSpace`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FreeVariableState {
    next: u64,
    done: bool,
}

impl FreeVariableState {
    /// Number of seeds generated so far.
    pub fn generated(&self) -> u64 {
        self.next
    }
}

pub struct FreeVariableStep;

impl GeneratorStep<SeedSpace, FreeVariableState, Vec<SUnitId>> for FreeVariableStep {
    fn step(
        context: &SeedSpace,
        state: &mut FreeVariableState,
    ) -> Completable<Option<Vec<SUnitId>>> {
        if state.done {
            return Ok(None);
        }
        is_cancelled!()?;
        let seed = context.seed(state.next);
        state.next += 1;
        // At most 2^63 seeds, so the counter cannot overflow.
        state.done = state.next >= context.num_seeds();
        Ok(Some(seed))
    }
}

/// Enumerate all `2^|free|` seeds of a [`SeedSpace`] in increasing state-number order.
pub type FreeVariableSeeds =
    Generator<SeedSpace, FreeVariableState, Vec<SUnitId>, FreeVariableStep>;

/// Collect all seeds of the free-variable-exponential strategy.
pub fn exponential_configs(
    units: &SUnitMap,
    pinned: &[SUnitId],
    free: Option<&[NodeId]>,
) -> Result<Vec<Vec<SUnitId>>, DynamicsError> {
    let space = SeedSpace::new(units, pinned, free)?;
    debug!(
        "Enumerating {} seeds over {} free variables.",
        space.num_seeds(),
        space.free().len()
    );
    let mut seeds = Vec::new();
    for seed in FreeVariableSeeds::configure(space, FreeVariableState::default()) {
        seeds.push(seed?);
    }
    Ok(seeds)
}

/// True if no two s-units of `seed` belong to the same variable.
pub fn is_contradiction_free(seed: &[SUnitId]) -> bool {
    let mut nodes = HashSet::with_capacity(seed.len());
    seed.iter().all(|it| nodes.insert(it.node()))
}

/// All contradiction-free combinations of `size` s-units, in lexicographic order of s-unit ids.
pub fn enumerate_combinations(units: &SUnitMap, size: usize) -> Vec<Vec<SUnitId>> {
    fn extend(
        all: &[SUnitId],
        start: usize,
        size: usize,
        current: &mut Vec<SUnitId>,
        result: &mut Vec<Vec<SUnitId>>,
    ) {
        if current.len() == size {
            result.push(current.clone());
            return;
        }
        for (i, unit) in all.iter().copied().enumerate().skip(start) {
            if current.iter().any(|it| it.node() == unit.node()) {
                continue;
            }
            current.push(unit);
            extend(all, i + 1, size, current, result);
            current.pop();
        }
    }

    let all = units.units().collect::<Vec<_>>();
    let mut result = Vec::new();
    if size <= units.num_nodes() {
        extend(&all, 0, size, &mut Vec::with_capacity(size), &mut result);
    }
    result
}

/// Draw `samples` random contradiction-free seeds of `size` s-units.
///
/// Without `replacement`, every seed (as a set) is returned at most once. The number of draws
/// is bounded by `samples * SAMPLE_ATTEMPTS_PER_SEED`, so fewer seeds are returned when the
/// requested number is not attainable.
pub fn sample_seeds<R: Rng>(
    units: &SUnitMap,
    size: usize,
    samples: usize,
    replacement: bool,
    rng: &mut R,
) -> Vec<Vec<SUnitId>> {
    let all = units.units().collect::<Vec<_>>();
    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(samples);
    let max_attempts = samples.saturating_mul(SAMPLE_ATTEMPTS_PER_SEED);
    let mut attempts = 0;
    while result.len() < samples && attempts < max_attempts && !all.is_empty() {
        attempts += 1;
        let seed = (0..size)
            .filter_map(|_| all.choose(&mut *rng).copied())
            .collect::<Vec<_>>();
        if !is_contradiction_free(&seed) {
            continue;
        }
        if !replacement {
            let mut key = seed.clone();
            key.sort();
            if !seen.insert(key) {
                continue;
            }
        }
        result.push(seed);
    }
    if result.len() < samples {
        warn!(
            "Only {} of {} seeds of size {} were sampled after {} attempts.",
            result.len(),
            samples,
            size,
            attempts
        );
    }
    result
}
