use crate::attractor::AttractorTable;
use crate::error::DynamicsError;
use crate::model::{NodeId, SUnitId};
use crate::search::{FreeVariableState, FreeVariableStep, SearchConfig, SeedSpace};
use computation_process::{Completable, GeneratorStep};
use std::collections::VecDeque;

/// Where the seeds of a search come from.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeedSource {
    /// The free-variable-exponential enumeration.
    FreeVariables {
        space: SeedSpace,
        position: FreeVariableState,
    },
    /// An explicit list of validated seeds.
    Explicit(VecDeque<Vec<SUnitId>>),
}

impl SeedSource {
    fn next_seed(&mut self) -> Completable<Option<Vec<SUnitId>>> {
        match self {
            SeedSource::FreeVariables { space, position } => {
                FreeVariableStep::step(space, position)
            }
            SeedSource::Explicit(seeds) => Ok(seeds.pop_front()),
        }
    }
}

/// Internal state of [`BruteForceSearch`](crate::search::BruteForceSearch).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchState {
    pub(crate) seeds: SeedSource,
    /// Number of seeds processed so far. Also the stream of the next seed's generator.
    pub(crate) index: u64,
    pub(crate) table: AttractorTable,
}

impl SearchState {
    fn with_source(seeds: SeedSource) -> SearchState {
        SearchState {
            seeds,
            index: 0,
            table: AttractorTable::new(),
        }
    }

    /// Enumerate every assignment of the variables that `config` does not pin.
    pub fn exhaustive(config: &SearchConfig) -> Result<SearchState, DynamicsError> {
        SearchState::free_variables(config, None)
    }

    /// Enumerate every assignment of `free` (default: every variable that is not pinned).
    pub fn free_variables(
        config: &SearchConfig,
        free: Option<&[NodeId]>,
    ) -> Result<SearchState, DynamicsError> {
        let space = SeedSpace::new(&config.units, &config.pinned, free)?;
        Ok(SearchState::with_source(SeedSource::FreeVariables {
            space,
            position: FreeVariableState::default(),
        }))
    }

    /// Process the given seeds, each extended with the pinned s-units of `config`.
    ///
    /// Fails if some seed uses an unknown s-unit or contradicts itself or the pinned units.
    pub fn from_seeds<I: IntoIterator<Item = Vec<SUnitId>>>(
        config: &SearchConfig,
        seeds: I,
    ) -> Result<SearchState, DynamicsError> {
        let seeds = prepare_seeds(config, seeds)?;
        Ok(SearchState::with_source(SeedSource::Explicit(seeds.into())))
    }

    /// Number of seeds processed so far.
    pub fn processed(&self) -> u64 {
        self.index
    }

    /// The table of all seeds processed so far.
    pub fn table(&self) -> &AttractorTable {
        &self.table
    }

    pub(crate) fn next_seed(&mut self) -> Completable<Option<(u64, Vec<SUnitId>)>> {
        let seed = self.seeds.next_seed()?;
        Ok(seed.map(|seed| {
            let index = self.index;
            self.index += 1;
            (index, seed)
        }))
    }
}

/// Validate explicit seeds and append the pinned s-units of `config` to each of them.
pub(crate) fn prepare_seeds<I: IntoIterator<Item = Vec<SUnitId>>>(
    config: &SearchConfig,
    seeds: I,
) -> Result<Vec<Vec<SUnitId>>, DynamicsError> {
    seeds
        .into_iter()
        .map(|mut seed| {
            let missing = config
                .pinned
                .iter()
                .filter(|it| !seed.contains(it))
                .copied()
                .collect::<Vec<_>>();
            seed.extend(missing);
            config.units.configuration(&seed)?;
            Ok(seed)
        })
        .collect()
}
