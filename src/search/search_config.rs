use crate::dynamics::{DEFAULT_TIME_LIMIT, DynamicsConfig, UpdateScheme};
use crate::error::DynamicsError;
use crate::model::{Network, SUnitId, SUnitMap};
use crate::search::{PartialPropagation, TernaryPropagation};
use std::collections::BTreeSet;
use std::sync::Arc;

/// A configuration object for [`BruteForceSearch`](crate::search::BruteForceSearch) and
/// [`find_attractors_parallel`](crate::search::find_attractors_parallel).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub network: Arc<Network>,
    pub units: Arc<SUnitMap>,
    /// S-units held in every seed and kept fixed by the dynamics (default: none).
    pub pinned: Vec<SUnitId>,
    /// The maximal number of macro-steps per seed (default: [`DEFAULT_TIME_LIMIT`]).
    pub time_limit: usize,
    /// Stop a run once a macro-step does not change the state (default: `true`).
    pub break_early: bool,
    pub scheme: UpdateScheme,
    /// Classify every run by its final snapshot instead of its first repeat (default: `false`).
    pub return_last: bool,
    /// Seed of the per-run random generators (default: `0`).
    pub rng_seed: u64,
    /// Resolves partial seeds (default: [`TernaryPropagation`]).
    ///
    /// Not serialized: a deserialized config always uses the default propagation, so a
    /// custom implementation has to be set again with [`SearchConfig::with_propagation`]
    /// before resuming.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub propagation: Option<Arc<dyn PartialPropagation>>,
}

impl From<Network> for SearchConfig {
    fn from(value: Network) -> Self {
        SearchConfig::new(Arc::new(value))
    }
}

impl From<&Network> for SearchConfig {
    fn from(value: &Network) -> Self {
        SearchConfig::new(Arc::new(value.clone()))
    }
}

impl From<Arc<Network>> for SearchConfig {
    fn from(value: Arc<Network>) -> Self {
        SearchConfig::new(value)
    }
}

impl SearchConfig {
    /// Create a new [`SearchConfig`] for synchronous update with no pinned s-units.
    pub fn new(network: Arc<Network>) -> SearchConfig {
        let units = Arc::new(SUnitMap::new(&network));
        SearchConfig {
            network,
            units,
            pinned: Vec::new(),
            time_limit: DEFAULT_TIME_LIMIT,
            break_early: true,
            scheme: UpdateScheme::Synchronous,
            return_last: false,
            rng_seed: 0,
            propagation: None,
        }
    }

    /// Pin the given s-units. Duplicates are merged. Fails on unknown or contradictory units.
    pub fn with_pinned(mut self, pinned: Vec<SUnitId>) -> Result<SearchConfig, DynamicsError> {
        self.units.configuration(&pinned)?;
        let pinned = pinned.into_iter().collect::<BTreeSet<_>>();
        self.pinned = pinned.into_iter().collect();
        Ok(self)
    }

    /// Same as [`SearchConfig::with_pinned`], but using s-unit names.
    pub fn with_pinned_names<'a, I: IntoIterator<Item = &'a str>>(
        self,
        names: I,
    ) -> Result<SearchConfig, DynamicsError> {
        let pinned = names
            .into_iter()
            .map(|it| self.units.parse(it))
            .collect::<Result<Vec<_>, _>>()?;
        self.with_pinned(pinned)
    }

    pub fn with_time_limit(mut self, time_limit: usize) -> SearchConfig {
        self.time_limit = time_limit;
        self
    }

    pub fn with_break_early(mut self, break_early: bool) -> SearchConfig {
        self.break_early = break_early;
        self
    }

    pub fn with_scheme(mut self, scheme: UpdateScheme) -> SearchConfig {
        self.scheme = scheme;
        self
    }

    pub fn with_return_last(mut self, return_last: bool) -> SearchConfig {
        self.return_last = return_last;
        self
    }

    pub fn with_rng_seed(mut self, rng_seed: u64) -> SearchConfig {
        self.rng_seed = rng_seed;
        self
    }

    pub fn with_propagation<P: PartialPropagation + 'static>(
        mut self,
        propagation: P,
    ) -> SearchConfig {
        self.propagation = Some(Arc::new(propagation));
        self
    }

    pub fn propagation(&self) -> &dyn PartialPropagation {
        match &self.propagation {
            Some(propagation) => propagation.as_ref(),
            None => &TernaryPropagation,
        }
    }

    /// The configuration of a single simulation run.
    pub fn dynamics_config(&self) -> DynamicsConfig {
        DynamicsConfig::new(self.network.clone())
            .with_pinned_units(&self.pinned)
            .with_time_limit(self.time_limit)
            .with_break_early(self.break_early)
            .with_scheme(self.scheme.clone())
    }
}
