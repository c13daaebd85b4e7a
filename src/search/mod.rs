//! Brute-force attractor search.
//!
//! Seeds are generated by the *free-variable-exponential* strategy ([`FreeVariableSeeds`]):
//! every assignment of the free variables, extended with a fixed set of pinned s-units. The
//! search is exponential only in the number of free variables, so constrained searches over
//! large networks remain tractable. Explicit seed collections (e.g. from
//! [`enumerate_combinations`] or [`sample_seeds`]) are supported as well.
//!
//! Each seed is simulated independently: a full seed runs
//! [`NetworkDynamics`](crate::dynamics::NetworkDynamics), a partial seed is resolved through
//! a [`PartialPropagation`] implementation. Resulting trajectories are classified and
//! accumulated into an [`AttractorTable`].
//!
//! ```rust
//! use biodivine_algo_bn_dynamics::model::{Network, Node};
//! use biodivine_algo_bn_dynamics::search::{BruteForceSearch, SearchConfig, SearchState};
//! use computation_process::Algorithm;
//!
//! // a* = !b, b* = !a
//! let a = Node::new("a", vec!["b".to_string()], vec![true, false]).unwrap();
//! let b = Node::new("b", vec!["a".to_string()], vec![true, false]).unwrap();
//! let config = SearchConfig::from(Network::new(vec![a, b]).unwrap());
//!
//! let state = SearchState::exhaustive(&config).unwrap();
//! let table = BruteForceSearch::run(config, state).unwrap();
//! // Two fixed points and one cycle of length two.
//! assert_eq!(table.len(), 3);
//! assert_eq!(table.total_count(), 4);
//! ```

mod parallel;
mod propagation;
mod search_config;
mod search_state;
mod search_step;
mod seeds;

#[cfg(test)]
mod tests;

use crate::attractor::AttractorTable;
use crate::error::DynamicsError;
use crate::model::NodeId;
use computation_process::{Algorithm, Computation};
use log::info;
pub use parallel::find_attractors_parallel;
pub use propagation::{PartialPropagation, TernaryPropagation, known_units};
pub use search_config::SearchConfig;
pub use search_state::{SearchState, SeedSource};
pub use search_step::{SearchStep, seed_rng, simulate_seed};
pub use seeds::{
    FreeVariableSeeds, FreeVariableState, FreeVariableStep, MAX_FREE_VARIABLES,
    SAMPLE_ATTEMPTS_PER_SEED, SeedSpace, enumerate_combinations, exponential_configs,
    is_contradiction_free, sample_seeds,
};

/// Process all seeds of a [`SearchState`], one seed per step.
pub type BruteForceSearch = Computation<SearchConfig, SearchState, AttractorTable, SearchStep>;

/// Run the free-variable-exponential search over `free` (default: every variable that
/// is not pinned).
pub fn find_attractors_bruteforce(
    config: &SearchConfig,
    free: Option<&[NodeId]>,
) -> Result<AttractorTable, DynamicsError> {
    let state = SearchState::free_variables(config, free)?;
    info!(
        "Start brute-force search with {} pinned s-units ({:?} update, time limit: {}).",
        config.pinned.len(),
        config.scheme,
        config.time_limit
    );
    Ok(BruteForceSearch::run(config.clone(), state)?)
}
