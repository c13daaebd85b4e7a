use crate::attractor::AttractorTable;
use crate::error::DynamicsError;
use crate::model::SUnitId;
use crate::search::SearchConfig;
use crate::search::search_state::prepare_seeds;
use crate::search::search_step::record_seed;
use cancel_this::Cancellable;
use log::info;
use rayon::prelude::*;

/// Process `seeds` on the rayon thread pool.
///
/// Seeds are validated and extended with the pinned s-units exactly like in
/// [`SearchState::from_seeds`](crate::search::SearchState::from_seeds). Every worker folds its
/// seeds into a private table and the partial tables are merged after the join, so for the
/// same `rng_seed` the result equals the sequential
/// [`BruteForceSearch`](crate::search::BruteForceSearch).
pub fn find_attractors_parallel<I: IntoIterator<Item = Vec<SUnitId>>>(
    config: &SearchConfig,
    seeds: I,
) -> Result<AttractorTable, DynamicsError> {
    let seeds = prepare_seeds(config, seeds)?;
    info!(
        "Start parallel search over {} seeds ({} threads).",
        seeds.len(),
        rayon::current_num_threads()
    );
    let table = seeds
        .into_par_iter()
        .enumerate()
        .try_fold(
            AttractorTable::new,
            |mut table, (index, seed)| -> Cancellable<AttractorTable> {
                record_seed(config, &mut table, seed, index as u64)?;
                Ok(table)
            },
        )
        .try_reduce(AttractorTable::new, |mut left, right| {
            left.merge(right);
            Ok(left)
        })?;
    info!(
        "Parallel search finished: {} attractors, {} failures.",
        table.len(),
        table.failures().len()
    );
    Ok(table)
}
