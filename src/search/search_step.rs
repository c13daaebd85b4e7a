use crate::attractor::{AttractorTable, Classification, classify};
use crate::dynamics::{DynamicsState, NetworkDynamics};
use crate::error::DynamicsError;
use crate::log_seed;
use crate::model::SUnitId;
use crate::search::{SearchConfig, SearchState, known_units};
use cancel_this::{Cancellable, is_cancelled};
use computation_process::Incomplete::Suspended;
use computation_process::{Algorithm, Completable, ComputationStep};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The random generator of the seed at position `index`.
///
/// Every seed uses its own stream, so the result of a run does not depend on which other
/// seeds were processed before it (or on which thread).
pub fn seed_rng(rng_seed: u64, index: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
    rng.set_stream(index);
    rng
}

/// Simulate one seed and classify the resulting trajectory.
///
/// Full seeds are simulated by [`NetworkDynamics`]. Partial seeds are delegated to the
/// configured [`PartialPropagation`](crate::search::PartialPropagation). Returns the
/// classification and the number of performed steps.
pub fn simulate_seed(
    config: &SearchConfig,
    seed: &[SUnitId],
    index: u64,
) -> Result<(Classification, usize), DynamicsError> {
    let configuration = config.units.configuration(seed)?;
    let snapshots = if configuration.is_full() {
        let state = configuration.to_state(&config.network)?;
        let initial = DynamicsState::new(state, seed_rng(config.rng_seed, index));
        let trajectory = NetworkDynamics::run(config.dynamics_config(), initial)?;
        trajectory.snapshots(&config.units)
    } else {
        let named = config.propagation().propagate(
            &config.network,
            &config.units,
            seed,
            &config.pinned,
            config.time_limit,
        )?;
        known_units(&config.units, &named)
    };
    let steps = snapshots.len().saturating_sub(1);
    let classification = classify(&snapshots, config.return_last)
        .ok_or_else(|| DynamicsError::Propagation("empty trajectory".to_string()))?;
    Ok((classification, steps))
}

/// Simulate one seed and fold the result into `table`. Failures other than cancellation
/// are recorded in the table.
pub(crate) fn record_seed(
    config: &SearchConfig,
    table: &mut AttractorTable,
    seed: Vec<SUnitId>,
    index: u64,
) -> Cancellable<()> {
    match simulate_seed(config, &seed, index) {
        Ok((classification, steps)) => {
            debug!(
                "[seed:{}] {} reached {} after {} steps.",
                index,
                log_seed(&config.units, &seed),
                classification.attractor.format(&config.units),
                steps
            );
            table.record(classification, steps);
        }
        Err(DynamicsError::Cancelled(cancelled)) => return Err(cancelled),
        Err(error) => {
            warn!(
                "[seed:{}] {} failed: {}",
                index,
                log_seed(&config.units, &seed),
                error
            );
            table.record_failure(seed, error);
        }
    }
    Ok(())
}

/// Processes one seed of a [`SearchState`] per step.
pub struct SearchStep;

impl ComputationStep<SearchConfig, SearchState, AttractorTable> for SearchStep {
    fn step(context: &SearchConfig, state: &mut SearchState) -> Completable<AttractorTable> {
        is_cancelled!()?;
        let Some((index, seed)) = state.next_seed()? else {
            info!(
                "Search finished: {} seeds, {} attractors, {} failures (max. time: {:?}).",
                state.index,
                state.table.len(),
                state.table.failures().len(),
                state.table.max_convergence_time()
            );
            return Ok(state.table.clone());
        };
        record_seed(context, &mut state.table, seed, index)?;
        Err(Suspended)
    }
}
