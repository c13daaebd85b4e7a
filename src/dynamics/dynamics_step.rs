use crate::dynamics::update_scheme::sample_order;
use crate::dynamics::{DynamicsConfig, DynamicsState, Termination, Trajectory, network_step};
use cancel_this::is_cancelled;
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, ComputationStep};
use log::{debug, trace, warn};

/// Advances [`DynamicsState`] by one macro-step of the configured update scheme.
pub struct DynamicsStep;

impl ComputationStep<DynamicsConfig, DynamicsState, Trajectory> for DynamicsStep {
    fn step(context: &DynamicsConfig, state: &mut DynamicsState) -> Completable<Trajectory> {
        if let Some(termination) = state.termination {
            return Ok(state.output(context, termination));
        }

        if state.iteration >= context.time_limit {
            state.termination = Some(Termination::TimeLimit);
            return Ok(state.output(context, Termination::TimeLimit));
        }

        if state.iteration == 0 && context.break_early && context.scheme.is_stochastic() {
            warn!(
                "Early termination is enabled for stochastic update; fixed points may be spurious."
            );
        }

        is_cancelled!()?;
        state.iteration += 1;

        let current = state.current().clone();
        let next = match context.scheme.schedule() {
            None => network_step(&context.network, &current, &context.pinned, None),
            Some(schedule) => {
                let replacement = context.scheme.samples_with_replacement();
                let order = match schedule.replayed(state.iteration) {
                    Some(order) => order.clone(),
                    None => match state.order.take() {
                        Some(order) => order,
                        None => {
                            schedule.initial_order(&context.network, replacement, &mut state.rng)
                        }
                    },
                };

                let mut next = current.clone();
                for block in &order {
                    is_cancelled!()?;
                    next = network_step(&context.network, &next, &context.pinned, Some(block));
                    trace!(
                        "[iteration:{}] Updated block {:?}: {}",
                        state.iteration, block, next
                    );
                }

                state.order = if schedule.regenerate {
                    Some(sample_order(&context.network, replacement, &mut state.rng))
                } else {
                    Some(order.clone())
                };
                if context.record_order {
                    state.order_history.push(order);
                }
                next
            }
        };

        debug!(
            "[iteration:{}] State {} -> {}.",
            state.iteration, current, next
        );

        let unchanged = next == current;
        state.states.push(next);

        if unchanged && context.break_early {
            debug!(
                "[iteration:{}] Dynamics reached a fixed point.",
                state.iteration
            );
            state.termination = Some(Termination::FixedPoint);
            return Ok(state.output(context, Termination::FixedPoint));
        }

        if state.iteration >= context.time_limit {
            debug!(
                "[iteration:{}] Dynamics reached the time limit.",
                state.iteration
            );
            state.termination = Some(Termination::TimeLimit);
            return Ok(state.output(context, Termination::TimeLimit));
        }

        Err(Suspended)
    }
}
