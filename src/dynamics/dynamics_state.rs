use crate::dynamics::{BlockOrder, DynamicsConfig};
use crate::model::{SUnitMap, SUnitSet, State};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Why a simulation run stopped.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// A macro-step did not change the state and `break_early` was set.
    FixedPoint,
    /// The run performed `time_limit` macro-steps.
    TimeLimit,
}

/// The output of [`NetworkDynamics`](crate::dynamics::NetworkDynamics).
///
/// `states[0]` is the seed and `states[t]` is the state after macro-step `t`. When the run
/// stops with [`Termination::FixedPoint`], the last two states are equal.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    pub states: Vec<State>,
    pub termination: Termination,
    /// Block order of every macro-step, if `record_order` was set.
    pub order_history: Option<Vec<BlockOrder>>,
}

impl Trajectory {
    /// Number of macro-steps performed.
    pub fn steps(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    /// Convert every state into its s-unit snapshot.
    pub fn snapshots(&self, units: &SUnitMap) -> Vec<SUnitSet> {
        self.states
            .iter()
            .map(|it| units.encode_state(it))
            .collect()
    }
}

/// Internal state of [`NetworkDynamics`](crate::dynamics::NetworkDynamics).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicsState {
    pub(crate) iteration: usize,
    pub(crate) states: Vec<State>,
    pub(crate) order: Option<BlockOrder>,
    pub(crate) order_history: Vec<BlockOrder>,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) termination: Option<Termination>,
}

impl DynamicsState {
    /// Start a run from `seed`, using `rng` for all random order sampling.
    pub fn new(seed: State, rng: ChaCha8Rng) -> DynamicsState {
        DynamicsState {
            iteration: 0,
            states: vec![seed],
            order: None,
            order_history: Vec::new(),
            rng,
            termination: None,
        }
    }

    pub fn seeded(seed: State, rng_seed: u64) -> DynamicsState {
        DynamicsState::new(seed, ChaCha8Rng::seed_from_u64(rng_seed))
    }

    /// Number of macro-steps performed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn current(&self) -> &State {
        // The seed is inserted on creation and states are never removed.
        &self.states[self.states.len() - 1]
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub(crate) fn output(&self, context: &DynamicsConfig, termination: Termination) -> Trajectory {
        Trajectory {
            states: self.states.clone(),
            termination,
            order_history: context.record_order.then(|| self.order_history.clone()),
        }
    }
}

impl From<State> for DynamicsState {
    fn from(value: State) -> Self {
        DynamicsState::seeded(value, 0)
    }
}

impl From<&State> for DynamicsState {
    fn from(value: &State) -> Self {
        DynamicsState::seeded(value.clone(), 0)
    }
}
