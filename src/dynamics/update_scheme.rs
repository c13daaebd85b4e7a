use crate::model::{Network, NodeId};
use rand::Rng;
use rand::seq::SliceRandom;

/// A group of nodes updated together (seeing the same "before" state).
pub type Block = Vec<NodeId>;

/// The sequence of blocks applied during one asynchronous macro-step.
pub type BlockOrder = Vec<Block>;

/// How the block order of asynchronous update is produced.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsyncSchedule {
    /// Block order for the first macro-step (default: sampled at random).
    pub order: Option<BlockOrder>,
    /// Sample a new order after every macro-step (default: reuse the first order for the
    /// whole run).
    pub regenerate: bool,
    /// Sample every slot independently instead of permuting the nodes. Some nodes are then
    /// updated several times in one macro-step and others not at all.
    pub replacement: bool,
    /// Orders recorded by a previous run. Macro-step `t` (starting from `1`) uses
    /// `replay[t - 1]` whenever it exists.
    pub replay: Vec<BlockOrder>,
}

impl AsyncSchedule {
    /// A random order sampled once, without replacement, and reused for the whole run.
    pub fn new() -> AsyncSchedule {
        AsyncSchedule::default()
    }

    /// A fixed, explicitly given block order.
    pub fn with_order(order: BlockOrder) -> AsyncSchedule {
        AsyncSchedule {
            order: Some(order),
            ..Default::default()
        }
    }

    /// Replay the exact per-step orders recorded by an earlier run.
    pub fn replay(history: Vec<BlockOrder>) -> AsyncSchedule {
        AsyncSchedule {
            replay: history,
            ..Default::default()
        }
    }

    pub fn regenerate(mut self, regenerate: bool) -> AsyncSchedule {
        self.regenerate = regenerate;
        self
    }

    pub fn replacement(mut self, replacement: bool) -> AsyncSchedule {
        self.replacement = replacement;
        self
    }

    /// The recorded order of the given (1-based) macro-step, if replaying.
    pub fn replayed(&self, iteration: usize) -> Option<&BlockOrder> {
        iteration
            .checked_sub(1)
            .and_then(|index| self.replay.get(index))
    }

    /// The order used by the first macro-step of a run.
    pub fn initial_order<R: Rng>(
        &self,
        network: &Network,
        replacement: bool,
        rng: &mut R,
    ) -> BlockOrder {
        match &self.order {
            Some(order) => order.clone(),
            None => sample_order(network, replacement, rng),
        }
    }
}

/// Sample a sequence of singleton blocks of length `network.num_nodes()`.
///
/// Without replacement, this is a uniformly random permutation of all nodes. With replacement,
/// every slot is an independent uniform choice.
pub fn sample_order<R: Rng>(network: &Network, replacement: bool, rng: &mut R) -> BlockOrder {
    let num_nodes = network.num_nodes();
    if replacement {
        (0..num_nodes)
            .map(|_| vec![NodeId::from_index(rng.gen_range(0..num_nodes))])
            .collect()
    } else {
        let mut nodes = network.node_ids().collect::<Vec<_>>();
        nodes.shuffle(rng);
        nodes.into_iter().map(|it| vec![it]).collect()
    }
}

/// The update discipline of [`NetworkDynamics`](crate::dynamics::NetworkDynamics).
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateScheme {
    /// One macro-step updates all nodes at once.
    #[default]
    Synchronous,
    /// One macro-step applies a sequence of blocks, each seeing the effect of
    /// the previous ones.
    Asynchronous(AsyncSchedule),
    /// Same as [`UpdateScheme::Asynchronous`], but random orders are always sampled
    /// with replacement.
    ///
    /// Transient repeats are common under this scheme, so `break_early` should be disabled.
    StochasticAsynchronous(AsyncSchedule),
}

impl UpdateScheme {
    /// Deterministic-order asynchronous update with a random order that is sampled once.
    pub fn asynchronous() -> UpdateScheme {
        UpdateScheme::Asynchronous(AsyncSchedule::new())
    }

    /// Stochastic asynchronous update with a new order in every macro-step.
    pub fn stochastic() -> UpdateScheme {
        UpdateScheme::StochasticAsynchronous(AsyncSchedule::new().regenerate(true))
    }

    pub fn schedule(&self) -> Option<&AsyncSchedule> {
        match self {
            UpdateScheme::Synchronous => None,
            UpdateScheme::Asynchronous(schedule) => Some(schedule),
            UpdateScheme::StochasticAsynchronous(schedule) => Some(schedule),
        }
    }

    /// True if random orders under this scheme are sampled with replacement.
    pub fn samples_with_replacement(&self) -> bool {
        match self {
            UpdateScheme::Synchronous => false,
            UpdateScheme::Asynchronous(schedule) => schedule.replacement,
            UpdateScheme::StochasticAsynchronous(_) => true,
        }
    }

    pub fn is_stochastic(&self) -> bool {
        match self {
            UpdateScheme::Synchronous => false,
            UpdateScheme::Asynchronous(schedule) => schedule.regenerate || schedule.replacement,
            UpdateScheme::StochasticAsynchronous(_) => true,
        }
    }
}
