use crate::dynamics::UpdateScheme;
use crate::model::{Network, NodeId, SUnitId};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Default number of macro-steps of one simulation run.
pub const DEFAULT_TIME_LIMIT: usize = 10;

/// A configuration object for [`NetworkDynamics`](crate::dynamics::NetworkDynamics).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicsConfig {
    /// The simulated network.
    pub network: Arc<Network>,
    /// Nodes that keep their initial value in every step (default: none).
    pub pinned: BTreeSet<NodeId>,
    /// The maximal number of macro-steps (default: [`DEFAULT_TIME_LIMIT`]).
    pub time_limit: usize,
    /// Stop as soon as a macro-step does not change the state (default: `true`).
    ///
    /// This must be disabled for stochastic update, where a step without change does not
    /// imply that a fixed point was reached.
    pub break_early: bool,
    /// The update discipline (default: [`UpdateScheme::Synchronous`]).
    pub scheme: UpdateScheme,
    /// Keep the block order of every macro-step in the output (default: `false`).
    pub record_order: bool,
}

impl From<Network> for DynamicsConfig {
    fn from(value: Network) -> Self {
        DynamicsConfig::new(Arc::new(value))
    }
}

impl From<&Network> for DynamicsConfig {
    fn from(value: &Network) -> Self {
        DynamicsConfig::new(Arc::new(value.clone()))
    }
}

impl From<Arc<Network>> for DynamicsConfig {
    fn from(value: Arc<Network>) -> Self {
        DynamicsConfig::new(value)
    }
}

impl From<&Arc<Network>> for DynamicsConfig {
    fn from(value: &Arc<Network>) -> Self {
        DynamicsConfig::new(value.clone())
    }
}

impl DynamicsConfig {
    /// Create a new [`DynamicsConfig`] for synchronous update without pinned nodes.
    pub fn new(network: Arc<Network>) -> DynamicsConfig {
        DynamicsConfig {
            network,
            pinned: BTreeSet::new(),
            time_limit: DEFAULT_TIME_LIMIT,
            break_early: true,
            scheme: UpdateScheme::Synchronous,
            record_order: false,
        }
    }

    pub fn with_pinned<I: IntoIterator<Item = NodeId>>(mut self, pinned: I) -> DynamicsConfig {
        self.pinned = pinned.into_iter().collect();
        self
    }

    /// Pin the variables of the given s-units.
    pub fn with_pinned_units(mut self, units: &[SUnitId]) -> DynamicsConfig {
        self.pinned = units.iter().map(|it| it.node()).collect();
        self
    }

    pub fn with_time_limit(mut self, time_limit: usize) -> DynamicsConfig {
        self.time_limit = time_limit;
        self
    }

    pub fn with_break_early(mut self, break_early: bool) -> DynamicsConfig {
        self.break_early = break_early;
        self
    }

    pub fn with_scheme(mut self, scheme: UpdateScheme) -> DynamicsConfig {
        self.scheme = scheme;
        self
    }

    pub fn with_order_history(mut self, record_order: bool) -> DynamicsConfig {
        self.record_order = record_order;
        self
    }
}
