//! Explicit-state simulation of Boolean network dynamics.
//!
//! The basic building block is [`network_step`], which updates a block of nodes using the
//! values of a single "before" state. [`NetworkDynamics`] repeatedly applies it under one of
//! the [`UpdateScheme`]s, producing a [`Trajectory`]:
//!
//!  - [`UpdateScheme::Synchronous`]: one macro-step updates all nodes at once.
//!  - [`UpdateScheme::Asynchronous`]: one macro-step applies a sequence of blocks,
//!    each block seeing the effect of the previous ones. The order is either given, or
//!    sampled once (reproducible), or re-sampled in every macro-step.
//!  - [`UpdateScheme::StochasticAsynchronous`]: same as above, but random orders are
//!    sampled with replacement.
//!
//! Randomness always comes from the [`rand_chacha::ChaCha8Rng`] owned by [`DynamicsState`],
//! so a run is fully determined by its configuration, seed state and generator seed.
//!
//! ```rust
//! use biodivine_algo_bn_dynamics::dynamics::{DynamicsConfig, DynamicsState, NetworkDynamics};
//! use biodivine_algo_bn_dynamics::model::{Network, Node, State};
//! use computation_process::Algorithm;
//!
//! let x = Node::new("x", vec!["x".to_string()], vec![false, true]).unwrap();
//! let y = Node::new("y", vec!["x".to_string()], vec![false, true]).unwrap();
//! let network = Network::new(vec![x, y]).unwrap();
//!
//! let seed = State::from_values(&[true, false]);
//! let trajectory = NetworkDynamics::run(&network, DynamicsState::seeded(seed, 0)).unwrap();
//! assert_eq!(trajectory.last(), Some(&State::from_values(&[true, true])));
//! ```

mod dynamics_config;
mod dynamics_state;
mod dynamics_step;
mod transition;
mod update_scheme;


use crate::error::DynamicsError;
use crate::model::{SUnitId, SUnitMap};
use computation_process::{Algorithm, Computation};
pub use dynamics_config::{DEFAULT_TIME_LIMIT, DynamicsConfig};
pub use dynamics_state::{DynamicsState, Termination, Trajectory};
pub use dynamics_step::DynamicsStep;
use log::info;
use rand_chacha::ChaCha8Rng;
pub use transition::network_step;
pub use update_scheme::{AsyncSchedule, Block, BlockOrder, UpdateScheme, sample_order};

/// Simulate the network from a single seed state until a fixed point or the time limit.
pub type NetworkDynamics = Computation<DynamicsConfig, DynamicsState, Trajectory, DynamicsStep>;

/// Simulate the network from a seed given as a list of s-units.
///
/// The seed must assign every node exactly once; otherwise the run fails with
/// [`DynamicsError::UnresolvedConfiguration`] (or [`DynamicsError::Contradiction`]).
pub fn run_network_dynamics(
    config: &DynamicsConfig,
    units: &SUnitMap,
    seed: &[SUnitId],
    rng: ChaCha8Rng,
) -> Result<Trajectory, DynamicsError> {
    let state = units.configuration(seed)?.to_state(&config.network)?;
    info!(
        "Start {:?} dynamics from {} (time limit: {}).",
        config.scheme, state, config.time_limit
    );
    let trajectory = NetworkDynamics::run(config.clone(), DynamicsState::new(state, rng))?;
    info!(
        "Dynamics finished after {} steps ({:?}).",
        trajectory.steps(),
        trajectory.termination
    );
    Ok(trajectory)
}
