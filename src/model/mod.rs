//! Explicit model of a Boolean network and of its (partial) states.
//!
//! A [`Network`] is an ordered collection of [`Node`]s, each with a fully tabulated update
//! function. Nodes are addressed by [`NodeId`] (their position in the network), and every
//! `(node, state)` pair is an *s-unit* addressed by [`SUnitId`]. The [`SUnitMap`] translates
//! between ids and textual names such as `A-1`.
//!
//! States are stored as fixed-width bit vectors: a [`State`] stores one bit per node, while
//! a [`SUnitSet`] stores one bit per s-unit and can therefore also describe partial snapshots.
//! A [`Configuration`] is the per-node view of a (possibly partial) assignment.
//!
//! Networks are typically obtained from `biodivine_lib_param_bn`:
//!
//! ```no_run
//! use biodivine_algo_bn_dynamics::model::{Network, SUnitMap};
//! use biodivine_lib_param_bn::BooleanNetwork;
//!
//! let bn = BooleanNetwork::try_from_file("model.aeon").unwrap();
//! let network = Network::try_from(&bn).unwrap();
//! let units = SUnitMap::new(&network);
//! assert_eq!(units.len(), 2 * network.num_nodes());
//! ```

mod biodivine;
mod configuration;
mod ids;
mod network;
mod node;
mod state;
mod sunit_map;


pub use configuration::Configuration;
pub use ids::{NodeId, SUnitId};
pub use network::Network;
pub use node::Node;
pub use state::{SUnitSet, State};
pub use sunit_map::{SUNIT_SEPARATOR, SUnitMap};
