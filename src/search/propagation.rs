use crate::error::DynamicsError;
use crate::model::{Configuration, Network, NodeId, SUnitId, SUnitMap, SUnitSet};
use cancel_this::is_cancelled;
use log::trace;
use std::collections::{BTreeSet, HashSet};
use std::fmt::Debug;

/// Resolves the dynamics of a *partial* seed, i.e., a seed that does not assign every node.
///
/// The result is a trajectory of named s-unit snapshots (`result[t]` is the snapshot at
/// time `t`, `result[0]` the seed). Implementations may report auxiliary units that are not
/// s-units of the network; these are ignored by the search.
pub trait PartialPropagation: Debug + Send + Sync {
    fn propagate(
        &self,
        network: &Network,
        units: &SUnitMap,
        seed: &[SUnitId],
        pinned: &[SUnitId],
        time_limit: usize,
    ) -> Result<Vec<BTreeSet<String>>, DynamicsError>;
}

/// Keep only the names of `trajectory` that are s-units of `units`.
pub fn known_units(units: &SUnitMap, trajectory: &[BTreeSet<String>]) -> Vec<SUnitSet> {
    trajectory
        .iter()
        .map(|snapshot| {
            SUnitSet::from_units(
                units.num_nodes(),
                snapshot.iter().filter_map(|name| {
                    let unit = units.find(name);
                    if unit.is_none() {
                        trace!("Ignoring auxiliary unit `{}`.", name);
                    }
                    unit
                }),
            )
        })
        .collect()
}

/// Synchronous three-valued propagation.
///
/// A node becomes resolved once every completion of its unresolved inputs produces the same
/// output. It becomes unresolved again once the completions disagree. Pinned nodes keep their
/// pinned value. Propagation stops at the first repeated configuration or at the time limit.
#[derive(Clone, Copy, Debug, Default)]
pub struct TernaryPropagation;

impl TernaryPropagation {
    /// The value of `node` under every completion of `configuration`, if they all agree.
    pub fn resolve_node(
        network: &Network,
        configuration: &Configuration,
        node: NodeId,
    ) -> Option<bool> {
        let inputs = network.node_inputs(node);
        let mut unknown: Vec<NodeId> = Vec::new();
        for input in inputs {
            if configuration.get(*input).is_none() && !unknown.contains(input) {
                unknown.push(*input);
            }
        }

        let table = network.node(node);
        let mut result = None;
        for completion in 0usize..(1usize << unknown.len()) {
            let row = inputs.iter().fold(0usize, |row, input| {
                let bit = match configuration.get(*input) {
                    Some(value) => value,
                    None => {
                        let position = unknown.iter().position(|it| it == input).unwrap_or(0);
                        (completion >> position) & 1 == 1
                    }
                };
                (row << 1) | usize::from(bit)
            });
            let output = table.output(row);
            match result {
                None => result = Some(output),
                Some(previous) if previous != output => return None,
                Some(_) => (),
            }
        }
        result
    }

    pub fn step(
        network: &Network,
        configuration: &Configuration,
        held: &Configuration,
    ) -> Configuration {
        let mut next = configuration.clone();
        for node in network.node_ids() {
            let value = match held.get(node) {
                Some(value) => Some(value),
                None => TernaryPropagation::resolve_node(network, configuration, node),
            };
            next.set(node, value);
        }
        next
    }
}

impl PartialPropagation for TernaryPropagation {
    fn propagate(
        &self,
        network: &Network,
        units: &SUnitMap,
        seed: &[SUnitId],
        pinned: &[SUnitId],
        time_limit: usize,
    ) -> Result<Vec<BTreeSet<String>>, DynamicsError> {
        let held = units.configuration(pinned)?;
        let mut current = units.configuration(seed)?;
        for node in network.node_ids() {
            if let Some(value) = held.get(node) {
                if current.get(node) == Some(!value) {
                    return Err(DynamicsError::Contradiction(
                        network.get_name(node).to_string(),
                    ));
                }
                current.set(node, Some(value));
            }
        }

        let names = |configuration: &Configuration| {
            units
                .unit_names(&configuration.to_sunits())
                .into_iter()
                .map(|it| it.to_string())
                .collect::<BTreeSet<_>>()
        };

        let mut seen = HashSet::from([current.clone()]);
        let mut trajectory = vec![names(&current)];
        for t in 1..=time_limit {
            is_cancelled!()?;
            let next = TernaryPropagation::step(network, &current, &held);
            trace!("[t:{}] Partial configuration {} -> {}.", t, current, next);
            let repeated = !seen.insert(next.clone());
            trajectory.push(names(&next));
            current = next;
            if repeated {
                break;
            }
        }
        Ok(trajectory)
    }
}
