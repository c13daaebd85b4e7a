use crate::model::{Network, NodeId, State};
use std::collections::BTreeSet;

/// Perform one update of the nodes in `block` (default: all nodes).
///
/// Every updated node reads its inputs from the *original* `state`, so a block always behaves
/// as a synchronous update of its members. Pinned nodes and nodes outside the block keep
/// their current value.
pub fn network_step(
    network: &Network,
    state: &State,
    pinned: &BTreeSet<NodeId>,
    block: Option<&[NodeId]>,
) -> State {
    let mut next = state.clone();
    let mut update = |id: NodeId| {
        if !pinned.contains(&id) {
            next.set(id, network.evaluate(id, state));
        }
    };
    match block {
        Some(block) => block.iter().copied().for_each(&mut update),
        None => network.node_ids().for_each(&mut update),
    }
    next
}
