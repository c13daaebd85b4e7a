use crate::error::DynamicsError;
use crate::model::{Node, NodeId, State};
use std::collections::HashMap;

/// An immutable Boolean network: an ordered collection of uniquely named [`Node`]s
/// whose inputs are resolved to [`NodeId`]s.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Network {
    nodes: Vec<Node>,
    inputs: Vec<Vec<NodeId>>,
    index: HashMap<String, NodeId>,
}

impl Network {
    /// Create a new [`Network`], resolving node inputs by name.
    ///
    /// Fails if two nodes share a name or if some input does not name a node of this network.
    pub fn new(nodes: Vec<Node>) -> Result<Network, DynamicsError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index
                .insert(node.name().to_string(), NodeId::from_index(i))
                .is_some()
            {
                return Err(DynamicsError::DuplicateNode(node.name().to_string()));
            }
        }

        let inputs = nodes
            .iter()
            .map(|node| {
                node.inputs()
                    .iter()
                    .map(|input| {
                        index
                            .get(input)
                            .copied()
                            .ok_or_else(|| DynamicsError::UnknownVariable(input.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Network {
            nodes,
            inputs,
            index,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all node ids in network order.
    pub fn node_ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + ExactSizeIterator {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.to_index()]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn get_name(&self, id: NodeId) -> &str {
        self.nodes[id.to_index()].name()
    }

    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Same as [`Network::find_node`], but fails with [`DynamicsError::UnknownVariable`].
    pub fn resolve(&self, name: &str) -> Result<NodeId, DynamicsError> {
        self.find_node(name)
            .ok_or_else(|| DynamicsError::UnknownVariable(name.to_string()))
    }

    /// Resolved inputs of `id`, in the order used by its truth table.
    pub fn node_inputs(&self, id: NodeId) -> &[NodeId] {
        &self.inputs[id.to_index()]
    }

    /// Nodes with no inputs, or whose only input is the node itself.
    pub fn network_inputs(&self) -> Vec<NodeId> {
        self.node_ids()
            .filter(|id| {
                let inputs = self.node_inputs(*id);
                inputs.is_empty() || (inputs.len() == 1 && inputs[0] == *id)
            })
            .collect()
    }

    /// Compute the truth-table row of `id` in the given `state`.
    pub fn input_row(&self, id: NodeId, state: &State) -> usize {
        let mut row = 0;
        for input in self.node_inputs(id) {
            row = (row << 1) | usize::from(state.get(*input));
        }
        row
    }

    /// Evaluate the update function of `id` in the given `state`.
    pub fn evaluate(&self, id: NodeId, state: &State) -> bool {
        self.node(id).output(self.input_row(id, state))
    }
}
