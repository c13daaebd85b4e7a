use std::fmt::{Display, Formatter};

/// Stable position of a node within one [`Network`](crate::model::Network).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(usize);

impl NodeId {
    pub fn from_index(index: usize) -> NodeId {
        NodeId(index)
    }

    pub fn to_index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Integer id of an s-unit, i.e., of a `(node, state)` pair.
///
/// Ids are assigned in node-then-state order: node `i` owns ids `2i` (state `0`)
/// and `2i + 1` (state `1`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SUnitId(usize);

impl SUnitId {
    pub fn new(node: NodeId, state: bool) -> SUnitId {
        SUnitId(2 * node.to_index() + usize::from(state))
    }

    pub fn from_index(index: usize) -> SUnitId {
        SUnitId(index)
    }

    pub fn to_index(self) -> usize {
        self.0
    }

    pub fn node(self) -> NodeId {
        NodeId::from_index(self.0 / 2)
    }

    pub fn state(self) -> bool {
        self.0 % 2 == 1
    }

    /// The s-unit of the same node with the opposite state.
    pub fn opposite(self) -> SUnitId {
        SUnitId(self.0 ^ 1)
    }
}

impl Display for SUnitId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
