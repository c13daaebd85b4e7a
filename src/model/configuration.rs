use crate::error::DynamicsError;
use crate::model::{Network, NodeId, SUnitId, SUnitSet, State};
use std::fmt::{Display, Formatter};

/// A full or partial assignment of node states. `None` marks an unresolved node,
/// rendered as `#`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    values: Vec<Option<bool>>,
}

impl Configuration {
    /// A configuration of `num_nodes` nodes where every node is unresolved.
    pub fn unresolved(num_nodes: usize) -> Configuration {
        Configuration {
            values: vec![None; num_nodes],
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, node: NodeId) -> Option<bool> {
        self.values[node.to_index()]
    }

    pub fn set(&mut self, node: NodeId, value: Option<bool>) {
        self.values[node.to_index()] = value;
    }

    pub fn is_full(&self) -> bool {
        self.values.iter().all(|it| it.is_some())
    }

    pub fn unresolved_nodes(&self) -> Vec<NodeId> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, value)| value.is_none())
            .map(|(i, _)| NodeId::from_index(i))
            .collect()
    }

    /// Convert to a full [`State`], failing with [`DynamicsError::UnresolvedConfiguration`]
    /// if some node is unresolved.
    pub fn to_state(&self, network: &Network) -> Result<State, DynamicsError> {
        let unresolved = self.unresolved_nodes();
        if !unresolved.is_empty() {
            return Err(DynamicsError::UnresolvedConfiguration {
                unresolved: unresolved
                    .into_iter()
                    .map(|id| network.get_name(id).to_string())
                    .collect(),
            });
        }
        let values = self
            .values
            .iter()
            .map(|it| it.unwrap_or_default())
            .collect::<Vec<_>>();
        Ok(State::from_values(&values))
    }

    /// The s-units of all resolved nodes.
    pub fn to_sunits(&self) -> SUnitSet {
        SUnitSet::from_units(
            self.values.len(),
            self.values.iter().enumerate().filter_map(|(i, value)| {
                value.map(|value| SUnitId::new(NodeId::from_index(i), value))
            }),
        )
    }
}

impl From<&State> for Configuration {
    fn from(value: &State) -> Self {
        Configuration {
            values: value.values().into_iter().map(Some).collect(),
        }
    }
}

impl From<&SUnitSet> for Configuration {
    fn from(value: &SUnitSet) -> Self {
        Configuration {
            values: (0..value.num_nodes())
                .map(|i| value.value(NodeId::from_index(i)))
                .collect(),
        }
    }
}

impl Display for Configuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for value in &self.values {
            let c = match value {
                Some(true) => '1',
                Some(false) => '0',
                None => '#',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
