use crate::error::DynamicsError;
use crate::model::{Configuration, Network, NodeId, SUnitId, SUnitSet, State};
use std::collections::HashMap;

/// Separator between the variable name and the state digit of an s-unit name.
pub const SUNIT_SEPARATOR: char = '-';

/// A bijection between [`SUnitId`]s and their textual names (`name-0`, `name-1`).
///
/// The map is derived from one [`Network`] and must be rebuilt whenever the network changes.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SUnitMap {
    variables: Vec<String>,
    single: Vec<bool>,
    names: Vec<String>,
    index: HashMap<String, SUnitId>,
}

impl From<&Network> for SUnitMap {
    fn from(value: &Network) -> Self {
        SUnitMap::new(value)
    }
}

impl SUnitMap {
    pub fn new(network: &Network) -> SUnitMap {
        let mut names = Vec::with_capacity(2 * network.num_nodes());
        let mut index = HashMap::with_capacity(2 * network.num_nodes());
        for id in network.node_ids() {
            for state in [false, true] {
                let unit = SUnitId::new(id, state);
                let name = format!(
                    "{}{}{}",
                    network.get_name(id),
                    SUNIT_SEPARATOR,
                    u8::from(state)
                );
                debug_assert_eq!(unit.to_index(), names.len());
                index.insert(name.clone(), unit);
                names.push(name);
            }
        }
        SUnitMap {
            variables: network
                .nodes()
                .iter()
                .map(|it| it.name().to_string())
                .collect(),
            single: network.nodes().iter().map(|it| it.is_single()).collect(),
            names,
            index,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.variables.len()
    }

    /// Total number of s-units (two per node).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn units(&self) -> impl Iterator<Item = SUnitId> + use<> {
        (0..self.names.len()).map(SUnitId::from_index)
    }

    pub fn name(&self, unit: SUnitId) -> &str {
        &self.names[unit.to_index()]
    }

    pub fn variable_name(&self, node: NodeId) -> &str {
        &self.variables[node.to_index()]
    }

    pub fn find_variable(&self, name: &str) -> Option<NodeId> {
        self.variables
            .iter()
            .position(|it| it == name)
            .map(NodeId::from_index)
    }

    pub fn find(&self, name: &str) -> Option<SUnitId> {
        self.index.get(name).copied()
    }

    /// Resolve an s-unit name, failing with [`DynamicsError::UnknownSUnit`].
    pub fn parse(&self, name: &str) -> Result<SUnitId, DynamicsError> {
        self.find(name)
            .ok_or_else(|| DynamicsError::UnknownSUnit(name.to_string()))
    }

    /// Check that `unit` belongs to this map.
    pub fn validate(&self, unit: SUnitId) -> Result<SUnitId, DynamicsError> {
        if unit.to_index() < self.names.len() {
            Ok(unit)
        } else {
            Err(DynamicsError::UnknownSUnit(unit.to_string()))
        }
    }

    /// Both s-units of `node`, ordered as `[state 0, state 1]`.
    pub fn variable_units(&self, node: NodeId) -> [SUnitId; 2] {
        [SUnitId::new(node, false), SUnitId::new(node, true)]
    }

    /// Single nodes only treat their `1` s-unit as canonical.
    pub fn is_canonical(&self, unit: SUnitId) -> bool {
        !self.single[unit.node().to_index()] || unit.state()
    }

    pub fn canonical_units(&self) -> Vec<SUnitId> {
        self.units().filter(|it| self.is_canonical(*it)).collect()
    }

    /// Translate a list of s-units into a [`Configuration`].
    ///
    /// Fails if some unit is unknown or if two units assign different states to one variable.
    pub fn configuration(&self, seed: &[SUnitId]) -> Result<Configuration, DynamicsError> {
        let mut configuration = Configuration::unresolved(self.num_nodes());
        for unit in seed {
            let unit = self.validate(*unit)?;
            let node = unit.node();
            match configuration.get(node) {
                Some(value) if value != unit.state() => {
                    return Err(DynamicsError::Contradiction(
                        self.variable_name(node).to_string(),
                    ));
                }
                _ => configuration.set(node, Some(unit.state())),
            }
        }
        Ok(configuration)
    }

    /// Resolve a collection of s-unit names into a [`SUnitSet`].
    pub fn set_from_names<'a, I: IntoIterator<Item = &'a str>>(
        &self,
        names: I,
    ) -> Result<SUnitSet, DynamicsError> {
        let mut set = SUnitSet::new(self.num_nodes());
        for name in names {
            set.insert(self.parse(name)?);
        }
        Ok(set)
    }

    pub fn encode_state(&self, state: &State) -> SUnitSet {
        SUnitSet::from(state)
    }

    pub fn unit_names(&self, set: &SUnitSet) -> Vec<&str> {
        set.iter().map(|it| self.name(it)).collect()
    }

    /// A human-readable rendering of an s-unit set (used for logging).
    pub fn format_units(&self, set: &SUnitSet) -> String {
        format!("{{{}}}", self.unit_names(set).join(", "))
    }
}
