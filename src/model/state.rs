use crate::model::{NodeId, SUnitId};
use std::fmt::{Display, Formatter};

/// A fixed-width bit vector. Equality, ordering and hashing only look at the words,
/// so two vectors of the same width are equal iff they contain the same bits.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Bits {
    width: usize,
    words: Vec<u64>,
}

impl Bits {
    fn new(width: usize) -> Bits {
        Bits {
            width,
            words: vec![0; width.div_ceil(64)],
        }
    }

    fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.width);
        (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    fn set(&mut self, index: usize, value: bool) {
        debug_assert!(index < self.width);
        let mask = 1u64 << (index % 64);
        if value {
            self.words[index / 64] |= mask;
        } else {
            self.words[index / 64] &= !mask;
        }
    }

    fn count_ones(&self) -> usize {
        self.words.iter().map(|it| it.count_ones() as usize).sum()
    }

    fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, word)| {
            let mut word = *word;
            std::iter::from_fn(move || {
                if word == 0 {
                    None
                } else {
                    let bit = word.trailing_zeros() as usize;
                    word &= word - 1;
                    Some(i * 64 + bit)
                }
            })
        })
    }

    fn zip_with(&self, other: &Bits, op: impl Fn(u64, u64) -> u64) -> Bits {
        assert_eq!(self.width, other.width, "Bit vectors differ in width.");
        Bits {
            width: self.width,
            words: self
                .words
                .iter()
                .zip(other.words.iter())
                .map(|(a, b)| op(*a, *b))
                .collect(),
        }
    }
}

/// A full network state: one bit per node, indexed by [`NodeId`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State(Bits);

impl State {
    /// A state of `num_nodes` nodes where every node is `0`.
    pub fn new(num_nodes: usize) -> State {
        State(Bits::new(num_nodes))
    }

    pub fn from_values(values: &[bool]) -> State {
        let mut state = State::new(values.len());
        for (i, value) in values.iter().enumerate() {
            state.0.set(i, *value);
        }
        state
    }

    /// Build a state from a binary string where the first character is node `0`.
    ///
    /// Returns `None` if the string contains characters other than `0` and `1`.
    pub fn from_binary(binary: &str) -> Option<State> {
        let values = binary
            .chars()
            .map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        Some(State::from_values(&values))
    }

    pub fn num_nodes(&self) -> usize {
        self.0.width
    }

    pub fn get(&self, node: NodeId) -> bool {
        self.0.get(node.to_index())
    }

    pub fn set(&mut self, node: NodeId, value: bool) {
        self.0.set(node.to_index(), value)
    }

    pub fn values(&self) -> Vec<bool> {
        (0..self.0.width).map(|i| self.0.get(i)).collect()
    }

    /// The set of nodes that are `1` in this state.
    pub fn active_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.ones().map(NodeId::from_index)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.0.width {
            write!(f, "{}", if self.0.get(i) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// A set of s-units, i.e., a (possibly partial) snapshot of the network.
///
/// A full state contains exactly one s-unit for every node. A partial snapshot contains
/// at most one s-unit per node, with unresolved nodes having none.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SUnitSet(Bits);

impl SUnitSet {
    /// An empty set of s-units for a network with `num_nodes` nodes.
    pub fn new(num_nodes: usize) -> SUnitSet {
        SUnitSet(Bits::new(2 * num_nodes))
    }

    pub fn from_units(num_nodes: usize, units: impl IntoIterator<Item = SUnitId>) -> SUnitSet {
        let mut set = SUnitSet::new(num_nodes);
        for unit in units {
            set.insert(unit);
        }
        set
    }

    pub fn num_nodes(&self) -> usize {
        self.0.width / 2
    }

    pub fn insert(&mut self, unit: SUnitId) {
        self.0.set(unit.to_index(), true)
    }

    pub fn remove(&mut self, unit: SUnitId) {
        self.0.set(unit.to_index(), false)
    }

    pub fn contains(&self, unit: SUnitId) -> bool {
        self.0.get(unit.to_index())
    }

    pub fn len(&self) -> usize {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0.words.iter().all(|it| *it == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = SUnitId> + '_ {
        self.0.ones().map(SUnitId::from_index)
    }

    /// The value of `node` in this snapshot, or `None` if the node is unresolved
    /// (or contradictory, i.e., both of its s-units are present).
    pub fn value(&self, node: NodeId) -> Option<bool> {
        let zero = self.contains(SUnitId::new(node, false));
        let one = self.contains(SUnitId::new(node, true));
        match (zero, one) {
            (true, false) => Some(false),
            (false, true) => Some(true),
            _ => None,
        }
    }

    /// Nodes that have exactly one s-unit in this set.
    pub fn resolved_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.num_nodes())
            .map(NodeId::from_index)
            .filter(|node| self.value(*node).is_some())
    }

    pub fn union(&self, other: &SUnitSet) -> SUnitSet {
        SUnitSet(self.0.zip_with(&other.0, |a, b| a | b))
    }

    pub fn intersect(&self, other: &SUnitSet) -> SUnitSet {
        SUnitSet(self.0.zip_with(&other.0, |a, b| a & b))
    }

    pub fn minus(&self, other: &SUnitSet) -> SUnitSet {
        SUnitSet(self.0.zip_with(&other.0, |a, b| a & !b))
    }

    pub fn is_subset(&self, other: &SUnitSet) -> bool {
        self.minus(other).is_empty()
    }
}

impl From<&State> for SUnitSet {
    fn from(value: &State) -> Self {
        let num_nodes = value.num_nodes();
        SUnitSet::from_units(
            num_nodes,
            (0..num_nodes)
                .map(NodeId::from_index)
                .map(|node| SUnitId::new(node, value.get(node))),
        )
    }
}
