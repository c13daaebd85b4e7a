use cancel_this::Cancelled;
use thiserror::Error;

/// Errors raised while building a model, running dynamics, or computing statistics.
///
/// Model errors (unknown names, contradictions, truth-table gaps) are fatal and always
/// propagate to the caller. [`DynamicsError::UnresolvedConfiguration`] and
/// [`DynamicsError::Propagation`] are "per-seed" failures: a brute-force search records them
/// and continues with the remaining seeds.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DynamicsError {
    #[error("variable `{0}` does not exist in the network")]
    UnknownVariable(String),
    #[error("s-unit `{0}` does not exist in the s-unit map")]
    UnknownSUnit(String),
    #[error("node `{0}` is declared more than once")]
    DuplicateNode(String),
    #[error("truth table of `{node}` has {found} rows, but {expected} are required")]
    TruthTableGap {
        node: String,
        expected: usize,
        found: usize,
    },
    #[error("truth table row `{row}` of `{node}` is not a valid input pattern")]
    InvalidTruthTableRow { node: String, row: String },
    #[error("update function of `{0}` is parametrised and cannot be tabulated")]
    ParametrizedFunction(String),
    #[error("variable `{0}` appears with both states in one configuration")]
    Contradiction(String),
    #[error("cannot enumerate {0} free variables (at most 63 are supported)")]
    TooManyFreeVariables(usize),
    #[error("configuration does not resolve variables {unresolved:?}")]
    UnresolvedConfiguration { unresolved: Vec<String> },
    #[error("partial propagation failed: {0}")]
    Propagation(String),
    #[error("attractors use different variable sets (`{0}` is not shared by all of them)")]
    InconsistentVocabulary(String),
    #[error("{0}")]
    #[cfg_attr(feature = "serde", serde(skip))]
    Cancelled(Cancelled),
}

impl From<Cancelled> for DynamicsError {
    fn from(value: Cancelled) -> Self {
        DynamicsError::Cancelled(value)
    }
}
