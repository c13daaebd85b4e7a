use crate::error::DynamicsError;

/// A single network variable with a fully tabulated update function.
///
/// The truth table is indexed by the binary value of the input bit pattern, where the first
/// input is the most significant bit. For example, for inputs `[a, b]`, row `2` is the
/// output for `a = 1, b = 0`.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    name: String,
    inputs: Vec<String>,
    truth_table: Vec<bool>,
    single: bool,
}

fn required_rows(name: &str, arity: usize) -> Result<usize, DynamicsError> {
    u32::try_from(arity)
        .ok()
        .and_then(|arity| 1usize.checked_shl(arity))
        .ok_or_else(|| DynamicsError::TruthTableGap {
            node: name.to_string(),
            expected: usize::MAX,
            found: 0,
        })
}

impl Node {
    /// Create a new [`Node`] from an explicit truth table.
    ///
    /// Fails with [`DynamicsError::TruthTableGap`] unless the table has exactly
    /// `2^inputs.len()` rows.
    pub fn new<S: Into<String>>(
        name: S,
        inputs: Vec<String>,
        truth_table: Vec<bool>,
    ) -> Result<Node, DynamicsError> {
        let name = name.into();
        let expected = required_rows(&name, inputs.len())?;
        if truth_table.len() != expected {
            return Err(DynamicsError::TruthTableGap {
                node: name,
                expected,
                found: truth_table.len(),
            });
        }
        Ok(Node {
            name,
            inputs,
            truth_table,
            single: false,
        })
    }

    /// Tabulate `function` over all input rows. The function receives input values
    /// in input order.
    pub fn from_function<S: Into<String>, F: FnMut(&[bool]) -> bool>(
        name: S,
        inputs: Vec<String>,
        mut function: F,
    ) -> Result<Node, DynamicsError> {
        let name = name.into();
        let arity = inputs.len();
        let rows = required_rows(&name, arity)?;
        let mut values = vec![false; arity];
        let mut table = Vec::with_capacity(rows);
        for row in 0..rows {
            for (i, value) in values.iter_mut().enumerate() {
                *value = (row >> (arity - 1 - i)) & 1 == 1;
            }
            table.push(function(&values));
        }
        Node::new(name, inputs, table)
    }

    /// Build a node from rows keyed by binary input strings (e.g. `"01" → true`).
    ///
    /// Every one of the `2^inputs.len()` patterns must be present exactly once.
    pub fn from_rows<'a, S: Into<String>, I: IntoIterator<Item = (&'a str, bool)>>(
        name: S,
        inputs: Vec<String>,
        rows: I,
    ) -> Result<Node, DynamicsError> {
        let name = name.into();
        let arity = inputs.len();
        let expected = required_rows(&name, arity)?;
        let mut table: Vec<Option<bool>> = vec![None; expected];
        for (row, output) in rows {
            let valid = row.len() == arity && row.chars().all(|c| c == '0' || c == '1');
            let index = match (valid, arity) {
                (false, _) => None,
                (true, 0) => Some(0),
                (true, _) => usize::from_str_radix(row, 2).ok(),
            };
            let Some(index) = index else {
                return Err(DynamicsError::InvalidTruthTableRow {
                    node: name,
                    row: row.to_string(),
                });
            };
            table[index] = Some(output);
        }
        let found = table.iter().filter(|it| it.is_some()).count();
        let Some(table) = table.into_iter().collect::<Option<Vec<_>>>() else {
            return Err(DynamicsError::TruthTableGap {
                node: name,
                expected,
                found,
            });
        };
        Node::new(name, inputs, table)
    }

    /// Mark this node as "single": only its `1` s-unit is considered canonical.
    pub fn into_single(mut self) -> Node {
        self.single = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn arity(&self) -> usize {
        self.inputs.len()
    }

    pub fn truth_table(&self) -> &[bool] {
        &self.truth_table
    }

    pub fn is_single(&self) -> bool {
        self.single
    }

    /// Output for the given row index (see [`Node`] for the encoding).
    pub fn output(&self, row: usize) -> bool {
        self.truth_table[row]
    }
}
