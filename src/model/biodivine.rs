use crate::error::DynamicsError;
use crate::model::{Network, Node};
use biodivine_lib_param_bn::BooleanNetwork;
use log::debug;
use std::collections::HashMap;

/// Tabulate every update function of a fully specified [`BooleanNetwork`].
///
/// Node inputs are the regulators of each variable. Variables without an update function,
/// or with uninterpreted parameters, are rejected with
/// [`DynamicsError::ParametrizedFunction`].
impl TryFrom<&BooleanNetwork> for Network {
    type Error = DynamicsError;

    fn try_from(value: &BooleanNetwork) -> Result<Self, Self::Error> {
        let mut nodes = Vec::with_capacity(value.num_vars());
        for var in value.variables() {
            let name = value.get_variable_name(var).clone();
            let Some(function) = value.get_update_function(var) else {
                return Err(DynamicsError::ParametrizedFunction(name));
            };

            let regulators = value.regulators(var);
            let inputs = regulators
                .iter()
                .map(|it| value.get_variable_name(*it).clone())
                .collect::<Vec<_>>();

            let mut valuation = HashMap::with_capacity(regulators.len());
            let mut failed = false;
            let node = Node::from_function(name.clone(), inputs, |row| {
                for (regulator, input) in regulators.iter().zip(row) {
                    valuation.insert(*regulator, *input);
                }
                function.evaluate(&valuation).unwrap_or_else(|| {
                    failed = true;
                    false
                })
            })?;
            if failed {
                return Err(DynamicsError::ParametrizedFunction(name));
            }

            debug!("Tabulated `{}` with {} inputs.", node.name(), node.arity());
            nodes.push(node);
        }
        Network::new(nodes)
    }
}

impl TryFrom<BooleanNetwork> for Network {
    type Error = DynamicsError;

    fn try_from(value: BooleanNetwork) -> Result<Self, Self::Error> {
        Network::try_from(&value)
    }
}
