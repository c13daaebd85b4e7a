use crate::attractor::{Attractor, AttractorTable};
use crate::error::DynamicsError;
use crate::model::{Network, NodeId, SUnitId, SUnitMap};
use std::collections::{BTreeMap, BTreeSet};

/// Count-weighted probability that each variable is `1` across the attractors of `table`.
///
/// Every attractor contributes with weight `count / total_count`. Within a limit cycle, the
/// weight is split equally among its snapshots. All snapshots must resolve the same
/// variables, otherwise the result fails with [`DynamicsError::InconsistentVocabulary`].
/// An empty table yields an empty map.
pub fn aggregate_nodes_in_configs(
    table: &AttractorTable,
    units: &SUnitMap,
) -> Result<BTreeMap<NodeId, f64>, DynamicsError> {
    let mut vocabulary: Option<BTreeSet<NodeId>> = None;
    let mut weights = BTreeMap::new();
    for (attractor, record) in table.iter() {
        let share = record.count as f64 / attractor.len() as f64;
        for snapshot in attractor.states() {
            let nodes = snapshot.resolved_nodes().collect::<BTreeSet<_>>();
            let expected = vocabulary.get_or_insert_with(|| nodes.clone());
            if let Some(node) = expected.symmetric_difference(&nodes).next() {
                return Err(DynamicsError::InconsistentVocabulary(
                    units.variable_name(*node).to_string(),
                ));
            }
            for node in nodes {
                let weight = weights.entry(node).or_insert(0.0);
                if snapshot.value(node) == Some(true) {
                    *weight += share;
                }
            }
        }
    }

    let total = table.total_count() as f64;
    Ok(weights
        .into_iter()
        .map(|(node, weight)| (node, weight / total))
        .collect())
}

/// Variables that are frozen across all attractors: probability exactly `0` or `1`,
/// reported as the corresponding s-unit.
pub fn constants(probabilities: &BTreeMap<NodeId, f64>) -> BTreeSet<SUnitId> {
    probabilities
        .iter()
        .filter_map(|(node, probability)| {
            if *probability == 0.0 {
                Some(SUnitId::new(*node, false))
            } else if *probability == 1.0 {
                Some(SUnitId::new(*node, true))
            } else {
                None
            }
        })
        .collect()
}

/// The s-units of the input nodes (see [`Network::network_inputs`]) in the first snapshot
/// of `attractor`. For limit cycles, only the first snapshot is considered.
pub fn attractor_inputs(network: &Network, attractor: &Attractor) -> Vec<SUnitId> {
    let inputs = network.network_inputs();
    attractor
        .first()
        .iter()
        .filter(|unit| inputs.contains(&unit.node()))
        .collect()
}
