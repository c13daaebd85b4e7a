use crate::attractor::{Attractor, AttractorTable, Classification};
use crate::error::DynamicsError;
use crate::model::{Network, SUnitMap};
use crate::statistics::{
    aggregate_nodes_in_configs, attractor_inputs, classification_stats, constants, jaccard,
};
use crate::test_utils::{init_logger, mk_node, mk_switch, mk_toggle, mk_units, node};
use std::collections::BTreeSet;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "Expected {expected}, got {actual}"
    );
}

fn record(table: &mut AttractorTable, attractor: &Attractor, count: usize) {
    for _ in 0..count {
        let classification = Classification {
            attractor: attractor.clone(),
            cycle_length: Some(attractor.len()),
        };
        table.record(classification, 1);
    }
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|it| it.to_string()).collect()
}

#[test]
fn frozen_variable_is_constant() -> Result<(), DynamicsError> {
    init_logger();
    let network = Network::new(vec![
        mk_node("A", &["A"], &[0, 1]),
        mk_node("B", &["A"], &[1, 0]),
    ])?;
    let units = SUnitMap::new(&network);
    let attractor = Attractor::fixed_point(mk_units(&units, &["A-1", "B-0"]));
    let mut table = AttractorTable::new();
    record(&mut table, &attractor, 3);

    let probabilities = aggregate_nodes_in_configs(&table, &units)?;
    assert_eq!(probabilities[&node(&network, "A")], 1.0);
    assert_eq!(probabilities[&node(&network, "B")], 0.0);
    let frozen = constants(&probabilities)
        .into_iter()
        .map(|it| units.name(it))
        .collect::<Vec<_>>();
    assert_eq!(frozen, vec!["A-1", "B-0"]);
    Ok(())
}

#[test]
fn limit_cycle_members_share_weight() -> Result<(), DynamicsError> {
    init_logger();
    let network = mk_toggle();
    let units = SUnitMap::new(&network);
    let cycle = Attractor::cycle(vec![
        mk_units(&units, &["a-0", "b-0"]),
        mk_units(&units, &["a-1", "b-1"]),
    ])
    .unwrap();
    let fixed = Attractor::fixed_point(mk_units(&units, &["a-1", "b-0"]));
    let mut table = AttractorTable::new();
    record(&mut table, &cycle, 2);
    record(&mut table, &fixed, 2);

    let probabilities = aggregate_nodes_in_configs(&table, &units)?;
    assert_close(probabilities[&node(&network, "a")], 0.75);
    assert_close(probabilities[&node(&network, "b")], 0.25);
    assert!(constants(&probabilities).is_empty());
    Ok(())
}

#[test]
fn marginals_require_shared_vocabulary() {
    let network = mk_toggle();
    let units = SUnitMap::new(&network);
    let mut table = AttractorTable::new();
    let partial = Attractor::fixed_point(mk_units(&units, &["a-1"]));
    let full = Attractor::fixed_point(mk_units(&units, &["a-1", "b-0"]));
    record(&mut table, &partial, 1);
    record(&mut table, &full, 1);
    assert_eq!(
        aggregate_nodes_in_configs(&table, &units),
        Err(DynamicsError::InconsistentVocabulary("b".to_string()))
    );
    assert!(aggregate_nodes_in_configs(&AttractorTable::new(), &units)
        .unwrap()
        .is_empty());
}

#[test]
fn stats_of_empty_sets() {
    let perfect = classification_stats(&set(&[]), &set(&[]), 4);
    assert_eq!(perfect.accuracy, 1.0);
    assert_eq!(perfect.avg_sim, 1.0);
    assert_eq!(perfect.precision, 1.0);
    assert_eq!(perfect.recall, 1.0);
    assert_eq!(perfect.errors, 0.0);

    let no_label = classification_stats(&set(&["a-1"]), &set(&[]), 4);
    assert_eq!(no_label.precision, 0.0);
    assert_eq!(no_label.recall, 1.0);
    assert_eq!(no_label.fps, 0.25);
    assert_eq!(no_label.tns, 0.75);
    assert_eq!(no_label.accuracy, 0.75);
    assert_eq!(no_label.avg_sim, 0.0);

    let no_prediction = classification_stats(&set(&[]), &set(&["a-1", "b-0"]), 4);
    assert_eq!(no_prediction.precision, 1.0);
    assert_eq!(no_prediction.recall, 0.0);
    assert_eq!(no_prediction.fns, 1.0);
    assert_eq!(no_prediction.accuracy, 0.5);
    assert_eq!(no_prediction.errors, 0.5);
}

#[test]
fn stats_of_overlapping_sets() {
    let stats = classification_stats(&set(&["a", "b", "c"]), &set(&["b", "c", "d"]), 6);
    assert_close(stats.tps, 2.0 / 3.0);
    assert_close(stats.fns, 1.0 / 3.0);
    assert_close(stats.fps, 1.0 / 3.0);
    assert_close(stats.tns, 2.0 / 3.0);
    assert_close(stats.avg_sim, 0.5);
    assert_close(stats.accuracy, 4.0 / 6.0);
    assert_close(stats.errors, 2.0 / 6.0);
    assert_close(stats.recall, 2.0 / 3.0);
    assert_close(stats.precision, 2.0 / 3.0);

    // No true negatives and no false positives.
    let stats = classification_stats(&set(&["a"]), &set(&["a", "b"]), 2);
    assert_eq!(stats.fps, 0.0);
    assert_eq!(stats.tns, 1.0);
    assert_eq!(stats.accuracy, 0.5);
    assert_eq!(stats.precision, 1.0);
    assert_eq!(stats.recall, 0.5);
}

#[test]
fn jaccard_index() {
    assert_eq!(jaccard(&set(&["a", "b"]), &set(&["b", "c"])), 1.0 / 3.0);
    assert_eq!(jaccard(&set(&["a"]), &set(&["a"])), 1.0);
    assert_eq!(jaccard(&set(&[]), &set(&[])), 1.0);
    assert_eq!(jaccard(&set(&["a"]), &set(&[])), 0.0);
}

#[test]
fn inputs_of_attractor() {
    let network = mk_switch();
    let units = SUnitMap::new(&network);
    let fixed = Attractor::fixed_point(mk_units(&units, &["s-0", "p-0", "q-0"]));
    let inputs = attractor_inputs(&network, &fixed)
        .into_iter()
        .map(|it| units.name(it))
        .collect::<Vec<_>>();
    assert_eq!(inputs, vec!["s-0"]);
}
