use crate::attractor::Attractor;
use crate::dynamics::UpdateScheme;
use crate::error::DynamicsError;
use crate::model::{Configuration, Network, NodeId, SUnitId, SUnitMap};
use crate::search::{
    BruteForceSearch, PartialPropagation, SearchConfig, SearchState, SeedSpace,
    TernaryPropagation, enumerate_combinations, exponential_configs, find_attractors_bruteforce,
    find_attractors_parallel, is_contradiction_free, known_units, sample_seeds,
};
use crate::test_utils::{
    init_logger, mk_identity_pair, mk_node, mk_switch, mk_toggle, mk_units, node,
};
use cancel_this::Cancellable;
use computation_process::Algorithm;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeSet, HashSet};

fn names(units: &SUnitMap, seed: &[SUnitId]) -> Vec<String> {
    seed.iter().map(|it| units.name(*it).to_string()).collect()
}

fn parse(units: &SUnitMap, names: &[&str]) -> Vec<SUnitId> {
    names.iter().map(|it| units.parse(it).unwrap()).collect()
}

fn name_sets(trajectory: &[&[&str]]) -> Vec<BTreeSet<String>> {
    trajectory
        .iter()
        .map(|it| it.iter().map(|name| name.to_string()).collect())
        .collect()
}

/// A propagation that always reports the same trajectory.
#[derive(Debug)]
struct FixedPropagation(Vec<BTreeSet<String>>);

impl PartialPropagation for FixedPropagation {
    fn propagate(
        &self,
        _network: &Network,
        _units: &SUnitMap,
        _seed: &[SUnitId],
        _pinned: &[SUnitId],
        _time_limit: usize,
    ) -> Result<Vec<BTreeSet<String>>, DynamicsError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug)]
struct FailingPropagation;

impl PartialPropagation for FailingPropagation {
    fn propagate(
        &self,
        _network: &Network,
        _units: &SUnitMap,
        seed: &[SUnitId],
        _pinned: &[SUnitId],
        _time_limit: usize,
    ) -> Result<Vec<BTreeSet<String>>, DynamicsError> {
        Err(DynamicsError::Propagation(format!("cannot resolve {} units", seed.len())))
    }
}

#[test]
fn exponential_configs_enumerate_free_variables() -> Result<(), DynamicsError> {
    init_logger();
    let units = SUnitMap::new(&mk_switch());
    let pinned = parse(&units, &["s-1"]);
    let configs = exponential_configs(&units, &pinned, None)?;

    assert_eq!(configs.len(), 4);
    assert!(configs.iter().all(|it| it.len() == 3));
    assert!(configs.iter().all(|it| is_contradiction_free(it)));
    assert_eq!(names(&units, &configs[0]), vec!["p-0", "q-0", "s-1"]);
    assert_eq!(names(&units, &configs[1]), vec!["p-0", "q-1", "s-1"]);
    assert_eq!(names(&units, &configs[2]), vec!["p-1", "q-0", "s-1"]);
    assert_eq!(names(&units, &configs[3]), vec!["p-1", "q-1", "s-1"]);
    Ok(())
}

#[test]
fn exponential_configs_with_explicit_free_variables() -> Result<(), DynamicsError> {
    let network = mk_switch();
    let units = SUnitMap::new(&network);
    let pinned = parse(&units, &["s-0"]);
    let q = node(&network, "q");

    let configs = exponential_configs(&units, &pinned, Some(&[q]))?;
    assert_eq!(configs.len(), 2);
    assert_eq!(names(&units, &configs[0]), vec!["q-0", "s-0"]);
    assert_eq!(names(&units, &configs[1]), vec!["q-1", "s-0"]);

    // Nothing is free: the pinned units form the only seed.
    let all = parse(&units, &["s-0", "p-1", "q-1"]);
    assert_eq!(exponential_configs(&units, &all, None)?, vec![all.clone()]);
    Ok(())
}

#[test]
fn seed_space_rejects_invalid_input() {
    let network = mk_switch();
    let units = SUnitMap::new(&network);
    let s = node(&network, "s");

    assert_eq!(
        SeedSpace::new(&units, &parse(&units, &["s-1", "s-0"]), None),
        Err(DynamicsError::Contradiction("s".to_string()))
    );
    assert_eq!(
        SeedSpace::new(&units, &parse(&units, &["s-1"]), Some(&[s])),
        Err(DynamicsError::Contradiction("s".to_string()))
    );
    assert!(matches!(
        SeedSpace::new(&units, &[], Some(&[NodeId::from_index(7)])),
        Err(DynamicsError::UnknownVariable(_))
    ));

    let nodes = (0..64)
        .map(|i| {
            let name = format!("v{}", i);
            mk_node(&name, &[name.as_str()], &[0, 1])
        })
        .collect::<Vec<_>>();
    let large = SUnitMap::new(&Network::new(nodes).unwrap());
    assert_eq!(
        SeedSpace::new(&large, &[], None),
        Err(DynamicsError::TooManyFreeVariables(64))
    );
}

#[test]
fn duplicate_pinned_units_are_merged() -> Result<(), DynamicsError> {
    let network = mk_switch();
    let units = SUnitMap::new(&network);
    let pinned = parse(&units, &["s-1", "s-1"]);

    let space = SeedSpace::new(&units, &pinned, None)?;
    assert_eq!(names(&units, space.pinned()), vec!["s-1"]);
    let configs = exponential_configs(&units, &pinned, None)?;
    assert_eq!(configs.len(), 4);
    for seed in &configs {
        assert_eq!(seed.len(), 3);
        assert!(is_contradiction_free(seed));
    }

    let config = SearchConfig::from(network).with_pinned_names(["s-1", "s-1"])?;
    assert_eq!(names(&config.units, &config.pinned), vec!["s-1"]);
    Ok(())
}

#[test]
fn combinations_are_contradiction_free() {
    let units = SUnitMap::new(&mk_toggle());
    let pairs = enumerate_combinations(&units, 2)
        .into_iter()
        .map(|it| names(&units, &it))
        .collect::<Vec<_>>();
    assert_eq!(
        pairs,
        vec![
            vec!["a-0", "b-0"],
            vec!["a-0", "b-1"],
            vec!["a-1", "b-0"],
            vec!["a-1", "b-1"]
        ]
    );
    assert_eq!(enumerate_combinations(&units, 1).len(), 4);
    assert_eq!(
        enumerate_combinations(&units, 0),
        vec![Vec::<SUnitId>::new()]
    );
    assert!(enumerate_combinations(&units, 3).is_empty());

    let units = SUnitMap::new(&mk_switch());
    // Three variable pairs, four state combinations each.
    assert_eq!(enumerate_combinations(&units, 2).len(), 12);
}

#[test]
fn sampled_seeds_respect_replacement() {
    init_logger();
    let units = SUnitMap::new(&mk_switch());
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let unique = sample_seeds(&units, 2, 5, false, &mut rng);
    assert_eq!(unique.len(), 5);
    for seed in &unique {
        assert!(seed.len() == 2 && is_contradiction_free(seed));
    }
    let as_sets = unique
        .iter()
        .map(|it| it.iter().copied().collect::<BTreeSet<_>>())
        .collect::<HashSet<_>>();
    assert_eq!(as_sets.len(), 5);

    let repeated = sample_seeds(&units, 2, 30, true, &mut rng);
    assert_eq!(repeated.len(), 30);

    // Only four distinct seeds of size two exist, so sampling stops after its attempt budget.
    let units = SUnitMap::new(&mk_toggle());
    let bounded = sample_seeds(&units, 2, 10, false, &mut rng);
    assert_eq!(bounded.len(), 4);
}

#[test]
fn ternary_propagation_resolves_forced_nodes() -> Result<(), DynamicsError> {
    init_logger();
    let network = mk_switch();
    let units = SUnitMap::new(&network);
    let p = node(&network, "p");

    let mut configuration = Configuration::unresolved(3);
    configuration.set(node(&network, "s"), Some(false));
    assert_eq!(
        TernaryPropagation::resolve_node(&network, &configuration, p),
        Some(false)
    );
    configuration.set(node(&network, "s"), Some(true));
    assert_eq!(
        TernaryPropagation::resolve_node(&network, &configuration, p),
        None
    );

    let seed = parse(&units, &["s-0"]);
    let trajectory = TernaryPropagation.propagate(&network, &units, &seed, &seed, 10)?;
    assert_eq!(
        trajectory,
        name_sets(&[
            &["s-0"],
            &["p-0", "s-0"],
            &["p-0", "q-0", "s-0"],
            &["p-0", "q-0", "s-0"],
        ])
    );

    // With `s = 1`, nothing else can be resolved.
    let seed = parse(&units, &["s-1"]);
    let trajectory = TernaryPropagation.propagate(&network, &units, &seed, &[], 10)?;
    assert_eq!(trajectory, name_sets(&[&["s-1"], &["s-1"]]));
    Ok(())
}

#[test]
fn auxiliary_units_are_ignored() {
    let units = SUnitMap::new(&mk_toggle());
    let snapshots = known_units(&units, &name_sets(&[&["a-1", "t-7"], &["aux"]]));
    assert_eq!(snapshots[0], mk_units(&units, &["a-1"]));
    assert!(snapshots[1].is_empty());
}

#[test]
fn exhaustive_search_classifies_all_states() -> Cancellable<()> {
    init_logger();
    let network = mk_switch();
    let config = SearchConfig::from(&network);
    let units = config.units.clone();
    let state = SearchState::exhaustive(&config).unwrap();
    let table = BruteForceSearch::run(config, state)?;

    assert_eq!(table.len(), 2);
    assert_eq!(table.total_count(), 8);
    assert!(table.failures().is_empty());

    let fixed = Attractor::fixed_point(mk_units(&units, &["s-0", "p-0", "q-0"]));
    assert_eq!(table.count(&fixed), 4);
    assert_eq!(table.get(&fixed).unwrap().lengths, BTreeSet::from([1]));

    let cycle = table.attractors().find(|it| !it.is_fixed_point()).unwrap();
    assert_eq!(cycle.len(), 4);
    assert_eq!(table.count(cycle), 4);
    assert_eq!(table.get(cycle).unwrap().lengths, BTreeSet::from([4]));
    // The oscillation never stops early, so it always uses the whole time limit.
    assert_eq!(table.convergence_times(), &BTreeSet::from([1, 2, 3, 10]));
    Ok(())
}

#[test]
fn pinned_search_stays_in_pinned_subspace() -> Result<(), DynamicsError> {
    init_logger();
    let config = SearchConfig::from(mk_switch()).with_pinned_names(["s-1"])?;
    let table = find_attractors_bruteforce(&config, None)?;
    assert_eq!(table.len(), 1);
    assert_eq!(table.total_count(), 4);
    let s = config.units.parse("s-1")?;
    for attractor in table.attractors() {
        for snapshot in attractor.states() {
            assert!(snapshot.contains(s));
        }
    }
    Ok(())
}

#[test]
fn partial_seeds_use_propagation() -> Result<(), DynamicsError> {
    init_logger();
    let network = mk_switch();
    let p = node(&network, "p");
    let config = SearchConfig::from(&network).with_pinned_names(["s-0"])?;
    let table = find_attractors_bruteforce(&config, Some(&[p]))?;
    let fixed = Attractor::fixed_point(mk_units(&config.units, &["s-0", "p-0", "q-0"]));
    assert_eq!(table.len(), 1);
    assert_eq!(table.count(&fixed), 2);

    let custom = config
        .clone()
        .with_propagation(FixedPropagation(name_sets(&[&["s-0", "tmp"], &["s-0", "q-1"]])));
    let table = find_attractors_bruteforce(&custom, Some(&[p]))?;
    let open = Attractor::fixed_point(mk_units(&config.units, &["s-0", "q-1"]));
    assert_eq!(table.count(&open), 2);
    assert_eq!(table.unconverged(), 2);
    Ok(())
}

#[test]
fn failed_seeds_are_recorded() -> Result<(), DynamicsError> {
    init_logger();
    let network = mk_switch();
    let config = SearchConfig::from(&network)
        .with_pinned_names(["s-1"])?
        .with_propagation(FailingPropagation);
    let q = node(&network, "q");

    let table = find_attractors_bruteforce(&config, Some(&[q]))?;
    assert!(table.is_empty());
    assert_eq!(table.failures().len(), 2);
    assert_eq!(
        table.failures()[0].error,
        DynamicsError::Propagation("cannot resolve 2 units".to_string())
    );
    assert_eq!(
        names(&config.units, &table.failures()[1].seed),
        vec!["q-1", "s-1"]
    );
    Ok(())
}

#[test]
fn explicit_seeds_are_validated() {
    let config = SearchConfig::from(mk_switch())
        .with_pinned_names(["s-1"])
        .unwrap();
    let seeds = vec![parse(&config.units, &["s-0", "p-0", "q-0"])];
    assert_eq!(
        SearchState::from_seeds(&config, seeds).err(),
        Some(DynamicsError::Contradiction("s".to_string()))
    );

    // A seed that already contains the pinned unit is accepted as is.
    let seeds = vec![parse(&config.units, &["s-1", "p-0", "q-0"])];
    assert!(SearchState::from_seeds(&config, seeds).is_ok());
    assert_eq!(
        SearchConfig::from(mk_switch())
            .with_pinned_names(["s-2"])
            .err(),
        Some(DynamicsError::UnknownSUnit("s-2".to_string()))
    );
}

#[test]
fn parallel_search_matches_sequential() -> Result<(), DynamicsError> {
    init_logger();
    let config = SearchConfig::from(mk_switch())
        .with_scheme(UpdateScheme::stochastic())
        .with_break_early(false)
        .with_time_limit(12)
        .with_rng_seed(42);
    let seeds = exponential_configs(&config.units, &config.pinned, None)?;

    let state = SearchState::from_seeds(&config, seeds.clone())?;
    let sequential = BruteForceSearch::run(config.clone(), state)?;
    let parallel = find_attractors_parallel(&config, seeds)?;
    assert_eq!(sequential, parallel);
    assert_eq!(sequential, find_attractors_bruteforce(&config, None)?);
    Ok(())
}

#[test]
fn search_is_reproducible_for_rng_seed() -> Result<(), DynamicsError> {
    let config = SearchConfig::from(mk_identity_pair())
        .with_scheme(UpdateScheme::asynchronous())
        .with_rng_seed(7);
    let first = find_attractors_bruteforce(&config, None)?;
    let second = find_attractors_bruteforce(&config, None)?;
    assert_eq!(first, second);
    assert_eq!(first.total_count(), 4);
    Ok(())
}

#[test]
#[cfg(feature = "serde")]
fn suspended_search_survives_serialization() -> Cancellable<()> {
    use computation_process::{Computable, Stateful};
    init_logger();
    let config = SearchConfig::from(mk_switch())
        .with_scheme(UpdateScheme::stochastic())
        .with_break_early(false)
        .with_rng_seed(3);
    let state = SearchState::exhaustive(&config).unwrap();

    let mut search = BruteForceSearch::configure(config.clone(), state.clone());
    for _ in 0..3 {
        assert!(search.try_compute().is_err());
    }

    let json = serde_json::to_string(&search).expect("Failed to serialize search");
    let mut restored: BruteForceSearch =
        serde_json::from_str(&json).expect("Failed to deserialize search");
    let resumed = restored.compute()?;
    let fresh = BruteForceSearch::run(config, state)?;
    assert_eq!(resumed, fresh);
    Ok(())
}

#[test]
#[cfg(feature = "serde")]
fn deserialized_config_uses_default_propagation() {
    let config = SearchConfig::from(mk_switch()).with_propagation(FailingPropagation);
    assert!(config.propagation.is_some());

    let json = serde_json::to_string(&config).expect("Failed to serialize config");
    let restored: SearchConfig = serde_json::from_str(&json).expect("Failed to deserialize config");
    assert!(restored.propagation.is_none());
    assert_eq!(restored.pinned, config.pinned);
    assert_eq!(restored.time_limit, config.time_limit);
}
