use crate::model::{Network, Node, NodeId, SUnitMap, SUnitSet};

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

fn names(inputs: &[&str]) -> Vec<String> {
    inputs.iter().map(|it| it.to_string()).collect()
}

/// Build a node from a truth table given as a list of output bits.
pub fn mk_node(name: &str, inputs: &[&str], table: &[u8]) -> Node {
    let table = table.iter().map(|it| *it == 1).collect();
    Node::new(name, names(inputs), table).expect("Invalid test node")
}

/// `x* = x`, `y* = x`. Every state converges to the fixed point where `y = x`.
pub fn mk_identity_pair() -> Network {
    Network::new(vec![
        mk_node("x", &["x"], &[0, 1]),
        mk_node("y", &["x"], &[0, 1]),
    ])
    .expect("Invalid test network")
}

/// `a* = !b`, `b* = !a`. Synchronously, `01` and `10` are fixed points and `00 ⇄ 11`
/// is a cycle of length two.
pub fn mk_toggle() -> Network {
    Network::new(vec![
        mk_node("a", &["b"], &[1, 0]),
        mk_node("b", &["a"], &[1, 0]),
    ])
    .expect("Invalid test network")
}

/// `a* = !b`, `b* = a`. Synchronously, all four states form the cycle
/// `00 → 10 → 11 → 01 → 00`.
pub fn mk_oscillator() -> Network {
    Network::new(vec![
        mk_node("a", &["b"], &[1, 0]),
        mk_node("b", &["a"], &[0, 1]),
    ])
    .expect("Invalid test network")
}

/// A three-node network with an input node:
///
/// - `s* = s` (input),
/// - `p* = s & !q`,
/// - `q* = p`.
///
/// With `s = 0`, everything converges to `000`. With `s = 1`, `p` and `q`
/// oscillate synchronously through `100 → 110 → 111 → 101 → 100`.
pub fn mk_switch() -> Network {
    Network::new(vec![
        mk_node("s", &["s"], &[0, 1]),
        mk_node("p", &["s", "q"], &[0, 0, 1, 0]),
        mk_node("q", &["p"], &[0, 1]),
    ])
    .expect("Invalid test network")
}

pub fn node(network: &Network, name: &str) -> NodeId {
    network.find_node(name).expect("Unknown test node")
}

/// Build an s-unit set from names such as `"x-1"`.
pub fn mk_units(units: &SUnitMap, names: &[&str]) -> SUnitSet {
    units
        .set_from_names(names.iter().copied())
        .expect("Unknown test s-unit")
}
