use crate::model::{SUnitId, SUnitMap};

#[cfg(test)]
mod test_utils;

pub mod attractor;
pub mod dynamics;
pub mod error;
pub mod model;
pub mod search;
pub mod statistics;

/// A utility method for printing a seed as a set of s-unit names.
fn log_seed(units: &SUnitMap, seed: &[SUnitId]) -> String {
    let names = seed.iter().map(|it| units.name(*it)).collect::<Vec<_>>();
    format!("{{{}}}", names.join(", "))
}
