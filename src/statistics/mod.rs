//! Summaries of an [`AttractorTable`](crate::attractor::AttractorTable): marginal
//! probabilities of node states, frozen constants, input states, and agreement metrics
//! between predicted and labelled sets of node states.

mod classification;
mod marginals;

#[cfg(test)]
mod tests;

pub use classification::{ClassificationStats, classification_stats, jaccard};
pub use marginals::{aggregate_nodes_in_configs, attractor_inputs, constants};
