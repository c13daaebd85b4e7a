use crate::model::{SUnitMap, SUnitSet};
use std::collections::HashMap;
use std::hash::Hash;

/// Find the first snapshot that repeats an earlier one.
///
/// Returns `(first, repeat)`, i.e., the indices of the earlier and the later occurrence.
pub fn first_repeat<T: Eq + Hash>(snapshots: &[T]) -> Option<(usize, usize)> {
    let mut seen = HashMap::with_capacity(snapshots.len());
    for (i, snapshot) in snapshots.iter().enumerate() {
        if let Some(first) = seen.insert(snapshot, i) {
            return Some((first, i));
        }
    }
    None
}

/// Length of the cycle closed by the first repeated snapshot, or `None` if the trajectory
/// never repeats (i.e., it has not converged within its time limit).
///
/// A fixed point has length `1`.
pub fn cycle_length<T: Eq + Hash>(snapshots: &[T]) -> Option<usize> {
    first_repeat(snapshots).map(|(first, repeat)| repeat - first)
}

/// The long-run behavior of a trajectory: a fixed point or a limit cycle.
///
/// Limit cycles are stored starting from their smallest snapshot, so the same cycle
/// entered at a different phase yields an equal [`Attractor`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attractor {
    states: Vec<SUnitSet>,
}

impl Attractor {
    pub fn fixed_point(snapshot: SUnitSet) -> Attractor {
        Attractor {
            states: vec![snapshot],
        }
    }

    /// Create a limit cycle from its members in cycle order. Returns `None` for an empty cycle.
    pub fn cycle(mut states: Vec<SUnitSet>) -> Option<Attractor> {
        let start = states
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(i, _)| i)?;
        states.rotate_left(start);
        Some(Attractor { states })
    }

    pub fn states(&self) -> &[SUnitSet] {
        &self.states
    }

    /// The snapshot the cycle representative starts with.
    pub fn first(&self) -> &SUnitSet {
        // Attractors are never empty.
        &self.states[0]
    }

    /// Number of distinct snapshots in this attractor.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn is_fixed_point(&self) -> bool {
        self.states.len() == 1
    }

    /// E.g. `{a-1, b-0}` for a fixed point or `({a-0, b-0} → {a-1, b-1})` for a cycle.
    pub fn format(&self, units: &SUnitMap) -> String {
        if self.is_fixed_point() {
            units.format_units(self.first())
        } else {
            let members = self
                .states
                .iter()
                .map(|it| units.format_units(it))
                .collect::<Vec<_>>();
            format!("({})", members.join(" → "))
        }
    }
}

/// The attractor reached by one trajectory, together with its observed cycle length.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classification {
    pub attractor: Attractor,
    /// `None` if the trajectory contains no repeated snapshot.
    pub cycle_length: Option<usize>,
}

impl Classification {
    /// True if the trajectory closed a cycle (including a fixed point).
    pub fn converged(&self) -> bool {
        self.cycle_length.is_some()
    }

    /// Cycle length with non-converged trajectories reported as fixed points (length `1`).
    pub fn reported_length(&self) -> usize {
        self.cycle_length.unwrap_or(1)
    }
}

/// Reduce a trajectory of snapshots to its [`Classification`].
///
/// The members of the first closed cycle form the attractor. A trajectory without a repeat
/// is represented by its final snapshot. With `return_last`, the final snapshot is always
/// used, but the cycle length is still reported.
///
/// Returns `None` for an empty trajectory.
pub fn classify(snapshots: &[SUnitSet], return_last: bool) -> Option<Classification> {
    let last = snapshots.last()?;
    let repeat = first_repeat(snapshots);
    let cycle_length = repeat.map(|(first, repeat)| repeat - first);
    let attractor = match repeat {
        Some((first, repeat)) if !return_last => {
            Attractor::cycle(snapshots[first..repeat].to_vec())?
        }
        _ => Attractor::fixed_point(last.clone()),
    };
    Some(Classification {
        attractor,
        cycle_length,
    })
}
