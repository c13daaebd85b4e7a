//! Reduction of trajectories into attractors and their frequency table.
//!
//! A trajectory (a sequence of s-unit snapshots) is classified by its first repeated snapshot:
//! the snapshots between the two occurrences form the [`Attractor`] (a fixed point when the
//! repeat is immediate, a limit cycle otherwise). The [`AttractorTable`] then aggregates many
//! classifications, keeping how often every attractor was reached and which cycle lengths were
//! observed for it.
//!
//! A trajectory that never repeats within its time limit is *not converged*. Such runs are
//! still recorded (using their final snapshot), but they are counted separately, see
//! [`Classification::converged`] and [`AttractorTable::unconverged`].

mod cycle;
mod table;


pub use cycle::{Attractor, Classification, classify, cycle_length, first_repeat};
pub use table::{AttractorRecord, AttractorTable, SeedFailure};
