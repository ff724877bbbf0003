use crate::core::models::grid::{Grid, Seat};
use crate::core::models::ids::StudentId;
use crate::core::scoring::term::ScoreTerm;
use std::collections::BTreeSet;

/// Working layout during a run: the grid plus the seats whose occupants may not move.
#[derive(Debug, Clone, Default)]
pub struct SeatingState {
    pub grid: Grid,
    pub locked: BTreeSet<Seat>,
    pub unplaced: Vec<StudentId>,
}

impl SeatingState {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    pub fn is_locked(&self, seat: Seat) -> bool {
        self.locked.contains(&seat)
    }

    /// Occupied seats that local search is allowed to swap, in row-major order.
    pub fn movable(&self) -> Vec<(Seat, StudentId)> {
        self.grid
            .occupied()
            .filter(|(seat, _)| !self.is_locked(*seat))
            .map(|(seat, id)| (seat, id.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub passes: usize,
    pub swaps: usize,
    pub converged: bool,
}

/// Result of one layout run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutOutcome {
    pub grid: Grid,
    pub score: ScoreTerm,
    pub passes: usize,
    pub swaps: usize,
    pub converged: bool,
    /// Students left without a seat because the grid was full.
    pub unplaced: Vec<StudentId>,
}

impl LayoutOutcome {
    pub fn empty() -> Self {
        Self {
            converged: true,
            ..Self::default()
        }
    }
}
