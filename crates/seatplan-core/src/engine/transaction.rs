use crate::core::models::grid::{Grid, GridError, Seat};

/// Mutable view over a working grid that supports reversible trial swaps.
pub struct GridView<'a> {
    grid: &'a mut Grid,
}

impl<'a> GridView<'a> {
    pub fn new(grid: &'a mut Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// Swaps `a` and `b`, runs `probe` on the swapped grid, then restores the original
    /// layout. Returns `None` when either seat lies outside the grid.
    pub fn trial_swap<F, R>(&mut self, a: Seat, b: Seat, probe: F) -> Option<R>
    where
        F: FnOnce(&Grid) -> R,
    {
        self.grid.swap(a, b).ok()?;
        let result = probe(self.grid);
        // Same seats as above, so the revert cannot fail.
        let _ = self.grid.swap(a, b);
        Some(result)
    }

    /// Makes a swap permanent. The grid is untouched when either seat is out of range.
    pub fn commit_swap(&mut self, a: Seat, b: Seat) -> Result<(), GridError> {
        self.grid.swap(a, b)
    }
}
