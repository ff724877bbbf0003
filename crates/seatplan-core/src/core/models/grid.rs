use super::ids::StudentId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MAX_SEATS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GridError {
    #[error("Column count must be even so every seat belongs to a pair (got {0})")]
    OddColumns(usize),
    #[error("Seat {seat} is outside the {rows}x{cols} grid")]
    OutOfBounds { seat: Seat, rows: usize, cols: usize },
    #[error("A {rows}x{cols} grid exceeds the limit of {max} seats", max = MAX_SEATS)]
    TooLarge { rows: usize, cols: usize },
    #[error("Row {row} has {found} seats, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// A seat position. Ordering is row-major.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Seat {
    pub row: usize,
    pub col: usize,
}

impl Seat {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The other column of the desk pair that `col` belongs to.
#[inline]
pub const fn neighbor_column(col: usize) -> usize {
    col ^ 1
}

/// Fixed-shape seat matrix. Columns are grouped into desk pairs (0,1), (2,3), ...
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<StudentId>>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let capacity = Self::checked_capacity(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![None; capacity],
        })
    }

    /// Seat count of a `rows` x `cols` grid, validating the shape without allocating.
    pub fn checked_capacity(rows: usize, cols: usize) -> Result<usize, GridError> {
        if cols % 2 != 0 {
            return Err(GridError::OddColumns(cols));
        }
        rows.checked_mul(cols)
            .filter(|&seats| seats <= MAX_SEATS)
            .ok_or(GridError::TooLarge { rows, cols })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a grid from a row matrix. An empty matrix yields the empty grid.
    pub fn from_rows(rows: Vec<Vec<Option<StudentId>>>) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Ok(Self::empty());
        };
        let cols = first.len();
        let mut grid = Self::new(rows.len(), cols)?;
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::RaggedRow {
                    row: r,
                    found: row.len(),
                    expected: cols,
                });
            }
            for (c, cell) in row.into_iter().enumerate() {
                grid.cells[r * cols + c] = cell;
            }
        }
        Ok(grid)
    }

    pub fn to_rows(&self) -> Vec<Vec<Option<StudentId>>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells
            .chunks(self.cols)
            .map(|chunk| chunk.to_vec())
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, seat: Seat) -> bool {
        seat.row < self.rows && seat.col < self.cols
    }

    fn index_of(&self, seat: Seat) -> Result<usize, GridError> {
        if self.contains(seat) {
            Ok(seat.row * self.cols + seat.col)
        } else {
            Err(GridError::OutOfBounds {
                seat,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Occupant of a seat; `None` for an empty or out-of-range seat.
    pub fn get(&self, seat: Seat) -> Option<&StudentId> {
        self.index_of(seat)
            .ok()
            .and_then(|idx| self.cells[idx].as_ref())
    }

    /// Writes a seat, returning its previous occupant.
    pub fn set(
        &mut self,
        seat: Seat,
        occupant: Option<StudentId>,
    ) -> Result<Option<StudentId>, GridError> {
        let idx = self.index_of(seat)?;
        Ok(std::mem::replace(&mut self.cells[idx], occupant))
    }

    pub fn swap(&mut self, a: Seat, b: Seat) -> Result<(), GridError> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// The seat sharing a desk with `seat`, if it lies within the grid.
    pub fn neighbor_seat(&self, seat: Seat) -> Option<Seat> {
        let neighbor = Seat::new(seat.row, neighbor_column(seat.col));
        self.contains(neighbor).then_some(neighbor)
    }

    pub fn neighbor_of(&self, seat: Seat) -> Option<&StudentId> {
        self.neighbor_seat(seat).and_then(|n| self.get(n))
    }

    pub fn position_of(&self, id: &StudentId) -> Option<Seat> {
        self.cells
            .iter()
            .position(|cell| cell.as_ref() == Some(id))
            .map(|idx| self.seat_at(idx))
    }

    fn seat_at(&self, idx: usize) -> Seat {
        Seat::new(idx / self.cols, idx % self.cols)
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Seat, &StudentId)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.as_ref().map(|id| (self.seat_at(idx), id)))
    }

    pub fn empty_seats(&self) -> impl Iterator<Item = Seat> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| self.seat_at(idx))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<Option<StudentId>>>::deserialize(deserializer)?;
        Grid::from_rows(rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StudentId {
        StudentId::from(s)
    }

    #[test]
    fn new_rejects_odd_column_counts() {
        assert_eq!(Grid::new(2, 3), Err(GridError::OddColumns(3)));
        assert!(Grid::new(2, 4).is_ok());
    }

    #[test]
    fn neighbor_column_pairs_even_and_odd_columns() {
        assert_eq!(neighbor_column(0), 1);
        assert_eq!(neighbor_column(1), 0);
        assert_eq!(neighbor_column(4), 5);
        assert_eq!(neighbor_column(5), 4);
    }

    #[test]
    fn neighbor_seat_stays_within_the_same_row() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.neighbor_seat(Seat::new(2, 2)), Some(Seat::new(2, 3)));
        assert_eq!(grid.neighbor_seat(Seat::new(1, 1)), Some(Seat::new(1, 0)));
    }

    #[test]
    fn set_and_get_are_bounds_checked() {
        let mut grid = Grid::new(1, 2).unwrap();
        assert_eq!(grid.set(Seat::new(0, 1), Some(id("a"))), Ok(None));
        assert_eq!(grid.get(Seat::new(0, 1)), Some(&id("a")));
        assert_eq!(grid.get(Seat::new(5, 5)), None);
        assert!(matches!(
            grid.set(Seat::new(1, 0), Some(id("b"))),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn swap_exchanges_occupants_and_position_of_follows() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(Seat::new(0, 0), Some(id("a"))).unwrap();
        grid.set(Seat::new(1, 1), Some(id("b"))).unwrap();
        grid.swap(Seat::new(0, 0), Seat::new(1, 1)).unwrap();
        assert_eq!(grid.position_of(&id("a")), Some(Seat::new(1, 1)));
        assert_eq!(grid.position_of(&id("b")), Some(Seat::new(0, 0)));
        assert_eq!(grid.neighbor_of(Seat::new(1, 0)), Some(&id("a")));
    }

    #[test]
    fn empty_seats_are_enumerated_row_major() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(Seat::new(0, 1), Some(id("a"))).unwrap();
        let seats: Vec<_> = grid.empty_seats().collect();
        assert_eq!(seats, vec![Seat::new(0, 0), Seat::new(1, 0), Seat::new(1, 1)]);
    }

    #[test]
    fn oversized_shapes_are_rejected_without_overflow() {
        let huge = usize::MAX / 2 + 1;
        assert_eq!(
            Grid::new(huge, 4),
            Err(GridError::TooLarge { rows: huge, cols: 4 })
        );
        assert_eq!(
            Grid::new(MAX_SEATS / 2 + 1, 2),
            Err(GridError::TooLarge {
                rows: MAX_SEATS / 2 + 1,
                cols: 2
            })
        );
        assert_eq!(Grid::checked_capacity(MAX_SEATS / 4, 4), Ok(MAX_SEATS));
    }

    #[test]
    fn row_matrix_conversion_preserves_contents() {
        let rows = vec![
            vec![Some(id("a")), None],
            vec![None, Some(id("b"))],
        ];
        let grid = Grid::from_rows(rows.clone()).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.occupied_count(), 2);
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn from_rows_rejects_ragged_matrices() {
        let rows = vec![vec![None, None], vec![None]];
        assert_eq!(
            Grid::from_rows(rows),
            Err(GridError::RaggedRow {
                row: 1,
                found: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn empty_matrix_is_the_empty_grid() {
        let grid = Grid::from_rows(Vec::new()).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.rows(), 0);
        assert_eq!(serde_json::to_string(&grid).unwrap(), "[]");
    }
}
