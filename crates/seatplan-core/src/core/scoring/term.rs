use std::ops::{Add, AddAssign};

/// Additive breakdown of a seat score. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreTerm {
    pub row: f64,
    pub pair: f64,
    pub gender: f64,
}

impl ScoreTerm {
    pub fn new(row: f64, pair: f64, gender: f64) -> Self {
        Self { row, pair, gender }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.row + self.pair + self.gender
    }
}

impl Add for ScoreTerm {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            row: self.row + rhs.row,
            pair: self.pair + rhs.pair,
            gender: self.gender + rhs.gender,
        }
    }
}

impl AddAssign for ScoreTerm {
    fn add_assign(&mut self, rhs: Self) {
        self.row += rhs.row;
        self.pair += rhs.pair;
        self.gender += rhs.gender;
    }
}
