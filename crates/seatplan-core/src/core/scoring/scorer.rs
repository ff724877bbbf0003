use super::term::ScoreTerm;
use crate::core::models::constraint::{ConstraintKind, GenderMode, RowPreference};
use crate::core::models::grid::{Grid, Seat};
use crate::core::models::ids::StudentId;
use crate::core::models::plan::Plan;
use crate::core::models::student::Gender;
use std::collections::HashMap;

pub const ROW_PREFERENCE_WEIGHT: f64 = 50.0;
pub const BAN_PENALTY: f64 = -1000.0;
pub const PREFER_BONUS: f64 = 50.0;
pub const GENDER_WEIGHT: f64 = 10.0;

/// Scores single seat assignments against the preferences recorded in a plan.
pub struct Scorer<'a> {
    plan: &'a Plan,
    genders: HashMap<&'a StudentId, Gender>,
}

impl<'a> Scorer<'a> {
    pub fn new(plan: &'a Plan) -> Self {
        let genders = plan
            .students()
            .iter()
            .map(|s| (&s.id, s.gender))
            .collect();
        Self { plan, genders }
    }

    /// Desirability of seating `student` at `seat`, given everyone else in `grid`.
    pub fn score_seat(&self, student: &StudentId, seat: Seat, grid: &Grid) -> ScoreTerm {
        let mut term = ScoreTerm {
            row: self.row_term(student, seat.row, grid.rows()),
            ..ScoreTerm::default()
        };

        if let Some(neighbor) = grid.neighbor_of(seat) {
            term.pair = self.pair_term(student, neighbor);
            term.gender = self.gender_term(student, neighbor);
        }

        term
    }

    /// Sum of [`Scorer::score_seat`] over every occupied seat.
    pub fn grid_score(&self, grid: &Grid) -> ScoreTerm {
        grid.occupied()
            .fold(ScoreTerm::default(), |mut acc, (seat, id)| {
                acc += self.score_seat(id, seat, grid);
                acc
            })
    }

    fn row_term(&self, student: &StudentId, row: usize, total_rows: usize) -> f64 {
        if total_rows <= 1 {
            return 0.0;
        }
        let depth = row as f64 / (total_rows - 1) as f64;
        let span = 2.0 * ROW_PREFERENCE_WEIGHT;
        match self.plan.row_preference(student) {
            RowPreference::None => 0.0,
            RowPreference::Front => ROW_PREFERENCE_WEIGHT - depth * span,
            RowPreference::Back => -ROW_PREFERENCE_WEIGHT + depth * span,
        }
    }

    fn pair_term(&self, student: &StudentId, neighbor: &StudentId) -> f64 {
        match self.plan.constraints().between(student, neighbor) {
            Some(ConstraintKind::Ban) => BAN_PENALTY,
            Some(ConstraintKind::Prefer) => PREFER_BONUS,
            None => 0.0,
        }
    }

    fn gender_term(&self, student: &StudentId, neighbor: &StudentId) -> f64 {
        let (Some(a), Some(b)) = (self.genders.get(student), self.genders.get(neighbor)) else {
            return 0.0;
        };
        let same = a == b;
        match self.plan.gender_mode() {
            GenderMode::None => 0.0,
            GenderMode::Same if same => GENDER_WEIGHT,
            GenderMode::Same => -GENDER_WEIGHT,
            GenderMode::Different if same => -GENDER_WEIGHT,
            GenderMode::Different => GENDER_WEIGHT,
        }
    }
}
