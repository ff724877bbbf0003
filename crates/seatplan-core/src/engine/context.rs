use super::config::LayoutConfig;
use super::progress::ProgressReporter;
use crate::core::models::grid::{Grid, Seat};
use crate::core::models::ids::StudentId;
use crate::core::models::plan::Plan;
use crate::core::scoring::scorer::Scorer;

pub struct LayoutContext<'a> {
    pub plan: &'a Plan,
    pub scorer: Scorer<'a>,
    pub reporter: &'a ProgressReporter<'a>,
    pub config: &'a LayoutConfig,
}

impl<'a> LayoutContext<'a> {
    pub fn new(
        plan: &'a Plan,
        reporter: &'a ProgressReporter<'a>,
        config: &'a LayoutConfig,
    ) -> Self {
        Self {
            plan,
            scorer: Scorer::new(plan),
            reporter,
            config,
        }
    }

    #[inline]
    pub fn seat_score(&self, student: &StudentId, seat: Seat, grid: &Grid) -> f64 {
        self.scorer.score_seat(student, seat, grid).total()
    }
}
