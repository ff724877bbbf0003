use crate::core::models::grid::Grid;
use crate::core::models::plan::Plan;
use crate::engine::config::LayoutConfig;
use crate::engine::context::LayoutContext;
use crate::engine::placement;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::LayoutOutcome;
use crate::engine::tasks;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, thread_rng};
use tracing::{info, instrument, warn};

/// Generates a fresh layout for `plan`, seeding the shuffle from `config.seed` when set.
pub fn run(plan: &Plan, config: &LayoutConfig, reporter: &ProgressReporter) -> LayoutOutcome {
    match config.seed {
        Some(seed) => run_with_rng(plan, config, reporter, &mut StdRng::seed_from_u64(seed)),
        None => run_with_rng(plan, config, reporter, &mut thread_rng()),
    }
}

/// Generates a fresh layout for `plan` with an explicit random source.
///
/// Never fails: a plan without students, or with a degenerate grid shape, yields an empty
/// grid.
#[instrument(skip_all, name = "layout_workflow", fields(students = plan.students().len()))]
pub fn run_with_rng(
    plan: &Plan,
    config: &LayoutConfig,
    reporter: &ProgressReporter,
    rng: &mut impl Rng,
) -> LayoutOutcome {
    if plan.students().is_empty() || plan.grid_rows() == 0 || plan.grid_cols() == 0 {
        info!("Nothing to arrange; returning an empty grid.");
        return LayoutOutcome::empty();
    }
    let grid = match Grid::new(plan.grid_rows(), plan.grid_cols()) {
        Ok(grid) => grid,
        Err(e) => {
            warn!(error = %e, "Plan has an unusable grid shape; returning an empty grid.");
            return LayoutOutcome::empty();
        }
    };

    let context = LayoutContext::new(plan, reporter, config);

    // === Phase 1: Pins and shuffled fill ===
    let mut state = placement::initial_layout(&context, grid, rng);
    let initial_score = context.scorer.grid_score(&state.grid);

    // === Phase 2: Swap search ===
    reporter.report(Progress::PhaseStart {
        name: "Local Search",
    });
    let stats = tasks::local_search::run(&context, &mut state);
    let score = context.scorer.grid_score(&state.grid);
    reporter.report(Progress::StatusUpdate {
        text: format!("Score {:.1} after {} swap(s)", score.total(), stats.swaps),
    });
    reporter.report(Progress::PhaseFinish);

    if stats.converged {
        info!(
            passes = stats.passes,
            swaps = stats.swaps,
            initial = initial_score.total(),
            score = score.total(),
            "Layout converged."
        );
    } else {
        warn!(
            passes = stats.passes,
            swaps = stats.swaps,
            score = score.total(),
            "Pass limit reached before the layout converged."
        );
        reporter.report(Progress::Message(format!(
            "Stopped after {} passes without converging",
            stats.passes
        )));
    }

    LayoutOutcome {
        grid: state.grid,
        score,
        passes: stats.passes,
        swaps: stats.swaps,
        converged: stats.converged,
        unplaced: state.unplaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::constraint::{ConstraintKind, RowPreference};
    use crate::core::models::grid::Seat;
    use crate::core::models::ids::StudentId;
    use crate::core::models::plan::PlanParts;
    use crate::core::models::student::{Gender, Student};
    use std::collections::HashSet;

    fn id(s: &str) -> StudentId {
        StudentId::from(s)
    }

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn roster(n: usize) -> Vec<Student> {
        (0..n)
            .map(|i| {
                let gender = if i % 2 == 0 { Gender::Female } else { Gender::Male };
                Student::new(format!("s{i}"), "S", &i.to_string(), gender)
            })
            .collect()
    }

    #[test]
    fn empty_plan_yields_empty_grid() {
        let outcome = run_with_rng(
            &Plan::new(),
            &LayoutConfig::default(),
            &ProgressReporter::new(),
            &mut seeded(1),
        );
        assert!(outcome.grid.is_empty());
        assert!(outcome.converged);
        assert_eq!(outcome.swaps, 0);
    }

    #[test]
    fn every_student_is_seated_exactly_once() {
        let mut plan = Plan::new();
        plan.replace_students(roster(23));
        let outcome = run_with_rng(
            &plan,
            &LayoutConfig::default(),
            &ProgressReporter::new(),
            &mut seeded(8),
        );

        assert_eq!(outcome.grid.occupied_count(), 23);
        let unique: HashSet<_> = outcome.grid.occupied().map(|(_, id)| id.clone()).collect();
        assert_eq!(unique.len(), 23);
        assert!(outcome.unplaced.is_empty());
    }

    #[test]
    fn occupancy_is_capped_by_grid_capacity() {
        let mut plan = Plan::new();
        plan.replace_students(roster(10));
        plan.resize(1, 4).unwrap();
        let outcome = run_with_rng(
            &plan,
            &LayoutConfig::default(),
            &ProgressReporter::new(),
            &mut seeded(2),
        );
        assert_eq!(outcome.grid.occupied_count(), 4);
        assert_eq!(outcome.unplaced.len(), 6);
    }

    #[test]
    fn oversized_declared_shape_yields_empty_outcome_instead_of_panicking() {
        let plan: Plan = PlanParts {
            students: roster(3),
            grid_rows: usize::MAX / 2 + 1,
            grid_cols: 4,
            ..PlanParts::default()
        }
        .into();
        let outcome = run_with_rng(
            &plan,
            &LayoutConfig::default(),
            &ProgressReporter::new(),
            &mut seeded(4),
        );
        assert_eq!(outcome, LayoutOutcome::empty());
    }

    #[test]
    fn front_preference_and_ban_are_honoured_in_small_room() {
        let mut plan = Plan::new();
        plan.replace_students(vec![
            Student::new("a", "A", "", Gender::Other),
            Student::new("b", "B", "", Gender::Other),
            Student::new("c", "C", "", Gender::Other),
            Student::new("d", "D", "", Gender::Other),
        ]);
        plan.resize(2, 2).unwrap();
        plan.set_row_preference(&id("a"), RowPreference::Front)
            .unwrap();
        plan.upsert_constraint(ConstraintKind::Ban, &id("a"), &id("b"))
            .unwrap();

        for seed in 0..25 {
            let outcome = run_with_rng(
                &plan,
                &LayoutConfig::default(),
                &ProgressReporter::new(),
                &mut seeded(seed),
            );
            assert!(outcome.converged);
            let a = outcome.grid.position_of(&id("a")).unwrap();
            let b = outcome.grid.position_of(&id("b")).unwrap();
            assert_eq!(a.row, 0, "seed {seed}");
            assert_ne!(a.row, b.row, "seed {seed}");
        }
    }

    #[test]
    fn pinned_student_keeps_seat() {
        let mut plan = Plan::new();
        plan.replace_students(roster(8));
        plan.pin(&id("s3"), Seat::new(1, 2)).unwrap();
        for seed in 0..10 {
            let outcome = run_with_rng(
                &plan,
                &LayoutConfig::default(),
                &ProgressReporter::new(),
                &mut seeded(seed),
            );
            assert_eq!(outcome.grid.get(Seat::new(1, 2)), Some(&id("s3")));
        }
    }

    #[test]
    fn configured_seed_makes_runs_reproducible() {
        let mut plan = Plan::new();
        plan.replace_students(roster(17));
        let config = LayoutConfig {
            seed: Some(99),
            ..LayoutConfig::default()
        };
        let first = run(&plan, &config, &ProgressReporter::new());
        let second = run(&plan, &config, &ProgressReporter::new());
        assert_eq!(first.grid, second.grid);
    }

    #[test]
    fn reported_score_matches_final_grid() {
        let mut plan = Plan::new();
        plan.replace_students(roster(9));
        plan.upsert_constraint(ConstraintKind::Prefer, &id("s0"), &id("s8"))
            .unwrap();
        let outcome = run_with_rng(
            &plan,
            &LayoutConfig::default(),
            &ProgressReporter::new(),
            &mut seeded(4),
        );
        let rescored = crate::core::scoring::scorer::Scorer::new(&plan).grid_score(&outcome.grid);
        assert_eq!(outcome.score, rescored);
    }
}
