use crate::core::models::grid::Seat;
use crate::core::models::ids::StudentId;
use crate::engine::context::LayoutContext;
use crate::engine::progress::Progress;
use crate::engine::state::{SearchStats, SeatingState};
use crate::engine::transaction::GridView;
use itertools::Itertools;
use tracing::{debug, instrument, trace, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct SwapMove {
    pub a: Seat,
    pub b: Seat,
    pub gain: f64,
}

/// Scans unordered pairs of movable seats in row-major order and returns the first swap
/// that strictly raises the two occupants' combined score.
pub fn find_improving_swap(
    context: &LayoutContext,
    view: &mut GridView,
    movable: &[(Seat, StudentId)],
) -> Option<SwapMove> {
    for ((seat_a, id_a), (seat_b, id_b)) in movable.iter().tuple_combinations() {
        let before = context.seat_score(id_a, *seat_a, view.grid())
            + context.seat_score(id_b, *seat_b, view.grid());
        let after = view.trial_swap(*seat_a, *seat_b, |swapped| {
            context.seat_score(id_a, *seat_b, swapped) + context.seat_score(id_b, *seat_a, swapped)
        })?;

        if after > before {
            return Some(SwapMove {
                a: *seat_a,
                b: *seat_b,
                gain: after - before,
            });
        }
    }
    None
}

/// First-improvement hill climbing over pairwise swaps of non-pinned students.
///
/// Each pass commits at most one swap and the next pass rescans from the top. The search
/// stops at the first pass that finds nothing, or after `max_passes`.
#[instrument(skip_all, name = "local_search_task", fields(max_passes = context.config.max_passes))]
pub fn run(context: &LayoutContext, state: &mut SeatingState) -> SearchStats {
    let max_passes = context.config.max_passes;
    let mut stats = SearchStats::default();

    context.reporter.report(Progress::TaskStart {
        total_steps: max_passes as u64,
    });

    for pass in 1..=max_passes {
        stats.passes = pass;
        let movable = state.movable();
        let mut view = GridView::new(&mut state.grid);

        match find_improving_swap(context, &mut view, &movable) {
            Some(swap) => {
                if let Err(e) = view.commit_swap(swap.a, swap.b) {
                    warn!(pass, error = %e, "Could not commit swap; stopping search.");
                    break;
                }
                stats.swaps += 1;
                trace!(pass, a = %swap.a, b = %swap.b, gain = swap.gain, "Committed swap.");
            }
            None => {
                stats.converged = true;
                debug!(pass, "No improving swap left; search converged.");
                context.reporter.report(Progress::TaskIncrement);
                break;
            }
        }
        context.reporter.report(Progress::TaskIncrement);
    }

    context.reporter.report(Progress::TaskFinish);
    stats
}
