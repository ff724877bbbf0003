use super::context::LayoutContext;
use super::progress::Progress;
use super::state::SeatingState;
use crate::core::models::grid::Grid;
use crate::core::models::ids::StudentId;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Builds the starting layout: valid pins first, then everyone else shuffled into the
/// remaining seats in row-major order.
pub fn initial_layout(context: &LayoutContext, grid: Grid, rng: &mut impl Rng) -> SeatingState {
    context.reporter.report(Progress::PhaseStart {
        name: "Initial Placement",
    });

    let plan = context.plan;
    let mut state = SeatingState::new(grid);
    let mut pinned: HashSet<&StudentId> = HashSet::new();

    for (id, &seat) in plan.pins() {
        if !plan.contains_student(id) {
            warn!(student = %id, "Ignoring pin for a student no longer on the roster.");
            continue;
        }
        if !state.grid.contains(seat) {
            warn!(student = %id, %seat, "Ignoring pin outside the grid.");
            continue;
        }
        if state.is_locked(seat) {
            warn!(student = %id, %seat, "Ignoring pin on a seat already claimed by another pin.");
            continue;
        }
        // In-bounds was checked above.
        let _ = state.grid.set(seat, Some(id.clone()));
        state.locked.insert(seat);
        pinned.insert(id);
    }

    let mut remaining: Vec<&StudentId> = plan
        .students()
        .iter()
        .map(|s| &s.id)
        .filter(|id| !pinned.contains(id))
        .collect();
    remaining.shuffle(rng);

    let free: Vec<_> = state.grid.empty_seats().collect();
    let mut queue = remaining.into_iter();
    for (seat, id) in free.into_iter().zip(queue.by_ref()) {
        let _ = state.grid.set(seat, Some(id.clone()));
    }
    state.unplaced = queue.cloned().collect();

    if !state.unplaced.is_empty() {
        warn!(
            count = state.unplaced.len(),
            capacity = state.grid.capacity(),
            "Grid is too small; some students were left without a seat."
        );
    }
    debug!(locked = state.locked.len(), "Pins applied.");
    info!(
        seated = state.grid.occupied_count(),
        pinned = state.locked.len(),
        "Initial placement complete."
    );

    context.reporter.report(Progress::PhaseFinish);
    state
}
