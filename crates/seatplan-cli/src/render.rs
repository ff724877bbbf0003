use itertools::Itertools;
use seatplan::core::models::constraint::{ConstraintKind, RowPreference};
use seatplan::core::models::grid::Seat;
use seatplan::core::models::ids::StudentId;
use seatplan::core::models::plan::Plan;
use seatplan::core::scoring::scorer::Scorer;
use std::fmt::Write;

const EMPTY_SEAT: &str = "-";
const MIN_CELL_WIDTH: usize = 8;

fn seat_text(plan: &Plan, seat: Seat) -> String {
    let Some(id) = plan.grid().get(seat) else {
        return EMPTY_SEAT.to_string();
    };
    let label = plan
        .student(id)
        .map(|s| s.seat_label())
        .unwrap_or_else(|| id.to_string());
    if plan.is_pinned(id) {
        format!("{label}*")
    } else {
        label
    }
}

/// The seating chart, front row first. Desk pairs are bracketed and pinned students
/// carry a `*`.
pub fn seating_chart(plan: &Plan) -> String {
    let grid = plan.grid();
    if grid.is_empty() {
        return "(no seating generated)\n".to_string();
    }

    let cells: Vec<Vec<String>> = (0..grid.rows())
        .map(|row| {
            (0..grid.cols())
                .map(|col| seat_text(plan, Seat::new(row, col)))
                .collect()
        })
        .collect();
    let width = cells
        .iter()
        .flatten()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_CELL_WIDTH);
    let label_width = grid.rows().to_string().len();

    let mut out = String::new();
    let _ = writeln!(out, "{:>label_width$}   FRONT", "");
    for (row, row_cells) in cells.iter().enumerate() {
        let desks = row_cells
            .chunks(2)
            .map(|desk| {
                let seats = desk.iter().map(|c| format!("{c:<width$}")).join(" | ");
                format!("[ {seats} ]")
            })
            .join("  ");
        let _ = writeln!(out, "{:>label_width$}  {desks}", row + 1);
    }
    out
}

/// Students sorted by "Last, First" with gender, seat and row preference.
pub fn roster(plan: &Plan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Students ({}):", plan.students().len());
    for student in plan
        .students()
        .iter()
        .sorted_by_key(|s| s.sort_name().to_lowercase())
    {
        let seat = match plan.grid().position_of(&student.id) {
            Some(seat) => format!("row {}, seat {}", seat.row + 1, seat.col + 1),
            None => "unseated".to_string(),
        };
        let preference = match plan.row_preference(&student.id) {
            RowPreference::Front => " (front)",
            RowPreference::Back => " (back)",
            RowPreference::None => "",
        };
        let _ = writeln!(
            out,
            "  {:<24} {}  {}{}",
            student.sort_name(),
            student.gender,
            seat,
            preference
        );
    }
    out
}

pub fn summary(plan: &Plan) -> String {
    let constraints = plan.constraints();
    let score = Scorer::new(plan).grid_score(plan.grid());

    let mut out = String::new();
    if !plan.class_name().is_empty() {
        let _ = writeln!(out, "Class: {}", plan.class_name());
    }
    let _ = writeln!(
        out,
        "Grid: {} rows x {} seats, {} of {} occupied",
        plan.grid_rows(),
        plan.grid_cols(),
        plan.grid().occupied_count(),
        plan.grid().capacity()
    );
    let _ = writeln!(out, "Gender mode: {}", plan.gender_mode());
    let _ = writeln!(
        out,
        "Constraints: {} ban, {} prefer, {} pinned",
        constraints.count_of(ConstraintKind::Ban),
        constraints.count_of(ConstraintKind::Prefer),
        plan.pins().len()
    );
    for (pair, kind) in constraints.iter() {
        let (a, b) = pair.ids();
        let name = |id: &StudentId| {
            plan.student(id)
                .map(|s| s.full_name())
                .unwrap_or_else(|| id.to_string())
        };
        let _ = writeln!(out, "  {kind}: {} / {}", name(a), name(b));
    }
    let _ = writeln!(
        out,
        "Score: {:.1} (rows {:.1}, pairs {:.1}, gender {:.1})",
        score.total(),
        score.row,
        score.pair,
        score.gender
    );
    out
}
