use super::{Session, load_plan, report_layout, resolve_student, save_plan};
use crate::cli::{Commands, LayoutArgs, PlanTarget};
use crate::error::{CliError, Result};
use crate::render;
use seatplan::core::models::grid::Seat;
use seatplan::core::models::plan::Plan;
use seatplan::workflows::edit::Edit;
use tracing::{debug, info};

/// Runs one of the plan-editing subcommands: load, apply a single edit, save.
pub fn run(command: Commands, session: &Session) -> Result<()> {
    let (target, layout) = match &command {
        Commands::Arrange { target, layout }
        | Commands::Constrain { target, layout, .. }
        | Commands::Unconstrain { target, layout, .. }
        | Commands::GenderMode { target, layout, .. }
        | Commands::RowPref { target, layout, .. }
        | Commands::Unpin { target, layout, .. }
        | Commands::Resize { target, layout, .. } => (target.clone(), layout.clone()),
        Commands::Move { target, .. } | Commands::Rename { target, .. } => {
            (target.clone(), LayoutArgs::default())
        }
        Commands::Import(_) | Commands::Show { .. } => {
            return Err(CliError::Argument(format!(
                "'{}' does not edit a plan",
                command.name()
            )));
        }
    };

    let plan = load_plan(&target.plan)?;
    let edit = to_edit(&plan, command)?;
    debug!(edit = edit.name(), "Resolved command to plan edit.");

    let mut editor = session.editor(&layout)?;
    let updated = editor.apply(&plan, edit)?;
    if let Some(outcome) = editor.last_layout() {
        report_layout(&updated, outcome);
    }

    save(&updated, &target)?;
    print!("{}", render::seating_chart(&updated));
    Ok(())
}

fn save(plan: &Plan, target: &PlanTarget) -> Result<()> {
    let path = target.output_path();
    save_plan(plan, path)?;
    info!("Plan saved.");
    println!("Plan written to {:?}", path);
    Ok(())
}

/// Converts a 1-based row/column pair from the command line to a seat.
fn seat_from_cli(row: usize, col: usize) -> Result<Seat> {
    if row == 0 || col == 0 {
        return Err(CliError::Argument(
            "Rows and columns are numbered from 1".to_string(),
        ));
    }
    Ok(Seat::new(row - 1, col - 1))
}

fn to_edit(plan: &Plan, command: Commands) -> Result<Edit> {
    let edit = match command {
        Commands::Arrange { .. } => Edit::Regenerate,
        Commands::Constrain { kind, a, b, .. } => Edit::AddConstraint {
            kind,
            a: resolve_student(plan, &a)?,
            b: resolve_student(plan, &b)?,
        },
        Commands::Unconstrain { a, b, .. } => Edit::RemoveConstraint {
            a: resolve_student(plan, &a)?,
            b: resolve_student(plan, &b)?,
        },
        Commands::GenderMode { mode, .. } => Edit::SetGenderMode(mode),
        Commands::RowPref {
            student,
            preference,
            ..
        } => Edit::SetRowPreference {
            student: resolve_student(plan, &student)?,
            preference,
        },
        Commands::Move {
            student, row, col, ..
        } => Edit::MoveStudent {
            student: resolve_student(plan, &student)?,
            seat: seat_from_cli(row, col)?,
        },
        Commands::Unpin { student, .. } => Edit::Unpin(resolve_student(plan, &student)?),
        Commands::Resize { rows, cols, .. } => Edit::SetGridSize { rows, cols },
        Commands::Rename { name, .. } => Edit::SetClassName(name),
        Commands::Import(_) | Commands::Show { .. } => {
            return Err(CliError::Argument(
                "Command does not map to a plan edit".to_string(),
            ));
        }
    };
    Ok(edit)
}
