use super::{Session, report_layout, save_plan};
use crate::cli::ImportArgs;
use crate::error::{CliError, Result};
use crate::render;
use seatplan::core::io::roster;
use seatplan::core::models::plan::Plan;
use seatplan::workflows::edit::Edit;
use tracing::{info, warn};

pub fn run(args: ImportArgs, session: &Session) -> Result<()> {
    info!("Importing roster from {:?}", &args.roster);
    let import = roster::import_path(&args.roster)?;

    if !import.is_clean() {
        if args.strict {
            let details = import
                .issues
                .iter()
                .map(|issue| format!("  {}", issue))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(CliError::Argument(format!(
                "Roster {:?} has {} problem(s):\n{}",
                args.roster,
                import.issues.len(),
                details
            )));
        }
        for issue in &import.issues {
            warn!("Skipped roster row. {}", issue);
            println!("Skipped: {}", issue);
        }
    }
    println!("Imported {} students.", import.students.len());

    let mut editor = session.editor(&args.layout)?;
    let mut plan = Plan::new();
    if let Some(name) = args.class_name {
        plan = editor.apply(&plan, Edit::SetClassName(name))?;
    }
    let plan = editor.apply(&plan, Edit::SetStudents(import.students))?;

    if let Some(outcome) = editor.last_layout() {
        report_layout(&plan, outcome);
    }
    save_plan(&plan, &args.output)?;
    print!("{}", render::seating_chart(&plan));
    println!("Plan written to {:?}", args.output);
    Ok(())
}
