pub mod edit;
pub mod import;
pub mod show;

use crate::cli::LayoutArgs;
use crate::config::PartialConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use seatplan::core::io::plan_file::JsonPlanFile;
use seatplan::core::io::traits::PlanFormat;
use seatplan::core::models::ids::StudentId;
use seatplan::core::models::plan::Plan;
use seatplan::engine::state::LayoutOutcome;
use seatplan::workflows::edit::PlanEditor;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Global options every subcommand needs.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub config_path: Option<PathBuf>,
    pub quiet: bool,
}

impl Session {
    pub fn editor(&self, layout: &LayoutArgs) -> Result<PlanEditor<'static>> {
        let config = PartialConfig::load(self.config_path.as_deref())?.merge_with_cli(layout)?;
        info!(
            max_passes = config.max_passes,
            seed = ?config.seed,
            "Layout configuration resolved."
        );
        let handler = if self.quiet {
            CliProgressHandler::hidden()
        } else {
            CliProgressHandler::new()
        };
        Ok(PlanEditor::new(config).with_reporter(handler.reporter()))
    }
}

pub fn load_plan(path: &Path) -> Result<Plan> {
    info!("Loading plan from {:?}", path);
    JsonPlanFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

pub fn save_plan(plan: &Plan, path: &Path) -> Result<()> {
    info!("Writing plan to {:?}", path);
    JsonPlanFile::write_to_path(plan, path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

pub fn resolve_student(plan: &Plan, query: &str) -> Result<StudentId> {
    plan.find_student(query)
        .map(|s| s.id.clone())
        .ok_or_else(|| CliError::Argument(format!("No student matches '{}'", query)))
}

/// Prints a one-line summary of a regeneration and warns about anyone left unseated.
pub fn report_layout(plan: &Plan, outcome: &LayoutOutcome) {
    println!(
        "Arranged {} students in {} passes ({} swaps{}), score {:.1}.",
        outcome.grid.occupied_count(),
        outcome.passes,
        outcome.swaps,
        if outcome.converged { "" } else { ", pass limit reached" },
        outcome.score.total()
    );
    for id in &outcome.unplaced {
        let name = plan
            .student(id)
            .map(|s| s.full_name())
            .unwrap_or_else(|| id.to_string());
        warn!(student = %id, "Student could not be seated.");
        println!("Warning: no seat left for {}.", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatplan::core::models::student::{Gender, Student};
    use tempfile::tempdir;

    fn plan() -> Plan {
        let mut plan = Plan::new();
        plan.replace_students(vec![
            Student::new("a1", "Ann", "Lee", Gender::Female),
            Student::new("b2", "Bob", "Ray", Gender::Male),
        ]);
        plan
    }

    #[test]
    fn resolve_student_accepts_ids_and_either_name_order() {
        let plan = plan();
        for query in ["b2", "Ray, Bob", "bob ray"] {
            assert_eq!(resolve_student(&plan, query).unwrap(), StudentId::from("b2"));
        }
        assert!(matches!(
            resolve_student(&plan, "Cy"),
            Err(CliError::Argument(msg)) if msg.contains("Cy")
        ));
    }

    #[test]
    fn plans_survive_a_save_and_load_through_the_cli_helpers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let mut plan = plan();
        plan.set_class_name("Period 1");

        save_plan(&plan, &path).unwrap();
        let loaded = load_plan(&path).unwrap();
        assert_eq!(loaded.class_name(), "Period 1");
        assert_eq!(loaded.students().len(), 2);
    }

    #[test]
    fn load_plan_reports_the_offending_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"students\": []}").unwrap();

        match load_plan(&path) {
            Err(CliError::FileParsing { path: p, source }) => {
                assert_eq!(p, path);
                assert!(source.to_string().contains("constraints"));
            }
            other => panic!("Expected FileParsing error, got {other:?}"),
        }
    }

    #[test]
    fn session_builds_an_editor_from_flags() {
        let session = Session {
            config_path: None,
            quiet: true,
        };
        let layout = LayoutArgs {
            seed: Some(5),
            max_passes: Some(7),
            set_values: vec![],
        };
        let editor = session.editor(&layout).unwrap();
        assert_eq!(editor.config().seed, Some(5));
        assert_eq!(editor.config().max_passes, 7);
    }
}
