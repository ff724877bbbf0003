use crate::core::models::constraint::{ConstraintKind, GenderMode, RowPreference};
use crate::core::models::grid::Seat;
use crate::core::models::ids::StudentId;
use crate::core::models::plan::{Plan, PlanError};
use crate::core::models::student::Student;
use crate::engine::config::LayoutConfig;
use crate::engine::progress::ProgressReporter;
use crate::engine::state::LayoutOutcome;
use crate::workflows::layout;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

/// A single change to a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    SetClassName(String),
    SetStudents(Vec<Student>),
    AddConstraint {
        kind: ConstraintKind,
        a: StudentId,
        b: StudentId,
    },
    RemoveConstraint {
        a: StudentId,
        b: StudentId,
    },
    SetGenderMode(GenderMode),
    SetRowPreference {
        student: StudentId,
        preference: RowPreference,
    },
    SetGridSize {
        rows: usize,
        cols: usize,
    },
    MoveStudent {
        student: StudentId,
        seat: Seat,
    },
    Unpin(StudentId),
    Regenerate,
    LoadPlan(Box<Plan>),
    ClearAll,
}

impl Edit {
    pub fn name(&self) -> &'static str {
        match self {
            Edit::SetClassName(_) => "set_class_name",
            Edit::SetStudents(_) => "set_students",
            Edit::AddConstraint { .. } => "add_constraint",
            Edit::RemoveConstraint { .. } => "remove_constraint",
            Edit::SetGenderMode(_) => "set_gender_mode",
            Edit::SetRowPreference { .. } => "set_row_preference",
            Edit::SetGridSize { .. } => "set_grid_size",
            Edit::MoveStudent { .. } => "move_student",
            Edit::Unpin(_) => "unpin",
            Edit::Regenerate => "regenerate",
            Edit::LoadPlan(_) => "load_plan",
            Edit::ClearAll => "clear_all",
        }
    }
}

/// Applies [`Edit`]s to plan snapshots, regenerating the layout where an edit calls for it.
///
/// The editor owns the random source, so a seeded config yields a reproducible sequence of
/// layouts across edits.
pub struct PlanEditor<'a> {
    config: LayoutConfig,
    rng: StdRng,
    reporter: ProgressReporter<'a>,
    last_layout: Option<LayoutOutcome>,
}

impl<'a> PlanEditor<'a> {
    pub fn new(config: LayoutConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            reporter: ProgressReporter::new(),
            last_layout: None,
        }
    }

    pub fn with_reporter(mut self, reporter: ProgressReporter<'a>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Outcome of the most recent regeneration, if any edit so far triggered one.
    pub fn last_layout(&self) -> Option<&LayoutOutcome> {
        self.last_layout.as_ref()
    }

    /// Returns the plan that results from applying `edit` to `plan`. On error the input
    /// plan is untouched.
    #[instrument(skip_all, name = "plan_edit", fields(edit = edit.name()))]
    pub fn apply(&mut self, plan: &Plan, edit: Edit) -> Result<Plan, PlanError> {
        let mut next = plan.clone();

        let regenerate = match edit {
            Edit::SetClassName(name) => {
                next.set_class_name(name);
                false
            }
            Edit::SetStudents(students) => {
                next.replace_students(students);
                true
            }
            Edit::AddConstraint { kind, a, b } => {
                if let Some(previous) = next.upsert_constraint(kind, &a, &b)? {
                    debug!(%a, %b, %previous, %kind, "Replaced existing constraint.");
                }
                true
            }
            Edit::RemoveConstraint { a, b } => match next.remove_constraint(&a, &b) {
                Some(kind) => {
                    debug!(%a, %b, %kind, "Removed constraint.");
                    true
                }
                None => {
                    debug!(%a, %b, "No constraint between students; nothing to do.");
                    return Ok(next);
                }
            },
            Edit::SetGenderMode(mode) => {
                next.set_gender_mode(mode);
                true
            }
            Edit::SetRowPreference {
                student,
                preference,
            } => {
                next.set_row_preference(&student, preference)?;
                true
            }
            Edit::SetGridSize { rows, cols } => {
                next.resize(rows, cols)?;
                true
            }
            Edit::MoveStudent { student, seat } => {
                next.move_student(&student, seat)?;
                info!(%student, %seat, "Student moved and pinned.");
                false
            }
            Edit::Unpin(student) => {
                if next.unpin(&student).is_some() {
                    true
                } else if next.contains_student(&student) {
                    return Ok(next);
                } else {
                    return Err(PlanError::UnknownStudent(student));
                }
            }
            Edit::Regenerate => true,
            Edit::LoadPlan(loaded) => {
                next = *loaded;
                false
            }
            Edit::ClearAll => {
                next = Plan::new();
                false
            }
        };

        if regenerate {
            self.regenerate(&mut next);
        }
        Ok(next)
    }

    fn regenerate(&mut self, plan: &mut Plan) {
        let outcome = layout::run_with_rng(plan, &self.config, &self.reporter, &mut self.rng);
        plan.replace_grid(outcome.grid.clone());
        self.last_layout = Some(outcome);
    }
}
