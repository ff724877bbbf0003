use super::constraint::{ConstraintKind, ConstraintSet, GenderMode, RowPreference, StudentPair};
use super::grid::{Grid, GridError, Seat};
use super::ids::StudentId;
use super::student::Student;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

const MIN_COLS: usize = 4;
const MAX_COLS: usize = 6;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PlanError {
    #[error("Student '{0}' is not part of this plan")]
    UnknownStudent(StudentId),
    #[error("A pair constraint needs two different students (got '{0}' twice)")]
    SelfPair(StudentId),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Picks a near-square layout with 4–6 columns (always even) that fits every student.
pub fn grid_size_for(student_count: usize) -> (usize, usize) {
    if student_count == 0 {
        return (0, 0);
    }
    let target = (student_count as f64).sqrt().ceil() as usize;
    let target = target.clamp(MIN_COLS, MAX_COLS);
    let cols = if target % 2 == 0 { target } else { target + 1 };
    let rows = student_count.div_ceil(cols);
    (rows, cols)
}

/// Aggregate root of a seating plan.
///
/// The methods here mutate data only; regenerating the layout after an edit is the job of
/// [`crate::workflows::edit::PlanEditor`]. The one exception is [`Plan::move_student`],
/// which patches the grid directly and pins the student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    class_name: String,
    students: Vec<Student>,
    constraints: ConstraintSet,
    row_preferences: BTreeMap<StudentId, RowPreference>,
    gender_mode: GenderMode,
    pins: BTreeMap<StudentId, Seat>,
    grid: Grid,
    grid_rows: usize,
    grid_cols: usize,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn set_class_name(&mut self, name: impl Into<String>) {
        self.class_name = name.into();
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.students.iter().find(|s| &s.id == id)
    }

    pub fn contains_student(&self, id: &StudentId) -> bool {
        self.student(id).is_some()
    }

    /// Looks a student up by id, "Last, First" or "First Last" (case-insensitive).
    pub fn find_student(&self, query: &str) -> Option<&Student> {
        let query = query.trim();
        let id = StudentId::from(query);
        self.student(&id).or_else(|| {
            self.students.iter().find(|s| {
                s.sort_name().eq_ignore_ascii_case(query)
                    || s.full_name().eq_ignore_ascii_case(query)
            })
        })
    }

    /// Replaces the roster wholesale. Constraints, row preferences and pins refer to the
    /// old roster and are dropped; the grid is resized to fit and left empty.
    pub fn replace_students(&mut self, students: Vec<Student>) {
        let (rows, cols) = grid_size_for(students.len());
        debug!(
            count = students.len(),
            rows, cols, "Replacing roster and resizing grid."
        );
        self.students = students;
        self.constraints.clear();
        self.row_preferences.clear();
        self.pins.clear();
        self.grid_rows = rows;
        self.grid_cols = cols;
        self.grid = Grid::empty();
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    fn require_student(&self, id: &StudentId) -> Result<(), PlanError> {
        if self.contains_student(id) {
            Ok(())
        } else {
            Err(PlanError::UnknownStudent(id.clone()))
        }
    }

    /// Adds a relation for the pair, replacing whatever relation the pair had before.
    pub fn upsert_constraint(
        &mut self,
        kind: ConstraintKind,
        a: &StudentId,
        b: &StudentId,
    ) -> Result<Option<ConstraintKind>, PlanError> {
        self.require_student(a)?;
        self.require_student(b)?;
        if a == b {
            return Err(PlanError::SelfPair(a.clone()));
        }
        Ok(self
            .constraints
            .upsert(StudentPair::new(a.clone(), b.clone()), kind))
    }

    pub fn remove_constraint(&mut self, a: &StudentId, b: &StudentId) -> Option<ConstraintKind> {
        self.constraints
            .remove(&StudentPair::new(a.clone(), b.clone()))
    }

    pub fn row_preferences(&self) -> &BTreeMap<StudentId, RowPreference> {
        &self.row_preferences
    }

    pub fn row_preference(&self, id: &StudentId) -> RowPreference {
        self.row_preferences.get(id).copied().unwrap_or_default()
    }

    /// Sets or clears (`RowPreference::None`) a student's row preference.
    pub fn set_row_preference(
        &mut self,
        id: &StudentId,
        preference: RowPreference,
    ) -> Result<(), PlanError> {
        self.require_student(id)?;
        match preference {
            RowPreference::None => {
                self.row_preferences.remove(id);
            }
            pref => {
                self.row_preferences.insert(id.clone(), pref);
            }
        }
        Ok(())
    }

    pub fn gender_mode(&self) -> GenderMode {
        self.gender_mode
    }

    pub fn set_gender_mode(&mut self, mode: GenderMode) {
        self.gender_mode = mode;
    }

    pub fn pins(&self) -> &BTreeMap<StudentId, Seat> {
        &self.pins
    }

    pub fn pin_of(&self, id: &StudentId) -> Option<Seat> {
        self.pins.get(id).copied()
    }

    pub fn is_pinned(&self, id: &StudentId) -> bool {
        self.pins.contains_key(id)
    }

    pub fn pin(&mut self, id: &StudentId, seat: Seat) -> Result<(), PlanError> {
        self.require_student(id)?;
        self.pins.insert(id.clone(), seat);
        Ok(())
    }

    pub fn unpin(&mut self, id: &StudentId) -> Option<Seat> {
        self.pins.remove(id)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_rows(&self) -> usize {
        self.grid_rows
    }

    pub fn grid_cols(&self) -> usize {
        self.grid_cols
    }

    pub fn replace_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// Changes the target grid shape. Pins that fall outside the new shape are released.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), PlanError> {
        Grid::checked_capacity(rows, cols)?;
        self.grid_rows = rows;
        self.grid_cols = cols;
        self.pins.retain(|id, seat| {
            let keep = seat.row < rows && seat.col < cols;
            if !keep {
                debug!(student = %id, seat = %seat, "Releasing pin outside resized grid.");
            }
            keep
        });
        Ok(())
    }

    /// Seats `id` at `target` by editing the grid directly, and pins it there.
    ///
    /// The previous occupant of `target` takes the mover's old seat. When the mover had no
    /// seat, the displaced student goes to the first empty seat instead; only a full grid
    /// leaves them unseated. A displaced pinned student keeps its pin at its new seat.
    pub fn move_student(&mut self, id: &StudentId, target: Seat) -> Result<(), PlanError> {
        self.require_student(id)?;
        let from = self.grid.position_of(id);
        let displaced = self.grid.set(target, Some(id.clone()))?;

        if let Some(other) = displaced.filter(|other| other != id) {
            let new_home = match from {
                Some(from) => Some(from),
                None => self.grid.empty_seats().next(),
            };
            match new_home {
                Some(seat) => {
                    self.grid.set(seat, Some(other.clone()))?;
                    if let Some(pin) = self.pins.get_mut(&other) {
                        *pin = seat;
                    }
                }
                None => {
                    warn!(student = %other, "No free seat left for displaced student.");
                    self.pins.remove(&other);
                }
            }
        } else if let Some(from) = from.filter(|from| *from != target) {
            self.grid.set(from, None)?;
        }

        self.pins.insert(id.clone(), target);
        Ok(())
    }
}

/// Field-by-field constructor used by loaders. No validation beyond the grid shape.
#[derive(Debug, Clone, Default)]
pub struct PlanParts {
    pub class_name: String,
    pub students: Vec<Student>,
    pub constraints: ConstraintSet,
    pub row_preferences: BTreeMap<StudentId, RowPreference>,
    pub gender_mode: GenderMode,
    pub pins: BTreeMap<StudentId, Seat>,
    pub grid: Grid,
    pub grid_rows: usize,
    pub grid_cols: usize,
}

impl From<PlanParts> for Plan {
    fn from(parts: PlanParts) -> Self {
        Self {
            class_name: parts.class_name,
            students: parts.students,
            constraints: parts.constraints,
            row_preferences: parts.row_preferences,
            gender_mode: parts.gender_mode,
            pins: parts.pins,
            grid: parts.grid,
            grid_rows: parts.grid_rows,
            grid_cols: parts.grid_cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::student::Gender;

    fn id(s: &str) -> StudentId {
        StudentId::from(s)
    }

    fn roster(names: &[&str]) -> Vec<Student> {
        names
            .iter()
            .map(|n| Student::new(*n, n, "Test", Gender::Other))
            .collect()
    }

    fn seated_plan() -> Plan {
        let mut plan = Plan::new();
        plan.replace_students(roster(&["a", "b", "c"]));
        plan.resize(1, 4).unwrap();
        let mut grid = Grid::new(1, 4).unwrap();
        grid.set(Seat::new(0, 0), Some(id("a"))).unwrap();
        grid.set(Seat::new(0, 1), Some(id("b"))).unwrap();
        grid.set(Seat::new(0, 2), Some(id("c"))).unwrap();
        plan.replace_grid(grid);
        plan
    }

    #[test]
    fn grid_size_targets_four_to_six_even_columns() {
        assert_eq!(grid_size_for(0), (0, 0));
        assert_eq!(grid_size_for(1), (1, 4));
        assert_eq!(grid_size_for(4), (1, 4));
        assert_eq!(grid_size_for(17), (3, 6));
        assert_eq!(grid_size_for(25), (5, 6));
        assert_eq!(grid_size_for(100), (17, 6));
    }

    #[test]
    fn replace_students_clears_dependent_state() {
        let mut plan = seated_plan();
        plan.upsert_constraint(ConstraintKind::Ban, &id("a"), &id("b"))
            .unwrap();
        plan.set_row_preference(&id("c"), RowPreference::Front)
            .unwrap();
        plan.pin(&id("a"), Seat::new(0, 0)).unwrap();

        plan.replace_students(roster(&["x", "y"]));

        assert!(plan.constraints().is_empty());
        assert!(plan.row_preferences().is_empty());
        assert!(plan.pins().is_empty());
        assert_eq!((plan.grid_rows(), plan.grid_cols()), (1, 4));
    }

    #[test]
    fn upsert_constraint_validates_students() {
        let mut plan = seated_plan();
        assert_eq!(
            plan.upsert_constraint(ConstraintKind::Ban, &id("a"), &id("zz")),
            Err(PlanError::UnknownStudent(id("zz")))
        );
        assert_eq!(
            plan.upsert_constraint(ConstraintKind::Prefer, &id("a"), &id("a")),
            Err(PlanError::SelfPair(id("a")))
        );
    }

    #[test]
    fn setting_row_preference_to_none_removes_entry() {
        let mut plan = seated_plan();
        plan.set_row_preference(&id("a"), RowPreference::Back)
            .unwrap();
        assert_eq!(plan.row_preference(&id("a")), RowPreference::Back);
        plan.set_row_preference(&id("a"), RowPreference::None)
            .unwrap();
        assert!(plan.row_preferences().is_empty());
    }

    #[test]
    fn move_student_swaps_with_target_occupant_and_pins_mover() {
        let mut plan = seated_plan();
        plan.move_student(&id("a"), Seat::new(0, 2)).unwrap();

        assert_eq!(plan.grid().get(Seat::new(0, 2)), Some(&id("a")));
        assert_eq!(plan.grid().get(Seat::new(0, 0)), Some(&id("c")));
        assert_eq!(plan.pin_of(&id("a")), Some(Seat::new(0, 2)));
        assert!(!plan.is_pinned(&id("c")));
    }

    #[test]
    fn move_student_to_empty_seat_vacates_former_seat() {
        let mut plan = seated_plan();
        plan.move_student(&id("b"), Seat::new(0, 3)).unwrap();
        assert_eq!(plan.grid().get(Seat::new(0, 1)), None);
        assert_eq!(plan.grid().get(Seat::new(0, 3)), Some(&id("b")));
    }

    #[test]
    fn displaced_pinned_student_keeps_pin_at_new_seat() {
        let mut plan = seated_plan();
        plan.move_student(&id("c"), Seat::new(0, 2)).unwrap();
        plan.move_student(&id("a"), Seat::new(0, 2)).unwrap();

        assert_eq!(plan.pin_of(&id("c")), Some(Seat::new(0, 0)));
        assert_eq!(plan.grid().get(Seat::new(0, 0)), Some(&id("c")));
    }

    #[test]
    fn unseated_mover_sends_displaced_student_to_first_free_seat() {
        let mut plan = seated_plan();
        let mut students = plan.students().to_vec();
        students.push(Student::new("d", "d", "Test", Gender::Male));
        let grid = plan.grid().clone();
        plan.replace_students(students);
        plan.resize(1, 4).unwrap();
        plan.replace_grid(grid);

        plan.move_student(&id("d"), Seat::new(0, 0)).unwrap();

        assert_eq!(plan.grid().get(Seat::new(0, 0)), Some(&id("d")));
        assert_eq!(plan.grid().get(Seat::new(0, 3)), Some(&id("a")));
    }

    #[test]
    fn move_student_rejects_out_of_bounds_target() {
        let mut plan = seated_plan();
        let result = plan.move_student(&id("a"), Seat::new(3, 0));
        assert!(matches!(
            result,
            Err(PlanError::Grid(GridError::OutOfBounds { .. }))
        ));
        assert_eq!(plan.grid().get(Seat::new(0, 0)), Some(&id("a")));
    }

    #[test]
    fn resize_releases_pins_outside_new_shape() {
        let mut plan = seated_plan();
        plan.pin(&id("a"), Seat::new(0, 3)).unwrap();
        plan.pin(&id("b"), Seat::new(0, 1)).unwrap();
        plan.resize(2, 2).unwrap();
        assert_eq!(plan.pin_of(&id("a")), None);
        assert_eq!(plan.pin_of(&id("b")), Some(Seat::new(0, 1)));
        assert!(matches!(
            plan.resize(2, 3),
            Err(PlanError::Grid(GridError::OddColumns(3)))
        ));
    }

    #[test]
    fn resize_rejects_shapes_too_large_to_allocate() {
        let mut plan = seated_plan();
        let before = (plan.grid_rows(), plan.grid_cols());
        assert!(matches!(
            plan.resize(usize::MAX / 2 + 1, 4),
            Err(PlanError::Grid(GridError::TooLarge { .. }))
        ));
        assert_eq!((plan.grid_rows(), plan.grid_cols()), before);
    }

    #[test]
    fn find_student_matches_id_or_names() {
        let mut plan = Plan::new();
        plan.replace_students(vec![Student::new("s1", "Ann", "Lee", Gender::Female)]);
        assert_eq!(plan.find_student("s1").map(|s| s.first_name.as_str()), Some("Ann"));
        assert!(plan.find_student("lee, ann").is_some());
        assert!(plan.find_student("Ann Lee").is_some());
        assert!(plan.find_student("Bob").is_none());
    }
}
