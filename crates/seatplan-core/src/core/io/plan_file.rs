use crate::core::io::traits::PlanFormat;
use crate::core::models::constraint::{
    ConstraintKind, ConstraintSet, GenderMode, RowPreference, StudentPair,
};
use crate::core::models::grid::{Grid, GridError};
use crate::core::models::ids::StudentId;
use crate::core::models::plan::{Plan, PlanParts};
use crate::core::models::student::Student;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PlanFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse plan document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid file: missing {0} array")]
    MissingArray(&'static str),
    #[error("Grid is {found_rows}x{found_cols} but the document declares {rows}x{cols}")]
    Shape {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },
    #[error("Invalid grid: {0}")]
    Grid(#[from] GridError),
}

const REQUIRED_ARRAYS: [&str; 3] = ["students", "constraints", "grid"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ConstraintRecordKind {
    Ban,
    Prefer,
    Manual,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConstraintRecord {
    #[serde(rename = "type")]
    kind: ConstraintRecordKind,
    student_ids: [StudentId; 2],
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowPreferenceRecord {
    student_id: StudentId,
    preference: RowPreference,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanDocument {
    #[serde(default)]
    class_name: String,
    students: Vec<Student>,
    constraints: Vec<ConstraintRecord>,
    #[serde(default)]
    row_preferences: Vec<RowPreferenceRecord>,
    #[serde(default)]
    gender_mode: GenderMode,
    grid: Vec<Vec<Option<StudentId>>>,
    #[serde(default)]
    grid_rows: usize,
    #[serde(default)]
    grid_cols: usize,
}

impl From<&Plan> for PlanDocument {
    fn from(plan: &Plan) -> Self {
        let relations = plan.constraints().iter().map(|(pair, kind)| {
            let (a, b) = pair.ids();
            ConstraintRecord {
                kind: match kind {
                    ConstraintKind::Ban => ConstraintRecordKind::Ban,
                    ConstraintKind::Prefer => ConstraintRecordKind::Prefer,
                },
                student_ids: [a.clone(), b.clone()],
            }
        });
        let pins = plan.pins().keys().map(|id| ConstraintRecord {
            kind: ConstraintRecordKind::Manual,
            student_ids: [id.clone(), id.clone()],
        });

        Self {
            class_name: plan.class_name().to_string(),
            students: plan.students().to_vec(),
            constraints: relations.chain(pins).collect(),
            row_preferences: plan
                .row_preferences()
                .iter()
                .map(|(id, pref)| RowPreferenceRecord {
                    student_id: id.clone(),
                    preference: *pref,
                })
                .collect(),
            gender_mode: plan.gender_mode(),
            grid: plan.grid().to_rows(),
            grid_rows: plan.grid_rows(),
            grid_cols: plan.grid_cols(),
        }
    }
}

impl PlanDocument {
    fn into_plan(self) -> Result<Plan, PlanFileError> {
        if self.grid_cols % 2 != 0 {
            return Err(GridError::OddColumns(self.grid_cols).into());
        }
        let grid = Grid::from_rows(self.grid)?;
        if !grid.is_empty() && (grid.rows(), grid.cols()) != (self.grid_rows, self.grid_cols) {
            return Err(PlanFileError::Shape {
                rows: self.grid_rows,
                cols: self.grid_cols,
                found_rows: grid.rows(),
                found_cols: grid.cols(),
            });
        }

        let mut constraints = ConstraintSet::new();
        let mut pins = BTreeMap::new();
        for record in self.constraints {
            let [a, b] = record.student_ids;
            match record.kind {
                ConstraintRecordKind::Manual => match grid.position_of(&a) {
                    Some(seat) => {
                        pins.insert(a, seat);
                    }
                    None => debug!(student = %a, "Dropping manual placement for unseated student."),
                },
                kind => {
                    let pair = StudentPair::new(a, b);
                    if pair.is_self_pair() {
                        warn!(
                            student = %pair.ids().0,
                            "Ignoring constraint that pairs a student with itself."
                        );
                        continue;
                    }
                    let kind = if kind == ConstraintRecordKind::Ban {
                        ConstraintKind::Ban
                    } else {
                        ConstraintKind::Prefer
                    };
                    constraints.upsert(pair, kind);
                }
            }
        }

        let row_preferences = self
            .row_preferences
            .into_iter()
            .filter(|record| record.preference != RowPreference::None)
            .map(|record| (record.student_id, record.preference))
            .collect();

        Ok(PlanParts {
            class_name: self.class_name,
            students: self.students,
            constraints,
            row_preferences,
            gender_mode: self.gender_mode,
            pins,
            grid,
            grid_rows: self.grid_rows,
            grid_cols: self.grid_cols,
        }
        .into())
    }
}

/// The JSON plan document: `{className, students, constraints, rowPreferences,
/// genderMode, grid, gridRows, gridCols}`. Pins are stored as `manual` constraints.
pub struct JsonPlanFile;

impl PlanFormat for JsonPlanFile {
    type Error = PlanFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<Plan, Self::Error> {
        let value: Value = serde_json::from_reader(reader)?;
        for key in REQUIRED_ARRAYS {
            if !value.get(key).is_some_and(Value::is_array) {
                return Err(PlanFileError::MissingArray(key));
            }
        }
        let document: PlanDocument = serde_json::from_value(value)?;
        document.into_plan()
    }

    fn write_to(plan: &Plan, writer: &mut impl Write) -> Result<(), Self::Error> {
        serde_json::to_writer_pretty(&mut *writer, &PlanDocument::from(plan))?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::grid::Seat;
    use crate::core::models::student::Gender;
    use tempfile::tempdir;

    fn id(s: &str) -> StudentId {
        StudentId::from(s)
    }

    fn sample_plan() -> Plan {
        let mut plan = Plan::new();
        plan.set_class_name("7B");
        plan.replace_students(vec![
            Student::new("a", "Ann", "Lee", Gender::Female),
            Student::new("b", "Bob", "Ray", Gender::Male),
            Student::new("c", "Cy", "", Gender::Other),
        ]);
        plan.upsert_constraint(ConstraintKind::Ban, &id("a"), &id("b"))
            .unwrap();
        plan.upsert_constraint(ConstraintKind::Prefer, &id("c"), &id("a"))
            .unwrap();
        plan.set_row_preference(&id("c"), RowPreference::Front)
            .unwrap();
        plan.set_gender_mode(GenderMode::Different);
        let mut grid = Grid::new(1, 4).unwrap();
        grid.set(Seat::new(0, 0), Some(id("a"))).unwrap();
        grid.set(Seat::new(0, 2), Some(id("b"))).unwrap();
        grid.set(Seat::new(0, 3), Some(id("c"))).unwrap();
        plan.replace_grid(grid);
        plan.pin(&id("b"), Seat::new(0, 2)).unwrap();
        plan
    }

    #[test]
    fn plan_survives_a_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let plan = sample_plan();

        JsonPlanFile::write_to_path(&plan, &path).unwrap();
        let loaded = JsonPlanFile::read_from_path(&path).unwrap();

        assert_eq!(loaded, plan);
        assert_eq!(loaded.pin_of(&id("b")), Some(Seat::new(0, 2)));
    }

    #[test]
    fn document_uses_camel_case_keys_and_manual_constraints_for_pins() {
        let json = JsonPlanFile::write_to_string(&sample_plan()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["className"], "7B");
        assert_eq!(value["genderMode"], "different");
        assert_eq!(value["gridRows"], 1);
        assert_eq!(value["gridCols"], 4);
        assert_eq!(value["students"][0]["firstName"], "Ann");
        assert_eq!(value["grid"][0][1], Value::Null);
        assert_eq!(value["rowPreferences"][0]["preference"], "front");

        let manual: Vec<_> = value["constraints"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|c| c["type"] == "manual")
            .collect();
        assert_eq!(manual.len(), 1);
        assert_eq!(manual[0]["studentIds"], serde_json::json!(["b", "b"]));
    }

    #[test]
    fn missing_arrays_are_rejected_by_name() {
        let err = JsonPlanFile::read_from_str(r#"{"students": [], "grid": []}"#).unwrap_err();
        assert!(matches!(err, PlanFileError::MissingArray("constraints")));

        let err =
            JsonPlanFile::read_from_str(r#"{"students": {}, "constraints": [], "grid": []}"#)
                .unwrap_err();
        assert_eq!(err.to_string(), "Invalid file: missing students array");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = JsonPlanFile::read_from_str("{ not json").unwrap_err();
        assert!(matches!(err, PlanFileError::Json(_)));
    }

    #[test]
    fn grid_shape_must_match_declared_dimensions() {
        let doc = r#"{
            "students": [], "constraints": [],
            "grid": [[null, null], [null, null]],
            "gridRows": 1, "gridCols": 2
        }"#;
        let err = JsonPlanFile::read_from_str(doc).unwrap_err();
        assert!(matches!(
            err,
            PlanFileError::Shape {
                rows: 1,
                cols: 2,
                found_rows: 2,
                found_cols: 2
            }
        ));
    }

    #[test]
    fn empty_grid_with_declared_dimensions_is_accepted() {
        let doc = r#"{
            "className": "", "students": [], "constraints": [],
            "rowPreferences": [], "genderMode": "none",
            "grid": [], "gridRows": 3, "gridCols": 4
        }"#;
        let plan = JsonPlanFile::read_from_str(doc).unwrap();
        assert!(plan.grid().is_empty());
        assert_eq!((plan.grid_rows(), plan.grid_cols()), (3, 4));
    }

    #[test]
    fn manual_constraint_for_unseated_student_is_dropped() {
        let doc = r#"{
            "students": [{"id": "a", "firstName": "A", "lastName": "", "gender": "M"}],
            "constraints": [{"type": "manual", "studentIds": ["a", "a"]}],
            "grid": [[null, null]], "gridRows": 1, "gridCols": 2
        }"#;
        let plan = JsonPlanFile::read_from_str(doc).unwrap();
        assert!(plan.pins().is_empty());
        assert!(plan.constraints().is_empty());
    }

    #[test]
    fn none_row_preferences_are_not_stored() {
        let doc = r#"{
            "students": [], "constraints": [], "grid": [],
            "rowPreferences": [{"studentId": "a", "preference": "none"}]
        }"#;
        let plan = JsonPlanFile::read_from_str(doc).unwrap();
        assert!(plan.row_preferences().is_empty());
    }
}
