//! # Core Models Module
//!
//! Plain data types describing a classroom seating plan.
//!
//! ## Key Components
//!
//! - [`ids`] - The opaque [`StudentId`](ids::StudentId) newtype
//! - [`student`] - Students and their [`Gender`](student::Gender)
//! - [`constraint`] - Pair constraints, row preferences and the plan-wide gender mode
//! - [`grid`] - The fixed-shape seat matrix with desk-pair adjacency
//! - [`plan`] - The [`Plan`](plan::Plan) aggregate that owns all of the above plus manual pins
//!
//! ## Usage
//!
//! ```ignore
//! use seatplan::core::models::{plan::Plan, student::{Gender, Student}};
//!
//! let mut plan = Plan::new();
//! plan.replace_students(vec![Student::new("s1", "Ann", "Lee", Gender::Female)]);
//! assert_eq!((plan.grid_rows(), plan.grid_cols()), (1, 4));
//! ```

pub mod constraint;
pub mod grid;
pub mod ids;
pub mod plan;
pub mod student;
