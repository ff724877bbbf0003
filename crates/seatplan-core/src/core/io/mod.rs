//! Reading and writing plans and rosters.
//!
//! Persisted plans go through the [`traits::PlanFormat`] interface ([`plan_file::JsonPlanFile`]
//! is the only format). Roster import is one-way and tolerant: bad rows are reported as
//! [`roster::RosterIssue`]s rather than failing the whole import.

pub mod plan_file;
pub mod roster;
pub mod traits;
