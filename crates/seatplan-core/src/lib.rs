//! # Seatplan Core Library
//!
//! Assigns students to paired classroom desks. A layout is scored per seat from row
//! preferences, ban/prefer relations with the desk neighbour and a plan-wide gender
//! pairing mode, then improved by local search while manual placements stay fixed.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Plain data models (`Plan`, `Grid`, `Student`), the
//!   seat scoring function, roster import and plan persistence.
//!
//! - **[`engine`]: The Logic Core.** Initial placement, the swap search and the
//!   transactional trial swaps it relies on, plus configuration and progress reporting.
//!
//! - **[`workflows`]: The Public API.** `layout::run` generates a layout for a plan;
//!   `edit::PlanEditor` applies edit commands and regenerates where needed.

pub mod core;
pub mod engine;
pub mod workflows;
