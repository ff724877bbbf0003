//! # Core Module
//!
//! Stateless building blocks of the seating planner.
//!
//! ## Architecture
//!
//! - **Plan Representation** ([`models`]) - Students, constraints, the seat grid and the
//!   plan aggregate
//! - **Scoring** ([`scoring`]) - The per-seat desirability function the engine maximises
//! - **File I/O** ([`io`]) - Roster CSV import and JSON plan persistence
//!
//! Nothing in this module keeps state between calls. Layout generation lives in
//! [`crate::engine`] and is driven from [`crate::workflows`].

pub mod io;
pub mod models;
pub mod scoring;
