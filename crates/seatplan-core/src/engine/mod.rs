//! # Engine Module
//!
//! The placement engine that turns a [`Plan`](crate::core::models::plan::Plan) into a
//! seat layout.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Pass limit and RNG seed
//! - **State Tracking** ([`state`]) - The working layout and the final [`state::LayoutOutcome`]
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front ends
//! - **Initial Placement** (`placement`) - Pins first, then a shuffled fill
//! - **Local Search** (`tasks`) - First-improvement swap search over trial swaps (`transaction`)
//!
//! The engine holds no state between runs and has no error type: any plan, including an
//! empty one, produces a layout.

pub mod config;
pub(crate) mod context;
pub(crate) mod placement;
pub mod progress;
pub mod state;
pub(crate) mod tasks;
pub(crate) mod transaction;
