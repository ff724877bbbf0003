//! Optimization tasks run by the layout workflow.
//!
//! Each task operates on a [`SeatingState`](crate::engine::state::SeatingState) through a
//! shared [`LayoutContext`](crate::engine::context::LayoutContext).

pub mod local_search;
