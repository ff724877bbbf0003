//! # Workflows Module
//!
//! Entry points for callers of the library.
//!
//! - **Layout Workflow** ([`layout`]) - Generates a seat layout for a plan: pins, shuffled
//!   fill, then first-improvement swap search.
//! - **Edit Workflow** ([`edit`]) - Applies [`edit::Edit`] commands to plan snapshots and
//!   regenerates the layout after every edit that changes the inputs to scoring.

pub mod edit;
pub mod layout;
