//! Seat scoring.
//!
//! A seat score is the sum of three independent terms:
//!
//! - **Row term**: linear in the row index, from +50 at the preferred end of the room to
//!   −50 at the other end. Zero without a preference or in a single-row room.
//! - **Pair term**: −1000 when the desk neighbour is banned, +50 when preferred.
//! - **Gender term**: ±10 depending on the plan's
//!   [`GenderMode`](crate::core::models::constraint::GenderMode).
//!
//! Pins do not take part in scoring; a pinned student only matters as someone's neighbour.

pub mod scorer;
pub mod term;
