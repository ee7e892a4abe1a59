//! Core data model for Mapty.
//!
//! A workout is a shared base record (where, when, how far, how long) plus
//! an [`Activity`] carrying the variant data for a run or a ride.

mod coords;
mod record;
mod workout;

pub use coords::Coords;
pub use record::{RecordDetail, WorkoutRecord};
pub use workout::{Activity, ActivityKind, Workout, WorkoutId, describe};
