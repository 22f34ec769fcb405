// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod workout;

pub use workout::{Coords, VariantInput, Workout, WorkoutDetails, WorkoutKind};
