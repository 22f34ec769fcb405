// SPDX-License-Identifier: MIT

//! Waylog: log workouts by picking a point on a map.
//!
//! This crate provides the workout domain model, the interaction state
//! machine coordinating map clicks, form validation, and rendering, and a
//! key-value persistence layer that survives process restarts. The map
//! widget, form elements, list renderer, and geolocation provider are
//! external collaborators consumed through the traits in [`surfaces`].

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod surfaces;
