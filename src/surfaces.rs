// SPDX-License-Identifier: MIT

//! Boundary traits for the external collaborators: the map widget, the form
//! elements, the list renderer, and the geolocation provider.
//!
//! The controller only ever talks to these traits; concrete implementations
//! live at the edge (the console frontend, test fakes).

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Coords, WorkoutKind};

/// Map widget: view centering and marker/popup placement.
pub trait MapSurface {
    fn set_view(&mut self, coords: Coords, zoom: u8);
    fn add_marker(&mut self, coords: Coords, kind: WorkoutKind, popup: &str);
}

/// Form elements: visibility, focus, variant field toggling, and user-facing
/// error reporting.
pub trait FormSurface {
    fn show(&mut self);
    fn focus_distance(&mut self);
    /// Clear all inputs and hide the form.
    fn hide_and_clear(&mut self);
    /// Swap the cadence/elevation rows to match the selected kind.
    fn toggle_variant_fields(&mut self, kind: WorkoutKind);
    /// Surface a validation failure to the user.
    fn report_invalid(&mut self, message: &str);
    /// Surface the one-shot geolocation failure to the user.
    fn report_unavailable(&mut self, message: &str);
}

/// List renderer: one entry per workout, in creation/load order.
pub trait ListSurface {
    fn render_entry(&mut self, entry: &ListEntry);
}

/// Display payload for one list entry.
///
/// `metric` is the derived value (pace or speed) already rounded to one
/// decimal place; everything else is handed over unrounded.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: String,
    pub kind: WorkoutKind,
    /// The workout description ("Running on August 23")
    pub title: String,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Pace or speed, one decimal place
    pub metric: String,
    pub metric_unit: &'static str,
    /// Cadence or elevation gain, unrounded
    pub extra: String,
    pub extra_unit: &'static str,
}

/// Raw form field values as the form surface hands them over on submit.
///
/// All fields arrive as text; parsing and validation happen in the
/// controller so a garbage field becomes a user-visible validation failure
/// rather than a boundary error.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    /// "running" or "cycling"
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation_gain: String,
}

/// One-shot asynchronous position source. Resolves exactly once (or never);
/// there is no cancellation and no timeout.
#[async_trait]
pub trait PositionSource {
    async fn current_position(&self) -> Result<Coords>;
}
