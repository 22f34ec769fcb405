// SPDX-License-Identifier: MIT

//! Interaction state machine.
//!
//! Drives the map-click -> form -> validated-submit -> render/persist flow:
//! 1. A map click captures a pending coordinate and opens the form.
//! 2. Submit validates the form fields against the domain rules.
//! 3. On success the workout is created at the pending coordinate, rendered
//!    as a marker and a list entry, and the full list is persisted.
//!
//! The machine has two states and no terminal state; it runs for the
//! process lifetime. Submission is synchronous, so there is no in-flight
//! state.

use crate::error::{AppError, Result};
use crate::models::{Coords, Workout, WorkoutDetails, WorkoutKind};
use crate::store::{BlobStore, WorkoutStore};
use crate::surfaces::{FormInput, FormSurface, ListEntry, ListSurface, MapSurface};

/// Controller state: either nothing is pending, or a map click has been
/// registered and the form is open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerState {
    Idle,
    AwaitingSubmit { pending: Coords },
}

/// The interaction controller. Constructed once with injected collaborator
/// handles; reacts to discrete external events one at a time.
pub struct InteractionController {
    map: Box<dyn MapSurface>,
    form: Box<dyn FormSurface>,
    list: Box<dyn ListSurface>,
    store: WorkoutStore<Box<dyn BlobStore>>,
    workouts: Vec<Workout>,
    state: ControllerState,
    /// False until a position is acquired; map-dependent operations are
    /// silent no-ops while false.
    map_ready: bool,
    /// Standing zoom level for view centering
    zoom: u8,
}

impl InteractionController {
    /// Build the controller, reload the persisted list (fail-soft), and
    /// render a list entry for each reloaded workout in load order. Markers
    /// wait until a position is acquired and the map is initialized.
    pub fn new(
        map: Box<dyn MapSurface>,
        form: Box<dyn FormSurface>,
        mut list: Box<dyn ListSurface>,
        blob_store: Box<dyn BlobStore>,
        zoom: u8,
    ) -> Self {
        let store = WorkoutStore::new(blob_store);
        let workouts = store.load();
        tracing::info!(count = workouts.len(), "Loaded persisted workouts");

        for workout in &workouts {
            list.render_entry(&list_entry(workout));
        }

        Self {
            map,
            form,
            list,
            store,
            workouts,
            state: ControllerState::Idle,
            map_ready: false,
            zoom,
        }
    }

    /// Geolocation resolved: center the map on the user's position and
    /// replay markers for every already-loaded workout in load order.
    pub fn position_acquired(&mut self, coords: Coords) {
        self.map.set_view(coords, self.zoom);
        self.map_ready = true;

        for workout in &self.workouts {
            self.map
                .add_marker(workout.coords, workout.kind(), &workout.description);
        }
        tracing::info!(
            lat = coords.lat,
            lng = coords.lng,
            markers = self.workouts.len(),
            "Map initialized"
        );
    }

    /// Geolocation failed: report once and continue without map features.
    /// Form and list keep working; centering and marker placement become
    /// silent no-ops.
    pub fn position_unavailable(&mut self, reason: &str) {
        tracing::warn!(reason, "Position unavailable; map features disabled");
        self.form.report_unavailable("Could not get your position");
    }

    /// A map click opens the form and captures the clicked coordinate as the
    /// pending context. A second click while the form is already open simply
    /// replaces the pending coordinate.
    pub fn map_click(&mut self, coords: Coords) {
        self.state = ControllerState::AwaitingSubmit { pending: coords };
        self.form.show();
        self.form.focus_distance();
    }

    /// Type toggled: a form-field-visibility change only. No state-machine
    /// effect, no validation.
    pub fn kind_toggled(&mut self, kind: WorkoutKind) {
        self.form.toggle_variant_fields(kind);
    }

    /// Validated submit. On success: create the workout at the pending
    /// coordinate, append, render marker and list entry, persist the full
    /// list, clear and hide the form, return to idle. On validation failure:
    /// report to the user and stay put; nothing is created, rendered, or
    /// persisted.
    pub fn submit(&mut self, input: &FormInput) {
        let pending = match self.state {
            ControllerState::AwaitingSubmit { pending } => pending,
            ControllerState::Idle => {
                tracing::warn!("Submit without a pending map click; ignoring");
                return;
            }
        };

        let workout = match build_workout(pending, input) {
            Ok(workout) => workout,
            Err(err) => {
                tracing::debug!(error = %err, "Rejected workout submission");
                self.form.report_invalid(&err.to_string());
                return;
            }
        };

        if self.map_ready {
            self.map
                .add_marker(workout.coords, workout.kind(), &workout.description);
        }
        self.list.render_entry(&list_entry(&workout));

        tracing::info!(
            id = %workout.id,
            kind = %workout.kind(),
            distance_km = workout.distance_km,
            duration_min = workout.duration_min,
            "Workout logged"
        );
        self.workouts.push(workout);

        // A failed write is not fatal: the workout stays in memory and
        // rendered, and the next successful submit rewrites the full list.
        if let Err(err) = self.store.save(&self.workouts) {
            tracing::warn!(error = %err, "Failed to persist workouts");
        }

        self.form.hide_and_clear();
        self.state = ControllerState::Idle;
    }

    /// A click on a rendered list entry re-centers the map on that workout
    /// at the standing zoom. Unknown ids and an unavailable map are silent
    /// no-ops.
    pub fn list_entry_clicked(&mut self, id: &str) {
        if !self.map_ready {
            tracing::debug!(id, "List click ignored; map unavailable");
            return;
        }
        let Some(workout) = self.workouts.iter().find(|w| w.id == id) else {
            tracing::debug!(id, "List click for unknown workout id");
            return;
        };
        self.map.set_view(workout.coords, self.zoom);
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }
}

/// Parse and validate the form fields, then construct the workout variant.
fn build_workout(coords: Coords, input: &FormInput) -> Result<Workout> {
    let kind: WorkoutKind = input.kind.parse()?;
    let distance_km = parse_number(&input.distance);
    let duration_min = parse_number(&input.duration);

    match kind {
        WorkoutKind::Running => {
            let cadence_spm = input.cadence.trim().parse::<u32>().map_err(|_| {
                AppError::Validation("cadence must be a positive whole number".to_string())
            })?;
            Workout::running(coords, distance_km, duration_min, cadence_spm)
        }
        WorkoutKind::Cycling => {
            let elevation_gain_m = parse_number(&input.elevation_gain);
            Workout::cycling(coords, distance_km, duration_min, elevation_gain_m)
        }
    }
}

/// Parse a numeric form field. Garbage becomes NaN so the domain's
/// finiteness check produces the user-facing validation error.
fn parse_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Build the display payload for one workout. Only the derived metric is
/// rounded (one decimal place); everything else is shown as entered.
fn list_entry(workout: &Workout) -> ListEntry {
    let (metric, metric_unit, extra, extra_unit) = match workout.details {
        WorkoutDetails::Running {
            cadence_spm,
            pace_min_per_km,
        } => (
            format!("{pace_min_per_km:.1}"),
            "min/km",
            cadence_spm.to_string(),
            "spm",
        ),
        WorkoutDetails::Cycling {
            elevation_gain_m,
            speed_kmh,
        } => (
            format!("{speed_kmh:.1}"),
            "km/h",
            elevation_gain_m.to_string(),
            "m",
        ),
    };

    ListEntry {
        id: workout.id.clone(),
        kind: workout.kind(),
        title: workout.description.clone(),
        distance_km: workout.distance_km,
        duration_min: workout.duration_min,
        metric,
        metric_unit,
        extra,
        extra_unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_workout_running() {
        let input = FormInput {
            kind: "running".to_string(),
            distance: "5.2".to_string(),
            duration: "24".to_string(),
            cadence: "178".to_string(),
            elevation_gain: String::new(),
        };
        let workout = build_workout(Coords::new(52.5, 13.4), &input).unwrap();
        assert_eq!(workout.kind(), WorkoutKind::Running);
        assert_eq!(workout.distance_km, 5.2);
    }

    #[test]
    fn test_build_workout_rejects_garbage_fields() {
        let input = FormInput {
            kind: "running".to_string(),
            distance: "five".to_string(),
            duration: "24".to_string(),
            cadence: "178".to_string(),
            elevation_gain: String::new(),
        };
        assert!(build_workout(Coords::new(0.0, 0.0), &input).is_err());

        let input = FormInput {
            kind: "running".to_string(),
            distance: "5.2".to_string(),
            duration: "24".to_string(),
            cadence: "178.5".to_string(),
            elevation_gain: String::new(),
        };
        assert!(build_workout(Coords::new(0.0, 0.0), &input).is_err());

        let input = FormInput {
            kind: "rowing".to_string(),
            ..FormInput::default()
        };
        assert!(build_workout(Coords::new(0.0, 0.0), &input).is_err());
    }

    #[test]
    fn test_list_entry_rounds_only_the_derived_metric() {
        let workout = Workout::running(Coords::new(52.5, 13.4), 5.2, 24.0, 178).unwrap();
        let entry = list_entry(&workout);
        assert_eq!(entry.metric, "4.6");
        assert_eq!(entry.metric_unit, "min/km");
        assert_eq!(entry.extra, "178");
        assert_eq!(entry.extra_unit, "spm");
        assert_eq!(entry.distance_km, 5.2);
        assert_eq!(entry.duration_min, 24.0);

        let workout = Workout::cycling(Coords::new(52.5, 13.4), 27.0, 95.0, 456.0).unwrap();
        let entry = list_entry(&workout);
        assert_eq!(entry.metric, "17.1");
        assert_eq!(entry.metric_unit, "km/h");
        assert_eq!(entry.extra, "456");
        assert_eq!(entry.extra_unit, "m");
    }
}
