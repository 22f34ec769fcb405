// SPDX-License-Identifier: MIT

//! Persistence layer: an opaque key-value blob store and the workout
//! snapshot store on top of it.
//!
//! Persisted records are plain data. Loading re-materializes every record
//! through the same constructors used at creation time ([`Workout::restore`])
//! so derived fields are recomputed rather than trusted.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Coords, VariantInput, Workout, WorkoutDetails, WorkoutKind};

/// Fixed key the workout snapshot is stored under.
pub const WORKOUTS_KEY: &str = "workouts";

/// Opaque string-valued key-value store (localStorage semantics).
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Persisted workout record.
///
/// `pace`/`speed` are written for readability of the stored blob but are
/// never trusted on load; reconstruction recomputes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// `[lat, lng]`
    pub coords: Coords,
    /// Kilometers
    pub distance: f64,
    /// Minutes
    pub duration: f64,
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let (cadence, pace, elevation_gain, speed) = match workout.details {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => (Some(cadence_spm), Some(pace_min_per_km), None, None),
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_kmh,
            } => (None, None, Some(elevation_gain_m), Some(speed_kmh)),
        };

        Self {
            id: workout.id.clone(),
            created_at: workout.created_at,
            coords: workout.coords,
            distance: workout.distance_km,
            duration: workout.duration_min,
            kind: workout.kind(),
            description: workout.description.clone(),
            cadence,
            pace,
            elevation_gain,
            speed,
        }
    }
}

impl WorkoutRecord {
    /// Re-materialize the record into a proper workout variant.
    ///
    /// Fails if the variant source field is missing or the record violates
    /// the domain invariants.
    pub fn into_workout(self) -> Result<Workout> {
        let input = match self.kind {
            WorkoutKind::Running => VariantInput::Running {
                cadence_spm: self.cadence.ok_or_else(|| {
                    crate::error::AppError::Validation(
                        "running record is missing cadence".to_string(),
                    )
                })?,
            },
            WorkoutKind::Cycling => VariantInput::Cycling {
                elevation_gain_m: self.elevation_gain.ok_or_else(|| {
                    crate::error::AppError::Validation(
                        "cycling record is missing elevation gain".to_string(),
                    )
                })?,
            },
        };

        Workout::restore(
            self.id,
            self.created_at,
            self.coords,
            self.distance,
            self.duration,
            input,
        )
    }
}

/// Serializes the workout list to a blob store and reconstructs it on load.
pub struct WorkoutStore<S: BlobStore> {
    store: S,
}

impl<S: BlobStore> WorkoutStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a snapshot of the full list under [`WORKOUTS_KEY`], replacing
    /// any prior value.
    pub fn save(&mut self, workouts: &[Workout]) -> Result<()> {
        let records: Vec<WorkoutRecord> = workouts.iter().map(WorkoutRecord::from).collect();
        let blob = serde_json::to_string(&records)
            .map_err(|err| crate::error::AppError::Storage(err.to_string()))?;
        self.store.set(WORKOUTS_KEY, &blob)
    }

    /// Load the persisted list, fail-soft.
    ///
    /// A missing key, an unreadable store, or an unparsable blob yields an
    /// empty list. Individual records that fail reconstruction are skipped.
    pub fn load(&self) -> Vec<Workout> {
        let blob = match self.store.get(WORKOUTS_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "Workout store unreadable; starting empty");
                return Vec::new();
            }
        };

        let records: Vec<WorkoutRecord> = match serde_json::from_str(&blob) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "Stored workouts unparsable; starting empty");
                return Vec::new();
            }
        };

        records
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                match record.into_workout() {
                    Ok(workout) => Some(workout),
                    Err(err) => {
                        tracing::warn!(id = %id, error = %err, "Skipping invalid stored workout");
                        None
                    }
                }
            })
            .collect()
    }
}
