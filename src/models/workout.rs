// SPDX-License-Identifier: MIT

//! Workout domain model: running and cycling variants with derived metrics.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, Result};

/// Fixed English month table so descriptions are reproducible regardless of
/// the process locale.
const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A latitude/longitude pair, serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> [f64; 2] {
        [coords.lat, coords.lng]
    }
}

/// Workout type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Capitalized label used in descriptions ("Running" / "Cycling").
    pub fn label(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        };
        f.write_str(name)
    }
}

impl FromStr for WorkoutKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(AppError::Validation(format!(
                "Unknown workout type '{other}' (expected 'running' or 'cycling')"
            ))),
        }
    }
}

/// Variant-specific source fields, before derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantInput {
    Running { cadence_spm: u32 },
    Cycling { elevation_gain_m: f64 },
}

/// Variant payload with its derived metric.
///
/// The derived values (`pace_min_per_km`, `speed_kmh`) are always recomputed
/// from distance/duration; they are never an independent source of truth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    Running {
        /// Steps per minute
        cadence_spm: u32,
        /// Minutes per kilometer (duration / distance)
        pace_min_per_km: f64,
    },
    Cycling {
        /// Meters climbed (zero is a legal flat ride)
        elevation_gain_m: f64,
        /// Kilometers per hour (distance / (duration / 60))
        speed_kmh: f64,
    },
}

/// A single logged workout. Immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    /// Opaque identifier, unique within a process lifetime
    pub id: String,
    /// Creation time; only used to derive `description`
    pub created_at: DateTime<Utc>,
    /// Where the user clicked on the map
    pub coords: Coords,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_min: f64,
    /// Derived: "<Kind> on <Month> <day>"
    pub description: String,
    /// Variant payload with the derived metric
    pub details: WorkoutDetails,
}

impl Workout {
    /// Create a running workout. Fails if distance/duration are not finite
    /// positive numbers or cadence is zero.
    pub fn running(
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: u32,
    ) -> Result<Self> {
        let now = Utc::now();
        Self::restore(
            generate_id(now),
            now,
            coords,
            distance_km,
            duration_min,
            VariantInput::Running { cadence_spm },
        )
    }

    /// Create a cycling workout. Fails if distance/duration are not finite
    /// positive numbers or elevation gain is not a finite non-negative number.
    pub fn cycling(
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Result<Self> {
        let now = Utc::now();
        Self::restore(
            generate_id(now),
            now,
            coords,
            distance_km,
            duration_min,
            VariantInput::Cycling { elevation_gain_m },
        )
    }

    /// Reconstruct a workout from persisted parts.
    ///
    /// Runs the same validation as creation and recomputes every derived
    /// field (pace/speed/description), preserving only the stored `id` and
    /// `created_at`. The store uses this so reloaded records behave exactly
    /// like freshly created ones.
    pub fn restore(
        id: String,
        created_at: DateTime<Utc>,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        input: VariantInput,
    ) -> Result<Self> {
        check_positive_finite("distance", distance_km)?;
        check_positive_finite("duration", duration_min)?;

        let details = match input {
            VariantInput::Running { cadence_spm } => {
                if cadence_spm == 0 {
                    return Err(AppError::Validation(
                        "cadence must be a positive number".to_string(),
                    ));
                }
                WorkoutDetails::Running {
                    cadence_spm,
                    pace_min_per_km: duration_min / distance_km,
                }
            }
            VariantInput::Cycling { elevation_gain_m } => {
                if !elevation_gain_m.is_finite() {
                    return Err(AppError::Validation(
                        "elevation gain must be a finite number".to_string(),
                    ));
                }
                if elevation_gain_m < 0.0 {
                    return Err(AppError::Validation(
                        "elevation gain cannot be negative".to_string(),
                    ));
                }
                WorkoutDetails::Cycling {
                    elevation_gain_m,
                    speed_kmh: distance_km / (duration_min / 60.0),
                }
            }
        };

        let kind = match details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        };

        Ok(Self {
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
            description: build_description(kind, created_at),
            details,
        })
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

fn check_positive_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::Validation(format!(
            "{name} must be a positive number"
        )));
    }
    Ok(())
}

/// Derive the display description from the kind and creation date.
///
/// Pure in `(kind, created_at)` so it is stable across persist/reload.
fn build_description(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    format!(
        "{} on {} {}",
        kind.label(),
        MONTHS[created_at.month0() as usize],
        created_at.day()
    )
}

/// Generate an id from the millisecond timestamp, truncated to its 10
/// low-order decimal digits. Creation is strictly sequential (one submit at
/// a time), so sub-millisecond collisions cannot occur.
fn generate_id(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().to_string();
    millis[millis.len().saturating_sub(10)..].to_string()
}
