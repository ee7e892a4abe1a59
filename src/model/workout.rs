//! Workout types: one recorded run or ride.

use std::fmt;

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Coords;

/// Identifies a workout within the store.
///
/// New workouts get a random UUID. Records restored from older blobs keep
/// whatever id they were saved with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading eight characters, enough to tell workouts apart on screen.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl From<String> for WorkoutId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of workout, without its variant data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Running,
    Cycling,
}

impl ActivityKind {
    /// The discriminator as stored: `"running"` or `"cycling"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Running => "🏃‍♂️",
            Self::Cycling => "🚴‍♀️",
        }
    }

    /// The other kind; flipping the form's type select.
    pub fn toggled(self) -> Self {
        match self {
            Self::Running => Self::Cycling,
            Self::Cycling => Self::Running,
        }
    }
}

/// Variant-specific data, tagged by `type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Activity {
    #[serde(rename_all = "camelCase")]
    Running {
        cadence_spm: u32,
        pace_min_per_km: f64,
    },

    #[serde(rename_all = "camelCase")]
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

impl Activity {
    pub fn kind(&self) -> ActivityKind {
        match self {
            Self::Running { .. } => ActivityKind::Running,
            Self::Cycling { .. } => ActivityKind::Cycling,
        }
    }
}

/// A recorded workout.
///
/// Every field is fixed once the factory hands the workout out; there are
/// accessors but no setters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    id: WorkoutId,
    created_at: Timestamp,
    coords: Coords,
    distance_km: f64,
    duration_min: f64,
    description: String,
    #[serde(flatten)]
    activity: Activity,
}

impl Workout {
    /// Assembles a workout from already-derived parts. Only the factory calls this.
    pub(crate) fn from_parts(
        id: WorkoutId,
        created_at: Timestamp,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        description: String,
        activity: Activity,
    ) -> Self {
        Self {
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
            description,
            activity,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn kind(&self) -> ActivityKind {
        self.activity.kind()
    }
}

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

/// "<Kind> on <Month> <Day>", e.g. `Running on March 15`.
pub fn describe(kind: ActivityKind, date: Date) -> String {
    // jiff months are 1..=12.
    let month = MONTHS[usize::from(date.month().unsigned_abs()) - 1];
    format!("{} on {month} {}", kind.title(), date.day())
}
