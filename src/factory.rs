//! Workout construction: the only place variants and their metrics are built.
//!
//! Inputs are trusted. The session validates form values before calling in,
//! and [`WorkoutFactory::rehydrate`] checks stored records itself since
//! those never passed through a form in this process.

use jiff::{Timestamp, tz::TimeZone};

use crate::model::{
    Activity, ActivityKind, Coords, RecordDetail, Workout, WorkoutId, WorkoutRecord, describe,
};

/// Builds workouts, stamping each with an id, creation time, and description.
#[derive(Debug, Clone)]
pub struct WorkoutFactory {
    clock: fn() -> Timestamp,
    tz: TimeZone,
}

impl WorkoutFactory {
    /// A factory reading the system clock, describing dates in `tz`.
    pub fn new(tz: TimeZone) -> Self {
        Self {
            clock: Timestamp::now,
            tz,
        }
    }

    /// A factory with a fixed clock, for deterministic descriptions.
    #[cfg(test)]
    pub fn with_clock(clock: fn() -> Timestamp, tz: TimeZone) -> Self {
        Self { clock, tz }
    }

    pub fn create_running(
        &self,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: u32,
    ) -> Workout {
        let activity = Activity::Running {
            cadence_spm,
            pace_min_per_km: pace(distance_km, duration_min),
        };
        self.create(coords, distance_km, duration_min, activity)
    }

    pub fn create_cycling(
        &self,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Workout {
        let activity = Activity::Cycling {
            elevation_gain_m,
            speed_km_per_h: speed(distance_km, duration_min),
        };
        self.create(coords, distance_km, duration_min, activity)
    }

    /// Rebuilds a workout from a stored record.
    ///
    /// Identity, creation time, and description are taken as stored;
    /// derived metrics are recomputed. Returns `None` when a metric is not
    /// finite and positive, or a cadence is not a whole number.
    pub fn rehydrate(&self, record: WorkoutRecord) -> Option<Workout> {
        let WorkoutRecord {
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
            description,
            detail,
        } = record;

        if !is_positive(distance_km) || !is_positive(duration_min) {
            return None;
        }

        let kind = detail.kind();
        let activity = match detail {
            RecordDetail::Running { cadence_spm } => Activity::Running {
                cadence_spm: whole_positive(cadence_spm)?,
                pace_min_per_km: pace(distance_km, duration_min),
            },
            RecordDetail::Cycling { elevation_gain_m } if is_positive(elevation_gain_m) => {
                Activity::Cycling {
                    elevation_gain_m,
                    speed_km_per_h: speed(distance_km, duration_min),
                }
            }
            RecordDetail::Cycling { .. } => return None,
        };

        let description = description.unwrap_or_else(|| self.describe_at(kind, created_at));

        Some(Workout::from_parts(
            WorkoutId::from(id),
            created_at,
            coords,
            distance_km,
            duration_min,
            description,
            activity,
        ))
    }

    fn create(
        &self,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        activity: Activity,
    ) -> Workout {
        let created_at = (self.clock)();
        let description = self.describe_at(activity.kind(), created_at);
        Workout::from_parts(
            WorkoutId::generate(),
            created_at,
            coords,
            distance_km,
            duration_min,
            description,
            activity,
        )
    }

    fn describe_at(&self, kind: ActivityKind, at: Timestamp) -> String {
        describe(kind, at.to_zoned(self.tz.clone()).date())
    }
}

/// Minutes per kilometre.
pub fn pace(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// Kilometres per hour.
pub fn speed(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Converts a stored cadence to `u32` if it is a positive whole number.
pub(crate) fn whole_positive(v: f64) -> Option<u32> {
    if !is_positive(v) || v.fract() != 0.0 || v > f64::from(u32::MAX) {
        return None;
    }
    // Range and integrality checked above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(v as u32)
}
