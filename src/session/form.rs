//! Form values and their validation.

use std::fmt;

use crate::factory::whole_positive;
use crate::model::ActivityKind;

/// Raw values as typed into the form.
///
/// Only the row matching `kind` is read on submit; the hidden row may hold
/// anything.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    pub kind: ActivityKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl FormFields {
    /// An empty form, showing the running row.
    pub fn empty() -> Self {
        Self {
            kind: ActivityKind::Running,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation: String::new(),
        }
    }

    /// Parses the visible fields. Every number must be finite and above zero.
    pub fn validate(&self) -> Result<WorkoutInput, InputError> {
        let distance_km = positive(Field::Distance, &self.distance)?;
        let duration_min = positive(Field::Duration, &self.duration)?;

        match self.kind {
            ActivityKind::Running => {
                let cadence = positive(Field::Cadence, &self.cadence)?;
                let cadence_spm = whole_positive(cadence).ok_or(InputError::NotWhole {
                    field: Field::Cadence,
                })?;
                Ok(WorkoutInput::Running {
                    distance_km,
                    duration_min,
                    cadence_spm,
                })
            }
            ActivityKind::Cycling => Ok(WorkoutInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m: positive(Field::Elevation, &self.elevation)?,
            }),
        }
    }
}

/// Validated form values, ready for the factory.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutInput {
    Running {
        distance_km: f64,
        duration_min: f64,
        cadence_spm: u32,
    },
    Cycling {
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    },
}

/// A form row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Distance => "distance",
            Self::Duration => "duration",
            Self::Cadence => "cadence",
            Self::Elevation => "elevation gain",
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("Inputs have to be positive numbers ({field} was {value:?})")]
    NotPositive { field: Field, value: String },

    #[error("{field} has to be a whole number")]
    NotWhole { field: Field },
}

fn positive(field: Field, raw: &str) -> Result<f64, InputError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| InputError::NotPositive {
            field,
            value: raw.to_string(),
        })
}
