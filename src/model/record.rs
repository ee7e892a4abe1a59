//! Persisted workout records: the plain-data shape read back from a blob.

use jiff::Timestamp;
use serde::Deserialize;

use super::{ActivityKind, Coords};

/// A workout as read from storage, before the factory rebuilds it.
///
/// Derived metrics in the stored JSON are ignored; they are recomputed on
/// rehydration. The aliases accept blobs written by the browser app, which
/// used `date`, `distance`, `duration`, `cadence`, and `evelationGain`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: String,

    #[serde(alias = "date")]
    pub created_at: Timestamp,

    pub coords: Coords,

    #[serde(alias = "distance")]
    pub distance_km: f64,

    #[serde(alias = "duration")]
    pub duration_min: f64,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(flatten)]
    pub detail: RecordDetail,
}

/// Variant-specific fields of a stored record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecordDetail {
    #[serde(rename_all = "camelCase")]
    Running {
        #[serde(alias = "cadence")]
        cadence_spm: f64,
    },

    #[serde(rename_all = "camelCase")]
    Cycling {
        #[serde(alias = "evelationGain", alias = "elevationGain")]
        elevation_gain_m: f64,
    },
}

impl RecordDetail {
    pub fn kind(&self) -> ActivityKind {
        match self {
            Self::Running { .. } => ActivityKind::Running,
            Self::Cycling { .. } => ActivityKind::Cycling,
        }
    }
}
