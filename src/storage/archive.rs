//! Workout archive: the full collection as one JSON blob.
//!
//! Saving always rewrites the whole ordered sequence. Loading fails soft:
//! an absent or unparsable blob reads as empty, and a record that cannot be
//! decoded or rehydrated is skipped without discarding its neighbours.

use serde_json::Value;

use crate::factory::WorkoutFactory;
use crate::model::{Workout, WorkoutRecord};

use super::{BlobStore, Result};

/// The key the workout collection is stored under.
pub const WORKOUTS_KEY: &str = "workouts";

/// Serializes workouts to, and restores them from, a [`BlobStore`].
pub struct WorkoutArchive<B> {
    blobs: B,
}

impl<B: BlobStore> WorkoutArchive<B> {
    pub fn new(blobs: B) -> Self {
        Self { blobs }
    }

    /// Overwrites the stored collection with `workouts`.
    pub fn save(&mut self, workouts: &[Workout]) -> Result<()> {
        let json = serde_json::to_string(workouts)?;
        self.blobs.set_item(WORKOUTS_KEY, &json)?;
        tracing::debug!(count = workouts.len(), "saved workouts");
        Ok(())
    }

    /// Restores the stored collection, rebuilding each record through `factory`.
    ///
    /// Never fails: anything unreadable is logged and left out.
    pub fn load(&self, factory: &WorkoutFactory) -> Vec<Workout> {
        let blob = match self.blobs.get_item(WORKOUTS_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored workouts");
                return Vec::new();
            }
        };

        let values: Vec<Value> = match serde_json::from_str(&blob) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(error = %e, "stored workouts are not a JSON array; starting empty");
                return Vec::new();
            }
        };

        let mut workouts = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            let record = match serde_json::from_value::<WorkoutRecord>(value) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed workout record");
                    continue;
                }
            };
            let id = record.id.clone();
            match factory.rehydrate(record) {
                Some(workout) => workouts.push(workout),
                None => tracing::warn!(index, %id, "skipping workout with invalid metrics"),
            }
        }
        workouts
    }

    #[cfg(test)]
    pub fn blobs(&self) -> &B {
        &self.blobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::{Timestamp, tz::TimeZone};

    use crate::model::{Activity, Coords};
    use crate::storage::{MemoryBlobStore, SqliteBlobStore};

    fn march_15() -> Timestamp {
        "2024-03-15T09:30:00Z".parse().unwrap()
    }

    fn factory() -> WorkoutFactory {
        WorkoutFactory::with_clock(march_15, TimeZone::UTC)
    }

    fn sample_workouts() -> Vec<Workout> {
        let f = factory();
        vec![
            f.create_running(Coords::new(38.72, -9.14), 10.0, 50.0, 178),
            f.create_cycling(Coords::new(38.70, -9.40), 42.0, 120.0, 380.0),
        ]
    }

    #[test]
    fn load_of_save_reproduces_workouts() {
        let mut archive = WorkoutArchive::new(SqliteBlobStore::open_in_memory().unwrap());
        let workouts = sample_workouts();

        archive.save(&workouts).unwrap();
        let loaded = archive.load(&factory());

        assert_eq!(loaded, workouts);
    }

    #[test]
    fn loaded_workouts_keep_variant_behaviour() {
        let mut archive = WorkoutArchive::new(MemoryBlobStore::new());
        archive.save(&sample_workouts()).unwrap();

        let loaded = archive.load(&factory());
        assert!(matches!(
            loaded[1].activity(),
            Activity::Cycling { speed_km_per_h, .. } if *speed_km_per_h == 21.0
        ));
    }

    #[test]
    fn save_overwrites_previous_blob() {
        let mut archive = WorkoutArchive::new(MemoryBlobStore::new());
        let workouts = sample_workouts();

        archive.save(&workouts).unwrap();
        archive.save(&workouts[..1]).unwrap();

        assert_eq!(archive.load(&factory()).len(), 1);
        assert_eq!(archive.blobs().writes(), 2);
    }

    #[test]
    fn absent_blob_loads_empty() {
        let archive = WorkoutArchive::new(MemoryBlobStore::new());
        assert!(archive.load(&factory()).is_empty());
    }

    #[test]
    fn unparsable_blob_loads_empty() {
        let archive = WorkoutArchive::new(MemoryBlobStore::with_blob(WORKOUTS_KEY, "{not json"));
        assert!(archive.load(&factory()).is_empty());

        let archive = WorkoutArchive::new(MemoryBlobStore::with_blob(WORKOUTS_KEY, "null"));
        assert!(archive.load(&factory()).is_empty());
    }

    #[test]
    fn bad_records_are_skipped_individually() {
        let blob = r#"[
            {"id":"a","createdAt":"2024-03-15T09:30:00Z","coords":[1,2],
             "distanceKm":5,"durationMin":30,"type":"running","cadenceSpm":170},
            {"id":"b","type":"swimming"},
            {"id":"c","createdAt":"2024-03-15T09:30:00Z","coords":[1,2],
             "distanceKm":-5,"durationMin":30,"type":"running","cadenceSpm":170},
            {"id":"d","createdAt":"2024-03-15T09:30:00Z","coords":[3,4],
             "distanceKm":20,"durationMin":60,"type":"cycling","elevationGainM":150}
        ]"#;
        let archive = WorkoutArchive::new(MemoryBlobStore::with_blob(WORKOUTS_KEY, blob));

        let loaded = archive.load(&factory());
        let ids: Vec<&str> = loaded.iter().map(|w| w.id().as_str()).collect();
        assert_eq!(ids, ["a", "d"]);
    }

    #[test]
    fn loads_blob_written_by_browser_app() {
        let blob = r#"[{
            "date":"2024-03-15T09:30:00.000Z","id":"0495000123",
            "coords":[39,-16],"distance":10,"duration":50,
            "type":"running","cadence":178,"pace":1,
            "description":"Running on March 15"
        }]"#;
        let archive = WorkoutArchive::new(MemoryBlobStore::with_blob(WORKOUTS_KEY, blob));

        let loaded = archive.load(&factory());
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id().as_str(), "0495000123");
        assert_eq!(
            loaded[0].activity(),
            &Activity::Running {
                cadence_spm: 178,
                pace_min_per_km: 5.0
            }
        );
    }
}
