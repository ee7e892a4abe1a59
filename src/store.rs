//! In-memory workout store: the single source of truth for a session.

use crate::model::Workout;

/// Ordered, append-only collection of workouts.
///
/// Insertion order is preserved. Nothing is de-duplicated or validated here;
/// the session only appends what the factory built.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    /// First workout whose id equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id().as_str() == id)
    }

    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    /// Swaps in a hydrated collection. Used once, at startup.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) {
        self.workouts = workouts;
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}
