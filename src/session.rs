//! The session controller: turns user events into store mutations and view updates.
//!
//! A session moves through:
//!
//! ```text
//! AwaitingLocation ──position──▶ MapReady { Idle ⇄ Open { at } }
//! ```
//!
//! Every handler runs to completion before the next event is dispatched.
//! The session owns the store and the views; nothing else mutates them.

mod capability;
mod form;

use std::time::Duration;

use crate::factory::WorkoutFactory;
use crate::model::{Coords, Workout, WorkoutId};
use crate::storage::{BlobStore, WorkoutArchive};
use crate::store::WorkoutStore;

pub use capability::{
    Alert, Geolocation, GeolocationError, ListEntry, MapView, Metric, PanOptions, Popup,
    WorkoutForm, WorkoutList,
};
pub use form::{FormFields, InputError, WorkoutInput};

const POSITION_UNAVAILABLE: &str = "Could not get your position";

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    /// Waiting for the first position fix. Stays here if geolocation fails.
    AwaitingLocation,

    /// The map is drawn and accepting clicks.
    MapReady { form: FormState },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormState {
    Idle,

    /// Opened by a map click at `at`; the next submit records a workout there.
    Open { at: Coords },
}

/// Errors returned from [`Session::submit`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("click the map to choose where the workout happened")]
    NoLocationSelected,

    #[error(transparent)]
    InvalidInput(#[from] InputError),
}

/// Map and form behaviour knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub zoom: u8,
    pub pan_duration: Duration,
    pub form_reappear: Duration,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            zoom: 16,
            pan_duration: Duration::from_millis(1500),
            form_reappear: Duration::from_millis(1000),
        }
    }
}

/// The capabilities a session renders through.
pub struct Views<M, F, L, A> {
    pub map: M,
    pub form: F,
    pub list: L,
    pub alert: A,
}

/// One run of the app, from startup to exit.
pub struct Session<M: MapView, F, L, A, B> {
    state: SessionState,
    store: WorkoutStore,
    archive: WorkoutArchive<B>,
    factory: WorkoutFactory,
    views: Views<M, F, L, A>,
    markers: Vec<M::Marker>,
    settings: ViewSettings,
}

impl<M, F, L, A, B> Session<M, F, L, A, B>
where
    M: MapView,
    F: WorkoutForm,
    L: WorkoutList,
    A: Alert,
    B: BlobStore,
{
    /// Creates a session and hydrates its store from `archive`.
    pub fn new(
        views: Views<M, F, L, A>,
        archive: WorkoutArchive<B>,
        factory: WorkoutFactory,
        settings: ViewSettings,
    ) -> Self {
        let mut store = WorkoutStore::new();
        store.replace_all(archive.load(&factory));
        if store.is_empty() {
            tracing::debug!("no stored workouts");
        } else {
            tracing::debug!(count = store.len(), "hydrated workout store");
        }

        Self {
            state: SessionState::AwaitingLocation,
            store,
            archive,
            factory,
            views,
            markers: Vec::new(),
            settings,
        }
    }

    /// Requests the current position once and dispatches the outcome.
    pub fn start(&mut self, geolocation: &mut impl Geolocation) {
        match geolocation.current_position() {
            Ok(at) => self.position_acquired(at),
            Err(e) => self.position_failed(&e),
        }
    }

    /// Geolocation succeeded: draw the map and replay stored workouts.
    ///
    /// Ignored once the map is ready; the request is one-shot.
    pub fn position_acquired(&mut self, at: Coords) {
        if self.state != SessionState::AwaitingLocation {
            tracing::debug!(%at, "ignoring position after map is ready");
            return;
        }

        self.views.map.render_base(at, self.settings.zoom);
        self.state = SessionState::MapReady {
            form: FormState::Idle,
        };
        tracing::debug!(%at, "map ready");

        for workout in self.store.all() {
            let marker = self
                .views
                .map
                .place_marker(workout.coords(), &Popup::for_workout(workout));
            self.markers.push(marker);
            self.views.list.append_entry(&ListEntry::for_workout(workout));
        }
    }

    /// Geolocation failed. The session stays in `AwaitingLocation`.
    pub fn position_failed(&mut self, error: &GeolocationError) {
        tracing::warn!(%error, "geolocation failed");
        self.views.alert.notify(POSITION_UNAVAILABLE);
    }

    /// The map was clicked at `at`: open the form for a workout there.
    pub fn map_clicked(&mut self, at: Coords) {
        let SessionState::MapReady { form } = &mut self.state else {
            return;
        };
        *form = FormState::Open { at };
        self.views.form.show();
        self.views.form.focus_distance();
    }

    /// The workout type select changed.
    pub fn type_changed(&mut self) {
        self.views.form.toggle_field_visibility();
    }

    /// The form was submitted.
    ///
    /// On invalid input the user is alerted and the form stays open with
    /// nothing recorded. On success the workout is stored, rendered, and the
    /// whole store persisted.
    pub fn submit(&mut self) -> Result<WorkoutId, SessionError> {
        let SessionState::MapReady {
            form: FormState::Open { at },
        } = self.state
        else {
            return Err(SessionError::NoLocationSelected);
        };

        let input = match self.views.form.read().validate() {
            Ok(input) => input,
            Err(e) => {
                tracing::debug!(error = %e, "rejected workout input");
                self.views.alert.notify(&e.to_string());
                return Err(e.into());
            }
        };

        let workout = match input {
            WorkoutInput::Running {
                distance_km,
                duration_min,
                cadence_spm,
            } => self
                .factory
                .create_running(at, distance_km, duration_min, cadence_spm),
            WorkoutInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            } => self
                .factory
                .create_cycling(at, distance_km, duration_min, elevation_gain_m),
        };
        let id = workout.id().clone();
        let at = workout.coords();
        let created_at = workout.created_at();
        let popup = Popup::for_workout(&workout);
        let entry = ListEntry::for_workout(&workout);

        self.store.append(workout);
        tracing::info!(%id, %created_at, "recorded workout");

        let marker = self.views.map.place_marker(at, &popup);
        self.markers.push(marker);
        self.views.list.append_entry(&entry);

        self.views.form.clear();
        self.views.form.hide(self.settings.form_reappear);
        self.state = SessionState::MapReady {
            form: FormState::Idle,
        };

        if let Err(e) = self.archive.save(self.store.all()) {
            tracing::error!(error = %e, "failed to persist workouts");
            self.views
                .alert
                .notify(&format!("Could not save workouts: {e}"));
        }

        Ok(id)
    }

    /// A list entry was clicked. Pans to its workout; unknown ids are ignored.
    ///
    /// Ignored until the map is ready, since no list has been rendered yet.
    pub fn entry_clicked(&mut self, id: &str) {
        if self.state == SessionState::AwaitingLocation {
            tracing::debug!(id, "ignoring entry click before map is ready");
            return;
        }
        let Some(workout) = self.store.find_by_id(id) else {
            tracing::debug!(id, "list entry has no matching workout");
            return;
        };
        let options = PanOptions {
            animated: true,
            duration: self.settings.pan_duration,
        };
        self.views
            .map
            .pan_to(workout.coords(), self.settings.zoom, options);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Read-only view of the stored workouts, in insertion order.
    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    /// Number of markers placed on the map so far.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[cfg(test)]
    fn archive(&self) -> &WorkoutArchive<B> {
        &self.archive
    }
}
