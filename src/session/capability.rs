//! Capabilities the session drives: map, form, list, alerts, geolocation.
//!
//! Each is a trait so the session can be run against a terminal, a real
//! map widget, or recording fakes in tests. Events flowing the other way
//! (map clicks, submits, list clicks) are plain method calls on the session.

use std::time::Duration;

use crate::model::{Activity, ActivityKind, Coords, Workout};

use super::form::FormFields;

/// Renders the map and its markers.
pub trait MapView {
    /// Whatever the map hands back for a placed marker.
    type Marker;

    /// Draws the base map centred on `at`.
    fn render_base(&mut self, at: Coords, zoom: u8);

    /// Moves the view to `to`.
    fn pan_to(&mut self, to: Coords, zoom: u8, options: PanOptions);

    /// Places a marker with an open popup.
    fn place_marker(&mut self, at: Coords, popup: &Popup) -> Self::Marker;
}

/// The workout input form.
pub trait WorkoutForm {
    /// Current raw field values.
    fn read(&self) -> FormFields;

    /// Swaps which of the cadence/elevation rows is shown.
    fn toggle_field_visibility(&mut self);

    fn show(&mut self);

    fn focus_distance(&mut self);

    fn clear(&mut self);

    /// Hides the form. It may reappear, empty, once `reappear_after` has passed.
    fn hide(&mut self, reappear_after: Duration);
}

/// The sidebar list of workouts.
pub trait WorkoutList {
    fn append_entry(&mut self, entry: &ListEntry);
}

/// User-visible error reporting.
pub trait Alert {
    fn notify(&mut self, message: &str);
}

/// One-shot acquisition of the user's current position.
pub trait Geolocation {
    fn current_position(&mut self) -> Result<Coords, GeolocationError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// How the map moves to a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    pub animated: bool,
    pub duration: Duration,
}

/// A marker popup.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
    pub content: String,
}

impl Popup {
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        Self {
            max_width: 400,
            min_width: 150,
            auto_close: false,
            close_on_click: false,
            class_name: format!("{}-popup", kind.as_str()),
            content: format!("{} {}", kind.icon(), workout.description()),
        }
    }
}

/// A measured value with its display unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub icon: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

/// Everything a list entry shows about one workout.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub distance: Metric,
    pub duration: Metric,
    /// Pace for runs, speed for rides.
    pub rate: Metric,
    /// Cadence for runs, elevation gain for rides.
    pub effort: Metric,
}

impl ListEntry {
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        let (rate, effort) = match *workout.activity() {
            Activity::Running {
                cadence_spm,
                pace_min_per_km,
            } => (
                Metric {
                    icon: "⚡️",
                    value: pace_min_per_km,
                    unit: "min/km",
                },
                Metric {
                    icon: "🦶🏼",
                    value: f64::from(cadence_spm),
                    unit: "spm",
                },
            ),
            Activity::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => (
                Metric {
                    icon: "⚡️",
                    value: speed_km_per_h,
                    unit: "km/h",
                },
                Metric {
                    icon: "⛰",
                    value: elevation_gain_m,
                    unit: "m",
                },
            ),
        };

        Self {
            id: workout.id().to_string(),
            kind,
            title: workout.description().to_string(),
            distance: Metric {
                icon: kind.icon(),
                value: workout.distance_km(),
                unit: "km",
            },
            duration: Metric {
                icon: "⏱",
                value: workout.duration_min(),
                unit: "min",
            },
            rate,
            effort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::tz::TimeZone;

    use crate::factory::WorkoutFactory;

    fn factory() -> WorkoutFactory {
        WorkoutFactory::new(TimeZone::UTC)
    }

    #[test]
    fn popup_is_styled_by_kind() {
        let w = factory().create_cycling(Coords::new(1.0, 2.0), 20.0, 60.0, 100.0);
        let popup = Popup::for_workout(&w);

        assert_eq!(popup.class_name, "cycling-popup");
        assert!(popup.content.starts_with("🚴‍♀️ Cycling on "));
        assert!(!popup.auto_close);
        assert!(!popup.close_on_click);
    }

    #[test]
    fn running_entry_shows_pace_and_cadence() {
        let w = factory().create_running(Coords::new(1.0, 2.0), 10.0, 50.0, 178);
        let entry = ListEntry::for_workout(&w);

        assert_eq!(entry.id, w.id().as_str());
        assert_eq!(entry.rate.value, 5.0);
        assert_eq!(entry.rate.unit, "min/km");
        assert_eq!(entry.effort.value, 178.0);
        assert_eq!(entry.effort.unit, "spm");
    }

    #[test]
    fn cycling_entry_shows_speed_and_elevation() {
        let w = factory().create_cycling(Coords::new(1.0, 2.0), 20.0, 60.0, 100.0);
        let entry = ListEntry::for_workout(&w);

        assert_eq!(entry.rate.value, 20.0);
        assert_eq!(entry.rate.unit, "km/h");
        assert_eq!(entry.effort.value, 100.0);
        assert_eq!(entry.effort.unit, "m");
    }
}
