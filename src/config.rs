//! Mapty configuration.
//!
//! Loaded from `~/.mapty/config.toml`. Every key is optional; a missing file
//! means defaults throughout.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use jiff::tz::TimeZone;
use serde::Deserialize;

use crate::model::Coords;
use crate::session::ViewSettings;

/// Highest zoom level the tile server offers.
const MAX_ZOOM: u8 = 22;

/// Mapty configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Fallback position when neither `--here` nor `MAPTY_POSITION` is set.
    pub home: Option<Coords>,

    /// Zoom level for the base map and for panning to a workout.
    pub zoom: u8,

    /// Length of the animated pan to a workout, in seconds.
    pub pan_duration_secs: f64,

    /// Delay before the hidden form may show again, in milliseconds.
    pub form_reappear_ms: u64,

    /// IANA zone used for workout descriptions. The system zone when unset.
    pub time_zone: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let view = ViewSettings::default();
        Self {
            home: None,
            zoom: view.zoom,
            pan_duration_secs: view.pan_duration.as_secs_f64(),
            form_reappear_ms: u64::try_from(view.form_reappear.as_millis()).unwrap_or(u64::MAX),
            time_zone: None,
        }
    }
}

impl Config {
    /// Load config from `~/.mapty/config.toml`, or defaults if it doesn't exist.
    pub fn load() -> Result<Self, String> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        Self::parse(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// Parse and check a config document.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(contents).map_err(|e| e.to_string())?;

        if config.zoom > MAX_ZOOM {
            return Err(format!("zoom must be at most {MAX_ZOOM}, got {}", config.zoom));
        }
        if Duration::try_from_secs_f64(config.pan_duration_secs).is_err() {
            return Err(format!(
                "pan-duration-secs must be a non-negative number of seconds, got {}",
                config.pan_duration_secs
            ));
        }
        config.time_zone()?;

        Ok(config)
    }

    /// The config file path: `~/.mapty/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".mapty").join("config.toml"))
    }

    /// Map and form settings. An out-of-range pan duration falls back to the default.
    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            zoom: self.zoom,
            pan_duration: Duration::try_from_secs_f64(self.pan_duration_secs)
                .unwrap_or(ViewSettings::default().pan_duration),
            form_reappear: Duration::from_millis(self.form_reappear_ms),
        }
    }

    pub fn time_zone(&self) -> Result<TimeZone, String> {
        match &self.time_zone {
            Some(name) => TimeZone::get(name).map_err(|e| format!("unknown time-zone {name:?}: {e}")),
            None => Ok(TimeZone::system()),
        }
    }
}
