//! Position resolution for the terminal.
//!
//! There is no GPS on a command line, so the current position is resolved
//! through a chain:
//!
//! 1. `--here <LAT,LNG>`: explicit per-command override
//! 2. `MAPTY_POSITION` env var: process/session level
//! 3. `home = [lat, lng]` in `~/.mapty/config.toml`: global default
//!
//! When none yields a value the request fails, exactly as a browser does
//! when the user denies location access.

use std::env;

use crate::model::Coords;
use crate::session::{Geolocation, GeolocationError};

/// Environment variable holding a `LAT,LNG` position.
pub const POSITION_ENV: &str = "MAPTY_POSITION";

/// Error message shown when no position can be resolved.
pub const POSITION_REQUIRED: &str = "position required: pass --here <LAT,LNG>, \
    set MAPTY_POSITION, or add `home = [lat, lng]` to ~/.mapty/config.toml";

/// Geolocation backed by the resolution chain.
#[derive(Debug, Clone)]
pub struct ResolvedPosition {
    explicit: Option<Coords>,
    configured: Option<Coords>,
}

impl ResolvedPosition {
    pub fn new(explicit: Option<Coords>, configured: Option<Coords>) -> Self {
        Self {
            explicit,
            configured,
        }
    }
}

impl Geolocation for ResolvedPosition {
    fn current_position(&mut self) -> Result<Coords, GeolocationError> {
        let from_env = env::var(POSITION_ENV).ok();
        resolve_position(self.explicit, from_env.as_deref(), self.configured)
    }
}

/// Resolve the current position from the tiered chain.
///
/// An empty env value counts as unset. A malformed one is an error rather
/// than a silent fall-through to the config.
pub fn resolve_position(
    explicit: Option<Coords>,
    from_env: Option<&str>,
    configured: Option<Coords>,
) -> Result<Coords, GeolocationError> {
    // 1. Explicit --here flag.
    if let Some(at) = explicit {
        return Ok(at);
    }

    // 2. MAPTY_POSITION environment variable.
    if let Some(raw) = from_env.filter(|s| !s.trim().is_empty()) {
        return raw
            .parse::<Coords>()
            .map_err(|e| GeolocationError::Unavailable(format!("{POSITION_ENV}: {e}")));
    }

    // 3. ~/.mapty/config.toml.
    configured.ok_or_else(|| GeolocationError::Unavailable(POSITION_REQUIRED.to_string()))
}
