//! Geographic coordinates: where a workout happened.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Serialized as a two-element array `[lat, lng]`, the same shape the
/// browser app stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Errors from parsing a `LAT,LNG` string.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CoordsParseError {
    #[error("expected LAT,LNG (e.g. 38.72,-9.14)")]
    Shape,

    #[error("invalid number: {0}")]
    Number(String),

    #[error("latitude {0} is outside -90..=90")]
    Latitude(f64),

    #[error("longitude {0} is outside -180..=180")]
    Longitude(f64),
}

impl FromStr for Coords {
    type Err = CoordsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or(CoordsParseError::Shape)?;
        let parse = |part: &str| {
            let part = part.trim();
            part.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| CoordsParseError::Number(part.to_string()))
        };
        let (lat, lng) = (parse(lat)?, parse(lng)?);

        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordsParseError::Latitude(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordsParseError::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lat_lng_pair() {
        let c: Coords = "38.72, -9.14".parse().unwrap();
        assert_eq!(c, Coords::new(38.72, -9.14));
    }

    #[test]
    fn rejects_missing_comma() {
        assert_eq!("38.72".parse::<Coords>(), Err(CoordsParseError::Shape));
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert_eq!(
            "91,0".parse::<Coords>(),
            Err(CoordsParseError::Latitude(91.0))
        );
    }

    #[test]
    fn rejects_non_finite() {
        assert!(matches!(
            "NaN,0".parse::<Coords>(),
            Err(CoordsParseError::Number(_))
        ));
    }

    #[test]
    fn serializes_as_array() {
        let json = serde_json::to_string(&Coords::new(39.0, -16.0)).unwrap();
        assert_eq!(json, "[39.0,-16.0]");
    }
}
