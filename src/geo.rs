//! Great-circle distance with an explicit unknown sentinel.
//!
//! A partial coordinate pair never produces a numeric distance; it resolves
//! to [`Distance::Unknown`], which the display layer renders as a
//! placeholder glyph distinct from a real zero-distance value.

use serde::Serialize;

use crate::types::GeoPoint;

/// Mean Earth radius in kilometres (haversine formula).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Placeholder glyph for an unknown distance (also used for ratings).
pub const UNKNOWN_GLYPH: &str = "?";

/// A computed distance, or an explicit unknown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Distance {
    Km(f64),
    Unknown,
}

impl Distance {
    /// Numeric value if known.
    pub fn km(&self) -> Option<f64> {
        match self {
            Distance::Km(km) => Some(*km),
            Distance::Unknown => None,
        }
    }

    /// Display contract: one decimal with a "km" suffix, or the
    /// placeholder glyph.
    pub fn display(&self) -> String {
        match self {
            Distance::Km(km) => format!("{:.1} km", km),
            Distance::Unknown => UNKNOWN_GLYPH.to_string(),
        }
    }
}

/// Haversine great-circle distance between two coordinate pairs.
///
/// Any missing or non-finite input resolves to [`Distance::Unknown`].
/// Pure and deterministic; safe to call per-row in a loop or in parallel.
pub fn distance_km(
    lat1: Option<f64>,
    lon1: Option<f64>,
    lat2: Option<f64>,
    lon2: Option<f64>,
) -> Distance {
    let (Some(lat1), Some(lon1), Some(lat2), Some(lon2)) = (lat1, lon1, lat2, lon2) else {
        return Distance::Unknown;
    };
    if ![lat1, lon1, lat2, lon2].iter().all(|v| v.is_finite()) {
        return Distance::Unknown;
    }

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    Distance::Km(EARTH_RADIUS_KM * c)
}

/// Distance between two optional points (reference point absent means
/// every distance is unknown).
pub fn distance_between(a: Option<GeoPoint>, b: Option<GeoPoint>) -> Distance {
    match (a, b) {
        (Some(a), Some(b)) => distance_km(Some(a.lat), Some(a.lon), Some(b.lat), Some(b.lon)),
        _ => Distance::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_distance() {
        let d = distance_km(Some(35.0), Some(139.0), Some(35.0), Some(139.0));
        assert_relative_eq!(d.km().unwrap(), 0.0, epsilon = 1e-9);
        assert_eq!(d.display(), "0.0 km");
    }

    #[test]
    fn test_known_pair() {
        // Tokyo -> Osaka, roughly 400 km great-circle.
        let d = distance_km(Some(35.6762), Some(139.6503), Some(34.6937), Some(135.5023));
        let km = d.km().unwrap();
        assert!(km > 380.0 && km < 410.0, "got {km}");
    }

    #[test]
    fn test_symmetry() {
        let ab = distance_km(Some(35.0), Some(139.0), Some(43.06), Some(141.35));
        let ba = distance_km(Some(43.06), Some(141.35), Some(35.0), Some(139.0));
        assert_relative_eq!(ab.km().unwrap(), ba.km().unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn test_missing_input_is_unknown() {
        assert_eq!(distance_km(None, Some(35.0), Some(139.0), Some(35.1)), Distance::Unknown);
        assert_eq!(distance_km(Some(35.0), Some(139.0), Some(35.1), None), Distance::Unknown);
        assert_eq!(
            distance_km(Some(f64::NAN), Some(139.0), Some(35.1), Some(139.0)),
            Distance::Unknown
        );
        assert_eq!(Distance::Unknown.display(), "?");
    }

    #[test]
    fn test_reference_point_absent() {
        let place = GeoPoint { lat: 35.0, lon: 139.0 };
        assert_eq!(distance_between(None, Some(place)), Distance::Unknown);
    }
}
