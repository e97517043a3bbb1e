//! Impact estimation for seismic events.
//!
//! Pure geometry and banding: great-circle distances to the city table, a
//! distance-adjusted intensity scale, and distance-ranked impact entries.
//! No I/O and no shared mutable state, so everything here can be called
//! concurrently without locking.

use crate::points::PointOfInterest;

/// Mean Earth radius in kilometers for the haversine computation.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default inclusion radius for [`rank_impact`], in kilometers.
pub const DEFAULT_INCLUSION_RADIUS_KM: f64 = 400.0;

/// Great-circle distance between two coordinates, in kilometers.
///
/// Haversine formula over a sphere of radius 6371.0 km; inputs are degrees.
/// Coordinates outside [-90, 90] / [-180, 180] are not rejected — the result
/// is mathematically defined but not meaningful.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Qualitative felt-intensity scale, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Intensity {
    BarelyFelt,
    Slight,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
    Severe,
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Intensity::BarelyFelt => "I (Barely Felt)",
            Intensity::Slight => "II (Slight)",
            Intensity::Weak => "III (Weak)",
            Intensity::Moderate => "IV (Moderate)",
            Intensity::Strong => "V (Strong)",
            Intensity::VeryStrong => "VI (Very Strong)",
            Intensity::Severe => "VII (Severe)",
        };
        write!(f, "{label}")
    }
}

/// Estimate the felt intensity of a quake of `magnitude` at `distance_km`.
///
/// The magnitude is adjusted by a distance-banded offset (+1.5 under 30 km,
/// 0 up to 100 km, -1.5 up to 300 km, -2.5 beyond) and the adjusted level is
/// mapped to the scale with inclusive lower bounds: 7 and above is
/// [`Intensity::Severe`], 6 is [`Intensity::VeryStrong`], down to anything
/// below 2 being [`Intensity::BarelyFelt`]. Total over all finite inputs.
#[must_use]
pub fn estimate_intensity(magnitude: f64, distance_km: f64) -> Intensity {
    let level = magnitude + band_offset(distance_km);

    if level >= 7.0 {
        Intensity::Severe
    } else if level >= 6.0 {
        Intensity::VeryStrong
    } else if level >= 5.0 {
        Intensity::Strong
    } else if level >= 4.0 {
        Intensity::Moderate
    } else if level >= 3.0 {
        Intensity::Weak
    } else if level >= 2.0 {
        Intensity::Slight
    } else {
        Intensity::BarelyFelt
    }
}

/// Magnitude adjustment for the distance band containing `distance_km`.
fn band_offset(distance_km: f64) -> f64 {
    if distance_km < 30.0 {
        1.5
    } else if distance_km < 100.0 {
        0.0
    } else if distance_km < 300.0 {
        -1.5
    } else {
        -2.5
    }
}

/// One point-of-interest row in a ranked impact report.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactEntry {
    pub name: &'static str,
    pub distance_km: f64,
    pub intensity: Intensity,
}

/// Rank the points of interest by distance from an epicenter.
///
/// A point is included when it is the priority point or lies within
/// `inclusion_radius_km`; if that filter excludes everything the priority
/// point alone is included as a fallback. The result is sorted ascending by
/// distance (stable, so equidistant points keep their table order) and its
/// first entry is the epicenter zone.
///
/// Returns an empty list only if `priority_name` is absent from `points`
/// and nothing falls inside the radius.
#[must_use]
pub fn rank_impact(
    latitude: f64,
    longitude: f64,
    magnitude: f64,
    points: &[PointOfInterest],
    priority_name: &str,
    inclusion_radius_km: f64,
) -> Vec<ImpactEntry> {
    let entry_for = |point: &PointOfInterest| {
        let dist = distance_km(latitude, longitude, point.latitude, point.longitude);
        ImpactEntry {
            name: point.name,
            distance_km: dist,
            intensity: estimate_intensity(magnitude, dist),
        }
    };

    let mut entries: Vec<ImpactEntry> = points
        .iter()
        .map(entry_for)
        .filter(|e| e.name == priority_name || e.distance_km <= inclusion_radius_km)
        .collect();

    if entries.is_empty() {
        entries.extend(points.iter().filter(|p| p.name == priority_name).map(entry_for));
    }

    entries.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    entries
}
