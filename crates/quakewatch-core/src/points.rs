//! Fixed reference geography: monitored cities and the region bounding box.

/// A fixed named location used as a reference for impact estimation.
///
/// The table is static and immutable for the process lifetime; coordinates
/// are degrees on a WGS84-approximate sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOfInterest {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Cities used for impact estimation.
pub const CITIES: &[PointOfInterest] = &[
    PointOfInterest { name: "Manila", latitude: 14.6, longitude: 121.0 },
    PointOfInterest { name: "Baguio", latitude: 16.4, longitude: 120.6 },
    PointOfInterest { name: "Cebu", latitude: 10.3, longitude: 123.9 },
    PointOfInterest { name: "Davao", latitude: 7.1, longitude: 125.6 },
    PointOfInterest { name: "Iloilo", latitude: 10.7, longitude: 122.6 },
    PointOfInterest { name: "Legazpi", latitude: 13.1, longitude: 123.7 },
    PointOfInterest { name: "Tacloban", latitude: 11.2, longitude: 125.0 },
    PointOfInterest { name: "Samar", latitude: 12.0, longitude: 125.0 },
];

/// The city included in every impact report regardless of distance.
pub const PRIORITY_CITY: &str = "Tacloban";

/// Whether an epicenter falls inside the monitored Southeast-Asia box.
#[must_use]
pub fn in_monitored_region(latitude: f64, longitude: f64) -> bool {
    (4.5..=21.5).contains(&latitude) && (116.0..=127.5).contains(&longitude)
}
