use crate::models::SamplePoint;

/// A named place sampled by the world scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedLocation {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl NamedLocation {
    const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn to_point(&self) -> SamplePoint {
        SamplePoint::new(self.name, self.lat, self.lon)
    }
}

/// Curated agricultural centroids, one per country. Coordinates sit on land
/// inside the main growing region rather than at the geometric centroid, so
/// coastal countries do not land in the sea.
pub const WORLD_LOCATIONS: &[NamedLocation] = &[
    // Europe
    NamedLocation::new("Portugal", 39.6, -8.0),
    NamedLocation::new("Spain", 40.0, -3.7),
    NamedLocation::new("France", 46.6, 2.2),
    NamedLocation::new("Belgium", 50.6, 4.6),
    NamedLocation::new("Netherlands", 52.1, 5.3),
    NamedLocation::new("United Kingdom", 52.5, -1.5),
    NamedLocation::new("Ireland", 53.2, -7.7),
    NamedLocation::new("Germany", 51.2, 10.4),
    NamedLocation::new("Switzerland", 46.8, 8.2),
    NamedLocation::new("Austria", 47.6, 14.1),
    NamedLocation::new("Italy", 42.8, 12.6),
    NamedLocation::new("Denmark", 56.0, 9.3),
    NamedLocation::new("Norway", 60.5, 9.5),
    NamedLocation::new("Sweden", 59.5, 15.0),
    NamedLocation::new("Finland", 62.5, 25.7),
    NamedLocation::new("Poland", 52.1, 19.4),
    NamedLocation::new("Czech Republic", 49.8, 15.5),
    NamedLocation::new("Hungary", 47.2, 19.5),
    NamedLocation::new("Romania", 45.9, 24.9),
    NamedLocation::new("Bulgaria", 42.7, 25.5),
    NamedLocation::new("Greece", 39.3, 22.0),
    NamedLocation::new("Serbia", 44.0, 20.9),
    NamedLocation::new("Croatia", 45.4, 16.4),
    NamedLocation::new("Ukraine", 49.0, 31.4),
    NamedLocation::new("Turkey", 39.0, 35.2),
    // Africa and the Middle East
    NamedLocation::new("Morocco", 32.0, -6.8),
    NamedLocation::new("Egypt", 30.0, 31.2),
    NamedLocation::new("Nigeria", 9.1, 8.7),
    NamedLocation::new("Kenya", -0.5, 37.0),
    NamedLocation::new("South Africa", -28.5, 25.0),
    NamedLocation::new("Israel", 31.5, 34.9),
    // Asia and Oceania
    NamedLocation::new("India", 22.0, 79.0),
    NamedLocation::new("China", 33.0, 112.0),
    NamedLocation::new("Japan", 36.2, 138.3),
    NamedLocation::new("Vietnam", 21.0, 105.8),
    NamedLocation::new("Indonesia", -7.3, 110.0),
    NamedLocation::new("Australia", -33.5, 147.0),
    NamedLocation::new("New Zealand", -40.5, 175.5),
    // Americas
    NamedLocation::new("Canada", 50.0, -98.0),
    NamedLocation::new("United States", 39.8, -98.6),
    NamedLocation::new("Mexico", 21.0, -101.5),
    NamedLocation::new("Colombia", 4.6, -74.3),
    NamedLocation::new("Brazil", -15.8, -47.9),
    NamedLocation::new("Peru", -12.0, -75.2),
    NamedLocation::new("Chile", -35.0, -71.3),
    NamedLocation::new("Argentina", -34.0, -63.0),
];

pub fn world_points() -> Vec<SamplePoint> {
    WORLD_LOCATIONS.iter().map(NamedLocation::to_point).collect()
}

pub fn find(name: &str) -> Option<&'static NamedLocation> {
    WORLD_LOCATIONS
        .iter()
        .find(|loc| loc.name.eq_ignore_ascii_case(name.trim()))
}
