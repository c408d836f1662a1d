//! Star records and the distance-sorted catalog container

use serde::{Deserialize, Serialize};
use startour_core::{CatalogPosition, StarColor};

/// One catalog star
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Display name, may be empty and is not unique
    pub name: String,
    /// Heliocentric position (catalog units until scaled, render units after)
    pub position: CatalogPosition,
    /// Distance from the Sun, the sort and selection key
    pub distance: f64,
    /// B-V color index
    pub color_index: f64,
    /// Band classified once from `color_index`
    pub color: StarColor,
}

impl StarRecord {
    /// Build a record, classifying its color immediately
    pub fn new(name: impl Into<String>, position: CatalogPosition, distance: f64, color_index: f64) -> Self {
        Self {
            name: name.into(),
            position,
            distance,
            color_index,
            color: StarColor::classify(color_index),
        }
    }

    /// Divide position and distance by a uniform scale factor
    pub fn rescale(&mut self, factor: f64) {
        self.position = self.position.scaled_down(factor);
        self.distance /= factor;
    }
}

/// Sort ascending by distance. Stable, so equal distances keep file order.
pub fn sort_by_distance(stars: &mut [StarRecord]) {
    stars.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// Star catalog container, sorted ascending by distance
#[derive(Clone, Debug, Default)]
pub struct StarCatalog {
    stars: Vec<StarRecord>,
}

impl StarCatalog {
    /// Create from existing records, sorting them by distance
    pub fn from_records(mut stars: Vec<StarRecord>) -> Self {
        sort_by_distance(&mut stars);
        Self { stars }
    }

    pub fn len(&self) -> usize { self.stars.len() }
    pub fn is_empty(&self) -> bool { self.stars.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &StarRecord> { self.stars.iter() }
    pub fn as_slice(&self) -> &[StarRecord] { &self.stars }
    pub fn into_records(self) -> Vec<StarRecord> { self.stars }

    /// Nearest star, if any
    pub fn closest(&self) -> Option<&StarRecord> {
        self.stars.first()
    }

    /// Number of stars per color band
    pub fn color_counts(&self) -> [(StarColor, usize); 4] {
        let mut counts = [
            (StarColor::Blue, 0),
            (StarColor::White, 0),
            (StarColor::Yellow, 0),
            (StarColor::Red, 0),
        ];
        for star in &self.stars {
            if let Some(entry) = counts.iter_mut().find(|(c, _)| *c == star.color) {
                entry.1 += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(name: &str, distance: f64) -> StarRecord {
        StarRecord::new(name, CatalogPosition::new(distance, 0.0, 0.0), distance, 0.65)
    }

    #[test]
    fn test_color_is_classified_on_creation() {
        let s = StarRecord::new("Sol", CatalogPosition::default(), 0.0, 0.656);
        assert_eq!(s.color, StarColor::Red);
        let s = StarRecord::new("Sirius", CatalogPosition::new(-1.6, 8.1, -2.5), 2.64, 0.009);
        assert_eq!(s.color, StarColor::Yellow);
    }

    #[test]
    fn test_from_records_sorts_stably() {
        let catalog = StarCatalog::from_records(vec![
            star("c", 3.0),
            star("a", 1.0),
            star("b1", 2.0),
            star("b2", 2.0),
        ]);
        let names: Vec<_> = catalog.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b1", "b2", "c"]);
        assert_eq!(catalog.closest().map(|s| s.name.as_str()), Some("a"));
    }

    #[test]
    fn test_rescale_divides_position_and_distance() {
        let mut s = StarRecord::new("x", CatalogPosition::new(30.0, 40.0, 0.0), 50.0, -0.5);
        s.rescale(10.0);
        assert_eq!(s.position, CatalogPosition::new(3.0, 4.0, 0.0));
        assert_eq!(s.distance, 5.0);
        assert_eq!(s.color, StarColor::Blue);
    }

    #[test]
    fn test_color_counts() {
        let catalog = StarCatalog::from_records(vec![
            StarRecord::new("b", CatalogPosition::default(), 1.0, -1.0),
            StarRecord::new("w", CatalogPosition::default(), 2.0, -0.2),
            StarRecord::new("r1", CatalogPosition::default(), 3.0, 1.0),
            StarRecord::new("r2", CatalogPosition::default(), 4.0, 1.5),
        ]);
        assert_eq!(
            catalog.color_counts(),
            [(StarColor::Blue, 1), (StarColor::White, 1), (StarColor::Yellow, 0), (StarColor::Red, 2)]
        );
    }
}
