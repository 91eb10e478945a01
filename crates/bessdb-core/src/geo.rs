//! Geographic primitives shared by the bounds filter, the geocoder, and the
//! map controller.

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A rectangular viewport given by its south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    #[must_use]
    pub const fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Whether `point` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Returns a copy expanded by `degrees` on every side.
    #[must_use]
    pub fn pad(&self, degrees: f64) -> Self {
        Self {
            south_west: LatLng::new(self.south_west.lat - degrees, self.south_west.lng - degrees),
            north_east: LatLng::new(self.north_east.lat + degrees, self.north_east.lng + degrees),
        }
    }

    /// Geometric center of the rectangle.
    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            f64::midpoint(self.south_west.lat, self.north_east.lat),
            f64::midpoint(self.south_west.lng, self.north_east.lng),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> LatLngBounds {
        LatLngBounds::new(LatLng::new(2.0, 101.0), LatLng::new(4.0, 103.0))
    }

    #[test]
    fn contains_interior_point() {
        assert!(bounds().contains(LatLng::new(3.0, 102.0)));
    }

    #[test]
    fn contains_is_edge_inclusive() {
        assert!(bounds().contains(LatLng::new(2.0, 101.0)));
        assert!(bounds().contains(LatLng::new(4.0, 103.0)));
    }

    #[test]
    fn excludes_outside_point() {
        assert!(!bounds().contains(LatLng::new(5.0, 102.0)));
        assert!(!bounds().contains(LatLng::new(3.0, 100.9)));
    }

    #[test]
    fn pad_expands_every_side() {
        let padded = bounds().pad(0.5);
        assert!(padded.contains(LatLng::new(1.6, 100.6)));
        assert!(padded.contains(LatLng::new(4.4, 103.4)));
        assert!(!padded.contains(LatLng::new(1.4, 102.0)));
    }

    #[test]
    fn center_is_midpoint() {
        let c = bounds().center();
        assert!((c.lat - 3.0).abs() < f64::EPSILON);
        assert!((c.lng - 102.0).abs() < f64::EPSILON);
    }
}
