use serde::{Deserialize, Serialize};

use crate::haversine::distance_m;

/// A position in degrees, `(latitude, longitude)` order, with an optional
/// horizontal uncertainty radius in meters. No range validation is performed;
/// callers normalize upstream payloads before constructing these (see
/// `convert::AxisOrder`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: Option<f64>,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: None,
        }
    }

    pub fn with_accuracy(latitude: f64, longitude: f64, accuracy_m: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: Some(accuracy_m),
        }
    }

    pub fn accuracy_or(&self, default_m: f64) -> f64 {
        self.accuracy_m.unwrap_or(default_m)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Axis-aligned box around a vertex list. `None` for an empty list.
    pub fn of_vertices(vertices: &[GeoPoint]) -> Option<Self> {
        let first = vertices.first()?;
        let mut bbox = Self {
            north: first.latitude,
            south: first.latitude,
            east: first.longitude,
            west: first.longitude,
        };
        for vertex in &vertices[1..] {
            bbox.north = bbox.north.max(vertex.latitude);
            bbox.south = bbox.south.min(vertex.latitude);
            bbox.east = bbox.east.max(vertex.longitude);
            bbox.west = bbox.west.min(vertex.longitude);
        }
        Some(bbox)
    }

    pub fn contains(&self, coord: GeoPoint) -> bool {
        coord.latitude <= self.north
            && coord.latitude >= self.south
            && coord.longitude <= self.east
            && coord.longitude >= self.west
    }
}

/// One boundary loop of a site footprint. Implicitly closed: the edge between
/// the last and first vertex is part of the loop, whether or not the payload
/// repeats the first vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub vertices: Vec<GeoPoint>,
}

impl Ring {
    pub fn new(vertices: Vec<GeoPoint>) -> Self {
        Self { vertices }
    }

    /// Ray-casting containment, longitude as x, latitude as y. Rings with
    /// fewer than 3 vertices contain nothing. Points exactly on an edge are
    /// boundary-dependent, which callers tolerate (the buffered proximity
    /// check absorbs boundary noise anyway).
    pub fn contains(&self, point: GeoPoint) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        match BoundingBox::of_vertices(&self.vertices) {
            Some(bbox) if !bbox.contains(point) => return false,
            _ => {}
        }

        let x = point.longitude;
        let y = point.latitude;
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let xi = self.vertices[i].longitude;
            let yi = self.vertices[i].latitude;
            let xj = self.vertices[j].longitude;
            let yj = self.vertices[j].latitude;

            if (yi > y) != (yj > y) {
                let x_cross = (xj - xi) * (y - yi) / (yj - yi) + xi;
                if x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Minimum great-circle distance from `point` to any vertex of this ring.
    /// Infinity for an empty ring, so it never satisfies a buffer comparison.
    pub fn min_vertex_distance_m(&self, point: GeoPoint) -> f64 {
        self.vertices
            .iter()
            .map(|vertex| distance_m(point, *vertex))
            .fold(f64::INFINITY, f64::min)
    }
}

/// A site polygon: first ring is the outer boundary, the rest are holes.
/// Holes are accepted but tested exactly like outer rings, with no area
/// subtraction; a point inside a hole still counts as inside the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitePolygon {
    pub rings: Vec<Ring>,
}

impl SitePolygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }
}

/// Full boundary geometry of a site, possibly several disconnected polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteGeometry {
    pub polygons: Vec<SitePolygon>,
}

impl SiteGeometry {
    pub fn new(polygons: Vec<SitePolygon>) -> Self {
        Self { polygons }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ring() -> Ring {
        Ring::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 10.0),
            GeoPoint::new(10.0, 10.0),
            GeoPoint::new(10.0, 0.0),
        ])
    }

    #[test]
    fn square_ring_contains_interior_point() {
        assert!(square_ring().contains(GeoPoint::new(5.0, 5.0)));
    }

    #[test]
    fn square_ring_rejects_exterior_point() {
        assert!(!square_ring().contains(GeoPoint::new(15.0, 15.0)));
        assert!(!square_ring().contains(GeoPoint::new(-5.0, 5.0)));
        assert!(!square_ring().contains(GeoPoint::new(5.0, -5.0)));
    }

    #[test]
    fn degenerate_rings_contain_nothing() {
        let probes = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(5.0, 5.0),
            GeoPoint::new(10.0, 10.0),
        ];
        let degenerate = [
            Ring::new(vec![]),
            Ring::new(vec![GeoPoint::new(5.0, 5.0)]),
            Ring::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 10.0)]),
        ];
        for ring in &degenerate {
            for probe in probes {
                assert!(!ring.contains(probe));
            }
        }
    }

    #[test]
    fn concave_ring_containment() {
        // L-shaped ring: the notch around (7, 7) is outside.
        let ring = Ring::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 10.0),
            GeoPoint::new(5.0, 10.0),
            GeoPoint::new(5.0, 5.0),
            GeoPoint::new(10.0, 5.0),
            GeoPoint::new(10.0, 0.0),
        ]);
        assert!(ring.contains(GeoPoint::new(2.0, 2.0)));
        assert!(ring.contains(GeoPoint::new(8.0, 2.0)));
        assert!(ring.contains(GeoPoint::new(2.0, 8.0)));
        assert!(!ring.contains(GeoPoint::new(7.0, 7.0)));
    }

    #[test]
    fn nan_probe_is_never_inside() {
        assert!(!square_ring().contains(GeoPoint::new(f64::NAN, 5.0)));
        assert!(!square_ring().contains(GeoPoint::new(5.0, f64::NAN)));
    }

    #[test]
    fn min_vertex_distance_of_empty_ring_is_infinite() {
        let empty = Ring::new(vec![]);
        assert_eq!(
            empty.min_vertex_distance_m(GeoPoint::new(0.0, 0.0)),
            f64::INFINITY
        );
    }

    #[test]
    fn min_vertex_distance_picks_nearest_vertex() {
        let ring = square_ring();
        let near_origin = GeoPoint::new(0.001, 0.001);
        let d = ring.min_vertex_distance_m(near_origin);
        // ~157 m from the (0, 0) vertex; every other vertex is > 1000 km away.
        assert!(d > 100.0 && d < 250.0);
    }

    #[test]
    fn bounding_box_of_vertices() {
        let bbox = BoundingBox::of_vertices(&square_ring().vertices).unwrap();
        assert_eq!(bbox.north, 10.0);
        assert_eq!(bbox.south, 0.0);
        assert_eq!(bbox.east, 10.0);
        assert_eq!(bbox.west, 0.0);
        assert!(bbox.contains(GeoPoint::new(5.0, 5.0)));
        assert!(!bbox.contains(GeoPoint::new(11.0, 5.0)));
        assert!(BoundingBox::of_vertices(&[]).is_none());
    }
}
