use serde::{Deserialize, Serialize};
use serde_json::Value;
use sitecheck_core::SiteError;
use sitecheck_core::SiteResult;
use std::str::FromStr;

use crate::types::{GeoPoint, Ring, SiteGeometry, SitePolygon};

/// Declared meaning of the `latitude`/`longitude` fields in a raw payload.
///
/// Backend polygon payloads have been observed with swapped semantics: a
/// field literally named `latitude` holding a longitude. The evaluator trusts
/// canonical `GeoPoint`s at face value, so every externally sourced record
/// passes through this tag exactly once, at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    /// Fields hold what their names claim.
    LatLon,
    /// Fields are swapped: `latitude` holds a longitude and vice versa.
    LonLat,
}

impl Default for AxisOrder {
    fn default() -> Self {
        Self::LatLon
    }
}

impl FromStr for AxisOrder {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "lat_lon" | "lat-lon" | "latlon" => Ok(Self::LatLon),
            "lon_lat" | "lon-lat" | "lonlat" => Ok(Self::LonLat),
            _ => Err(()),
        }
    }
}

/// A coordinate record as it appears on the wire. Field names may lie; see
/// [`AxisOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Canonicalize one raw record under the declared convention.
pub fn normalize_point(raw: RawPoint, order: AxisOrder) -> GeoPoint {
    match order {
        AxisOrder::LatLon => GeoPoint::new(raw.latitude, raw.longitude),
        AxisOrder::LonLat => GeoPoint::new(raw.longitude, raw.latitude),
    }
}

/// Canonicalize a raw multi-polygon payload (polygon → ring → vertex).
pub fn normalize_geometry(raw: &[Vec<Vec<RawPoint>>], order: AxisOrder) -> SiteGeometry {
    let polygons = raw
        .iter()
        .map(|rings| {
            let rings = rings
                .iter()
                .map(|vertices| {
                    Ring::new(
                        vertices
                            .iter()
                            .map(|point| normalize_point(*point, order))
                            .collect(),
                    )
                })
                .collect();
            SitePolygon::new(rings)
        })
        .collect();
    SiteGeometry::new(polygons)
}

#[derive(Debug, Clone, Deserialize)]
struct RawObjectDetails {
    #[serde(default)]
    coordinates: Option<Vec<Vec<Vec<RawPoint>>>>,
    #[serde(default)]
    geo_data: Option<RawPoint>,
}

/// Boundary data of one site as consumed by the evaluator: canonical polygon
/// geometry when the backend supplies it, otherwise an approximate center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSnapshot {
    pub geometry: Option<SiteGeometry>,
    pub center: Option<GeoPoint>,
}

impl SiteSnapshot {
    pub fn new(geometry: Option<SiteGeometry>, center: Option<GeoPoint>) -> Self {
        Self { geometry, center }
    }

    pub fn empty() -> Self {
        Self {
            geometry: None,
            center: None,
        }
    }

    /// Decode the geometry-bearing fields of a backend "object details"
    /// response: `coordinates` (multi-polygon) and `geo_data` (fallback
    /// center). `polygon_order` applies to polygon records only; `geo_data`
    /// has been observed with honest field names and is consumed as written.
    /// Absent fields decode to `None`; structurally malformed ones are an
    /// input error.
    pub fn from_details_value(value: &Value, polygon_order: AxisOrder) -> SiteResult<Self> {
        let raw = RawObjectDetails::deserialize(value)
            .map_err(|err| SiteError::invalid_input(format!("object details payload: {err}")))?;

        let geometry = raw
            .coordinates
            .map(|polygons| normalize_geometry(&polygons, polygon_order));
        let center = raw
            .geo_data
            .map(|point| normalize_point(point, AxisOrder::LatLon));

        Ok(Self { geometry, center })
    }
}
