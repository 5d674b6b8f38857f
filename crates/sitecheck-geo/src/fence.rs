use serde::{Deserialize, Serialize};

use crate::haversine::distance_m;
use crate::types::{GeoPoint, SiteGeometry};

/// Fence tolerances in meters.
///
/// `buffer_m` widens every boundary check to absorb GPS noise;
/// `default_accuracy_m` substitutes for a fix that reports no accuracy;
/// `center_slack_m` is added on top of the buffer when only an approximate
/// site center is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FenceCfg {
    pub buffer_m: f64,
    pub default_accuracy_m: f64,
    pub center_slack_m: f64,
}

impl Default for FenceCfg {
    fn default() -> Self {
        Self {
            buffer_m: 50.0,
            default_accuracy_m: 15.0,
            center_slack_m: 50.0,
        }
    }
}

/// The basis on which a membership decision was made.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FenceVerdict {
    /// No position fix was available.
    NoFix,
    /// The fix lies inside ring `ring` of polygon `polygon`.
    InsideRing { polygon: usize, ring: usize },
    /// The fix is within the accuracy buffer of a ring vertex.
    NearRing {
        polygon: usize,
        ring: usize,
        distance_m: f64,
    },
    /// Geometry was supplied and no ring matched.
    OutsideGeometry,
    /// No geometry; the fix is within the widened radius of the site center.
    NearCenter { distance_m: f64 },
    /// No geometry; the fix is beyond the widened radius of the site center.
    OutsideCenterRadius { distance_m: f64 },
    /// Neither geometry nor a center was available.
    NoReference,
}

impl FenceVerdict {
    pub fn is_on_site(&self) -> bool {
        matches!(
            self,
            Self::InsideRing { .. } | Self::NearRing { .. } | Self::NearCenter { .. }
        )
    }
}

/// Layered site-membership decision.
///
/// Polygon geometry takes absolute precedence: once a non-empty geometry is
/// supplied the center is never consulted, even when every ring misses. Each
/// ring is tried for strict containment first, then for proximity of its
/// nearest vertex within `accuracy + buffer_m`, short-circuiting on the first
/// match. Without geometry, the center fallback allows
/// `accuracy + buffer_m + center_slack_m`.
///
/// Total over its domain: degenerate geometry and NaN coordinates resolve to
/// an off-site verdict rather than an error.
pub fn evaluate(
    user: Option<GeoPoint>,
    geometry: Option<&SiteGeometry>,
    center: Option<GeoPoint>,
    cfg: &FenceCfg,
) -> FenceVerdict {
    let Some(user) = user else {
        tracing::debug!("site membership check skipped: no position fix");
        return FenceVerdict::NoFix;
    };
    let accuracy_m = user.accuracy_or(cfg.default_accuracy_m);

    if let Some(geometry) = geometry.filter(|g| !g.is_empty()) {
        let total_buffer_m = accuracy_m + cfg.buffer_m;
        for (polygon_idx, polygon) in geometry.polygons.iter().enumerate() {
            for (ring_idx, ring) in polygon.rings.iter().enumerate() {
                if ring.contains(user) {
                    tracing::debug!(
                        polygon = polygon_idx,
                        ring = ring_idx,
                        "position inside site boundary"
                    );
                    return FenceVerdict::InsideRing {
                        polygon: polygon_idx,
                        ring: ring_idx,
                    };
                }

                let min_distance_m = ring.min_vertex_distance_m(user);
                if min_distance_m <= total_buffer_m {
                    tracing::debug!(
                        polygon = polygon_idx,
                        ring = ring_idx,
                        min_distance_m,
                        total_buffer_m,
                        "position within boundary buffer"
                    );
                    return FenceVerdict::NearRing {
                        polygon: polygon_idx,
                        ring: ring_idx,
                        distance_m: min_distance_m,
                    };
                }
            }
        }
        tracing::debug!("position outside all site polygons");
        return FenceVerdict::OutsideGeometry;
    }

    if let Some(center) = center {
        let center_distance_m = distance_m(user, center);
        let allowed_m = accuracy_m + cfg.buffer_m + cfg.center_slack_m;
        tracing::debug!(
            center_distance_m,
            allowed_m,
            "no site geometry, falling back to center distance"
        );
        return if center_distance_m <= allowed_m {
            FenceVerdict::NearCenter {
                distance_m: center_distance_m,
            }
        } else {
            FenceVerdict::OutsideCenterRadius {
                distance_m: center_distance_m,
            }
        };
    }

    tracing::debug!("site membership check failed: no geometry and no center");
    FenceVerdict::NoReference
}

/// Boolean convenience over [`evaluate`].
pub fn is_user_on_site(
    user: Option<GeoPoint>,
    geometry: Option<&SiteGeometry>,
    center: Option<GeoPoint>,
    cfg: &FenceCfg,
) -> bool {
    evaluate(user, geometry, center, cfg).is_on_site()
}
