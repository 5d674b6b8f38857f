pub mod convert;
pub mod fence;
pub mod haversine;
pub mod types;

pub use convert::{normalize_geometry, normalize_point, AxisOrder, RawPoint, SiteSnapshot};
pub use fence::{evaluate, is_user_on_site, FenceCfg, FenceVerdict};
pub use haversine::{distance_m, EARTH_RADIUS_M};
pub use types::{BoundingBox, GeoPoint, Ring, SiteGeometry, SitePolygon};
