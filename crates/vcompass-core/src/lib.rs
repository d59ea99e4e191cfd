//! Geometry core for the V-Compass backend.
//!
//! Pure, synchronous building blocks: turning a search radius into a
//! latitude/longitude bounding box, and picking the aircraft closest to a
//! caller by combined ground and altitude distance.

pub mod bbox;
pub mod error;
pub mod models;
pub mod nearest;
pub mod spatial;

pub use bbox::{compute_bounding_box, BoundingBox, KM_PER_DEGREE_LAT, MAX_CENTER_LATITUDE_DEG};
pub use error::{GeoError, Result};
pub use models::{check_altitude, AircraftRecord, GeoPoint};
pub use nearest::{find_nearest, rank_by_distance, NearestResult, RankedAircraft};
pub use spatial::{distance_3d, haversine_distance, EARTH_RADIUS_M};
