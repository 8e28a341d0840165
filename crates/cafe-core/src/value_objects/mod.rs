//! Value objects - immutable types that represent domain concepts

mod geo;
mod snowflake;

pub use geo::{haversine_distance_m, GeoPoint, EARTH_RADIUS_M};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
