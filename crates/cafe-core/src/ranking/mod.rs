//! Place ranking pipeline
//!
//! Pure functions over provider results: distance from the user, a
//! rating/proximity composite score, multi-criterion filtering and the
//! sort modes offered to the user. Output depends only on the inputs.

mod pipeline;
mod score;
mod settings;

pub use pipeline::{filter_places, rank_places, sort_places, RankedPlace};
pub use score::{
    composite_score, MAX_SCORE_DISTANCE_M, OUT_OF_RANGE_SCORE, PROXIMITY_WEIGHT, RATING_WEIGHT,
};
pub use settings::{FilterSettings, PurposePreset, SortMode, UnknownVariant, DEFAULT_RADIUS_M};
