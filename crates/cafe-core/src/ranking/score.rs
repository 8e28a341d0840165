//! Composite "smart" score

/// Distance at which the proximity component reaches zero
pub const MAX_SCORE_DISTANCE_M: f64 = 5000.0;

pub const RATING_WEIGHT: f64 = 0.7;
pub const PROXIMITY_WEIGHT: f64 = 0.3;

/// Score for places beyond the cutoff or without a known distance
///
/// This is also the lowest in-range score: an unrated place exactly at
/// [`MAX_SCORE_DISTANCE_M`] scores the same, so callers cannot tell the two
/// apart by score alone and should check the distance.
pub const OUT_OF_RANGE_SCORE: f64 = 0.0;

/// Weighted blend of rating and proximity on a 0-100 scale
///
/// `0.7 * (rating * 20) + 0.3 * proximity`, where proximity falls linearly
/// from 100 at the user to 0 at [`MAX_SCORE_DISTANCE_M`]. A missing rating
/// counts as zero; ratings are clamped to 0-5.
pub fn composite_score(rating: Option<f64>, distance_m: Option<f64>) -> f64 {
    let Some(distance) = distance_m.filter(|d| d.is_finite() && *d >= 0.0) else {
        return OUT_OF_RANGE_SCORE;
    };
    if distance > MAX_SCORE_DISTANCE_M {
        return OUT_OF_RANGE_SCORE;
    }

    let rating = rating.filter(|r| r.is_finite()).unwrap_or(0.0).clamp(0.0, 5.0);
    let proximity =
        ((MAX_SCORE_DISTANCE_M - distance) / MAX_SCORE_DISTANCE_M * 100.0).max(0.0);

    RATING_WEIGHT * (rating * 20.0) + PROXIMITY_WEIGHT * proximity
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_out_of_range_matches_lowest_in_range_score() {
        assert!((composite_score(None, Some(MAX_SCORE_DISTANCE_M)) - OUT_OF_RANGE_SCORE).abs() < EPS);
        assert!((composite_score(Some(0.0), None) - OUT_OF_RANGE_SCORE).abs() < EPS);
        assert!(composite_score(Some(0.0), Some(MAX_SCORE_DISTANCE_M - 1.0)) > OUT_OF_RANGE_SCORE);
    }

    #[test]
    fn test_known_values() {
        // Perfect rating at the user's feet
        assert!((composite_score(Some(5.0), Some(0.0)) - 100.0).abs() < EPS);
        // 4.0 at 2.5 km: 0.7 * 80 + 0.3 * 50
        assert!((composite_score(Some(4.0), Some(2500.0)) - 71.0).abs() < EPS);
        // Exactly at the cutoff only the rating counts
        assert!((composite_score(Some(3.0), Some(5000.0)) - 42.0).abs() < EPS);
    }

    #[test]
    fn test_zero_beyond_cutoff_or_unknown() {
        assert_eq!(composite_score(Some(5.0), Some(5000.1)), OUT_OF_RANGE_SCORE);
        assert_eq!(composite_score(Some(5.0), Some(12_000.0)), OUT_OF_RANGE_SCORE);
        assert_eq!(composite_score(Some(5.0), None), OUT_OF_RANGE_SCORE);
        assert_eq!(composite_score(Some(5.0), Some(f64::NAN)), OUT_OF_RANGE_SCORE);
    }

    #[test]
    fn test_non_increasing_in_distance() {
        for rating in [None, Some(0.0), Some(2.5), Some(4.7), Some(5.0)] {
            let mut previous = f64::INFINITY;
            for step in 0..=140 {
                let d = f64::from(step) * 50.0;
                let score = composite_score(rating, Some(d));
                assert!(score <= previous + EPS, "rating {rating:?} at {d} m");
                previous = score;
            }
        }
    }

    #[test]
    fn test_non_decreasing_in_rating() {
        for d in [0.0, 120.0, 999.0, 2500.0, 4999.0, 5000.0, 5001.0, 9000.0] {
            let mut previous = f64::NEG_INFINITY;
            for step in 0..=50 {
                let rating = f64::from(step) / 10.0;
                let score = composite_score(Some(rating), Some(d));
                assert!(score >= previous - EPS, "rating {rating} at {d} m");
                previous = score;
            }
        }
    }

    #[test]
    fn test_missing_rating_counts_as_zero() {
        assert!(
            (composite_score(None, Some(1000.0)) - composite_score(Some(0.0), Some(1000.0))).abs()
                < EPS
        );
    }

    #[test]
    fn test_rating_is_clamped() {
        assert!(
            (composite_score(Some(9.0), Some(0.0)) - composite_score(Some(5.0), Some(0.0))).abs()
                < EPS
        );
        assert!(
            (composite_score(Some(-1.0), Some(0.0)) - composite_score(Some(0.0), Some(0.0))).abs()
                < EPS
        );
    }
}
