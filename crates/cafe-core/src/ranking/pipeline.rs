//! Filter and sort stages

use std::cmp::Ordering;

use serde::Serialize;

use super::score::composite_score;
use super::settings::{FilterSettings, SortMode};
use crate::entities::Place;
use crate::value_objects::{haversine_distance_m, GeoPoint};

/// A place annotated with its distance from the user and composite score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlace {
    #[serde(flatten)]
    pub place: Place,
    /// `None` when the provider returned no location
    pub distance_m: Option<f64>,
    pub score: f64,
}

impl RankedPlace {
    pub fn new(place: Place, origin: GeoPoint) -> Self {
        let distance_m = place
            .location
            .filter(GeoPoint::is_valid)
            .map(|loc| haversine_distance_m(origin, loc));
        let score = composite_score(place.rating, distance_m);
        Self {
            place,
            distance_m,
            score,
        }
    }

    fn distance_key(&self) -> f64 {
        self.distance_m.unwrap_or(f64::INFINITY)
    }

    fn passes(&self, settings: &FilterSettings) -> bool {
        let place = &self.place;

        if settings.radius_m > 0
            && !self
                .distance_m
                .is_some_and(|d| d <= f64::from(settings.radius_m))
        {
            return false;
        }
        if !place.matches_keyword(&settings.keyword) {
            return false;
        }
        if settings.min_rating > 0.0 && !place.rating.is_some_and(|r| r >= settings.min_rating) {
            return false;
        }
        if settings.min_reviews > 0 && place.review_count() < settings.min_reviews {
            return false;
        }
        if settings.open_now && place.open_now != Some(true) {
            return false;
        }
        true
    }
}

/// Annotate every place and keep those passing all active criteria
///
/// Input order is preserved.
pub fn filter_places(
    places: &[Place],
    origin: GeoPoint,
    settings: &FilterSettings,
) -> Vec<RankedPlace> {
    places
        .iter()
        .cloned()
        .map(|place| RankedPlace::new(place, origin))
        .filter(|ranked| ranked.passes(settings))
        .collect()
}

/// Order places by `mode`; the final tie-break on place ID makes it total
pub fn sort_places(places: &mut [RankedPlace], mode: SortMode) {
    places.sort_by(|a, b| compare(a, b, mode));
}

/// Filter then sort
pub fn rank_places(
    places: &[Place],
    origin: GeoPoint,
    settings: &FilterSettings,
) -> Vec<RankedPlace> {
    let mut ranked = filter_places(places, origin, settings);
    sort_places(&mut ranked, settings.sort_by);
    ranked
}

fn compare(a: &RankedPlace, b: &RankedPlace, mode: SortMode) -> Ordering {
    let by_distance = || a.distance_key().total_cmp(&b.distance_key());
    let by_score = || b.score.total_cmp(&a.score);
    let by_rating = || b.place.rating_or_zero().total_cmp(&a.place.rating_or_zero());

    let primary = match mode {
        SortMode::Distance => by_distance().then_with(by_score),
        SortMode::Smart => by_score().then_with(by_distance),
        SortMode::Rating => by_rating().then_with(by_distance),
        SortMode::Reviews => b
            .place
            .review_count()
            .cmp(&a.place.review_count())
            .then_with(by_rating),
    };

    primary.then_with(|| a.place.place_id.cmp(&b.place.place_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::PurposePreset;

    const ORIGIN: GeoPoint = GeoPoint::FALLBACK;

    /// Place roughly `north_m` metres north of the origin
    fn place(id: &str, north_m: f64, rating: Option<f64>, reviews: u32) -> Place {
        let mut p = Place::new(id, format!("Cafe {id}"));
        p.location = Some(GeoPoint::new(ORIGIN.lat + north_m / 111_195.0, ORIGIN.lng));
        p.rating = rating;
        p.user_ratings_total = Some(reviews);
        p.open_now = Some(true);
        p
    }

    fn ids(ranked: &[RankedPlace]) -> Vec<&str> {
        ranked.iter().map(|r| r.place.place_id.as_str()).collect()
    }

    fn no_radius() -> FilterSettings {
        FilterSettings {
            radius_m: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_distance_and_score_are_attached() {
        let ranked = RankedPlace::new(place("a", 1000.0, Some(4.0), 10), ORIGIN);
        let d = ranked.distance_m.unwrap();
        assert!((d - 1000.0).abs() < 1.0, "got {d}");
        assert!(ranked.score > 0.0);

        let mut nowhere = Place::new("n", "Nowhere");
        nowhere.rating = Some(5.0);
        let ranked = RankedPlace::new(nowhere, ORIGIN);
        assert_eq!(ranked.distance_m, None);
        assert_eq!(ranked.score, 0.0);
    }

    #[test]
    fn test_radius_filter() {
        let places = vec![
            place("near", 300.0, Some(4.0), 5),
            place("far", 4000.0, Some(4.0), 5),
            Place::new("unknown", "No location"),
        ];
        let settings = FilterSettings {
            radius_m: 1000,
            ..Default::default()
        };
        assert_eq!(ids(&filter_places(&places, ORIGIN, &settings)), vec!["near"]);
        assert_eq!(filter_places(&places, ORIGIN, &no_radius()).len(), 3);
    }

    #[test]
    fn test_rating_reviews_and_open_filters() {
        let mut closed = place("closed", 100.0, Some(4.8), 500);
        closed.open_now = Some(false);
        let places = vec![
            place("good", 100.0, Some(4.5), 200),
            place("meh", 100.0, Some(3.9), 900),
            place("unrated", 100.0, None, 0),
            place("few", 100.0, Some(4.9), 3),
            closed,
        ];

        let settings = FilterSettings {
            min_rating: 4.0,
            min_reviews: 50,
            open_now: true,
            ..no_radius()
        };
        assert_eq!(ids(&filter_places(&places, ORIGIN, &settings)), vec!["good"]);
    }

    #[test]
    fn test_keyword_filter() {
        let mut a = place("a", 100.0, Some(4.0), 1);
        a.name = "Svit Kavy".into();
        let mut b = place("b", 100.0, Some(4.0), 1);
        b.vicinity = Some("Kavova street".into());
        let c = place("c", 100.0, Some(4.0), 1);

        let settings = FilterSettings {
            keyword: "kav".into(),
            ..no_radius()
        };
        assert_eq!(ids(&filter_places(&[a, b, c], ORIGIN, &settings)), vec!["a", "b"]);
    }

    #[test]
    fn test_sort_by_distance() {
        let places = vec![
            place("mid", 800.0, Some(3.0), 1),
            Place::new("unknown", "No location"),
            place("near", 200.0, Some(3.0), 1),
            place("far", 3000.0, Some(5.0), 1),
        ];
        let ranked = rank_places(&places, ORIGIN, &no_radius());
        assert_eq!(ids(&ranked), vec!["near", "mid", "far", "unknown"]);
    }

    #[test]
    fn test_sort_by_rating_breaks_ties_by_distance() {
        let places = vec![
            place("b", 900.0, Some(4.5), 1),
            place("a", 100.0, Some(4.5), 1),
            place("top", 2000.0, Some(4.9), 1),
        ];
        let settings = FilterSettings {
            sort_by: SortMode::Rating,
            ..no_radius()
        };
        assert_eq!(ids(&rank_places(&places, ORIGIN, &settings)), vec!["top", "a", "b"]);
    }

    #[test]
    fn test_sort_by_reviews_breaks_ties_by_rating() {
        let places = vec![
            place("low", 100.0, Some(3.0), 120),
            place("high", 100.0, Some(4.6), 120),
            place("popular", 100.0, Some(2.0), 999),
        ];
        let settings = FilterSettings {
            sort_by: SortMode::Reviews,
            ..no_radius()
        };
        assert_eq!(
            ids(&rank_places(&places, ORIGIN, &settings)),
            vec!["popular", "high", "low"]
        );
    }

    #[test]
    fn test_smart_sort_prefers_close_and_well_rated() {
        let places = vec![
            place("far_great", 4800.0, Some(5.0), 1),
            place("near_good", 100.0, Some(4.5), 1),
            place("beyond", 6000.0, Some(5.0), 1),
        ];
        let settings = FilterSettings {
            sort_by: SortMode::Smart,
            ..no_radius()
        };
        let ranked = rank_places(&places, ORIGIN, &settings);
        assert_eq!(ids(&ranked), vec!["near_good", "far_great", "beyond"]);
        assert_eq!(ranked[2].score, 0.0);
    }

    #[test]
    fn test_ordering_is_deterministic_for_identical_places() {
        let places = vec![
            place("c", 500.0, Some(4.0), 10),
            place("a", 500.0, Some(4.0), 10),
            place("b", 500.0, Some(4.0), 10),
        ];
        for mode in SortMode::ALL {
            let settings = FilterSettings {
                sort_by: mode,
                ..no_radius()
            };
            assert_eq!(ids(&rank_places(&places, ORIGIN, &settings)), vec!["a", "b", "c"]);

            let mut reversed = places.clone();
            reversed.reverse();
            assert_eq!(ids(&rank_places(&reversed, ORIGIN, &settings)), vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn test_quick_preset_end_to_end() {
        let mut closed = place("closed", 100.0, Some(4.9), 10);
        closed.open_now = Some(false);
        let places = vec![
            place("walk", 450.0, Some(3.6), 10),
            place("door", 50.0, Some(3.8), 10),
            place("too_far", 900.0, Some(4.9), 10),
            place("bad", 60.0, Some(3.0), 10),
            closed,
        ];
        let ranked = rank_places(&places, ORIGIN, &PurposePreset::Quick.settings());
        assert_eq!(ids(&ranked), vec!["door", "walk"]);
    }
}
