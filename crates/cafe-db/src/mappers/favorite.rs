//! Favorite model -> entity mapper

use cafe_core::entities::Favorite;
use cafe_core::value_objects::{GeoPoint, Snowflake};

use crate::models::FavoriteModel;

impl From<FavoriteModel> for Favorite {
    fn from(model: FavoriteModel) -> Self {
        // Location is stored as two nullable columns; keep it only when both are present
        let location = model.place_lat.zip(model.place_lng).map(|(lat, lng)| GeoPoint::new(lat, lng));

        Favorite {
            user_id: Snowflake::new(model.user_id),
            place_id: model.place_id,
            place_name: model.place_name,
            place_photo: model.place_photo,
            place_rating: model.place_rating,
            place_vicinity: model.place_vicinity,
            location,
            added_at: model.added_at,
        }
    }
}
