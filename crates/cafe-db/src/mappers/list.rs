//! List model -> entity mappers

use cafe_core::entities::{CafeList, ListPlace};
use cafe_core::value_objects::Snowflake;

use crate::models::{ListModel, ListPlaceModel};

impl From<ListModel> for CafeList {
    fn from(model: ListModel) -> Self {
        CafeList {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            name: model.name,
            description: model.description,
            is_public: model.is_public,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ListPlaceModel> for ListPlace {
    fn from(model: ListPlaceModel) -> Self {
        ListPlace {
            id: Snowflake::new(model.id),
            list_id: Snowflake::new(model.list_id),
            place_id: model.place_id,
            place_name: model.place_name,
            place_photo: model.place_photo,
            place_rating: model.place_rating,
            place_vicinity: model.place_vicinity,
            added_at: model.added_at,
        }
    }
}
