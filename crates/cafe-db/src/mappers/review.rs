//! Review model -> entity mappers

use cafe_core::entities::{Review, ReviewAuthor, ReviewWithAuthor, MAX_RATING, MIN_RATING};
use cafe_core::value_objects::Snowflake;

use crate::models::{ReviewModel, ReviewWithAuthorModel};

impl From<ReviewModel> for Review {
    fn from(model: ReviewModel) -> Self {
        Review {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            place_id: model.place_id,
            place_name: model.place_name,
            // The column carries a CHECK constraint; clamp instead of failing the row
            rating: model
                .rating
                .clamp(i32::from(MIN_RATING), i32::from(MAX_RATING)) as u8,
            comment: model.comment,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ReviewWithAuthorModel> for ReviewWithAuthor {
    fn from(model: ReviewWithAuthorModel) -> Self {
        let author = ReviewAuthor {
            id: Snowflake::new(model.review.user_id),
            name: model.author_name,
            avatar_path: model.author_avatar,
        };

        ReviewWithAuthor {
            review: Review::from(model.review),
            author,
            likes_count: model.likes_count,
            is_liked: model.is_liked != 0,
        }
    }
}
