//! Review service
//!
//! One review per (user, place); saving again replaces rating and comment.

use cafe_core::entities::{Review, ReviewQuery};
use cafe_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    LikeResponse, ReviewResponse, ReviewSearchQuery, ReviewsResponse, SaveReviewRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// A saved review and whether it was newly created
#[derive(Debug, Clone)]
pub struct SavedReview {
    pub review: ReviewResponse,
    pub created: bool,
}

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create or update the caller's review of a place
    #[instrument(skip(self, request), fields(place_id = %request.place_id))]
    pub async fn save(
        &self,
        user_id: Snowflake,
        request: SaveReviewRequest,
    ) -> ServiceResult<SavedReview> {
        let mut review = Review::new(
            self.ctx.generate_id(),
            user_id,
            request.place_id,
            request.rating,
        )?;
        review.place_name = request.place_name.filter(|n| !n.trim().is_empty());
        review.comment = request.comment.filter(|c| !c.trim().is_empty());

        let upsert = self.ctx.review_repo().upsert(&review).await?;
        let id = upsert.review.id;

        let stored = self
            .ctx
            .review_repo()
            .find_with_author(id, Some(user_id))
            .await?
            .ok_or(DomainError::ReviewNotFound(id))?;

        info!(review_id = %id, created = upsert.created, "Review saved");

        Ok(SavedReview {
            review: ReviewResponse::from(stored),
            created: upsert.created,
        })
    }

    /// Reviews of a place, newest first
    #[instrument(skip(self))]
    pub async fn for_place(
        &self,
        place_id: &str,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<ReviewsResponse> {
        let query = ReviewQuery {
            place_id: Some(place_id.to_string()),
            user_id: None,
            viewer,
        };
        self.run(&query).await
    }

    /// Reviews filtered by place and/or author
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: ReviewSearchQuery,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<ReviewsResponse> {
        let user_id = query
            .user_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(Snowflake::parse)
            .transpose()
            .map_err(|_| ServiceError::validation("Invalid user_id"))?;

        let query = ReviewQuery {
            place_id: query.place_id.filter(|p| !p.is_empty()),
            user_id,
            viewer,
        };
        self.run(&query).await
    }

    /// Delete a review; only its author may
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Snowflake, review_id: Snowflake) -> ServiceResult<()> {
        let review = self
            .ctx
            .review_repo()
            .find_by_id(review_id)
            .await?
            .ok_or(DomainError::ReviewNotFound(review_id))?;

        if !review.is_authored_by(user_id) {
            return Err(DomainError::NotReviewAuthor.into());
        }

        self.ctx.review_repo().delete(review_id).await?;
        info!(review_id = %review_id, "Review deleted");
        Ok(())
    }

    /// Like or unlike a review
    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        user_id: Snowflake,
        review_id: Snowflake,
    ) -> ServiceResult<LikeResponse> {
        let toggle = self.ctx.review_repo().toggle_like(review_id, user_id).await?;
        Ok(LikeResponse::from(toggle))
    }

    async fn run(&self, query: &ReviewQuery) -> ServiceResult<ReviewsResponse> {
        let reviews = self.ctx.review_repo().search(query).await?;
        Ok(ReviewsResponse {
            reviews: reviews.into_iter().map(ReviewResponse::from).collect(),
        })
    }
}
