//! List service
//!
//! Curated lists of places. Public lists are readable by anyone; only the
//! owner may change a list or its items.

use cafe_core::entities::{normalize_photo_url, CafeList, ListChanges, ListPlace};
use cafe_core::{DomainError, Snowflake};
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{
    AddListItemRequest, CreateListRequest, ListDetailResponse, ListEnvelope, ListItemEnvelope,
    ListItemResponse, ListResponse, ListsResponse, UpdateListRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// List service
pub struct ListService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ListService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: Snowflake,
        request: CreateListRequest,
    ) -> ServiceResult<ListEnvelope> {
        let mut list = CafeList::new(self.ctx.generate_id(), user_id, &request.name)?;
        list.description = request.description.filter(|d| !d.trim().is_empty());
        list.is_public = request.is_public.unwrap_or(true);

        self.ctx.list_repo().create(&list).await?;

        info!(list_id = %list.id, user_id = %user_id, "List created");

        Ok(ListEnvelope {
            list: ListResponse::from(list),
        })
    }

    /// All lists of the caller, private ones included
    #[instrument(skip(self))]
    pub async fn mine(&self, user_id: Snowflake) -> ServiceResult<ListsResponse> {
        self.by_user(user_id, false).await
    }

    /// Public lists of another user
    #[instrument(skip(self))]
    pub async fn public_for_user(&self, user_id: Snowflake) -> ServiceResult<ListsResponse> {
        self.by_user(user_id, true).await
    }

    /// A list with its items, if the viewer may see it
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        list_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<ListDetailResponse> {
        let list = self.load(list_id).await?;
        list.ensure_visible_to(viewer)?;

        let items = self.ctx.list_repo().find_items(list_id).await?;

        Ok(ListDetailResponse {
            list: ListResponse::from(list),
            items: items.into_iter().map(ListItemResponse::from).collect(),
        })
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Snowflake,
        list_id: Snowflake,
        request: UpdateListRequest,
    ) -> ServiceResult<ListEnvelope> {
        let mut list = self.load_owned(list_id, user_id).await?;
        list.apply(&ListChanges {
            name: request.name,
            description: request.description.map(|d| d.trim().to_string()),
            is_public: request.is_public,
        })?;

        self.ctx.list_repo().update(&list).await?;

        info!(list_id = %list_id, "List updated");

        Ok(ListEnvelope {
            list: ListResponse::from(list),
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Snowflake, list_id: Snowflake) -> ServiceResult<()> {
        self.load_owned(list_id, user_id).await?;
        self.ctx.list_repo().delete(list_id).await?;
        info!(list_id = %list_id, "List deleted");
        Ok(())
    }

    #[instrument(skip(self, request), fields(place_id = %request.place_id))]
    pub async fn add_item(
        &self,
        user_id: Snowflake,
        list_id: Snowflake,
        request: AddListItemRequest,
    ) -> ServiceResult<ListItemEnvelope> {
        self.load_owned(list_id, user_id).await?;

        let item = ListPlace {
            id: self.ctx.generate_id(),
            list_id,
            place_id: request.place_id,
            place_name: request.place_name,
            place_photo: normalize_photo_url(request.place_photo),
            place_rating: request.place_rating,
            place_vicinity: request.place_vicinity,
            added_at: Utc::now(),
        };
        self.ctx.list_repo().add_item(&item).await?;

        info!(list_id = %list_id, "Place added to list");

        Ok(ListItemEnvelope {
            item: ListItemResponse::from(item),
        })
    }

    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        user_id: Snowflake,
        list_id: Snowflake,
        place_id: &str,
    ) -> ServiceResult<()> {
        self.load_owned(list_id, user_id).await?;
        self.ctx.list_repo().remove_item(list_id, place_id).await?;
        info!(list_id = %list_id, "Place removed from list");
        Ok(())
    }

    async fn by_user(&self, user_id: Snowflake, public_only: bool) -> ServiceResult<ListsResponse> {
        let lists = self.ctx.list_repo().find_by_user(user_id, public_only).await?;
        Ok(ListsResponse {
            lists: lists.into_iter().map(ListResponse::from).collect(),
        })
    }

    async fn load(&self, list_id: Snowflake) -> ServiceResult<CafeList> {
        self.ctx
            .list_repo()
            .find_by_id(list_id)
            .await?
            .ok_or_else(|| DomainError::ListNotFound(list_id).into())
    }

    async fn load_owned(&self, list_id: Snowflake, user_id: Snowflake) -> ServiceResult<CafeList> {
        let list = self.load(list_id).await?;
        list.ensure_owner(user_id)?;
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use crate::testing::TestHarness;

    fn create(name: &str, is_public: Option<bool>) -> CreateListRequest {
        CreateListRequest {
            name: name.to_string(),
            description: None,
            is_public,
        }
    }

    fn item(place_id: &str) -> AddListItemRequest {
        AddListItemRequest {
            place_id: place_id.to_string(),
            place_name: Some("Pravda".to_string()),
            place_photo: None,
            place_rating: Some(4.4),
            place_vicinity: None,
        }
    }

    #[tokio::test]
    async fn test_create_trims_name_and_defaults_public() {
        let h = TestHarness::new();
        let user = h.user("olena").await;
        let lists = ListService::new(&h.ctx);

        let created = lists.create(user.id, create("  Work spots ", None)).await.unwrap();
        assert_eq!(created.list.name, "Work spots");
        assert!(created.list.is_public);

        let err = lists.create(user.id, create("   ", None)).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_private_list_visibility() {
        let h = TestHarness::new();
        let owner = h.user("olena").await;
        let stranger = h.user("taras").await;
        let lists = ListService::new(&h.ctx);

        let private = lists.create(owner.id, create("Secret", Some(false))).await.unwrap();
        lists.create(owner.id, create("Open", None)).await.unwrap();
        let id = private.list.id;

        assert!(lists.get(id, Some(owner.id)).await.is_ok());
        for viewer in [None, Some(stranger.id)] {
            let err = lists.get(id, viewer).await.unwrap_err();
            assert!(matches!(err, ServiceError::Domain(DomainError::PrivateList)));
            assert_eq!(err.status_code(), 403);
        }

        assert_eq!(lists.mine(owner.id).await.unwrap().lists.len(), 2);
        let public = lists.public_for_user(owner.id).await.unwrap();
        assert_eq!(public.lists.len(), 1);
        assert_eq!(public.lists[0].name, "Open");

        let missing = lists.get(Snowflake::new(1), None).await.unwrap_err();
        assert_eq!(missing.status_code(), 404);
    }

    #[tokio::test]
    async fn test_only_owner_modifies() {
        let h = TestHarness::new();
        let owner = h.user("olena").await;
        let stranger = h.user("taras").await;
        let lists = ListService::new(&h.ctx);
        let id = lists.create(owner.id, create("Mine", None)).await.unwrap().list.id;

        let rename = UpdateListRequest {
            name: Some("Theirs".into()),
            ..Default::default()
        };
        let err = lists.update(stranger.id, id, rename.clone()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotListOwner)));
        assert!(lists.add_item(stranger.id, id, item("p1")).await.is_err());
        assert!(lists.delete(stranger.id, id).await.is_err());

        let updated = lists.update(owner.id, id, rename).await.unwrap();
        assert_eq!(updated.list.name, "Theirs");

        let empty = lists
            .update(owner.id, id, UpdateListRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(empty, ServiceError::Domain(DomainError::NothingToUpdate)));
    }

    #[tokio::test]
    async fn test_items_lifecycle() {
        let h = TestHarness::new();
        let owner = h.user("olena").await;
        let lists = ListService::new(&h.ctx);
        let id = lists.create(owner.id, create("Mine", None)).await.unwrap().list.id;

        let added = lists.add_item(owner.id, id, item("p1")).await.unwrap();
        assert_eq!(added.item.place_id, "p1");

        let dup = lists.add_item(owner.id, id, item("p1")).await.unwrap_err();
        assert!(matches!(dup, ServiceError::Domain(DomainError::PlaceAlreadyInList)));

        assert_eq!(lists.get(id, None).await.unwrap().items.len(), 1);

        lists.remove_item(owner.id, id, "p1").await.unwrap();
        let gone = lists.remove_item(owner.id, id, "p1").await.unwrap_err();
        assert_eq!(gone.status_code(), 404);

        lists.delete(owner.id, id).await.unwrap();
        assert_eq!(lists.get(id, None).await.unwrap_err().status_code(), 404);
    }
}
