//! In-memory repositories and stores for service tests

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use cafe_common::JwtService;
use cafe_core::entities::{
    CafeList, Favorite, LikeToggle, ListPlace, Review, ReviewAuthor, ReviewQuery, ReviewUpsert,
    ReviewWithAuthor, User,
};
use cafe_core::traits::{
    AvatarStore, FavoriteRepository, ListRepository, RepoResult, ReviewRepository, SessionStore,
    UserRepository,
};
use cafe_core::{DomainError, Snowflake, SnowflakeGenerator};
use chrono::Utc;
use parking_lot::Mutex;

use crate::services::ServiceContext;

// ============================================================================
// Users
// ============================================================================

#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<Vec<(User, String)>>,
}

impl MemoryUsers {
    fn author(&self, id: Snowflake) -> ReviewAuthor {
        let rows = self.rows.lock();
        let user = rows.iter().map(|(u, _)| u).find(|u| u.id == id);
        ReviewAuthor {
            id,
            name: user.map(|u| u.name.clone()).unwrap_or_default(),
            avatar_path: user.and_then(|u| u.avatar_path.clone()),
        }
    }

    fn check_identity(rows: &[(User, String)], user: &User) -> RepoResult<()> {
        let others = || rows.iter().map(|(u, _)| u).filter(|u| u.id != user.id);
        if others().any(|u| u.nickname.eq_ignore_ascii_case(&user.nickname)) {
            return Err(DomainError::NicknameTaken);
        }
        if others().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::EmailTaken);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.rows.lock().iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|(u, _)| {
                u.email.eq_ignore_ascii_case(login) || u.nickname.eq_ignore_ascii_case(login)
            })
            .map(|(u, _)| u.clone()))
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.rows.lock().iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone()))
    }

    async fn nickname_exists(&self, nickname: &str, exclude: Option<Snowflake>) -> RepoResult<bool> {
        Ok(self
            .rows
            .lock()
            .iter()
            .any(|(u, _)| Some(u.id) != exclude && u.nickname.eq_ignore_ascii_case(nickname)))
    }

    async fn email_exists(&self, email: &str, exclude: Option<Snowflake>) -> RepoResult<bool> {
        Ok(self
            .rows
            .lock()
            .iter()
            .any(|(u, _)| Some(u.id) != exclude && u.email.eq_ignore_ascii_case(email)))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        Self::check_identity(&rows, user)?;
        rows.push((user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update_profile(&self, user: &User) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        Self::check_identity(&rows, user)?;
        let (stored, _) = rows
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        *stored = user.clone();
        Ok(())
    }

    async fn update_avatar(&self, id: Snowflake, avatar_path: Option<&str>) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let (stored, _) = rows
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        stored.avatar_path = avatar_path.map(str::to_string);
        Ok(())
    }
}

// ============================================================================
// Favorites
// ============================================================================

#[derive(Default)]
pub struct MemoryFavorites {
    rows: Mutex<Vec<Favorite>>,
}

#[async_trait]
impl FavoriteRepository for MemoryFavorites {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Favorite>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn exists(&self, user_id: Snowflake, place_id: &str) -> RepoResult<bool> {
        Ok(self
            .rows
            .lock()
            .iter()
            .any(|f| f.user_id == user_id && f.place_id == place_id))
    }

    async fn create(&self, favorite: &Favorite) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        if rows
            .iter()
            .any(|f| f.user_id == favorite.user_id && f.place_id == favorite.place_id)
        {
            return Err(DomainError::AlreadyFavorited);
        }
        rows.push(favorite.clone());
        Ok(())
    }

    async fn delete(&self, user_id: Snowflake, place_id: &str) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|f| !(f.user_id == user_id && f.place_id == place_id));
        if rows.len() == before {
            return Err(DomainError::FavoriteNotFound(place_id.to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Reviews
// ============================================================================

#[derive(Default)]
struct ReviewTables {
    reviews: Vec<Review>,
    // (review, user)
    likes: HashSet<(Snowflake, Snowflake)>,
}

pub struct MemoryReviews {
    users: Arc<MemoryUsers>,
    tables: Mutex<ReviewTables>,
}

impl MemoryReviews {
    fn new(users: Arc<MemoryUsers>) -> Self {
        Self {
            users,
            tables: Mutex::new(ReviewTables::default()),
        }
    }

    fn decorate(
        &self,
        review: Review,
        likes: &HashSet<(Snowflake, Snowflake)>,
        viewer: Option<Snowflake>,
    ) -> ReviewWithAuthor {
        let likes_count = likes.iter().filter(|(r, _)| *r == review.id).count() as i64;
        let is_liked = viewer.is_some_and(|v| likes.contains(&(review.id, v)));
        ReviewWithAuthor {
            author: self.users.author(review.user_id),
            review,
            likes_count,
            is_liked,
        }
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviews {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Review>> {
        Ok(self.tables.lock().reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn find_with_author(
        &self,
        id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Option<ReviewWithAuthor>> {
        let tables = self.tables.lock();
        Ok(tables
            .reviews
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .map(|r| self.decorate(r, &tables.likes, viewer)))
    }

    async fn search(&self, query: &ReviewQuery) -> RepoResult<Vec<ReviewWithAuthor>> {
        let tables = self.tables.lock();
        let mut found: Vec<Review> = tables
            .reviews
            .iter()
            .filter(|r| query.place_id.as_ref().map_or(true, |p| &r.place_id == p))
            .filter(|r| query.user_id.map_or(true, |u| r.user_id == u))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found
            .into_iter()
            .map(|r| self.decorate(r, &tables.likes, query.viewer))
            .collect())
    }

    async fn upsert(&self, review: &Review) -> RepoResult<ReviewUpsert> {
        let mut tables = self.tables.lock();
        if let Some(existing) = tables
            .reviews
            .iter_mut()
            .find(|r| r.user_id == review.user_id && r.place_id == review.place_id)
        {
            existing.rating = review.rating;
            existing.comment.clone_from(&review.comment);
            if review.place_name.is_some() {
                existing.place_name.clone_from(&review.place_name);
            }
            existing.updated_at = Utc::now();
            return Ok(ReviewUpsert {
                review: existing.clone(),
                created: false,
            });
        }
        tables.reviews.push(review.clone());
        Ok(ReviewUpsert {
            review: review.clone(),
            created: true,
        })
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        let before = tables.reviews.len();
        tables.reviews.retain(|r| r.id != id);
        if tables.reviews.len() == before {
            return Err(DomainError::ReviewNotFound(id));
        }
        tables.likes.retain(|(r, _)| *r != id);
        Ok(())
    }

    async fn toggle_like(&self, review_id: Snowflake, user_id: Snowflake) -> RepoResult<LikeToggle> {
        let mut tables = self.tables.lock();
        if !tables.reviews.iter().any(|r| r.id == review_id) {
            return Err(DomainError::ReviewNotFound(review_id));
        }
        let liked = if tables.likes.remove(&(review_id, user_id)) {
            false
        } else {
            tables.likes.insert((review_id, user_id));
            true
        };
        let likes_count = tables.likes.iter().filter(|(r, _)| *r == review_id).count() as i64;
        Ok(LikeToggle { liked, likes_count })
    }
}

// ============================================================================
// Lists
// ============================================================================

#[derive(Default)]
pub struct MemoryLists {
    lists: Mutex<Vec<CafeList>>,
    items: Mutex<Vec<ListPlace>>,
}

#[async_trait]
impl ListRepository for MemoryLists {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CafeList>> {
        Ok(self.lists.lock().iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: Snowflake, public_only: bool) -> RepoResult<Vec<CafeList>> {
        Ok(self
            .lists
            .lock()
            .iter()
            .rev()
            .filter(|l| l.user_id == user_id && (!public_only || l.is_public))
            .cloned()
            .collect())
    }

    async fn create(&self, list: &CafeList) -> RepoResult<()> {
        self.lists.lock().push(list.clone());
        Ok(())
    }

    async fn update(&self, list: &CafeList) -> RepoResult<()> {
        let mut lists = self.lists.lock();
        let stored = lists
            .iter_mut()
            .find(|l| l.id == list.id)
            .ok_or(DomainError::ListNotFound(list.id))?;
        *stored = list.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.lists.lock().retain(|l| l.id != id);
        self.items.lock().retain(|i| i.list_id != id);
        Ok(())
    }

    async fn find_items(&self, list_id: Snowflake) -> RepoResult<Vec<ListPlace>> {
        Ok(self
            .items
            .lock()
            .iter()
            .rev()
            .filter(|i| i.list_id == list_id)
            .cloned()
            .collect())
    }

    async fn add_item(&self, item: &ListPlace) -> RepoResult<()> {
        let mut items = self.items.lock();
        if items
            .iter()
            .any(|i| i.list_id == item.list_id && i.place_id == item.place_id)
        {
            return Err(DomainError::PlaceAlreadyInList);
        }
        items.push(item.clone());
        Ok(())
    }

    async fn remove_item(&self, list_id: Snowflake, place_id: &str) -> RepoResult<()> {
        let mut items = self.items.lock();
        let before = items.len();
        items.retain(|i| !(i.list_id == list_id && i.place_id == place_id));
        if items.len() == before {
            return Err(DomainError::ListItemNotFound(place_id.to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Stores
// ============================================================================

#[derive(Default)]
pub struct MemorySessions {
    sessions: Mutex<HashMap<String, Snowflake>>,
}

impl MemorySessions {
    pub fn count_for(&self, user_id: Snowflake) -> usize {
        self.sessions.lock().values().filter(|u| **u == user_id).count()
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn store(&self, session_id: &str, user_id: Snowflake, _ttl_secs: u64) -> RepoResult<()> {
        self.sessions.lock().insert(session_id.to_string(), user_id);
        Ok(())
    }

    async fn validate(&self, session_id: &str, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self.sessions.lock().get(session_id) == Some(&user_id))
    }

    async fn revoke(&self, session_id: &str) -> RepoResult<()> {
        self.sessions.lock().remove(session_id);
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Snowflake) -> RepoResult<u64> {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, u| *u != user_id);
        Ok((before - sessions.len()) as u64)
    }
}

#[derive(Default)]
pub struct MemoryAvatars {
    files: Mutex<BTreeSet<String>>,
}

impl MemoryAvatars {
    pub fn files(&self) -> Vec<String> {
        self.files.lock().iter().cloned().collect()
    }
}

#[async_trait]
impl AvatarStore for MemoryAvatars {
    async fn save(&self, file_name: &str, _bytes: &[u8]) -> RepoResult<()> {
        self.files.lock().insert(file_name.to_string());
        Ok(())
    }

    async fn remove(&self, file_name: &str) -> RepoResult<()> {
        self.files.lock().remove(file_name);
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

/// A service context wired to in-memory doubles
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub users: Arc<MemoryUsers>,
    pub sessions: Arc<MemorySessions>,
    pub avatars: Arc<MemoryAvatars>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_max_avatar_bytes(1024 * 1024)
    }

    pub fn with_max_avatar_bytes(max_avatar_bytes: usize) -> Self {
        let users = Arc::new(MemoryUsers::default());
        let sessions = Arc::new(MemorySessions::default());
        let avatars = Arc::new(MemoryAvatars::default());

        let ctx = ServiceContext::builder()
            .user_repo(users.clone())
            .favorite_repo(Arc::new(MemoryFavorites::default()))
            .review_repo(Arc::new(MemoryReviews::new(users.clone())))
            .list_repo(Arc::new(MemoryLists::default()))
            .session_store(sessions.clone())
            .avatar_store(avatars.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret", 3600, 7200)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .max_avatar_bytes(max_avatar_bytes)
            .build()
            .expect("complete test context");

        Self {
            ctx,
            users,
            sessions,
            avatars,
        }
    }

    /// Insert a user directly, named after its nickname
    pub async fn user(&self, nickname: &str) -> User {
        let user = User::new(
            self.ctx.generate_id(),
            nickname.to_string(),
            nickname.to_string(),
            format!("{nickname}@example.com"),
        );
        self.users
            .create(&user, "not-a-real-hash")
            .await
            .expect("unique test user");
        user
    }
}
