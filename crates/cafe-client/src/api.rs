//! Typed HTTP client for the REST API
//!
//! One method per endpoint. The access token from the last successful
//! register, login or refresh is attached to authenticated requests.

use std::sync::Arc;
use std::time::Duration;

use cafe_core::Snowflake;
use cafe_service::dto::{
    AddFavoriteRequest, AddListItemRequest, AuthResponse, AvatarResponse, CreateListRequest,
    FavoriteCreatedResponse, FavoriteResponse, FavoriteStatusResponse, FavoritesResponse,
    HealthResponse, LikeResponse, ListDetailResponse, ListEnvelope, ListItemEnvelope,
    ListItemResponse, ListResponse, ListsResponse, LoginRequest, MessageResponse,
    NicknameAvailabilityResponse, ProfileResponse, ReadinessResponse, RefreshTokenRequest,
    RegisterRequest, ReviewEnvelope, ReviewResponse, ReviewSearchQuery, ReviewsResponse,
    SaveReviewRequest, UpdateListRequest, UpdateProfileRequest, UserResponse,
};
use parking_lot::RwLock;
use reqwest::{multipart, Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{ClientError, ClientResult};
use crate::state::ClientState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    None,
    Optional,
    Required,
}

/// REST API client; clones share the connection pool and token
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// `base_url` points at the API root, e.g. `http://localhost:3001/api`
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Self::with_http_client(http, base_url)
    }

    pub fn with_http_client(http: Client, base_url: &str) -> ClientResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Client for the state's API base, carrying its session token
    pub fn from_state(state: &ClientState) -> ClientResult<Self> {
        let client = Self::new(state.api_base_url())?;
        client.set_token(state.token().map(str::to_string));
        Ok(client)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    // ------------------------------------------------------------------
    // Health
    // ------------------------------------------------------------------

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        let response = self.request(Method::GET, &["health"], Auth::None)?.send().await?;
        parse(response).await
    }

    /// Readiness report; a 503 still carries the per-check status
    pub async fn readiness(&self) -> ClientResult<ReadinessResponse> {
        let response = self
            .request(Method::GET, &["health", "ready"], Auth::None)?
            .send()
            .await?;
        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            return Ok(response.json().await?);
        }
        parse(response).await
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    #[instrument(skip_all, fields(nickname = %request.nickname))]
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        let response = self
            .request(Method::POST, &["register"], Auth::None)?
            .json(request)
            .send()
            .await?;
        self.remember(parse(response).await?)
    }

    /// Sign in with an email or nickname
    #[instrument(skip_all, fields(login = %login))]
    pub async fn login(&self, login: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = LoginRequest {
            login: login.to_string(),
            password: password.to_string(),
        };
        let response = self
            .request(Method::POST, &["login"], Auth::None)?
            .json(&body)
            .send()
            .await?;
        self.remember(parse(response).await?)
    }

    /// Rotate the session; the old refresh token stops working
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> ClientResult<AuthResponse> {
        let body = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        };
        let response = self
            .request(Method::POST, &["refresh"], Auth::None)?
            .json(&body)
            .send()
            .await?;
        self.remember(parse(response).await?)
    }

    /// End every session of the user
    #[instrument(skip_all)]
    pub async fn logout(&self) -> ClientResult<()> {
        let response = self
            .request(Method::POST, &["logout"], Auth::Required)?
            .send()
            .await?;
        expect_success(response).await?;
        self.set_token(None);
        Ok(())
    }

    fn remember(&self, auth: AuthResponse) -> ClientResult<AuthResponse> {
        debug!(user_id = %auth.user.id, "Session token stored");
        self.set_token(Some(auth.token.clone()));
        Ok(auth)
    }

    // ------------------------------------------------------------------
    // Profile
    // ------------------------------------------------------------------

    pub async fn profile(&self) -> ClientResult<UserResponse> {
        let response = self
            .request(Method::GET, &["profile"], Auth::Required)?
            .send()
            .await?;
        parse::<ProfileResponse>(response).await.map(|p| p.user)
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ClientResult<UserResponse> {
        let response = self
            .request(Method::PUT, &["profile"], Auth::Required)?
            .json(request)
            .send()
            .await?;
        parse::<ProfileResponse>(response).await.map(|p| p.user)
    }

    /// Upload a new avatar image as the `avatar` multipart field
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_avatar(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<AvatarResponse> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("avatar", part);
        let response = self
            .request(Method::POST, &["profile", "avatar"], Auth::Required)?
            .multipart(form)
            .send()
            .await?;
        parse(response).await
    }

    /// Whether `nickname` is free; the caller's own nickname counts as free
    pub async fn check_nickname(&self, nickname: &str) -> ClientResult<bool> {
        let mut url = self.url(&["check-nickname"])?;
        url.query_pairs_mut().append_pair("nickname", nickname);
        let response = self.request_url(Method::GET, url, Auth::Optional)?.send().await?;
        parse::<NicknameAvailabilityResponse>(response)
            .await
            .map(|r| r.available)
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    pub async fn favorites(&self) -> ClientResult<Vec<FavoriteResponse>> {
        let response = self
            .request(Method::GET, &["favorites"], Auth::Required)?
            .send()
            .await?;
        parse::<FavoritesResponse>(response).await.map(|r| r.favorites)
    }

    pub async fn add_favorite(&self, request: &AddFavoriteRequest) -> ClientResult<FavoriteResponse> {
        let response = self
            .request(Method::POST, &["favorites"], Auth::Required)?
            .json(request)
            .send()
            .await?;
        parse::<FavoriteCreatedResponse>(response)
            .await
            .map(|r| r.favorite)
    }

    pub async fn remove_favorite(&self, place_id: &str) -> ClientResult<MessageResponse> {
        let response = self
            .request(Method::DELETE, &["favorites", place_id], Auth::Required)?
            .send()
            .await?;
        parse(response).await
    }

    pub async fn is_favorite(&self, place_id: &str) -> ClientResult<bool> {
        let response = self
            .request(Method::GET, &["favorites", "check", place_id], Auth::Required)?
            .send()
            .await?;
        parse::<FavoriteStatusResponse>(response)
            .await
            .map(|r| r.is_favorite)
    }

    // ------------------------------------------------------------------
    // Reviews
    // ------------------------------------------------------------------

    /// Create or replace the caller's review; `true` when newly created
    pub async fn save_review(
        &self,
        request: &SaveReviewRequest,
    ) -> ClientResult<(ReviewResponse, bool)> {
        let response = self
            .request(Method::POST, &["reviews"], Auth::Required)?
            .json(request)
            .send()
            .await?;
        let created = response.status() == StatusCode::CREATED;
        parse::<ReviewEnvelope>(response)
            .await
            .map(|r| (r.review, created))
    }

    pub async fn place_reviews(&self, place_id: &str) -> ClientResult<Vec<ReviewResponse>> {
        let response = self
            .request(Method::GET, &["reviews", "place", place_id], Auth::Optional)?
            .send()
            .await?;
        parse::<ReviewsResponse>(response).await.map(|r| r.reviews)
    }

    pub async fn search_reviews(&self, query: &ReviewSearchQuery) -> ClientResult<Vec<ReviewResponse>> {
        let mut url = self.url(&["reviews"])?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(place_id) = &query.place_id {
                pairs.append_pair("place_id", place_id);
            }
            if let Some(user_id) = &query.user_id {
                pairs.append_pair("user_id", user_id);
            }
        }
        let response = self.request_url(Method::GET, url, Auth::Optional)?.send().await?;
        parse::<ReviewsResponse>(response).await.map(|r| r.reviews)
    }

    pub async fn delete_review(&self, id: Snowflake) -> ClientResult<MessageResponse> {
        let id = id.to_string();
        let response = self
            .request(Method::DELETE, &["reviews", &id], Auth::Required)?
            .send()
            .await?;
        parse(response).await
    }

    pub async fn toggle_like(&self, id: Snowflake) -> ClientResult<LikeResponse> {
        let id = id.to_string();
        let response = self
            .request(Method::POST, &["reviews", &id, "like"], Auth::Required)?
            .send()
            .await?;
        parse(response).await
    }

    // ------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------

    pub async fn create_list(&self, request: &CreateListRequest) -> ClientResult<ListResponse> {
        let response = self
            .request(Method::POST, &["lists"], Auth::Required)?
            .json(request)
            .send()
            .await?;
        parse::<ListEnvelope>(response).await.map(|r| r.list)
    }

    pub async fn my_lists(&self) -> ClientResult<Vec<ListResponse>> {
        let response = self
            .request(Method::GET, &["lists"], Auth::Required)?
            .send()
            .await?;
        parse::<ListsResponse>(response).await.map(|r| r.lists)
    }

    /// Public lists of another user
    pub async fn user_lists(&self, user_id: Snowflake) -> ClientResult<Vec<ListResponse>> {
        let user_id = user_id.to_string();
        let response = self
            .request(Method::GET, &["users", &user_id, "lists"], Auth::None)?
            .send()
            .await?;
        parse::<ListsResponse>(response).await.map(|r| r.lists)
    }

    pub async fn get_list(&self, id: Snowflake) -> ClientResult<ListDetailResponse> {
        let id = id.to_string();
        let response = self
            .request(Method::GET, &["lists", &id], Auth::Optional)?
            .send()
            .await?;
        parse(response).await
    }

    pub async fn update_list(
        &self,
        id: Snowflake,
        request: &UpdateListRequest,
    ) -> ClientResult<ListResponse> {
        let id = id.to_string();
        let response = self
            .request(Method::PUT, &["lists", &id], Auth::Required)?
            .json(request)
            .send()
            .await?;
        parse::<ListEnvelope>(response).await.map(|r| r.list)
    }

    pub async fn delete_list(&self, id: Snowflake) -> ClientResult<MessageResponse> {
        let id = id.to_string();
        let response = self
            .request(Method::DELETE, &["lists", &id], Auth::Required)?
            .send()
            .await?;
        parse(response).await
    }

    pub async fn add_list_item(
        &self,
        list_id: Snowflake,
        request: &AddListItemRequest,
    ) -> ClientResult<ListItemResponse> {
        let list_id = list_id.to_string();
        let response = self
            .request(Method::POST, &["lists", &list_id, "items"], Auth::Required)?
            .json(request)
            .send()
            .await?;
        parse::<ListItemEnvelope>(response).await.map(|r| r.item)
    }

    pub async fn remove_list_item(
        &self,
        list_id: Snowflake,
        place_id: &str,
    ) -> ClientResult<MessageResponse> {
        let list_id = list_id.to_string();
        let response = self
            .request(
                Method::DELETE,
                &["lists", &list_id, "items", place_id],
                Auth::Required,
            )?
            .send()
            .await?;
        parse(response).await
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    /// Append percent-encoded path segments to the base URL
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str], auth: Auth) -> ClientResult<RequestBuilder> {
        let url = self.url(segments)?;
        self.request_url(method, url, auth)
    }

    fn request_url(&self, method: Method, url: Url, auth: Auth) -> ClientResult<RequestBuilder> {
        let builder = self.http.request(method, url);
        let token = match auth {
            Auth::None => None,
            Auth::Optional => self.token(),
            Auth::Required => Some(self.token().ok_or(ClientError::NotAuthenticated)?),
        };
        Ok(match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let response = expect_success(response).await?;
    Ok(response.json().await?)
}

async fn expect_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::from_response(status, &body))
}
