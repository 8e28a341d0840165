//! Application state store
//!
//! [`ClientState`] is the single context object a client UI works
//! against: raw provider results, the ranked view the user browses, caches
//! for place details and favorites, and the signed-in session. Every
//! mutation that affects ranking recomputes the view immediately.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use cafe_core::ranking::{rank_places, FilterSettings, PurposePreset, RankedPlace};
use cafe_core::{GeoPoint, Place};
use cafe_service::dto::{AuthResponse, FavoriteResponse, UserResponse};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// API base used when none is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// How long fetched place details stay fresh
pub const DETAILS_TTL: Duration = Duration::from_secs(10 * 60);

/// Extra place information fetched on demand from the places provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Provider page for the place
    pub maps_url: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedDetails {
    details: PlaceDetails,
    fetched_at: Instant,
}

impl CachedDetails {
    fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < DETAILS_TTL
    }
}

/// Signed-in user and their tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: UserResponse,
}

impl From<AuthResponse> for Session {
    fn from(auth: AuthResponse) -> Self {
        Self {
            token: auth.token,
            refresh_token: Some(auth.refresh_token),
            user: auth.user,
        }
    }
}

/// Client application context
#[derive(Debug)]
pub struct ClientState {
    api_base_url: String,
    user_position: GeoPoint,
    raw_places: Vec<Place>,
    view: Vec<RankedPlace>,
    details: HashMap<String, CachedDetails>,
    favorites: Vec<FavoriteResponse>,
    current_index: usize,
    error_message: Option<String>,
    filters: FilterSettings,
    focused_place_id: Option<String>,
    session: Option<Session>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientState {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            user_position: GeoPoint::FALLBACK,
            raw_places: Vec::new(),
            view: Vec::new(),
            details: HashMap::new(),
            favorites: Vec::new(),
            current_index: 0,
            error_message: None,
            filters: FilterSettings::default(),
            focused_place_id: None,
            session: None,
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Absolute URL of a server-relative asset such as `/uploads/a.png`
    pub fn asset_url(&self, path: &str) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        let origin = base.strip_suffix("/api").unwrap_or(base);
        format!("{origin}{path}")
    }

    // ------------------------------------------------------------------
    // Position and search results
    // ------------------------------------------------------------------

    pub fn user_position(&self) -> GeoPoint {
        self.user_position
    }

    /// Move the user; invalid coordinates are ignored and `false` returned
    pub fn set_user_position(&mut self, position: GeoPoint) -> bool {
        if !position.is_valid() {
            warn!(lat = position.lat, lng = position.lng, "Ignoring invalid user position");
            return false;
        }
        self.user_position = position;
        self.recompute();
        self.current_index = self.current_index.min(self.view.len());
        true
    }

    /// Replace provider results and start browsing from the first card
    pub fn set_search_results(&mut self, places: Vec<Place>) {
        debug!(count = places.len(), "Search results replaced");
        self.raw_places = places;
        self.error_message = None;
        self.recompute();
        self.current_index = 0;
    }

    /// Drop results after a failed search and surface the message
    pub fn search_failed(&mut self, message: impl Into<String>) {
        self.raw_places.clear();
        self.view.clear();
        self.current_index = 0;
        self.error_message = Some(message.into());
    }

    /// Unfiltered provider results
    pub fn raw_places(&self) -> &[Place] {
        &self.raw_places
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    pub fn filters(&self) -> &FilterSettings {
        &self.filters
    }

    /// Edit filters by hand; a manual edit detaches the active preset
    pub fn update_filters(&mut self, edit: impl FnOnce(&mut FilterSettings)) {
        let mut filters = self.filters.clone();
        edit(&mut filters);
        filters.preset = None;
        self.set_filters(filters);
    }

    pub fn apply_preset(&mut self, preset: PurposePreset) {
        self.set_filters(preset.settings());
    }

    /// Replace filters wholesale, e.g. when restoring saved state
    pub fn set_filters(&mut self, filters: FilterSettings) {
        self.filters = filters.normalized();
        self.recompute();
        self.current_index = 0;
    }

    // ------------------------------------------------------------------
    // Ranked view and card browsing
    // ------------------------------------------------------------------

    /// Places passing the filters, in the selected order
    pub fn places(&self) -> &[RankedPlace] {
        &self.view
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Card under the cursor; `None` once every card has been seen
    pub fn current_place(&self) -> Option<&RankedPlace> {
        self.view.get(self.current_index)
    }

    /// Move to the next card, stopping one past the last
    pub fn advance(&mut self) -> Option<&RankedPlace> {
        self.current_index = (self.current_index + 1).min(self.view.len());
        self.current_place()
    }

    /// All cards browsed
    pub fn all_seen(&self) -> bool {
        !self.view.is_empty() && self.current_index >= self.view.len()
    }

    /// One-based position and total, for "3 / 12" style counters
    pub fn progress(&self) -> (usize, usize) {
        let total = self.view.len();
        ((self.current_index + 1).min(total), total)
    }

    /// Mark a place to be brought into view; `false` when not in the view
    pub fn focus_place(&mut self, place_id: &str) -> bool {
        let found = self.view.iter().any(|p| p.place.place_id == place_id);
        self.focused_place_id = found.then(|| place_id.to_string());
        found
    }

    pub fn focused_place(&self) -> Option<&RankedPlace> {
        let id = self.focused_place_id.as_deref()?;
        self.view.iter().find(|p| p.place.place_id == id)
    }

    /// Consume the focus request once the UI has scrolled to it
    pub fn take_focus(&mut self) -> Option<String> {
        self.focused_place_id.take()
    }

    fn recompute(&mut self) {
        self.view = rank_places(&self.raw_places, self.user_position, &self.filters);
        if let Some(id) = &self.focused_place_id {
            if !self.view.iter().any(|p| &p.place.place_id == id) {
                self.focused_place_id = None;
            }
        }
    }

    // ------------------------------------------------------------------
    // Place details cache
    // ------------------------------------------------------------------

    pub fn cache_place_details(&mut self, place_id: impl Into<String>, details: PlaceDetails) {
        self.details.insert(
            place_id.into(),
            CachedDetails {
                details,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Cached details younger than [`DETAILS_TTL`]
    pub fn place_details(&self, place_id: &str) -> Option<&PlaceDetails> {
        self.details
            .get(place_id)
            .filter(|cached| cached.is_fresh())
            .map(|cached| &cached.details)
    }

    /// Evict stale details
    pub fn prune_place_details(&mut self) {
        self.details.retain(|_, cached| cached.is_fresh());
    }

    // ------------------------------------------------------------------
    // Favorites cache
    // ------------------------------------------------------------------

    pub fn favorites(&self) -> &[FavoriteResponse] {
        &self.favorites
    }

    pub fn set_favorites(&mut self, favorites: Vec<FavoriteResponse>) {
        self.favorites = favorites;
    }

    pub fn is_favorite(&self, place_id: &str) -> bool {
        self.favorites.iter().any(|f| f.place_id == place_id)
    }

    /// Add to the front of the cache; `false` if already present
    pub fn remember_favorite(&mut self, favorite: FavoriteResponse) -> bool {
        if self.is_favorite(&favorite.place_id) {
            return false;
        }
        self.favorites.insert(0, favorite);
        true
    }

    pub fn forget_favorite(&mut self, place_id: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.place_id != place_id);
        self.favorites.len() != before
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&UserResponse> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn sign_in(&mut self, session: impl Into<Session>) {
        let session = session.into();
        debug!(user_id = %session.user.id, "Signed in");
        self.session = Some(session);
    }

    /// Forget the session and everything cached for that user
    pub fn sign_out(&mut self) {
        self.session = None;
        self.favorites.clear();
    }

    /// Refresh the cached profile after an update; no-op when signed out
    pub fn update_user(&mut self, user: UserResponse) {
        if let Some(session) = &mut self.session {
            session.user = user;
        }
    }

    // ------------------------------------------------------------------
    // Error message
    // ------------------------------------------------------------------

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// [`ClientState`] shared between tasks
#[derive(Debug, Clone, Default)]
pub struct SharedClientState(Arc<RwLock<ClientState>>);

impl SharedClientState {
    pub fn new(state: ClientState) -> Self {
        Self(Arc::new(RwLock::new(state)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, ClientState> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, ClientState> {
        self.0.write()
    }

    /// Run `f` under the write lock
    pub fn update<R>(&self, f: impl FnOnce(&mut ClientState) -> R) -> R {
        f(&mut self.0.write())
    }
}
