//! # cafe-client
//!
//! Client side of the cafe finder: the application state store that holds
//! search results, the ranked view, caches and the signed-in session, plus
//! a typed HTTP client for the REST API.

pub mod api;
pub mod error;
pub mod persist;
pub mod state;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use persist::StoredState;
pub use state::{
    ClientState, PlaceDetails, Session, SharedClientState, DEFAULT_API_URL, DETAILS_TTL,
};
