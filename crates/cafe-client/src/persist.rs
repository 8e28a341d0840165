//! Saving and restoring client state between runs
//!
//! Only the user's filter choices and session survive a restart; search
//! results and caches are rebuilt from the network.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use cafe_core::ranking::FilterSettings;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ClientResult;
use crate::state::{ClientState, Session};

/// On-disk form of the persisted state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredState {
    pub filters: FilterSettings,
    pub session: Option<Session>,
}

impl StoredState {
    /// Read the state file; `None` when it does not exist yet
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> ClientResult<Option<Self>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Write through a temporary file so a crash never leaves half a file
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn save(&self, path: &Path) -> ClientResult<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        fs::rename(&tmp, path)?;
        debug!("Client state saved");
        Ok(())
    }
}

impl ClientState {
    pub fn snapshot(&self) -> StoredState {
        StoredState {
            filters: self.filters().clone(),
            session: self.session().cloned(),
        }
    }

    pub fn restore(&mut self, stored: StoredState) {
        self.set_filters(stored.filters);
        match stored.session {
            Some(session) => self.sign_in(session),
            None => self.sign_out(),
        }
    }

    pub fn save_to(&self, path: &Path) -> ClientResult<()> {
        self.snapshot().save(path)
    }

    /// Restore from `path`; returns whether a saved state was found
    pub fn load_from(&mut self, path: &Path) -> ClientResult<bool> {
        match StoredState::load(path)? {
            Some(stored) => {
                self.restore(stored);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
