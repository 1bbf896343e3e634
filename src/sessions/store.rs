// src/sessions/store.rs
use crate::errors::ServerError;
use crate::listing::{BuildingFilters, CompanyFilters, ListingController};
use crate::sessions::token::{new_session_token, session_key, SessionKey};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};
use tracing::debug;

/// Everything one browser is looking at.
pub struct Session {
    pub buildings: Mutex<ListingController<BuildingFilters>>,
    pub companies: Mutex<ListingController<CompanyFilters>>,
    regions: OnceLock<Vec<String>>,
}

impl Session {
    fn new() -> Self {
        Self {
            buildings: Mutex::new(ListingController::new(BuildingFilters::default())),
            companies: Mutex::new(ListingController::new(CompanyFilters::default())),
            regions: OnceLock::new(),
        }
    }

    /// The region list is loaded on first use and kept for the session's
    /// lifetime, whatever the loader returned.
    pub fn regions_or_load<F>(&self, load: F) -> &[String]
    where
        F: FnOnce() -> Vec<String>,
    {
        self.regions.get_or_init(load)
    }
}

struct Entry {
    session: Arc<Session>,
    last_seen: Instant,
}

pub struct SessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<SessionKey, Entry>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Looks up the session for a cookie token. Unknown, expired or missing
    /// tokens get a fresh session; the new token is returned alongside so
    /// the caller can set the cookie.
    pub fn resolve(
        &self,
        raw_token: Option<&str>,
    ) -> Result<(Arc<Session>, Option<String>), ServerError> {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().map_err(|_| ServerError::InternalError)?;

        if let Some(raw) = raw_token {
            if let Some(entry) = sessions.get_mut(&session_key(raw)) {
                if now.duration_since(entry.last_seen) < self.ttl {
                    entry.last_seen = now;
                    return Ok((entry.session.clone(), None));
                }
            }
        }

        let ttl = self.ttl;
        let before = sessions.len();
        sessions.retain(|_, e| now.duration_since(e.last_seen) < ttl);
        if sessions.len() < before {
            debug!(expired = before - sessions.len(), "pruned idle sessions");
        }

        let token = new_session_token();
        let session = Arc::new(Session::new());
        sessions.insert(
            session_key(&token),
            Entry {
                session: session.clone(),
                last_seen: now,
            },
        );
        Ok((session, Some(token)))
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }
}
