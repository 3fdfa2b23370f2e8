//! Server-driven UI settings with a TTL'd, single-flight cache.
//!
//! The cache holds one value today: the `ui_timezone` display override. A
//! refresh is an explicit `Result`; the ignore-and-fall-back behavior lives
//! in [`crate::Client::init_ui`], not here, so callers that care can observe
//! the failure.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use appcenter_types::SettingsPage;
use tokio::time::Instant;

use crate::{ApiError, Client};

/// Cached settings are considered fresh for this long.
pub const SETTINGS_TTL: Duration = Duration::from_secs(300);

const FALLBACK_TIMEZONE: &str = "UTC";

#[derive(Debug)]
pub(crate) struct UiSettings {
    ttl: Duration,
    state: Mutex<CacheState>,
    /// Held across the network fetch. Concurrent refreshers queue here and
    /// re-check freshness once they acquire it, so a burst of callers costs
    /// one settings request.
    fetch: tokio::sync::Mutex<()>,
}

#[derive(Debug, Default)]
struct CacheState {
    timezone: Option<String>,
    loaded_at: Option<Instant>,
}

impl UiSettings {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::new(CacheState::default()),
            fetch: tokio::sync::Mutex::new(()),
        }
    }

    /// Fetch `/settings` and update the cached timezone.
    ///
    /// Skipped when the cache is fresh and `force` is false. `loaded_at`
    /// advances on every attempt, success or failure, so a failing server is
    /// not hammered on each call within the TTL window.
    pub(crate) async fn refresh(&self, client: &Client, force: bool) -> Result<(), ApiError> {
        let _guard = self.fetch.lock().await;
        if !force && self.is_fresh() {
            tracing::debug!("settings cache fresh, skipping fetch");
            return Ok(());
        }

        let decoded = client
            .get_json("/settings")
            .await
            .and_then(|body| serde_json::from_value::<SettingsPage>(body).map_err(ApiError::from));

        let mut state = self.lock_state();
        state.loaded_at = Some(Instant::now());
        match decoded {
            Ok(page) => {
                state.timezone = page.ui_timezone().map(str::to_string);
                tracing::debug!(timezone = ?state.timezone, "settings cache refreshed");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Cached timezone, the platform zone, or `"UTC"`. Never fetches.
    pub(crate) fn timezone(&self) -> String {
        if let Some(zone) = self.lock_state().timezone.clone() {
            return zone;
        }
        iana_time_zone::get_timezone().unwrap_or_else(|_| FALLBACK_TIMEZONE.to_string())
    }

    fn is_fresh(&self) -> bool {
        self.lock_state()
            .loaded_at
            .is_some_and(|at| at.elapsed() < self.ttl)
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
