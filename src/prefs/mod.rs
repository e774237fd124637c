//! Persisted client preferences: the scoreboard and the display theme.
//!
//! Entries are read once when [`Preferences::load`] runs and written through
//! to the store on every change. A malformed entry is logged and replaced by
//! its default rather than failing startup.

mod scoreboard;
mod store;

pub use scoreboard::Scoreboard;
pub use store::{FileStore, MemoryStore, PreferenceStore, StoreError};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use derive_more::Display;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::session::Outcome;

/// Store key for the scoreboard.
pub const SCORES_KEY: &str = "nextoe-scores";

/// Store key for the theme.
pub const THEME_KEY: &str = "nextoe-theme";

/// Display theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light text on a dark background.
    #[default]
    #[display("dark")]
    Dark,
    /// Dark text on a light background.
    #[display("light")]
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Scoreboard and theme backed by a [`PreferenceStore`].
pub struct Preferences {
    store: Box<dyn PreferenceStore>,
    scores: Scoreboard,
    theme: Theme,
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("scores", &self.scores)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

fn read_entry<T>(store: &dyn PreferenceStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.read(key) {
        Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
            warn!(key, error = %e, "Malformed preference entry, using default");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %e, "Failed to read preference entry, using default");
            T::default()
        }
    }
}

impl Preferences {
    /// Reads the scoreboard and theme out of `store`.
    #[instrument(skip(store))]
    pub fn load(store: impl PreferenceStore + 'static) -> Self {
        let store: Box<dyn PreferenceStore> = Box::new(store);
        let scores: Scoreboard = read_entry(store.as_ref(), SCORES_KEY);
        let theme: Theme = read_entry(store.as_ref(), THEME_KEY);
        info!(games = scores.total(), %theme, "Preferences loaded");
        Self {
            store,
            scores,
            theme,
        }
    }

    /// Current scoreboard.
    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn persist<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value)?;
        self.store.write(key, value)
    }

    /// Counts a finished game and writes the scoreboard through.
    ///
    /// The in-memory count is kept even if the write fails.
    #[instrument(skip(self))]
    pub fn record_outcome(&mut self, outcome: Outcome) -> Result<Scoreboard, StoreError> {
        self.scores.record(outcome);
        debug!(scores = ?self.scores, "Score recorded");
        let scores = self.scores;
        self.persist(SCORES_KEY, &scores)?;
        Ok(scores)
    }

    /// Zeroes the scoreboard.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) -> Result<(), StoreError> {
        self.scores = Scoreboard::default();
        info!("Scores reset");
        let scores = self.scores;
        self.persist(SCORES_KEY, &scores)
    }

    /// Switches between dark and light and returns the new theme.
    #[instrument(skip(self))]
    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        self.theme = self.theme.toggle();
        info!(theme = %self.theme, "Theme toggled");
        let theme = self.theme;
        self.persist(THEME_KEY, &theme)?;
        Ok(theme)
    }
}

/// Process-wide handle to [`Preferences`].
#[derive(Debug, Clone)]
pub struct SharedPreferences(Arc<Mutex<Preferences>>);

impl SharedPreferences {
    /// Wraps loaded preferences for sharing.
    pub fn new(preferences: Preferences) -> Self {
        Self(Arc::new(Mutex::new(preferences)))
    }

    /// Locks the preferences. A poisoned lock is recovered; every update
    /// leaves the counters consistent before it can panic.
    pub fn lock(&self) -> MutexGuard<'_, Preferences> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current scoreboard.
    pub fn scores(&self) -> Scoreboard {
        self.lock().scores()
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.lock().theme()
    }

    /// Counts a finished game under one lock, including the write-through.
    pub fn record_outcome(&self, outcome: Outcome) -> Result<Scoreboard, StoreError> {
        self.lock().record_outcome(outcome)
    }

    /// Zeroes the scoreboard.
    pub fn reset_scores(&self) -> Result<(), StoreError> {
        self.lock().reset_scores()
    }

    /// Switches the theme.
    pub fn toggle_theme(&self) -> Result<Theme, StoreError> {
        self.lock().toggle_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_malformed_entries_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.write(SCORES_KEY, json!("not a scoreboard")).unwrap();
        store.write(THEME_KEY, json!("purple")).unwrap();

        let prefs = Preferences::load(store);
        assert_eq!(prefs.scores(), Scoreboard::default());
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[test]
    fn test_existing_entries_are_read() {
        let mut store = MemoryStore::new();
        store
            .write(SCORES_KEY, json!({"player": 2, "ai": 5, "draws": 1}))
            .unwrap();
        store.write(THEME_KEY, json!("light")).unwrap();

        let prefs = Preferences::load(store);
        assert_eq!(prefs.scores(), Scoreboard::new(2, 5, 1));
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn test_load_with_counter_at_limit() {
        let mut store = MemoryStore::new();
        store
            .write(SCORES_KEY, json!({"player": u32::MAX, "ai": 1, "draws": 0}))
            .unwrap();

        let mut prefs = Preferences::load(store);
        assert_eq!(prefs.scores().total(), u64::from(u32::MAX) + 1);

        let scores = prefs.record_outcome(Outcome::PlayerWin).unwrap();
        assert_eq!(scores.player_wins(), u32::MAX);
        assert_eq!(scores.total(), u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_shared_handles_see_same_scores() {
        let shared = SharedPreferences::new(Preferences::load(MemoryStore::new()));
        let other = shared.clone();
        shared.record_outcome(Outcome::PlayerWin).unwrap();
        assert_eq!(other.scores().player_wins(), 1);
        assert_eq!(other.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(shared.theme(), Theme::Light);
    }
}
