use std::str::FromStr;
use std::sync::Arc;

use course_core::model::preferences::{LAYOUT_KEY, PLAYBACK_KEY, THEME_KEY};
use course_core::model::{LayoutMode, PlaybackMode, ThemeMode, UiPreferences};
use storage::repository::PreferenceRepository;
use tracing::warn;

use crate::error::PreferencesError;

#[derive(Clone)]
pub struct PreferencesService {
    repo: Arc<dyn PreferenceRepository>,
}

impl PreferencesService {
    #[must_use]
    pub fn new(repo: Arc<dyn PreferenceRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted preferences. Missing or unreadable values fall back to
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn load(&self) -> Result<UiPreferences, PreferencesError> {
        Ok(UiPreferences {
            theme: self.read(THEME_KEY).await?,
            layout: self.read(LAYOUT_KEY).await?,
            playback: self.read(PLAYBACK_KEY).await?,
        })
    }

    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn save_theme(&self, theme: ThemeMode) -> Result<(), PreferencesError> {
        Ok(self.repo.set_preference(THEME_KEY, theme.as_key()).await?)
    }

    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn save_layout(&self, layout: LayoutMode) -> Result<(), PreferencesError> {
        Ok(self.repo.set_preference(LAYOUT_KEY, layout.as_key()).await?)
    }

    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn save_playback(&self, playback: PlaybackMode) -> Result<(), PreferencesError> {
        Ok(self
            .repo
            .set_preference(PLAYBACK_KEY, playback.as_key())
            .await?)
    }

    async fn read<T>(&self, key: &str) -> Result<T, PreferencesError>
    where
        T: FromStr + Default,
        T::Err: std::fmt::Display,
    {
        let Some(raw) = self.repo.get_preference(key).await? else {
            return Ok(T::default());
        };
        Ok(raw.parse().unwrap_or_else(|e| {
            warn!(key, value = %raw, error = %e, "ignoring stored preference");
            T::default()
        }))
    }
}
