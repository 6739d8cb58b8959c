use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Cache keys for the persisted UI preferences.
pub const THEME_KEY: &str = "ui.theme";
pub const LAYOUT_KEY: &str = "ui.layout";
pub const PLAYBACK_KEY: &str = "ui.playback";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} value: {raw}")]
pub struct ParsePreferenceError {
    kind: &'static str,
    raw: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    #[default]
    Grid,
    List,
}

/// How a lesson is consumed: reading the article or watching its video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlaybackMode {
    #[default]
    Article,
    Video,
}

impl ThemeMode {
    #[must_use]
    pub fn as_key(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl LayoutMode {
    #[must_use]
    pub fn as_key(self) -> &'static str {
        match self {
            LayoutMode::Grid => "grid",
            LayoutMode::List => "list",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            LayoutMode::Grid => LayoutMode::List,
            LayoutMode::List => LayoutMode::Grid,
        }
    }
}

impl PlaybackMode {
    #[must_use]
    pub fn as_key(self) -> &'static str {
        match self {
            PlaybackMode::Article => "article",
            PlaybackMode::Video => "video",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParsePreferenceError {
                kind: "theme",
                raw: other.to_owned(),
            }),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            other => Err(ParsePreferenceError {
                kind: "layout",
                raw: other.to_owned(),
            }),
        }
    }
}

impl FromStr for PlaybackMode {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "article" => Ok(Self::Article),
            "video" => Ok(Self::Video),
            other => Err(ParsePreferenceError {
                kind: "playback",
                raw: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// The UI preferences kept in the local key-value cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiPreferences {
    pub theme: ThemeMode,
    pub layout: LayoutMode,
    pub playback: PlaybackMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_back() {
        for theme in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(theme.as_key().parse::<ThemeMode>().unwrap(), theme);
        }
        assert_eq!("list".parse::<LayoutMode>().unwrap(), LayoutMode::List);
        assert_eq!(" video ".parse::<PlaybackMode>().unwrap(), PlaybackMode::Video);
    }

    #[test]
    fn unknown_value_is_an_error() {
        let err = "sepia".parse::<ThemeMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown theme value: sepia");
    }

    #[test]
    fn defaults() {
        let prefs = UiPreferences::default();
        assert_eq!(prefs.theme, ThemeMode::Light);
        assert_eq!(prefs.layout, LayoutMode::Grid);
        assert_eq!(prefs.playback, PlaybackMode::Article);
    }
}
