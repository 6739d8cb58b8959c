use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SlugError {
    #[error("slug cannot be empty")]
    Empty,

    #[error("slug contains invalid character {0:?}")]
    InvalidChar(char),

    #[error("slug cannot start or end with a hyphen")]
    EdgeHyphen,

    #[error("slug cannot contain consecutive hyphens")]
    DoubleHyphen,
}

/// URL-safe routable identifier: lowercase ASCII letters, digits and single hyphens.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validates and wraps a slug.
    ///
    /// # Errors
    ///
    /// Returns `SlugError` if the value is empty, has characters outside
    /// `[a-z0-9-]`, or misplaces hyphens.
    pub fn new(raw: impl Into<String>) -> Result<Self, SlugError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(SlugError::Empty);
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidChar(bad));
        }
        if raw.starts_with('-') || raw.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }
        if raw.contains("--") {
            return Err(SlugError::DoubleHyphen);
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Slug {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Debug for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slug({})", self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_kebab_case() {
        let slug = Slug::new("state-and-props-2").unwrap();
        assert_eq!(slug.as_str(), "state-and-props-2");
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!(Slug::new(""), Err(SlugError::Empty));
        assert_eq!(Slug::new("Hello"), Err(SlugError::InvalidChar('H')));
        assert_eq!(Slug::new("a b"), Err(SlugError::InvalidChar(' ')));
        assert_eq!(Slug::new("-intro"), Err(SlugError::EdgeHyphen));
        assert_eq!(Slug::new("intro-"), Err(SlugError::EdgeHyphen));
        assert_eq!(Slug::new("intro--html"), Err(SlugError::DoubleHyphen));
    }

    #[test]
    fn deserialize_validates() {
        let ok: Slug = serde_json::from_str("\"go-basics\"").unwrap();
        assert_eq!(ok.as_str(), "go-basics");
        assert!(serde_json::from_str::<Slug>("\"Go Basics\"").is_err());
    }
}
