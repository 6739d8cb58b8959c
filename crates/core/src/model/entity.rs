use thiserror::Error;

use crate::model::slug::{Slug, SlugError};

/// Validation failures shared by the curriculum entities.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntityError {
    #[error("{kind} id cannot be empty")]
    EmptyId { kind: &'static str },

    #[error("{kind} title cannot be empty")]
    EmptyTitle { kind: &'static str },

    #[error("phase number must be > 0")]
    ZeroPhaseNumber,

    #[error("{kind} has an invalid url: {raw}")]
    InvalidUrl { kind: &'static str, raw: String },

    #[error(transparent)]
    Slug(#[from] SlugError),
}

pub(crate) fn require_id(kind: &'static str, blank: bool) -> Result<(), EntityError> {
    if blank {
        return Err(EntityError::EmptyId { kind });
    }
    Ok(())
}

pub(crate) fn require_title(kind: &'static str, title: String) -> Result<String, EntityError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(EntityError::EmptyTitle { kind });
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

pub(crate) fn optional_url(
    kind: &'static str,
    value: Option<String>,
) -> Result<Option<String>, EntityError> {
    let Some(raw) = optional_text(value) else {
        return Ok(None);
    };
    if url::Url::parse(&raw).is_err() {
        return Err(EntityError::InvalidUrl { kind, raw });
    }
    Ok(Some(raw))
}

pub(crate) fn slug(raw: &str) -> Result<Slug, EntityError> {
    Ok(Slug::new(raw)?)
}
