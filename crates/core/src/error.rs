use std::fmt;
use thiserror::Error;

use crate::hierarchy::LessonLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Phase,
    Module,
    Lesson,
    Project,
    Course,
    Topic,
}

impl EntityKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Phase => "phase",
            EntityKind::Module => "module",
            EntityKind::Lesson => "lesson",
            EntityKind::Project => "project",
            EntityKind::Course => "course",
            EntityKind::Topic => "topic",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup failures of the hierarchy resolver.
///
/// All variants are recoverable at the presentation boundary:
/// - `NotFound` renders the not-found view
/// - `InvalidInput` renders the invalid-input view
/// - `Inconsistent` carries the canonical lesson location when one exists
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: EntityKind, key: String },

    #[error("invalid {kind} segment: {raw:?}")]
    InvalidInput { kind: EntityKind, raw: String },

    #[error("{kind} {key} does not belong to the requested parent")]
    Inconsistent {
        kind: EntityKind,
        key: String,
        canonical: Option<LessonLocation>,
    },
}

impl ResolveError {
    pub(crate) fn not_found(kind: EntityKind, key: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    pub(crate) fn inconsistent(kind: EntityKind, key: impl fmt::Display) -> Self {
        Self::Inconsistent {
            kind,
            key: key.to_string(),
            canonical: None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
