use services::{CatalogServiceError, ProgressError};
use course_core::ResolveError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    NotFound,
    InvalidInput,
    Unavailable,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::NotFound => "We couldn't find that page.",
            ViewError::InvalidInput => "That address doesn't look right.",
            ViewError::Unavailable => "Something went wrong. Please try again.",
        }
    }
}

impl From<&ResolveError> for ViewError {
    fn from(err: &ResolveError) -> Self {
        match err {
            ResolveError::InvalidInput { .. } => ViewError::InvalidInput,
            _ => ViewError::NotFound,
        }
    }
}

impl From<&ProgressError> for ViewError {
    fn from(err: &ProgressError) -> Self {
        match err {
            ProgressError::Resolve(e) => e.into(),
            _ => ViewError::Unavailable,
        }
    }
}

impl From<&CatalogServiceError> for ViewError {
    fn from(err: &CatalogServiceError) -> Self {
        match err {
            CatalogServiceError::Resolve(e) => e.into(),
            _ => ViewError::Unavailable,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

impl<T> ViewState<T> {
    #[must_use]
    pub fn from_result(result: Result<T, ViewError>) -> Self {
        match result {
            Ok(value) => ViewState::Ready(value),
            Err(err) => ViewState::Error(err),
        }
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }
}
