#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod catalog_service;
pub mod error;
pub mod preferences_service;
pub mod progress_service;

pub use course_core::Clock;

pub use app_services::AppServices;
pub use auth::{AuthProvider, AuthUser, Credentials, DemoAuthProvider};
pub use catalog_service::CatalogService;
pub use error::{AppServicesError, AuthError, CatalogServiceError, PreferencesError, ProgressError};
pub use preferences_service::PreferencesService;
pub use progress_service::{MarkOutcome, ProgressService};
