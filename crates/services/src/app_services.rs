use std::sync::Arc;

use course_core::Catalog;
use storage::repository::{CatalogCourseRepository, CourseRepository, Storage};
use tracing::info;

use crate::Clock;
use crate::auth::{AuthProvider, DemoAuthProvider};
use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::preferences_service::PreferencesService;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one catalog and one storage backend.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
    preferences: Arc<PreferencesService>,
    auth: Arc<dyn AuthProvider>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the bundled catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the catalog is invalid or storage
    /// initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(Catalog::builtin()?);
        let storage = Storage::sqlite(db_url).await?;
        info!(
            phases = catalog.phases().len(),
            lessons = catalog.lessons().len(),
            "services ready"
        );
        Ok(Self::from_parts(clock, catalog, storage))
    }

    /// Build services over in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Catalog` if the bundled catalog is invalid.
    pub fn new_in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(Catalog::builtin()?);
        Ok(Self::from_parts(clock, catalog, Storage::in_memory()))
    }

    #[must_use]
    pub fn from_parts(clock: Clock, catalog: Arc<Catalog>, storage: Storage) -> Self {
        let courses: Arc<dyn CourseRepository> =
            Arc::new(CatalogCourseRepository::new(Arc::clone(&catalog)));
        Self {
            catalog: Arc::new(CatalogService::new(Arc::clone(&catalog), courses)),
            progress: Arc::new(ProgressService::new(
                clock,
                catalog,
                Arc::clone(&storage.progress),
            )),
            preferences: Arc::new(PreferencesService::new(Arc::clone(&storage.preferences))),
            auth: Arc::new(DemoAuthProvider::new()),
        }
    }

    /// Swap the sign-in provider.
    #[must_use]
    pub fn with_auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = auth;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<PreferencesService> {
        Arc::clone(&self.preferences)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<dyn AuthProvider> {
        Arc::clone(&self.auth)
    }
}
