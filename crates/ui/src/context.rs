use std::sync::Arc;

use services::{AuthProvider, CatalogService, PreferencesService, ProgressService};

/// Services the UI layer consumes. Implemented by the composition root.
pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<CatalogService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn preferences(&self) -> Arc<PreferencesService>;
    fn auth(&self) -> Arc<dyn AuthProvider>;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
    preferences: Arc<PreferencesService>,
    auth: Arc<dyn AuthProvider>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            progress: app.progress(),
            preferences: app.preferences(),
            auth: app.auth(),
        }
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
