use std::sync::Arc;

use course_core::model::{Course, Lesson, Module, Phase, Topic};
use course_core::{Catalog, EntityKind, ResolveError, filter_for_course};
use storage::repository::CourseRepository;
use tracing::debug;

use crate::error::CatalogServiceError;

/// Read-side facade over the content tables and the course repository.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<Catalog>,
    courses: Arc<dyn CourseRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, courses: Arc<dyn CourseRepository>) -> Self {
        Self { catalog, courses }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` on repository failures.
    pub async fn list_courses(&self) -> Result<Vec<Course>, CatalogServiceError> {
        let mut courses = self.courses.list_courses().await?;
        courses.sort_by_key(Course::order);
        Ok(courses)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown course slug, or a storage error.
    pub async fn course(&self, slug: &str) -> Result<Course, CatalogServiceError> {
        self.courses.get_course(slug).await?.ok_or_else(|| {
            debug!(course = slug, "unknown course");
            CatalogServiceError::Resolve(ResolveError::NotFound {
                kind: EntityKind::Course,
                key: slug.to_owned(),
            })
        })
    }

    /// Topics owned by a course. Unknown slugs yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` on repository failures.
    pub async fn topics_for_course(&self, slug: &str) -> Result<Vec<Topic>, CatalogServiceError> {
        let topics = self.courses.list_topics().await?;
        let filter = filter_for_course(slug);
        let mut selected: Vec<Topic> = filter.select(&topics).into_iter().cloned().collect();
        selected.sort_by_key(Topic::order);
        debug!(course = slug, topics = selected.len(), "topics selected");
        Ok(selected)
    }

    /// A topic inside a course; topics owned by another course are `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the course does not own a topic with this slug.
    pub async fn topic(&self, course: &str, topic: &str) -> Result<Topic, CatalogServiceError> {
        self.topics_for_course(course)
            .await?
            .into_iter()
            .find(|t| t.slug().as_str() == topic)
            .ok_or_else(|| {
                CatalogServiceError::Resolve(ResolveError::NotFound {
                    kind: EntityKind::Topic,
                    key: format!("{course}/{topic}"),
                })
            })
    }

    /// # Errors
    ///
    /// Returns `ResolveError` for malformed or unknown phase segments.
    pub fn phase(&self, segment: &str) -> Result<&Phase, ResolveError> {
        let number = course_core::parse_phase_number(segment)?;
        self.catalog.resolve_phase(number).inspect_err(|e| {
            debug!(phase = segment, error = %e, "phase lookup failed");
        })
    }

    /// # Errors
    ///
    /// Returns `ResolveError` when the phase or the module does not resolve.
    pub fn module(&self, phase_segment: &str, module: &str) -> Result<(&Phase, &Module), ResolveError> {
        let phase = self.phase(phase_segment)?;
        let module = self.catalog.resolve_module(phase.id(), module).inspect_err(|e| {
            debug!(phase = phase_segment, module, error = %e, "module lookup failed");
        })?;
        Ok((phase, module))
    }

    /// # Errors
    ///
    /// Returns `ResolveError`; `Inconsistent` carries the canonical location.
    pub fn lesson(
        &self,
        phase_segment: &str,
        module: &str,
        lesson: &str,
    ) -> Result<&Lesson, ResolveError> {
        self.catalog
            .resolve_lesson_path(phase_segment, module, lesson)
            .inspect_err(|e| {
                debug!(phase = phase_segment, module, lesson, error = %e, "lesson lookup failed");
            })
    }
}
