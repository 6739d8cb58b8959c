use async_trait::async_trait;
use course_core::Catalog;
use course_core::model::{Course, Topic, UserId, UserProfile, UserProgress};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for learner progress.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the stored profile, if the learner has one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError>;

    /// All completion events of a learner. Callers must not rely on ordering.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_progress(&self, user_id: &UserId) -> Result<Vec<UserProgress>, StorageError>;

    /// Atomically store a completion event together with the updated profile.
    ///
    /// The write only happens when the stored profile version equals
    /// `expected_version` (0 for a learner without a stored profile) and no
    /// event exists yet for the same (user, lesson).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` when either precondition fails, or
    /// other storage errors.
    async fn commit_completion(
        &self,
        event: &UserProgress,
        profile: &UserProfile,
        expected_version: u64,
    ) -> Result<(), StorageError>;
}

/// Local key-value cache for UI preferences.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_preference(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn set_preference(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read access to language tracks and their topics.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_course(&self, slug: &str) -> Result<Option<Course>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_topics(&self) -> Result<Vec<Topic>, StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

#[derive(Default)]
struct ProgressState {
    profiles: HashMap<UserId, UserProfile>,
    events: HashMap<UserId, Vec<UserProgress>>,
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Profiles and events share one lock so a commit is a single critical section.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<ProgressState>>,
    preferences: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError> {
        let guard = self.progress.lock().map_err(poisoned)?;
        Ok(guard.profiles.get(user_id).cloned())
    }

    async fn get_progress(&self, user_id: &UserId) -> Result<Vec<UserProgress>, StorageError> {
        let guard = self.progress.lock().map_err(poisoned)?;
        Ok(guard.events.get(user_id).cloned().unwrap_or_default())
    }

    async fn commit_completion(
        &self,
        event: &UserProgress,
        profile: &UserProfile,
        expected_version: u64,
    ) -> Result<(), StorageError> {
        if profile.user_id() != &event.user_id {
            return Err(StorageError::Serialization(
                "event and profile belong to different users".into(),
            ));
        }

        let mut guard = self.progress.lock().map_err(poisoned)?;
        let stored_version = guard
            .profiles
            .get(&event.user_id)
            .map_or(0, UserProfile::version);
        if stored_version != expected_version {
            debug!(
                user = %event.user_id,
                stored_version,
                expected_version,
                "profile version moved"
            );
            return Err(StorageError::Conflict);
        }
        let duplicate = guard
            .events
            .get(&event.user_id)
            .is_some_and(|events| events.iter().any(|e| e.lesson_id == event.lesson_id));
        if duplicate {
            return Err(StorageError::Conflict);
        }

        guard
            .events
            .entry(event.user_id.clone())
            .or_default()
            .push(event.clone());
        guard
            .profiles
            .insert(event.user_id.clone(), profile.clone());
        Ok(())
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryRepository {
    async fn get_preference(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.preferences.lock().map_err(poisoned)?;
        Ok(guard.get(key).cloned())
    }

    async fn set_preference(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.preferences.lock().map_err(poisoned)?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Course repository over the immutable content tables.
#[derive(Clone)]
pub struct CatalogCourseRepository {
    catalog: Arc<Catalog>,
}

impl CatalogCourseRepository {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CourseRepository for CatalogCourseRepository {
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        Ok(self.catalog.courses().to_vec())
    }

    async fn get_course(&self, slug: &str) -> Result<Option<Course>, StorageError> {
        Ok(self
            .catalog
            .courses()
            .iter()
            .find(|c| c.slug().as_str() == slug)
            .cloned())
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, StorageError> {
        Ok(self.catalog.topics().to_vec())
    }
}

/// Aggregates the mutable stores behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub preferences: Arc<dyn PreferenceRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let preferences: Arc<dyn PreferenceRepository> = Arc::new(repo);
        Self {
            progress,
            preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::{LessonId, ModuleId, PhaseId};
    use course_core::progress::{PointsPolicy, plan_completion};
    use course_core::time::fixed_now;

    fn event(user: &str, lesson: &str) -> UserProgress {
        UserProgress {
            user_id: UserId::new(user),
            lesson_id: LessonId::new(lesson),
            module_id: ModuleId::new("m"),
            phase_id: PhaseId::new("p"),
            completed_at: fixed_now(),
            time_spent_minutes: 5,
        }
    }

    fn bumped(user: &str, version: u64) -> UserProfile {
        UserProfile::from_persisted(
            UserId::new(user),
            Default::default(),
            Default::default(),
            Default::default(),
            0,
            vec![],
            version,
        )
    }

    #[tokio::test]
    async fn commit_stores_event_and_profile() {
        let repo = InMemoryRepository::new();
        repo.commit_completion(&event("u", "l1"), &bumped("u", 1), 0)
            .await
            .unwrap();

        let profile = repo.get_profile(&UserId::new("u")).await.unwrap().unwrap();
        assert_eq!(profile.version(), 1);
        assert_eq!(repo.get_progress(&UserId::new("u")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stale_version_is_a_conflict() {
        let repo = InMemoryRepository::new();
        repo.commit_completion(&event("u", "l1"), &bumped("u", 1), 0)
            .await
            .unwrap();

        let err = repo
            .commit_completion(&event("u", "l2"), &bumped("u", 1), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
        assert_eq!(repo.get_progress(&UserId::new("u")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_lesson_is_a_conflict() {
        let repo = InMemoryRepository::new();
        repo.commit_completion(&event("u", "l1"), &bumped("u", 1), 0)
            .await
            .unwrap();
        let err = repo
            .commit_completion(&event("u", "l1"), &bumped("u", 2), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn commit_accepts_planned_completion() {
        let catalog = Catalog::builtin().unwrap();
        let repo = InMemoryRepository::new();
        let lesson = catalog.resolve_lesson("how-the-web-works").unwrap();
        let plan = plan_completion(
            &catalog,
            &UserProfile::new(UserId::new("u")),
            lesson.id(),
            12,
            fixed_now(),
            PointsPolicy::default(),
        )
        .unwrap()
        .unwrap();

        repo.commit_completion(&plan.event, &plan.profile, plan.expected_version)
            .await
            .unwrap();
        let stored = repo.get_profile(&UserId::new("u")).await.unwrap().unwrap();
        assert!(stored.has_completed(lesson.id()));
    }

    #[tokio::test]
    async fn preferences_round_trip() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.get_preference("ui.theme").await.unwrap(), None);
        repo.set_preference("ui.theme", "dark").await.unwrap();
        assert_eq!(
            repo.get_preference("ui.theme").await.unwrap().as_deref(),
            Some("dark")
        );
    }

    #[tokio::test]
    async fn catalog_course_repository_lists_tables() {
        let repo = CatalogCourseRepository::new(Arc::new(Catalog::builtin().unwrap()));
        let courses = repo.list_courses().await.unwrap();
        assert_eq!(courses[0].slug().as_str(), "javascript");
        assert!(repo.get_course("go").await.unwrap().is_some());
        assert!(repo.get_course("cobol").await.unwrap().is_none());
        assert!(!repo.list_topics().await.unwrap().is_empty());
    }
}
