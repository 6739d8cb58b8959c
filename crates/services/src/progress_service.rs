use std::sync::Arc;

use course_core::model::{Lesson, LessonId, UserId, UserProfile, UserProgress};
use course_core::progress::{Completion, PointsPolicy, Scope, completion_for, plan_completion};
use course_core::{Catalog, Clock, EntityKind, ResolveError};
use storage::repository::{ProgressRepository, StorageError};
use tracing::{debug, info, warn};

use crate::error::ProgressError;

const MAX_COMMIT_ATTEMPTS: u32 = 3;

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// Result of marking a lesson complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    /// A new completion record was stored.
    Recorded(UserProgress),
    /// The lesson was already completed; the stored record is returned unchanged.
    AlreadyCompleted(UserProgress),
}

impl MarkOutcome {
    #[must_use]
    pub fn progress(&self) -> &UserProgress {
        match self {
            Self::Recorded(p) | Self::AlreadyCompleted(p) => p,
        }
    }

    #[must_use]
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Records lesson completions and answers completion queries.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    catalog: Arc<Catalog>,
    repo: Arc<dyn ProgressRepository>,
    policy: PointsPolicy,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>, repo: Arc<dyn ProgressRepository>) -> Self {
        Self {
            clock,
            catalog,
            repo,
            policy: PointsPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: PointsPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Stored profile, or an empty one for a learner without history.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` on repository failures.
    pub async fn profile(&self, user_id: &UserId) -> Result<UserProfile, ProgressError> {
        Ok(self
            .repo
            .get_profile(user_id)
            .await?
            .unwrap_or_else(|| UserProfile::new(user_id.clone())))
    }

    /// Completion records ordered by completion time, then lesson id.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` on repository failures.
    pub async fn get_progress(&self, user_id: &UserId) -> Result<Vec<UserProgress>, ProgressError> {
        let mut events = self.repo.get_progress(user_id).await?;
        events.sort_by(|a, b| {
            a.completed_at
                .cmp(&b.completed_at)
                .then_with(|| a.lesson_id.cmp(&b.lesson_id))
        });
        Ok(events)
    }

    /// The most recent completions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` on repository failures.
    pub async fn recent_completions(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<UserProgress>, ProgressError> {
        let mut events = self.get_progress(user_id).await?;
        events.reverse();
        events.truncate(limit);
        Ok(events)
    }

    /// Mark a lesson complete for a learner.
    ///
    /// `lesson` may be a lesson slug or a lesson id. Completing the same lesson
    /// twice stores one record; the second call returns
    /// `MarkOutcome::AlreadyCompleted` with the original record.
    ///
    /// # Errors
    ///
    /// - `ProgressError::Resolve` if the lesson is blank or unknown
    /// - `ProgressError::Contended` if concurrent writers keep winning
    /// - `ProgressError::Storage` on other repository failures
    pub async fn mark_lesson_complete(
        &self,
        user_id: &UserId,
        lesson: &str,
        time_spent_minutes: u32,
    ) -> Result<MarkOutcome, ProgressError> {
        let lesson = self.resolve_lesson(lesson)?;

        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            if let Some(existing) = self.find_record(user_id, lesson.id()).await? {
                debug!(user = %user_id, lesson = %lesson.id(), "lesson already completed");
                return Ok(MarkOutcome::AlreadyCompleted(existing));
            }

            let profile = self.profile(user_id).await?;
            let Some(plan) = plan_completion(
                &self.catalog,
                &profile,
                lesson.id(),
                time_spent_minutes,
                self.clock.now(),
                self.policy,
            )?
            else {
                return Err(ProgressError::MissingRecord {
                    lesson: lesson.id().clone(),
                });
            };

            match self
                .repo
                .commit_completion(&plan.event, &plan.profile, plan.expected_version)
                .await
            {
                Ok(()) => {
                    info!(
                        user = %user_id,
                        lesson = %lesson.id(),
                        points = plan.profile.points(),
                        module_completed = plan.completed_module.is_some(),
                        phase_completed = plan.completed_phase.is_some(),
                        "lesson completion recorded"
                    );
                    return Ok(MarkOutcome::Recorded(plan.event));
                }
                Err(StorageError::Conflict) => {
                    warn!(
                        user = %user_id,
                        lesson = %lesson.id(),
                        attempt,
                        "completion conflicted, retrying"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ProgressError::Contended {
            attempts: MAX_COMMIT_ATTEMPTS,
        })
    }

    /// Completion across every lesson in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` on repository failures.
    pub async fn overall_completion(&self, user_id: &UserId) -> Result<Completion, ProgressError> {
        let profile = self.profile(user_id).await?;
        Ok(completion_for(&self.catalog, &profile, Scope::Overall))
    }

    /// # Errors
    ///
    /// - `ProgressError::Resolve` if no phase has this number
    /// - `ProgressError::Storage` on repository failures
    pub async fn phase_completion(
        &self,
        user_id: &UserId,
        phase_number: u32,
    ) -> Result<Completion, ProgressError> {
        let phase = self.catalog.resolve_phase(phase_number)?;
        let profile = self.profile(user_id).await?;
        Ok(completion_for(&self.catalog, &profile, Scope::Phase(phase.id())))
    }

    /// # Errors
    ///
    /// - `ProgressError::Resolve` if the phase or the module segment does not resolve
    /// - `ProgressError::Storage` on repository failures
    pub async fn module_completion(
        &self,
        user_id: &UserId,
        phase_number: u32,
        module_segment: &str,
    ) -> Result<Completion, ProgressError> {
        let phase = self.catalog.resolve_phase(phase_number)?;
        let module = self.catalog.resolve_module(phase.id(), module_segment)?;
        let profile = self.profile(user_id).await?;
        Ok(completion_for(&self.catalog, &profile, Scope::Module(module.id())))
    }

    fn resolve_lesson(&self, raw: &str) -> Result<&Lesson, ResolveError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(ResolveError::InvalidInput {
                kind: EntityKind::Lesson,
                raw: raw.to_owned(),
            });
        }
        match self.catalog.resolve_lesson(key) {
            Ok(lesson) => Ok(lesson),
            Err(by_slug) if by_slug.is_not_found() => self
                .catalog
                .lesson_by_id(&LessonId::new(key))
                .map_err(|_| by_slug),
            Err(e) => Err(e),
        }
    }

    async fn find_record(
        &self,
        user_id: &UserId,
        lesson_id: &LessonId,
    ) -> Result<Option<UserProgress>, ProgressError> {
        Ok(self
            .repo
            .get_progress(user_id)
            .await?
            .into_iter()
            .find(|e| &e.lesson_id == lesson_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use course_core::model::PhaseId;
    use course_core::time::fixed_clock;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use storage::repository::InMemoryRepository;

    fn svc(repo: Arc<dyn ProgressRepository>) -> ProgressService {
        ProgressService::new(fixed_clock(), Arc::new(Catalog::builtin().unwrap()), repo)
    }

    fn user() -> UserId {
        UserId::new("learner")
    }

    /// Fails the first `failures` commits with `Conflict`, then delegates.
    struct FlakyRepo {
        inner: InMemoryRepository,
        failures: AtomicU32,
        commits: Mutex<u32>,
    }

    impl FlakyRepo {
        fn new(failures: u32) -> Self {
            Self {
                inner: InMemoryRepository::new(),
                failures: AtomicU32::new(failures),
                commits: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl ProgressRepository for FlakyRepo {
        async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError> {
            self.inner.get_profile(user_id).await
        }

        async fn get_progress(&self, user_id: &UserId) -> Result<Vec<UserProgress>, StorageError> {
            self.inner.get_progress(user_id).await
        }

        async fn commit_completion(
            &self,
            event: &UserProgress,
            profile: &UserProfile,
            expected_version: u64,
        ) -> Result<(), StorageError> {
            *self.commits.lock().unwrap() += 1;
            let left = self.failures.load(Ordering::SeqCst);
            if left > 0 {
                self.failures.store(left - 1, Ordering::SeqCst);
                return Err(StorageError::Conflict);
            }
            self.inner
                .commit_completion(event, profile, expected_version)
                .await
        }
    }

    #[tokio::test]
    async fn marking_twice_keeps_one_record() {
        let repo = Arc::new(InMemoryRepository::new());
        let svc = svc(repo.clone());

        let first = svc
            .mark_lesson_complete(&user(), "how-the-web-works", 12)
            .await
            .unwrap();
        assert!(first.is_recorded());

        let second = svc
            .mark_lesson_complete(&user(), "how-the-web-works", 30)
            .await
            .unwrap();
        assert_eq!(second, MarkOutcome::AlreadyCompleted(first.progress().clone()));
        assert_eq!(second.progress().time_spent_minutes, 12);

        assert_eq!(repo.get_progress(&user()).await.unwrap().len(), 1);
        assert_eq!(svc.profile(&user()).await.unwrap().points(), 10);
    }

    #[tokio::test]
    async fn lesson_can_be_named_by_id() {
        let svc = svc(Arc::new(InMemoryRepository::new()));
        let outcome = svc
            .mark_lesson_complete(&user(), "lesson-goroutines", 32)
            .await
            .unwrap();
        assert_eq!(outcome.progress().lesson_id, LessonId::new("lesson-goroutines"));
        assert_eq!(outcome.progress().phase_id, PhaseId::new("phase-backend"));
    }

    #[tokio::test]
    async fn unknown_and_blank_lessons_are_rejected() {
        let svc = svc(Arc::new(InMemoryRepository::new()));
        let err = svc
            .mark_lesson_complete(&user(), "no-such-lesson", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::Resolve(ResolveError::NotFound { .. })));

        let err = svc.mark_lesson_complete(&user(), "  ", 1).await.unwrap_err();
        assert!(matches!(
            err,
            ProgressError::Resolve(ResolveError::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn conflict_is_retried() {
        let repo = Arc::new(FlakyRepo::new(2));
        let svc = svc(repo.clone());
        let outcome = svc
            .mark_lesson_complete(&user(), "html-structure", 5)
            .await
            .unwrap();
        assert!(outcome.is_recorded());
        assert_eq!(*repo.commits.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn persistent_conflict_gives_up() {
        let repo = Arc::new(FlakyRepo::new(10));
        let svc = svc(repo.clone());
        let err = svc
            .mark_lesson_complete(&user(), "html-structure", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::Contended { attempts: 3 }));
        assert!(repo.inner.get_progress(&user()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn completion_percentages_follow_records() {
        let svc = svc(Arc::new(InMemoryRepository::new()));
        let empty = svc.module_completion(&user(), 1, "web-basics").await.unwrap();
        assert_eq!(empty.fraction(), 0.0);

        svc.mark_lesson_complete(&user(), "how-the-web-works", 1)
            .await
            .unwrap();
        let one = svc.module_completion(&user(), 1, "web-basics").await.unwrap();
        assert_eq!(one.fraction(), 1.0 / 3.0);

        for slug in ["html-structure", "css-box-model"] {
            svc.mark_lesson_complete(&user(), slug, 1).await.unwrap();
        }
        let all = svc.module_completion(&user(), 1, "1").await.unwrap();
        assert_eq!(all.fraction(), 1.0);

        let err = svc.module_completion(&user(), 9, "web-basics").await.unwrap_err();
        assert!(matches!(err, ProgressError::Resolve(ref e) if e.is_not_found()));
        let err = svc.module_completion(&user(), 3, "web-basics").await.unwrap_err();
        assert!(matches!(err, ProgressError::Resolve(_)));

        let phase_c = svc.phase_completion(&user(), 1).await.unwrap();
        assert_eq!(phase_c.completed(), 3);
        assert_eq!(phase_c.total(), 6);

        let overall = svc.overall_completion(&user()).await.unwrap();
        assert_eq!(overall.completed(), 3);
        assert_eq!(overall.total(), 14);

        assert_eq!(svc.profile(&user()).await.unwrap().points(), 30 + 50);
    }

    #[tokio::test]
    async fn unknown_phase_number_is_not_found() {
        let svc = svc(Arc::new(InMemoryRepository::new()));
        let err = svc.phase_completion(&user(), 9).await.unwrap_err();
        assert!(matches!(err, ProgressError::Resolve(e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn recent_completions_are_newest_first() {
        let repo: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        let early = ProgressService::new(
            Clock::fixed(course_core::time::fixed_now()),
            Arc::new(Catalog::builtin().unwrap()),
            Arc::clone(&repo),
        );
        let late = ProgressService::new(
            Clock::fixed(course_core::time::fixed_now() + chrono::Duration::hours(1)),
            Arc::new(Catalog::builtin().unwrap()),
            Arc::clone(&repo),
        );
        early
            .mark_lesson_complete(&user(), "components", 1)
            .await
            .unwrap();
        late.mark_lesson_complete(&user(), "go-syntax", 1)
            .await
            .unwrap();

        let recent = early.recent_completions(&user(), 1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].lesson_id, LessonId::new("lesson-go-syntax"));

        let ordered = early.get_progress(&user()).await.unwrap();
        assert_eq!(ordered[0].lesson_id, LessonId::new("lesson-components"));
    }
}
