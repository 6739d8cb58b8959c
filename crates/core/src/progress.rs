use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::error::ResolveError;
use crate::model::{
    Certificate, Lesson, LessonId, ModuleId, PhaseId, UserProfile, UserProgress,
};

/// Completed vs. total leaf lessons within a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Completion {
    completed: u32,
    total: u32,
}

impl Completion {
    /// `completed` is clamped to `total`.
    #[must_use]
    pub fn new(completed: u32, total: u32) -> Self {
        Self {
            completed: completed.min(total),
            total,
        }
    }

    #[must_use]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// `completed / total`; an empty scope is `0.0`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.completed) / f64::from(self.total)
    }

    /// Whole-number percentage, rounded half up.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let scaled = (u64::from(self.completed) * 100 + u64::from(self.total) / 2)
            / u64::from(self.total);
        u8::try_from(scaled).unwrap_or(100)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    Overall,
    Phase(&'a PhaseId),
    Module(&'a ModuleId),
}

fn lessons_in<'c>(catalog: &'c Catalog, scope: Scope<'_>) -> Vec<&'c Lesson> {
    match scope {
        Scope::Overall => catalog.lessons().iter().collect(),
        Scope::Phase(phase_id) => catalog.lessons_of_phase(phase_id),
        Scope::Module(module_id) => catalog.lessons_of(module_id),
    }
}

/// Completion of a scope for a profile.
///
/// Totals are recomputed from the catalog on every call. Completed lesson ids
/// that are no longer in the scope do not count.
#[must_use]
pub fn completion_for(catalog: &Catalog, profile: &UserProfile, scope: Scope<'_>) -> Completion {
    let lessons = lessons_in(catalog, scope);
    let done = lessons
        .iter()
        .filter(|lesson| profile.has_completed(lesson.id()))
        .count();
    Completion::new(saturating_u32(done), saturating_u32(lessons.len()))
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Points awarded for progress milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsPolicy {
    pub per_lesson: u32,
    pub module_bonus: u32,
    pub phase_bonus: u32,
}

impl Default for PointsPolicy {
    fn default() -> Self {
        Self {
            per_lesson: 10,
            module_bonus: 50,
            phase_bonus: 200,
        }
    }
}

/// The next profile state and the event to commit with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPlan {
    pub event: UserProgress,
    pub profile: UserProfile,
    pub expected_version: u64,
    pub completed_module: Option<ModuleId>,
    pub completed_phase: Option<PhaseId>,
}

/// Plan the profile update for completing `lesson_id`.
///
/// Returns `Ok(None)` when the profile already holds the lesson.
///
/// # Errors
///
/// Returns `ResolveError` if the lesson is unknown or its parents are missing.
pub fn plan_completion(
    catalog: &Catalog,
    profile: &UserProfile,
    lesson_id: &LessonId,
    time_spent_minutes: u32,
    at: DateTime<Utc>,
    policy: PointsPolicy,
) -> Result<Option<CompletionPlan>, ResolveError> {
    let lesson = catalog.lesson_by_id(lesson_id)?;
    let module = catalog.module_of(lesson)?;
    let phase = catalog.phase_of(module)?;

    if profile.has_completed(lesson.id()) {
        return Ok(None);
    }

    let mut next = profile.clone();
    next.record_lesson(lesson.id().clone());
    next.add_points(policy.per_lesson);

    let mut completed_module = None;
    if completion_for(catalog, &next, Scope::Module(module.id())).is_complete()
        && next.record_module(module.id().clone())
    {
        next.add_points(policy.module_bonus);
        completed_module = Some(module.id().clone());
    }

    let mut completed_phase = None;
    if completion_for(catalog, &next, Scope::Phase(phase.id())).is_complete()
        && next.record_phase(phase.id().clone())
    {
        next.add_points(policy.phase_bonus);
        next.push_certificate(Certificate::issue(
            profile.user_id(),
            phase.id().clone(),
            at,
        ));
        completed_phase = Some(phase.id().clone());
    }
    next.bump_version();

    let event = UserProgress {
        user_id: profile.user_id().clone(),
        lesson_id: lesson.id().clone(),
        module_id: module.id().clone(),
        phase_id: phase.id().clone(),
        completed_at: at,
        time_spent_minutes,
    };

    Ok(Some(CompletionPlan {
        event,
        profile: next,
        expected_version: profile.version(),
        completed_module,
        completed_phase,
    }))
}
