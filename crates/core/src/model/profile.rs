use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::model::ids::{LessonId, ModuleId, PhaseId, UserId};

/// One lesson completion event. Created exactly once per (user, lesson).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub user_id: UserId,
    pub lesson_id: LessonId,
    pub module_id: ModuleId,
    pub phase_id: PhaseId,
    pub completed_at: DateTime<Utc>,
    pub time_spent_minutes: u32,
}

/// Issued when every lesson of a phase has been completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: Uuid,
    pub phase_id: PhaseId,
    pub issued_at: DateTime<Utc>,
}

impl Certificate {
    /// Certificate ids are derived from (user, phase) so re-issuing is stable.
    #[must_use]
    pub fn issue(user_id: &UserId, phase_id: PhaseId, issued_at: DateTime<Utc>) -> Self {
        let name = format!("{user_id}/{phase_id}");
        Self {
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()),
            phase_id,
            issued_at,
        }
    }
}

/// Aggregated completion state of a learner.
///
/// `version` increases by one on every committed change and is what
/// repositories compare against for optimistic concurrency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    user_id: UserId,
    completed_lessons: BTreeSet<LessonId>,
    completed_modules: BTreeSet<ModuleId>,
    completed_phases: BTreeSet<PhaseId>,
    points: u32,
    certificates: Vec<Certificate>,
    version: u64,
}

impl UserProfile {
    /// Empty profile for a learner with no stored state.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            completed_lessons: BTreeSet::new(),
            completed_modules: BTreeSet::new(),
            completed_phases: BTreeSet::new(),
            points: 0,
            certificates: Vec::new(),
            version: 0,
        }
    }

    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        user_id: UserId,
        completed_lessons: BTreeSet<LessonId>,
        completed_modules: BTreeSet<ModuleId>,
        completed_phases: BTreeSet<PhaseId>,
        points: u32,
        certificates: Vec<Certificate>,
        version: u64,
    ) -> Self {
        Self {
            user_id,
            completed_lessons,
            completed_modules,
            completed_phases,
            points,
            certificates,
            version,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn completed_lessons(&self) -> &BTreeSet<LessonId> {
        &self.completed_lessons
    }

    #[must_use]
    pub fn completed_modules(&self) -> &BTreeSet<ModuleId> {
        &self.completed_modules
    }

    #[must_use]
    pub fn completed_phases(&self) -> &BTreeSet<PhaseId> {
        &self.completed_phases
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn has_completed(&self, lesson_id: &LessonId) -> bool {
        self.completed_lessons.contains(lesson_id)
    }

    pub(crate) fn record_lesson(&mut self, lesson_id: LessonId) -> bool {
        self.completed_lessons.insert(lesson_id)
    }

    pub(crate) fn record_module(&mut self, module_id: ModuleId) -> bool {
        self.completed_modules.insert(module_id)
    }

    pub(crate) fn record_phase(&mut self, phase_id: PhaseId) -> bool {
        self.completed_phases.insert(phase_id)
    }

    pub(crate) fn add_points(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }

    pub(crate) fn push_certificate(&mut self, certificate: Certificate) {
        self.certificates.push(certificate);
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }
}
