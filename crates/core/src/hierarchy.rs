//! Slug / number / id resolution over the curriculum tables.
//!
//! Everything here is a pure function of `&Catalog`. Missing data is reported
//! as `ResolveError` for the caller to branch on; nothing panics.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{EntityKind, ResolveError};
use crate::model::{Lesson, LessonId, Module, ModuleId, Phase, PhaseId, Project, Slug};

/// Canonical routable position of a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonLocation {
    pub phase_number: u32,
    pub module_slug: Slug,
    pub lesson_slug: Slug,
}

/// Adjacent lessons within the same module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonNeighbors<'a> {
    pub previous: Option<&'a Lesson>,
    pub next: Option<&'a Lesson>,
}

/// Parse a phase path segment.
///
/// # Errors
///
/// Returns `ResolveError::InvalidInput` unless the segment is a positive
/// decimal integer.
pub fn parse_phase_number(segment: &str) -> Result<u32, ResolveError> {
    let invalid = || ResolveError::InvalidInput {
        kind: EntityKind::Phase,
        raw: segment.to_owned(),
    };
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match segment.parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(n) => Ok(n),
    }
}

pub(crate) fn is_number_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

impl Catalog {
    //
    // ─── PHASES ────────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `ResolveError::NotFound` if no phase has this number.
    pub fn resolve_phase(&self, number: u32) -> Result<&Phase, ResolveError> {
        self.phases()
            .iter()
            .find(|p| p.number() == number)
            .ok_or_else(|| ResolveError::not_found(EntityKind::Phase, number))
    }

    /// # Errors
    ///
    /// Returns `ResolveError::NotFound` if the id is unknown.
    pub fn phase_by_id(&self, id: &PhaseId) -> Result<&Phase, ResolveError> {
        self.phases()
            .iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| ResolveError::not_found(EntityKind::Phase, id))
    }

    //
    // ─── MODULES ───────────────────────────────────────────────────────────────
    //

    /// Modules of a phase in sibling order.
    #[must_use]
    pub fn modules_of(&self, phase_id: &PhaseId) -> Vec<&Module> {
        self.modules()
            .iter()
            .filter(|m| m.phase_id() == phase_id)
            .collect()
    }

    /// Resolve a module segment (slug or order number) inside a phase.
    ///
    /// # Errors
    ///
    /// - `NotFound` if nothing in the phase matches
    /// - `Inconsistent` if the slug exists, but only under another phase
    pub fn resolve_module(&self, phase_id: &PhaseId, segment: &str) -> Result<&Module, ResolveError> {
        if is_number_segment(segment) {
            let order = segment.parse::<u32>().ok();
            return self
                .modules_of(phase_id)
                .into_iter()
                .find(|m| Some(m.order()) == order)
                .ok_or_else(|| ResolveError::not_found(EntityKind::Module, segment));
        }

        if let Some(module) = self
            .modules_of(phase_id)
            .into_iter()
            .find(|m| m.slug().as_str() == segment)
        {
            return Ok(module);
        }

        if self.modules().iter().any(|m| m.slug().as_str() == segment) {
            return Err(ResolveError::inconsistent(EntityKind::Module, segment));
        }
        Err(ResolveError::not_found(EntityKind::Module, segment))
    }

    /// # Errors
    ///
    /// Returns `ResolveError::NotFound` if the id is unknown.
    pub fn module_by_id(&self, id: &ModuleId) -> Result<&Module, ResolveError> {
        self.modules()
            .iter()
            .find(|m| m.id() == id)
            .ok_or_else(|| ResolveError::not_found(EntityKind::Module, id))
    }

    /// The parent phase of a module.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Inconsistent` if the module's phase is missing.
    pub fn phase_of(&self, module: &Module) -> Result<&Phase, ResolveError> {
        self.phase_by_id(module.phase_id())
            .map_err(|_| ResolveError::inconsistent(EntityKind::Module, module.id()))
    }

    //
    // ─── LESSONS ───────────────────────────────────────────────────────────────
    //

    /// Lessons of a module in sibling order.
    #[must_use]
    pub fn lessons_of(&self, module_id: &ModuleId) -> Vec<&Lesson> {
        self.lessons()
            .iter()
            .filter(|l| l.module_id() == module_id)
            .collect()
    }

    /// All lessons under a phase, module by module.
    #[must_use]
    pub fn lessons_of_phase(&self, phase_id: &PhaseId) -> Vec<&Lesson> {
        self.modules_of(phase_id)
            .into_iter()
            .flat_map(|m| self.lessons_of(m.id()))
            .collect()
    }

    #[must_use]
    pub fn projects_of(&self, module_id: &ModuleId) -> Vec<&Project> {
        self.projects()
            .iter()
            .filter(|p| p.module_id() == module_id)
            .collect()
    }

    /// # Errors
    ///
    /// Returns `ResolveError::NotFound` if no lesson has this slug.
    pub fn resolve_lesson(&self, slug: &str) -> Result<&Lesson, ResolveError> {
        self.lessons()
            .iter()
            .find(|l| l.slug().as_str() == slug)
            .ok_or_else(|| ResolveError::not_found(EntityKind::Lesson, slug))
    }

    /// # Errors
    ///
    /// Returns `ResolveError::NotFound` if the id is unknown.
    pub fn lesson_by_id(&self, id: &LessonId) -> Result<&Lesson, ResolveError> {
        self.lessons()
            .iter()
            .find(|l| l.id() == id)
            .ok_or_else(|| ResolveError::not_found(EntityKind::Lesson, id))
    }

    /// The parent module of a lesson.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Inconsistent` if the lesson's module is missing.
    pub fn module_of(&self, lesson: &Lesson) -> Result<&Module, ResolveError> {
        self.module_by_id(lesson.module_id())
            .map_err(|_| ResolveError::inconsistent(EntityKind::Lesson, lesson.id()))
    }

    /// # Errors
    ///
    /// Returns `ResolveError::Inconsistent` if a parent is missing.
    pub fn location_of(&self, lesson: &Lesson) -> Result<LessonLocation, ResolveError> {
        let module = self.module_of(lesson)?;
        let phase = self.phase_of(module)?;
        Ok(LessonLocation {
            phase_number: phase.number(),
            module_slug: module.slug().clone(),
            lesson_slug: lesson.slug().clone(),
        })
    }

    /// Resolve a full `/phase/module/lesson` path.
    ///
    /// The lesson slug is authoritative. When the phase or module segments do
    /// not name the lesson's real parents, the result is `Inconsistent` with
    /// the canonical location attached so the caller can redirect.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a malformed phase segment
    /// - `NotFound` for an unknown lesson slug
    /// - `Inconsistent` for mismatched parent segments
    pub fn resolve_lesson_path(
        &self,
        phase_segment: &str,
        module_segment: &str,
        lesson_slug: &str,
    ) -> Result<&Lesson, ResolveError> {
        let phase_number = parse_phase_number(phase_segment)?;
        let lesson = self.resolve_lesson(lesson_slug)?;
        let module = self.module_of(lesson)?;
        let location = self.location_of(lesson)?;

        let module_matches = if is_number_segment(module_segment) {
            module_segment.parse::<u32>().ok() == Some(module.order())
        } else {
            module.slug().as_str() == module_segment
        };

        if location.phase_number != phase_number || !module_matches {
            return Err(ResolveError::Inconsistent {
                kind: EntityKind::Lesson,
                key: lesson_slug.to_owned(),
                canonical: Some(location),
            });
        }
        Ok(lesson)
    }

    /// Previous and next lesson inside the lesson's module.
    #[must_use]
    pub fn neighbors(&self, lesson: &Lesson) -> LessonNeighbors<'_> {
        let siblings = self.lessons_of(lesson.module_id());
        let Some(index) = siblings.iter().position(|l| l.id() == lesson.id()) else {
            return LessonNeighbors {
                previous: None,
                next: None,
            };
        };
        LessonNeighbors {
            previous: index.checked_sub(1).and_then(|i| siblings.get(i).copied()),
            next: siblings.get(index + 1).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LessonDraft;

    fn lesson(id: &str, module: &str, order: u32) -> Lesson {
        LessonDraft {
            id: id.into(),
            module_id: module.into(),
            slug: id.into(),
            title_th: id.into(),
            order,
            ..LessonDraft::default()
        }
        .validate()
        .unwrap()
    }

    /// Two phases; "intro" exists in phase 1 only, "tooling" in phase 2 only.
    fn catalog() -> Catalog {
        let phases = vec![
            Phase::new(PhaseId::new("p1"), 1, "One", 1).unwrap(),
            Phase::new(PhaseId::new("p2"), 2, "Two", 2).unwrap(),
        ];
        let modules = vec![
            Module::new(ModuleId::new("m1"), PhaseId::new("p1"), "intro", "Intro", 1).unwrap(),
            Module::new(ModuleId::new("m2"), PhaseId::new("p1"), "deeper", "Deeper", 2).unwrap(),
            Module::new(ModuleId::new("m3"), PhaseId::new("p2"), "tooling", "Tools", 1).unwrap(),
        ];
        let lessons = vec![
            lesson("first", "m1", 1),
            lesson("third", "m1", 3),
            lesson("second", "m1", 2),
            lesson("solo", "m3", 1),
        ];
        Catalog::new(phases, modules, lessons, vec![], vec![], vec![]).unwrap()
    }

    #[test]
    fn resolve_phase_matches_number() {
        let catalog = catalog();
        for phase in catalog.phases() {
            assert_eq!(catalog.resolve_phase(phase.number()).unwrap().number(), phase.number());
        }
        assert!(catalog.resolve_phase(9).unwrap_err().is_not_found());
    }

    #[test]
    fn phase_segment_parsing() {
        assert_eq!(parse_phase_number("2"), Ok(2));
        for bad in ["", "abc", "0", "-1", "1.5", " 1", "99999999999"] {
            assert!(
                matches!(parse_phase_number(bad), Err(ResolveError::InvalidInput { .. })),
                "{bad:?} should be invalid input"
            );
        }
    }

    #[test]
    fn resolve_module_by_slug_and_number() {
        let catalog = catalog();
        let p1 = PhaseId::new("p1");
        assert_eq!(catalog.resolve_module(&p1, "intro").unwrap().id().as_str(), "m1");
        assert_eq!(catalog.resolve_module(&p1, "2").unwrap().id().as_str(), "m2");
        assert!(catalog.resolve_module(&p1, "7").unwrap_err().is_not_found());
        assert!(catalog.resolve_module(&p1, "missing").unwrap_err().is_not_found());
    }

    #[test]
    fn resolve_module_rejects_cross_parent_slug() {
        let catalog = catalog();
        let err = catalog
            .resolve_module(&PhaseId::new("p1"), "tooling")
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Inconsistent { kind: EntityKind::Module, .. }
        ));
    }

    #[test]
    fn neighbors_follow_order() {
        let catalog = catalog();
        let first = catalog.resolve_lesson("first").unwrap();
        let second = catalog.resolve_lesson("second").unwrap();
        let third = catalog.resolve_lesson("third").unwrap();

        let n = catalog.neighbors(second);
        assert_eq!(n.previous.map(|l| l.slug().as_str()), Some("first"));
        assert_eq!(n.next.map(|l| l.slug().as_str()), Some("third"));

        assert!(catalog.neighbors(first).previous.is_none());
        assert!(catalog.neighbors(third).next.is_none());
    }

    #[test]
    fn single_lesson_module_has_no_neighbors() {
        let catalog = catalog();
        let solo = catalog.resolve_lesson("solo").unwrap();
        let n = catalog.neighbors(solo);
        assert!(n.previous.is_none() && n.next.is_none());
    }

    #[test]
    fn lesson_path_matches_real_parents() {
        let catalog = catalog();
        assert!(catalog.resolve_lesson_path("1", "intro", "second").is_ok());
        assert!(catalog.resolve_lesson_path("1", "1", "second").is_ok());
    }

    #[test]
    fn lesson_path_mismatch_carries_canonical_location() {
        let catalog = catalog();
        let err = catalog
            .resolve_lesson_path("2", "tooling", "second")
            .unwrap_err();
        let canonical = match err {
            ResolveError::Inconsistent { canonical, .. } => canonical.unwrap(),
            other => panic!("expected inconsistent, got {other:?}"),
        };
        assert_eq!(canonical.phase_number, 1);
        assert_eq!(canonical.module_slug.as_str(), "intro");
        assert_eq!(canonical.lesson_slug.as_str(), "second");
    }

    #[test]
    fn lesson_path_error_precedence() {
        let catalog = catalog();
        assert!(matches!(
            catalog.resolve_lesson_path("x", "intro", "nope"),
            Err(ResolveError::InvalidInput { .. })
        ));
        assert!(catalog
            .resolve_lesson_path("1", "intro", "nope")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn lessons_of_phase_spans_modules() {
        let catalog = catalog();
        let slugs: Vec<_> = catalog
            .lessons_of_phase(&PhaseId::new("p1"))
            .iter()
            .map(|l| l.slug().as_str())
            .collect();
        assert_eq!(slugs, ["first", "second", "third"]);
    }
}
