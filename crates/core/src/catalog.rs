use std::collections::HashSet;
use std::hash::Hash;
use thiserror::Error;

use crate::hierarchy::is_number_segment;
use crate::model::{
    Course, EntityError, Lesson, Module, ModuleId, Phase, PhaseId, Project, Topic,
};
use crate::topic_filter;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("duplicate {kind} slug: {slug}")]
    DuplicateSlug { kind: &'static str, slug: String },

    #[error("duplicate phase number: {0}")]
    DuplicatePhaseNumber(u32),

    #[error("duplicate {kind} order {order} under {parent}")]
    DuplicateOrder {
        kind: &'static str,
        parent: String,
        order: u32,
    },

    #[error("{kind} {id} refers to missing parent {parent}")]
    MissingParent {
        kind: &'static str,
        id: String,
        parent: String,
    },

    #[error("{kind} slug {slug:?} is all digits and would read as an order number")]
    NumericSlug { kind: &'static str, slug: String },

    #[error("topic {topic} is not claimed by any listed course")]
    UnroutableTopic { topic: String },

    #[error(transparent)]
    Entity(#[from] EntityError),
}

/// Immutable content tables, validated once at load.
///
/// Every table is kept sorted by (parent, order) so child listings come out
/// in sibling order without re-sorting.
#[derive(Debug, Clone)]
pub struct Catalog {
    phases: Vec<Phase>,
    modules: Vec<Module>,
    lessons: Vec<Lesson>,
    projects: Vec<Project>,
    courses: Vec<Course>,
    topics: Vec<Topic>,
}

impl Catalog {
    /// Validate and assemble the content tables.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if ids or slugs collide, sibling order values
    /// repeat, a child points at a missing parent, or a topic is not owned by
    /// a course present in the table.
    pub fn new(
        mut phases: Vec<Phase>,
        mut modules: Vec<Module>,
        mut lessons: Vec<Lesson>,
        mut projects: Vec<Project>,
        mut courses: Vec<Course>,
        mut topics: Vec<Topic>,
    ) -> Result<Self, CatalogError> {
        unique(&phases, |p| p.id().as_str(), |id| CatalogError::DuplicateId {
            kind: "phase",
            id,
        })?;
        unique_by(&phases, Phase::number, CatalogError::DuplicatePhaseNumber)?;
        unique_by(&phases, Phase::order, |order| CatalogError::DuplicateOrder {
            kind: "phase",
            parent: "catalog".into(),
            order,
        })?;

        unique(&modules, |m| m.id().as_str(), |id| CatalogError::DuplicateId {
            kind: "module",
            id,
        })?;
        let phase_ids: HashSet<&PhaseId> = phases.iter().map(Phase::id).collect();
        for module in &modules {
            if !phase_ids.contains(module.phase_id()) {
                return Err(CatalogError::MissingParent {
                    kind: "module",
                    id: module.id().to_string(),
                    parent: module.phase_id().to_string(),
                });
            }
        }
        if let Some(module) = modules
            .iter()
            .find(|m| is_number_segment(m.slug().as_str()))
        {
            return Err(CatalogError::NumericSlug {
                kind: "module",
                slug: module.slug().to_string(),
            });
        }
        unique_by(
            &modules,
            |m| (m.phase_id().clone(), m.slug().clone()),
            |(_, slug)| CatalogError::DuplicateSlug {
                kind: "module",
                slug: slug.to_string(),
            },
        )?;
        unique_by(
            &modules,
            |m| (m.phase_id().clone(), m.order()),
            |(parent, order)| CatalogError::DuplicateOrder {
                kind: "module",
                parent: parent.to_string(),
                order,
            },
        )?;

        let module_ids: HashSet<&ModuleId> = modules.iter().map(Module::id).collect();
        unique(&lessons, |l| l.id().as_str(), |id| CatalogError::DuplicateId {
            kind: "lesson",
            id,
        })?;
        unique(&lessons, |l| l.slug().as_str(), |slug| {
            CatalogError::DuplicateSlug {
                kind: "lesson",
                slug,
            }
        })?;
        for lesson in &lessons {
            if !module_ids.contains(lesson.module_id()) {
                return Err(CatalogError::MissingParent {
                    kind: "lesson",
                    id: lesson.id().to_string(),
                    parent: lesson.module_id().to_string(),
                });
            }
        }
        unique_by(
            &lessons,
            |l| (l.module_id().clone(), l.order()),
            |(parent, order)| CatalogError::DuplicateOrder {
                kind: "lesson",
                parent: parent.to_string(),
                order,
            },
        )?;

        unique(&projects, |p| p.id().as_str(), |id| CatalogError::DuplicateId {
            kind: "project",
            id,
        })?;
        unique(&projects, |p| p.slug().as_str(), |slug| {
            CatalogError::DuplicateSlug {
                kind: "project",
                slug,
            }
        })?;
        for project in &projects {
            if !module_ids.contains(project.module_id()) {
                return Err(CatalogError::MissingParent {
                    kind: "project",
                    id: project.id().to_string(),
                    parent: project.module_id().to_string(),
                });
            }
        }

        unique(&courses, |c| c.id().as_str(), |id| CatalogError::DuplicateId {
            kind: "course",
            id,
        })?;
        unique(&courses, |c| c.slug().as_str(), |slug| {
            CatalogError::DuplicateSlug {
                kind: "course",
                slug,
            }
        })?;
        unique_by(&courses, Course::order, |order| CatalogError::DuplicateOrder {
            kind: "course",
            parent: "catalog".into(),
            order,
        })?;

        unique(&topics, |t| t.id().as_str(), |id| CatalogError::DuplicateId {
            kind: "topic",
            id,
        })?;
        unique(&topics, |t| t.slug().as_str(), |slug| CatalogError::DuplicateSlug {
            kind: "topic",
            slug,
        })?;
        for topic in &topics {
            let owned = topic_filter::owning_course(topic.id())
                .is_some_and(|course| courses.iter().any(|c| c.slug() == course));
            if !owned {
                return Err(CatalogError::UnroutableTopic {
                    topic: topic.id().to_string(),
                });
            }
        }

        phases.sort_by_key(Phase::order);
        modules.sort_by(|a, b| {
            a.phase_id()
                .cmp(b.phase_id())
                .then(a.order().cmp(&b.order()))
        });
        lessons.sort_by(|a, b| {
            a.module_id()
                .cmp(b.module_id())
                .then(a.order().cmp(&b.order()))
        });
        projects.sort_by(|a, b| a.module_id().cmp(b.module_id()).then(a.slug().cmp(b.slug())));
        courses.sort_by_key(Course::order);
        topics.sort_by_key(Topic::order);

        Ok(Self {
            phases,
            modules,
            lessons,
            projects,
            courses,
            topics,
        })
    }

    /// The content tables bundled with the application.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the bundled tables violate an invariant.
    pub fn builtin() -> Result<Self, CatalogError> {
        crate::content::builtin_catalog()
    }

    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }
}

fn unique<'a, T, F, E>(items: &'a [T], key: F, err: E) -> Result<(), CatalogError>
where
    F: Fn(&'a T) -> &'a str,
    E: Fn(String) -> CatalogError,
{
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let k = key(item);
        if !seen.insert(k) {
            return Err(err(k.to_owned()));
        }
    }
    Ok(())
}

fn unique_by<T, K, F, E>(items: &[T], key: F, err: E) -> Result<(), CatalogError>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
    E: Fn(K) -> CatalogError,
{
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let k = key(item);
        if !seen.insert(k.clone()) {
            return Err(err(k));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CourseId, LessonDraft, LessonId, TopicId};

    fn phase(id: &str, number: u32) -> Phase {
        Phase::new(PhaseId::new(id), number, format!("Phase {number}"), number).unwrap()
    }

    fn module(id: &str, phase: &str, slug: &str, order: u32) -> Module {
        Module::new(ModuleId::new(id), PhaseId::new(phase), slug, "Module", order).unwrap()
    }

    fn lesson(id: &str, module: &str, order: u32) -> Lesson {
        LessonDraft {
            id: id.into(),
            module_id: module.into(),
            slug: id.into(),
            title_th: "บทเรียน".into(),
            order,
            ..LessonDraft::default()
        }
        .validate()
        .unwrap()
    }

    fn js_course() -> Course {
        Course::new(CourseId::new("course-js"), "javascript", "JavaScript", 1).unwrap()
    }

    #[test]
    fn sorts_children_by_order() {
        let catalog = Catalog::new(
            vec![phase("p2", 2), phase("p1", 1)],
            vec![module("m1", "p1", "intro", 1)],
            vec![lesson("l-b", "m1", 2), lesson("l-a", "m1", 1)],
            vec![],
            vec![js_course()],
            vec![],
        )
        .unwrap();

        assert_eq!(catalog.phases()[0].number(), 1);
        assert_eq!(catalog.lessons()[0].id(), &LessonId::new("l-a"));
    }

    #[test]
    fn rejects_module_slug_made_of_digits() {
        let err = Catalog::new(
            vec![phase("p1", 1)],
            vec![module("m1", "p1", "2", 1), module("m2", "p1", "basics", 2)],
            vec![],
            vec![],
            vec![js_course()],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NumericSlug { kind: "module", ref slug } if slug == "2"
        ));
    }

    #[test]
    fn rejects_lesson_with_missing_module() {
        let err = Catalog::new(
            vec![phase("p1", 1)],
            vec![module("m1", "p1", "intro", 1)],
            vec![lesson("l1", "ghost", 1)],
            vec![],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::MissingParent {
                kind: "lesson",
                id: "l1".into(),
                parent: "ghost".into(),
            }
        );
    }

    #[test]
    fn rejects_duplicate_sibling_order() {
        let err = Catalog::new(
            vec![phase("p1", 1)],
            vec![module("m1", "p1", "intro", 1)],
            vec![lesson("l1", "m1", 1), lesson("l2", "m1", 1)],
            vec![],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateOrder { kind: "lesson", order: 1, .. }
        ));
    }

    #[test]
    fn same_module_slug_allowed_in_different_phases() {
        let catalog = Catalog::new(
            vec![phase("p1", 1), phase("p2", 2)],
            vec![module("m1", "p1", "intro", 1), module("m2", "p2", "intro", 1)],
            vec![],
            vec![],
            vec![],
            vec![],
        );
        assert!(catalog.is_ok());
    }

    #[test]
    fn rejects_duplicate_phase_number() {
        let err = Catalog::new(
            vec![
                phase("p1", 1),
                Phase::new(PhaseId::new("p1b"), 1, "Again", 5).unwrap(),
            ],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicatePhaseNumber(1));
    }

    #[test]
    fn rejects_topic_whose_course_is_missing() {
        let go_topic = Topic::new(TopicId::new("topic-go-basics"), "go-basics", "Go", 1).unwrap();
        let err = Catalog::new(vec![], vec![], vec![], vec![], vec![js_course()], vec![go_topic])
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnroutableTopic {
                topic: "topic-go-basics".into()
            }
        );
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().expect("bundled content must validate");
        assert!(!catalog.phases().is_empty());
        assert!(!catalog.lessons().is_empty());
        assert_eq!(catalog.courses().len(), 3);
    }
}
