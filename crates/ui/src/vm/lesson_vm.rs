use course_core::model::{Lesson, UserProfile};
use course_core::{Catalog, ResolveError};

use crate::routes::Route;
use crate::vm::markdown_vm::markdown_to_html;
use crate::vm::time_fmt::format_minutes;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonLinkVm {
    pub title: String,
    pub path: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonVm {
    pub phase_number: u32,
    pub module_slug: String,
    pub module_title: String,
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub path: String,
    pub body_html: String,
    pub duration: String,
    pub completed: bool,
    pub video_url: Option<String>,
    pub previous: Option<LessonLinkVm>,
    pub next: Option<LessonLinkVm>,
}

impl LessonVm {
    /// Whether video playback can be offered for this lesson.
    #[must_use]
    pub fn playback_available(&self) -> bool {
        self.video_url.is_some()
    }
}

fn lesson_path(catalog: &Catalog, lesson: &Lesson) -> Result<String, ResolveError> {
    let location = catalog.location_of(lesson)?;
    Ok(Route::Lesson {
        phase: location.phase_number,
        module: location.module_slug.to_string(),
        lesson: location.lesson_slug.to_string(),
    }
    .path())
}

fn link(catalog: &Catalog, lesson: &Lesson) -> Result<LessonLinkVm, ResolveError> {
    Ok(LessonLinkVm {
        title: lesson.title_th().to_owned(),
        path: lesson_path(catalog, lesson)?,
    })
}

/// # Errors
///
/// Returns `ResolveError::Inconsistent` if the lesson's parents are missing.
pub fn map_lesson(
    catalog: &Catalog,
    profile: &UserProfile,
    lesson: &Lesson,
) -> Result<LessonVm, ResolveError> {
    let module = catalog.module_of(lesson)?;
    let location = catalog.location_of(lesson)?;
    let neighbors = catalog.neighbors(lesson);

    Ok(LessonVm {
        phase_number: location.phase_number,
        module_slug: module.slug().to_string(),
        module_title: module.title().to_owned(),
        slug: lesson.slug().to_string(),
        title: lesson.title_th().to_owned(),
        subtitle: lesson.title_en().map(str::to_owned),
        path: lesson_path(catalog, lesson)?,
        body_html: markdown_to_html(lesson.body()),
        duration: format_minutes(lesson.duration_minutes()),
        completed: profile.has_completed(lesson.id()),
        video_url: lesson.video_url().map(str::to_owned),
        previous: neighbors.previous.map(|l| link(catalog, l)).transpose()?,
        next: neighbors.next.map(|l| link(catalog, l)).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::UserId;

    #[test]
    fn first_lesson_has_no_previous() {
        let catalog = Catalog::builtin().unwrap();
        let profile = UserProfile::new(UserId::new("u"));
        let lesson = catalog.resolve_lesson("how-the-web-works").unwrap();

        let vm = map_lesson(&catalog, &profile, lesson).unwrap();
        assert_eq!(vm.path, "/phases/1/web-basics/how-the-web-works");
        assert!(vm.previous.is_none());
        assert_eq!(
            vm.next.as_ref().map(|l| l.path.as_str()),
            Some("/phases/1/web-basics/html-structure")
        );
        assert!(vm.playback_available());
        assert!(vm.body_html.contains("<strong>HTTP request</strong>"));
        assert!(!vm.completed);
    }

    #[test]
    fn last_lesson_has_no_next() {
        let catalog = Catalog::builtin().unwrap();
        let profile = UserProfile::new(UserId::new("u"));
        let lesson = catalog.resolve_lesson("css-box-model").unwrap();
        let vm = map_lesson(&catalog, &profile, lesson).unwrap();
        assert!(vm.next.is_none());
        assert_eq!(vm.previous.unwrap().title, "โครงสร้าง HTML");
    }
}
