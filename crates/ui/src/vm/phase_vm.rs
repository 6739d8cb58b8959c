use course_core::Catalog;
use course_core::model::{Module, Phase, Project, UserProfile};
use course_core::progress::{Scope, completion_for};

use crate::routes::Route;
use crate::vm::time_fmt::format_minutes;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseCardVm {
    pub number: u32,
    pub title: String,
    pub path: String,
    pub module_count: usize,
    pub percent: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleCardVm {
    pub number: u32,
    pub slug: String,
    pub title: String,
    pub path: String,
    pub lesson_count: usize,
    pub percent: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseVm {
    pub number: u32,
    pub title: String,
    pub percent: u8,
    pub modules: Vec<ModuleCardVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonItemVm {
    pub slug: String,
    pub title: String,
    pub path: String,
    pub duration: String,
    pub completed: bool,
    pub has_video: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectVm {
    pub title: String,
    pub author: String,
    pub summary: Option<String>,
    pub repo_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleVm {
    pub phase_number: u32,
    pub phase_title: String,
    pub slug: String,
    pub title: String,
    pub path: String,
    pub percent: u8,
    pub lessons: Vec<LessonItemVm>,
    pub projects: Vec<ProjectVm>,
}

#[must_use]
pub fn map_phase_card(catalog: &Catalog, profile: &UserProfile, phase: &Phase) -> PhaseCardVm {
    PhaseCardVm {
        number: phase.number(),
        title: phase.title().to_owned(),
        path: Route::Phase {
            number: phase.number(),
        }
        .path(),
        module_count: catalog.modules_of(phase.id()).len(),
        percent: completion_for(catalog, profile, Scope::Phase(phase.id())).percent(),
    }
}

fn module_path(phase: &Phase, module: &Module) -> String {
    Route::Module {
        phase: phase.number(),
        module: module.slug().to_string(),
    }
    .path()
}

#[must_use]
pub fn map_phase(catalog: &Catalog, profile: &UserProfile, phase: &Phase) -> PhaseVm {
    let modules = catalog
        .modules_of(phase.id())
        .into_iter()
        .map(|module| ModuleCardVm {
            number: module.order(),
            slug: module.slug().to_string(),
            title: module.title().to_owned(),
            path: module_path(phase, module),
            lesson_count: catalog.lessons_of(module.id()).len(),
            percent: completion_for(catalog, profile, Scope::Module(module.id())).percent(),
        })
        .collect();
    PhaseVm {
        number: phase.number(),
        title: phase.title().to_owned(),
        percent: completion_for(catalog, profile, Scope::Phase(phase.id())).percent(),
        modules,
    }
}

fn map_project(project: &Project) -> ProjectVm {
    ProjectVm {
        title: project.title().to_owned(),
        author: project.author().to_owned(),
        summary: project.summary().map(str::to_owned),
        repo_url: project.repo_url().map(str::to_owned),
    }
}

#[must_use]
pub fn map_module(
    catalog: &Catalog,
    profile: &UserProfile,
    phase: &Phase,
    module: &Module,
) -> ModuleVm {
    let lessons = catalog
        .lessons_of(module.id())
        .into_iter()
        .map(|lesson| LessonItemVm {
            slug: lesson.slug().to_string(),
            title: lesson.title_th().to_owned(),
            path: Route::Lesson {
                phase: phase.number(),
                module: module.slug().to_string(),
                lesson: lesson.slug().to_string(),
            }
            .path(),
            duration: format_minutes(lesson.duration_minutes()),
            completed: profile.has_completed(lesson.id()),
            has_video: lesson.has_video(),
        })
        .collect();
    ModuleVm {
        phase_number: phase.number(),
        phase_title: phase.title().to_owned(),
        slug: module.slug().to_string(),
        title: module.title().to_owned(),
        path: module_path(phase, module),
        percent: completion_for(catalog, profile, Scope::Module(module.id())).percent(),
        lessons,
        projects: catalog
            .projects_of(module.id())
            .into_iter()
            .map(map_project)
            .collect(),
    }
}
