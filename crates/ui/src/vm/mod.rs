mod course_vm;
mod dashboard_vm;
mod home_vm;
mod lesson_vm;
mod markdown_vm;
mod phase_vm;
mod presenter;
mod time_fmt;

pub use course_vm::{CourseCardVm, CourseListVm, CourseTopicsVm, TopicItemVm, TopicVm};
pub use dashboard_vm::{CertificateVm, DashboardVm, RecentCompletionVm};
pub use home_vm::HomeVm;
pub use lesson_vm::{LessonLinkVm, LessonVm};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use phase_vm::{LessonItemVm, ModuleCardVm, ModuleVm, PhaseCardVm, PhaseVm, ProjectVm};
pub use presenter::Presenter;
pub use time_fmt::{format_date, format_datetime, format_minutes};

use crate::routes::Route;
use crate::views::ViewError;

/// Everything a route can render as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Home(HomeVm),
    Courses(CourseListVm),
    Course(CourseTopicsVm),
    Topic(TopicVm),
    Phase(PhaseVm),
    Module(ModuleVm),
    Lesson(LessonVm),
    Dashboard(DashboardVm),
    Login,
    Redirect(String),
    NotFound { path: String },
    InvalidInput { path: String, message: String },
    Degraded { message: String },
}

impl Page {
    #[must_use]
    pub fn from_error(route: &Route, err: ViewError) -> Self {
        match err {
            ViewError::NotFound => Page::NotFound { path: route.path() },
            ViewError::InvalidInput => Page::InvalidInput {
                path: route.path(),
                message: err.message().to_owned(),
            },
            ViewError::Unavailable => Page::Degraded {
                message: err.message().to_owned(),
            },
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Page::NotFound { .. } | Page::InvalidInput { .. } | Page::Degraded { .. }
        )
    }
}
