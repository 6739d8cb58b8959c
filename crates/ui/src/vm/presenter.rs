use course_core::ResolveError;
use course_core::model::{UserId, UserProfile};
use services::{CatalogServiceError, ProgressError};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::routes::{Route, RouteError};
use crate::views::ViewError;
use crate::vm::course_vm::{CourseListVm, map_course_card, map_course_topics, map_topic};
use crate::vm::dashboard_vm::map_dashboard;
use crate::vm::home_vm::map_home;
use crate::vm::lesson_vm::map_lesson;
use crate::vm::phase_vm::{map_module, map_phase};
use crate::vm::Page;

const RECENT_COMPLETIONS: usize = 5;
const ANONYMOUS: &str = "anonymous";

fn progress_failure(err: &ProgressError) -> ViewError {
    let view = ViewError::from(err);
    if view == ViewError::Unavailable {
        warn!(error = %err, "progress unavailable");
    }
    view
}

fn catalog_failure(err: &CatalogServiceError) -> ViewError {
    let view = ViewError::from(err);
    if view == ViewError::Unavailable {
        warn!(error = %err, "catalog unavailable");
    }
    view
}

fn resolve_failure(err: &ResolveError) -> ViewError {
    debug!(error = %err, "route did not resolve");
    ViewError::from(err)
}

/// Turns routes into pages. Failures become error pages, never errors.
#[derive(Clone)]
pub struct Presenter {
    ctx: AppContext,
}

impl Presenter {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    pub async fn present_path(&self, path: &str, user: Option<&UserId>) -> Page {
        match Route::parse(path) {
            Ok(route) => self.present(&route, user).await,
            Err(RouteError::InvalidInput { segment }) => Page::InvalidInput {
                path: path.to_owned(),
                message: format!("{segment:?} is not a phase number"),
            },
            Err(_) => Page::NotFound {
                path: path.to_owned(),
            },
        }
    }

    pub async fn present(&self, route: &Route, user: Option<&UserId>) -> Page {
        let result = match route {
            Route::Home => self.home(user).await,
            Route::Courses => self.courses().await.map(Page::Courses),
            Route::Course { course } => self.course(course).await,
            Route::Topic { course, topic } => self.topic(course, topic).await,
            Route::Phase { number } => self.phase(*number, user).await,
            Route::Module { phase, module } => self.module(*phase, module, user).await,
            Route::Lesson {
                phase,
                module,
                lesson,
            } => self.lesson(*phase, module, lesson, user).await,
            Route::Dashboard => self.dashboard(user).await,
            Route::Login => Ok(Page::Login),
        };
        result.unwrap_or_else(|err| Page::from_error(route, err))
    }

    async fn profile(&self, user: Option<&UserId>) -> Result<UserProfile, ViewError> {
        match user {
            Some(user_id) => self
                .ctx
                .progress()
                .profile(user_id)
                .await
                .map_err(|e| progress_failure(&e)),
            None => Ok(UserProfile::new(UserId::new(ANONYMOUS))),
        }
    }

    async fn courses(&self) -> Result<CourseListVm, ViewError> {
        let catalog = self.ctx.catalog();
        let mut cards = Vec::new();
        for course in catalog.list_courses().await.map_err(|e| catalog_failure(&e))? {
            let topics = catalog
                .topics_for_course(course.slug().as_str())
                .await
                .map_err(|e| catalog_failure(&e))?;
            cards.push(map_course_card(&course, topics.len()));
        }
        Ok(CourseListVm { courses: cards })
    }

    async fn home(&self, user: Option<&UserId>) -> Result<Page, ViewError> {
        let courses = self.courses().await?.courses;
        let profile = self.profile(user).await?;
        let catalog = self.ctx.catalog();
        Ok(Page::Home(map_home(catalog.catalog(), &profile, courses)))
    }

    async fn course(&self, slug: &str) -> Result<Page, ViewError> {
        let catalog = self.ctx.catalog();
        let course = catalog.course(slug).await.map_err(|e| catalog_failure(&e))?;
        let topics = catalog
            .topics_for_course(slug)
            .await
            .map_err(|e| catalog_failure(&e))?;
        Ok(Page::Course(map_course_topics(&course, &topics)))
    }

    async fn topic(&self, course: &str, topic: &str) -> Result<Page, ViewError> {
        let catalog = self.ctx.catalog();
        let course = catalog.course(course).await.map_err(|e| catalog_failure(&e))?;
        let topic = catalog
            .topic(course.slug().as_str(), topic)
            .await
            .map_err(|e| catalog_failure(&e))?;
        Ok(Page::Topic(map_topic(&course, &topic)))
    }

    async fn phase(&self, number: u32, user: Option<&UserId>) -> Result<Page, ViewError> {
        let profile = self.profile(user).await?;
        let service = self.ctx.catalog();
        let catalog = service.catalog();
        let phase = catalog
            .resolve_phase(number)
            .map_err(|e| resolve_failure(&e))?;
        Ok(Page::Phase(map_phase(catalog, &profile, phase)))
    }

    async fn module(
        &self,
        number: u32,
        segment: &str,
        user: Option<&UserId>,
    ) -> Result<Page, ViewError> {
        let profile = self.profile(user).await?;
        let service = self.ctx.catalog();
        let catalog = service.catalog();
        let phase = catalog
            .resolve_phase(number)
            .map_err(|e| resolve_failure(&e))?;
        let module = catalog
            .resolve_module(phase.id(), segment)
            .map_err(|e| resolve_failure(&e))?;
        Ok(Page::Module(map_module(catalog, &profile, phase, module)))
    }

    async fn lesson(
        &self,
        number: u32,
        module: &str,
        slug: &str,
        user: Option<&UserId>,
    ) -> Result<Page, ViewError> {
        let service = self.ctx.catalog();
        let lesson = match service.lesson(&number.to_string(), module, slug) {
            Ok(lesson) => lesson,
            Err(ResolveError::Inconsistent {
                canonical: Some(location),
                ..
            }) => {
                let to = Route::Lesson {
                    phase: location.phase_number,
                    module: location.module_slug.to_string(),
                    lesson: location.lesson_slug.to_string(),
                };
                debug!(
                    phase = number,
                    module,
                    lesson = slug,
                    to = %to,
                    "redirecting to canonical lesson path"
                );
                return Ok(Page::Redirect(to.path()));
            }
            Err(e) => return Err(resolve_failure(&e)),
        };
        let profile = self.profile(user).await?;
        let vm =
            map_lesson(service.catalog(), &profile, lesson).map_err(|e| resolve_failure(&e))?;
        Ok(Page::Lesson(vm))
    }

    async fn dashboard(&self, user: Option<&UserId>) -> Result<Page, ViewError> {
        let Some(user_id) = user else {
            return Ok(Page::Redirect(Route::Login.path()));
        };
        let progress = self.ctx.progress();
        let profile = self.profile(Some(user_id)).await?;
        let recent = progress
            .recent_completions(user_id, RECENT_COMPLETIONS)
            .await
            .map_err(|e| progress_failure(&e))?;
        let catalog = self.ctx.catalog();
        Ok(Page::Dashboard(map_dashboard(catalog.catalog(), &profile, &recent)))
    }
}
