mod course;
mod entity;
mod ids;
mod lesson;
mod module;
mod phase;
pub mod preferences;
mod profile;
mod project;
mod slug;

pub use course::{Course, Topic};
pub use entity::EntityError;
pub use ids::{CourseId, LessonId, ModuleId, ParseIdError, PhaseId, ProjectId, TopicId, UserId};
pub use lesson::{Lesson, LessonDraft};
pub use module::Module;
pub use phase::Phase;
pub use preferences::{LayoutMode, PlaybackMode, ThemeMode, UiPreferences};
pub use profile::{Certificate, UserProfile, UserProgress};
pub use project::{Project, ProjectDraft};
pub use slug::{Slug, SlugError};
