use serde::{Deserialize, Serialize};

use crate::model::entity::{
    EntityError, optional_text, optional_url, require_id, require_title, slug,
};
use crate::model::ids::{LessonId, ModuleId};
use crate::model::slug::Slug;

/// Leaf of the curriculum hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    id: LessonId,
    module_id: ModuleId,
    slug: Slug,
    title_th: String,
    title_en: Option<String>,
    order: u32,
    body: String,
    duration_minutes: u32,
    video_url: Option<String>,
}

/// Unvalidated lesson fields, as authored in the content tables.
#[derive(Debug, Clone, Default)]
pub struct LessonDraft {
    pub id: String,
    pub module_id: String,
    pub slug: String,
    pub title_th: String,
    pub title_en: Option<String>,
    pub order: u32,
    pub body: String,
    pub duration_minutes: u32,
    pub video_url: Option<String>,
}

impl LessonDraft {
    /// Validate the draft into a lesson.
    ///
    /// # Errors
    ///
    /// Returns `EntityError` for blank ids or title, an invalid slug, or a
    /// malformed video URL.
    pub fn validate(self) -> Result<Lesson, EntityError> {
        let id = LessonId::new(self.id.trim());
        let module_id = ModuleId::new(self.module_id.trim());
        require_id("lesson", id.is_blank())?;
        require_id("module", module_id.is_blank())?;

        Ok(Lesson {
            id,
            module_id,
            slug: slug(&self.slug)?,
            title_th: require_title("lesson", self.title_th)?,
            title_en: optional_text(self.title_en),
            order: self.order,
            body: self.body,
            duration_minutes: self.duration_minutes,
            video_url: optional_url("lesson", self.video_url)?,
        })
    }
}

impl Lesson {
    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    #[must_use]
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    #[must_use]
    pub fn title_th(&self) -> &str {
        &self.title_th
    }

    #[must_use]
    pub fn title_en(&self) -> Option<&str> {
        self.title_en.as_deref()
    }

    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Markdown source of the lesson.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    #[must_use]
    pub fn has_video(&self) -> bool {
        self.video_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> LessonDraft {
        LessonDraft {
            id: "lesson-closures".into(),
            module_id: "module-js-basics".into(),
            slug: "closures".into(),
            title_th: "คลอเชอร์".into(),
            title_en: Some("  ".into()),
            order: 3,
            body: "# Closures".into(),
            duration_minutes: 15,
            video_url: None,
        }
    }

    #[test]
    fn validate_happy_path() {
        let lesson = draft().validate().unwrap();
        assert_eq!(lesson.slug().as_str(), "closures");
        assert_eq!(lesson.title_en(), None);
        assert!(!lesson.has_video());
    }

    #[test]
    fn validate_rejects_bad_video_url() {
        let mut d = draft();
        d.video_url = Some("not a url".into());
        let err = d.validate().unwrap_err();
        assert!(matches!(err, EntityError::InvalidUrl { kind: "lesson", .. }));
    }

    #[test]
    fn validate_rejects_missing_module() {
        let mut d = draft();
        d.module_id = "  ".into();
        assert_eq!(
            d.validate().unwrap_err(),
            EntityError::EmptyId { kind: "module" }
        );
    }
}
