use serde::{Deserialize, Serialize};

use crate::model::entity::{EntityError, require_id, require_title, slug};
use crate::model::ids::{CourseId, TopicId};
use crate::model::slug::Slug;

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A language track such as `javascript` or `go`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    slug: Slug,
    title: String,
    order: u32,
}

impl Course {
    /// Creates a course.
    ///
    /// # Errors
    ///
    /// Returns `EntityError` for a blank id/title or an invalid slug.
    pub fn new(
        id: CourseId,
        course_slug: &str,
        title: impl Into<String>,
        order: u32,
    ) -> Result<Self, EntityError> {
        require_id("course", id.is_blank())?;
        Ok(Self {
            id,
            slug: slug(course_slug)?,
            title: require_title("course", title.into())?,
            order,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// A subject inside a course. Ownership is decided by `topic_filter`, not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    id: TopicId,
    slug: Slug,
    title: String,
    order: u32,
}

impl Topic {
    /// Creates a topic.
    ///
    /// # Errors
    ///
    /// Returns `EntityError` for a blank id/title or an invalid slug.
    pub fn new(
        id: TopicId,
        topic_slug: &str,
        title: impl Into<String>,
        order: u32,
    ) -> Result<Self, EntityError> {
        require_id("topic", id.is_blank())?;
        Ok(Self {
            id,
            slug: slug(topic_slug)?,
            title: require_title("topic", title.into())?,
            order,
        })
    }

    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    #[must_use]
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::slug::SlugError;

    #[test]
    fn course_rejects_uppercase_slug() {
        let err = Course::new(CourseId::new("course-js"), "JavaScript", "JavaScript", 1)
            .unwrap_err();
        assert_eq!(err, EntityError::Slug(SlugError::InvalidChar('J')));
    }

    #[test]
    fn topic_requires_title() {
        let err = Topic::new(TopicId::new("topic-async"), "async", " ", 1).unwrap_err();
        assert_eq!(err, EntityError::EmptyTitle { kind: "topic" });
    }
}
