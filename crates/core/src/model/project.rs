use serde::{Deserialize, Serialize};

use crate::model::entity::{
    EntityError, optional_text, optional_url, require_id, require_title, slug,
};
use crate::model::ids::{ModuleId, ProjectId};
use crate::model::slug::Slug;

/// Student work attached to a module. Not part of the lesson sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    module_id: ModuleId,
    slug: Slug,
    title: String,
    author: String,
    summary: Option<String>,
    repo_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub id: String,
    pub module_id: String,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub summary: Option<String>,
    pub repo_url: Option<String>,
}

impl ProjectDraft {
    /// Validate the draft into a project.
    ///
    /// # Errors
    ///
    /// Returns `EntityError` for blank ids, title or author, an invalid slug,
    /// or a malformed repository URL.
    pub fn validate(self) -> Result<Project, EntityError> {
        let id = ProjectId::new(self.id.trim());
        let module_id = ModuleId::new(self.module_id.trim());
        require_id("project", id.is_blank())?;
        require_id("module", module_id.is_blank())?;

        let author = self.author.trim().to_owned();
        if author.is_empty() {
            return Err(EntityError::EmptyTitle {
                kind: "project author",
            });
        }

        Ok(Project {
            id,
            module_id,
            slug: slug(&self.slug)?,
            title: require_title("project", self.title)?,
            author,
            summary: optional_text(self.summary),
            repo_url: optional_url("project", self.repo_url)?,
        })
    }
}

impl Project {
    #[must_use]
    pub fn id(&self) -> &ProjectId {
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
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    #[must_use]
    pub fn repo_url(&self) -> Option<&str> {
        self.repo_url.as_deref()
    }
}
