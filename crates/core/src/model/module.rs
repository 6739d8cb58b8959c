use serde::{Deserialize, Serialize};

use crate::model::entity::{EntityError, require_id, require_title, slug};
use crate::model::ids::{ModuleId, PhaseId};
use crate::model::slug::Slug;

/// Second curriculum level. Refers to its phase by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    id: ModuleId,
    phase_id: PhaseId,
    slug: Slug,
    title: String,
    order: u32,
}

impl Module {
    /// Creates a module.
    ///
    /// # Errors
    ///
    /// Returns `EntityError` for blank ids/titles or an invalid slug.
    pub fn new(
        id: ModuleId,
        phase_id: PhaseId,
        module_slug: &str,
        title: impl Into<String>,
        order: u32,
    ) -> Result<Self, EntityError> {
        require_id("module", id.is_blank())?;
        require_id("phase", phase_id.is_blank())?;
        Ok(Self {
            id,
            phase_id,
            slug: slug(module_slug)?,
            title: require_title("module", title.into())?,
            order,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    #[must_use]
    pub fn phase_id(&self) -> &PhaseId {
        &self.phase_id
    }

    #[must_use]
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Position among the phase's modules; also the module's routable number.
    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }
}
