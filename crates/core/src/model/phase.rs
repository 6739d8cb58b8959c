use serde::{Deserialize, Serialize};

use crate::model::entity::{EntityError, require_id, require_title};
use crate::model::ids::PhaseId;

/// Top-level curriculum unit, routable by its number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    id: PhaseId,
    number: u32,
    title: String,
    order: u32,
}

impl Phase {
    /// Creates a phase.
    ///
    /// # Errors
    ///
    /// Returns `EntityError` if the id or title is blank or the number is zero.
    pub fn new(
        id: PhaseId,
        number: u32,
        title: impl Into<String>,
        order: u32,
    ) -> Result<Self, EntityError> {
        require_id("phase", id.is_blank())?;
        if number == 0 {
            return Err(EntityError::ZeroPhaseNumber);
        }
        let title = require_title("phase", title.into())?;
        Ok(Self {
            id,
            number,
            title,
            order,
        })
    }

    #[must_use]
    pub fn id(&self) -> &PhaseId {
        &self.id
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
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

    #[test]
    fn rejects_zero_number() {
        let err = Phase::new(PhaseId::new("phase-0"), 0, "Zero", 0).unwrap_err();
        assert_eq!(err, EntityError::ZeroPhaseNumber);
    }

    #[test]
    fn trims_title() {
        let phase = Phase::new(PhaseId::new("phase-1"), 1, "  Foundations ", 1).unwrap();
        assert_eq!(phase.title(), "Foundations");
        assert_eq!(phase.number(), 1);
    }
}
