use course_core::Catalog;
use course_core::model::UserProfile;

use crate::vm::course_vm::CourseCardVm;
use crate::vm::phase_vm::{PhaseCardVm, map_phase_card};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeVm {
    pub phases: Vec<PhaseCardVm>,
    pub courses: Vec<CourseCardVm>,
}

#[must_use]
pub fn map_home(catalog: &Catalog, profile: &UserProfile, courses: Vec<CourseCardVm>) -> HomeVm {
    HomeVm {
        phases: catalog
            .phases()
            .iter()
            .map(|phase| map_phase_card(catalog, profile, phase))
            .collect(),
        courses,
    }
}
