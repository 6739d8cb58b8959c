use course_core::Catalog;
use course_core::model::{UserProfile, UserProgress};
use course_core::progress::{Scope, completion_for};

use crate::routes::Route;
use crate::vm::phase_vm::{PhaseCardVm, map_phase_card};
use crate::vm::time_fmt::{format_date, format_datetime, format_minutes};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateVm {
    pub phase_title: String,
    pub issued_on: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentCompletionVm {
    pub lesson_title: String,
    pub path: Option<String>,
    pub completed_at: String,
    pub time_spent: String,
}

/// Learner overview, recent completions newest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub overall_percent: u8,
    pub lessons_completed: u32,
    pub lessons_total: u32,
    pub points: u32,
    pub phases: Vec<PhaseCardVm>,
    pub certificates: Vec<CertificateVm>,
    pub recent: Vec<RecentCompletionVm>,
}

/// Build the dashboard. `recent` must already be newest first.
#[must_use]
pub fn map_dashboard(
    catalog: &Catalog,
    profile: &UserProfile,
    recent: &[UserProgress],
) -> DashboardVm {
    let overall = completion_for(catalog, profile, Scope::Overall);
    let certificates = profile
        .certificates()
        .iter()
        .map(|cert| CertificateVm {
            phase_title: catalog
                .phase_by_id(&cert.phase_id)
                .map_or_else(|_| cert.phase_id.to_string(), |p| p.title().to_owned()),
            issued_on: format_date(cert.issued_at),
        })
        .collect();
    // Records for lessons that have since been retired are still listed.
    let recent = recent
        .iter()
        .map(|event| {
            let lesson = catalog.lesson_by_id(&event.lesson_id).ok();
            RecentCompletionVm {
                lesson_title: lesson
                    .map_or_else(|| event.lesson_id.to_string(), |l| l.title_th().to_owned()),
                path: lesson
                    .and_then(|l| catalog.location_of(l).ok())
                    .map(|loc| {
                        Route::Lesson {
                            phase: loc.phase_number,
                            module: loc.module_slug.to_string(),
                            lesson: loc.lesson_slug.to_string(),
                        }
                        .path()
                    }),
                completed_at: format_datetime(event.completed_at),
                time_spent: format_minutes(event.time_spent_minutes),
            }
        })
        .collect();

    DashboardVm {
        overall_percent: overall.percent(),
        lessons_completed: overall.completed(),
        lessons_total: overall.total(),
        points: profile.points(),
        phases: catalog
            .phases()
            .iter()
            .map(|phase| map_phase_card(catalog, profile, phase))
            .collect(),
        certificates,
        recent,
    }
}
