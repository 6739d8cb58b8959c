use course_core::model::{PhaseId, ThemeMode, UserId};
use course_core::time::fixed_now;
use services::auth::Credentials;
use services::{AppServices, AuthProvider, Clock, MarkOutcome};

#[tokio::test]
async fn sqlite_backed_completion_flow() {
    let services = AppServices::new_sqlite(
        "sqlite:file:memdb_progress_flow?mode=memory&cache=shared",
        Clock::fixed(fixed_now()),
    )
    .await
    .expect("services");
    let progress = services.progress();
    let user = UserId::new("flow-user");

    for slug in ["components", "state-and-props"] {
        let outcome = progress.mark_lesson_complete(&user, slug, 20).await.unwrap();
        assert!(outcome.is_recorded());
    }
    let again = progress
        .mark_lesson_complete(&user, "components", 99)
        .await
        .unwrap();
    assert!(matches!(again, MarkOutcome::AlreadyCompleted(p) if p.time_spent_minutes == 20));

    let profile = progress.profile(&user).await.unwrap();
    assert_eq!(profile.version(), 2);
    assert_eq!(profile.points(), 20 + 50);
    assert_eq!(profile.completed_modules().len(), 1);

    let module = progress
        .module_completion(&user, 2, "react-fundamentals")
        .await
        .unwrap();
    assert_eq!(module.fraction(), 1.0);
    assert_eq!(progress.phase_completion(&user, 2).await.unwrap().percent(), 50);
    assert_eq!(progress.get_progress(&user).await.unwrap().len(), 2);
}

#[tokio::test]
async fn finishing_a_phase_issues_one_certificate() {
    let services = AppServices::new_in_memory(Clock::fixed(fixed_now())).unwrap();
    let progress = services.progress();
    let user = UserId::new("cert-user");

    let phase_lessons = [
        "how-the-web-works",
        "html-structure",
        "css-box-model",
        "variables-and-types",
        "control-flow",
        "functions",
    ];
    for slug in phase_lessons {
        progress.mark_lesson_complete(&user, slug, 10).await.unwrap();
    }
    progress.mark_lesson_complete(&user, "functions", 10).await.unwrap();

    let profile = progress.profile(&user).await.unwrap();
    assert_eq!(profile.certificates().len(), 1);
    assert_eq!(profile.certificates()[0].phase_id, PhaseId::new("phase-foundations"));
    assert_eq!(profile.points(), 6 * 10 + 2 * 50 + 200);
    assert!(progress.phase_completion(&user, 1).await.unwrap().is_complete());
}

#[tokio::test]
async fn preferences_and_auth_are_wired() {
    let services = AppServices::new_in_memory(Clock::default()).unwrap();
    services
        .preferences()
        .save_theme(ThemeMode::Dark)
        .await
        .unwrap();
    assert_eq!(
        services.preferences().load().await.unwrap().theme,
        ThemeMode::Dark
    );

    let auth = services.auth();
    let user = auth
        .login(&Credentials::new("learner@example.com", "hunter22"))
        .await
        .unwrap();
    assert_eq!(auth.current_user().await.map(|u| u.id), Some(user.id));
}
