use course_core::model::{UiPreferences, UserId};
use services::{Credentials, MarkOutcome};
use tracing::warn;

use super::{
    LayoutIntent, LayoutState, LoginState, PlaybackIntent, PlaybackState, ThemeIntent,
    ThemeState, Transition,
};
use crate::context::AppContext;
use crate::views::{ViewError, ViewState};
use crate::vm::{Page, Presenter};

/// Per-session UI state. One instance per signed-in window or CLI run.
pub struct UiSession {
    ctx: AppContext,
    presenter: Presenter,
    theme: ThemeState,
    layout: LayoutState,
    playback: PlaybackState,
    login: LoginState,
    page: ViewState<Page>,
}

impl UiSession {
    /// Start a session from persisted preferences. A failing preference store
    /// starts the session with defaults.
    pub async fn start(ctx: AppContext) -> Self {
        let prefs = ctx.preferences().load().await.unwrap_or_else(|err| {
            warn!(error = %err, "preferences unavailable, using defaults");
            UiPreferences::default()
        });
        Self {
            presenter: Presenter::new(ctx.clone()),
            ctx,
            theme: ThemeState::new(prefs.theme),
            layout: LayoutState::new(prefs.layout),
            playback: PlaybackState::new(prefs.playback),
            login: LoginState::default(),
            page: ViewState::Idle,
        }
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    #[must_use]
    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    #[must_use]
    pub fn login(&self) -> &LoginState {
        &self.login
    }

    #[must_use]
    pub fn page(&self) -> &ViewState<Page> {
        &self.page
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.login.user().map(|u| &u.id)
    }

    pub async fn apply_theme(&mut self, intent: ThemeIntent) -> Transition {
        let transition = self.theme.apply(intent);
        if transition.is_applied() {
            if let Err(err) = self.ctx.preferences().save_theme(self.theme.mode()).await {
                warn!(error = %err, "theme not persisted");
            }
        }
        transition
    }

    pub async fn apply_layout(&mut self, intent: LayoutIntent) -> Transition {
        let before = self.layout.mode();
        let transition = self.layout.apply(intent);
        if self.layout.mode() != before {
            if let Err(err) = self.ctx.preferences().save_layout(self.layout.mode()).await {
                warn!(error = %err, "layout not persisted");
            }
        }
        transition
    }

    pub async fn apply_playback(&mut self, intent: PlaybackIntent) -> Transition {
        let before = self.playback.mode();
        let transition = self.playback.apply(intent);
        if self.playback.mode() != before {
            let saved = self
                .ctx
                .preferences()
                .save_playback(self.playback.mode())
                .await;
            if let Err(err) = saved {
                warn!(error = %err, "playback mode not persisted");
            }
        }
        transition
    }

    pub async fn sign_in(&mut self, credentials: &Credentials) -> Transition {
        let auth = self.ctx.auth();
        self.login.submit(auth.as_ref(), credentials).await
    }

    pub async fn sign_out(&mut self) -> Transition {
        let auth = self.ctx.auth();
        self.login.logout(auth.as_ref()).await
    }

    /// Present `path` and make it the current page. A canonical redirect is
    /// followed once.
    pub async fn navigate(&mut self, path: &str) -> Page {
        self.page = ViewState::Loading;
        let user = self.login.user().map(|u| u.id.clone());
        let mut page = self.presenter.present_path(path, user.as_ref()).await;
        if let Page::Redirect(to) = &page {
            let to = to.clone();
            page = self.presenter.present_path(&to, user.as_ref()).await;
        }
        if let Page::Lesson(lesson) = &page {
            self.playback.apply(PlaybackIntent::Load {
                has_video: lesson.playback_available(),
            });
        }
        self.page = ViewState::Ready(page.clone());
        page
    }

    /// Mark the lesson on the current page complete for the signed-in user,
    /// then refresh the page.
    ///
    /// # Errors
    ///
    /// - `ViewError::InvalidInput` when nobody is signed in or the current
    ///   page is not a lesson
    /// - other `ViewError`s from the progress service
    pub async fn complete_current_lesson(
        &mut self,
        time_spent_minutes: u32,
    ) -> Result<MarkOutcome, ViewError> {
        let Some(user) = self.user_id().cloned() else {
            return Err(ViewError::InvalidInput);
        };
        let Some(Page::Lesson(lesson)) = self.page.ready() else {
            return Err(ViewError::InvalidInput);
        };
        let (slug, path) = (lesson.slug.clone(), lesson.path.clone());

        let outcome = self
            .ctx
            .progress()
            .mark_lesson_complete(&user, &slug, time_spent_minutes)
            .await
            .map_err(|e| ViewError::from(&e))?;
        self.navigate(&path).await;
        Ok(outcome)
    }
}
