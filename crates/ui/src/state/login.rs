use services::{AuthError, AuthProvider, AuthUser, Credentials};
use tracing::debug;

use super::Transition;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoginStatus {
    #[default]
    SignedOut,
    Submitting,
    SignedIn(AuthUser),
    Failed(AuthError),
}

/// `SignedOut -> Submitting -> SignedIn | Failed`. A failed attempt may be
/// resubmitted; signing out returns to `SignedOut`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginState {
    status: LoginStatus,
}

impl LoginState {
    #[must_use]
    pub fn status(&self) -> &LoginStatus {
        &self.status
    }

    #[must_use]
    pub fn user(&self) -> Option<&AuthUser> {
        match &self.status {
            LoginStatus::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn begin(&mut self) -> Transition {
        match self.status {
            LoginStatus::SignedOut | LoginStatus::Failed(_) => {
                self.status = LoginStatus::Submitting;
                Transition::Applied
            }
            LoginStatus::Submitting | LoginStatus::SignedIn(_) => Transition::Ignored,
        }
    }

    pub fn finish(&mut self, result: Result<AuthUser, AuthError>) -> Transition {
        if self.status != LoginStatus::Submitting {
            return Transition::Ignored;
        }
        self.status = match result {
            Ok(user) => LoginStatus::SignedIn(user),
            Err(err) => LoginStatus::Failed(err),
        };
        Transition::Applied
    }

    pub fn signed_out(&mut self) -> Transition {
        if self.user().is_none() {
            return Transition::Ignored;
        }
        self.status = LoginStatus::SignedOut;
        Transition::Applied
    }

    /// Run a full sign-in attempt against `provider`.
    pub async fn submit(
        &mut self,
        provider: &dyn AuthProvider,
        credentials: &Credentials,
    ) -> Transition {
        if !self.begin().is_applied() {
            return Transition::Ignored;
        }
        let result = provider.login(credentials).await;
        if let Err(err) = &result {
            debug!(error = %err, "sign-in rejected");
        }
        self.finish(result)
    }

    /// Sign out through `provider`. Local state is cleared even when the
    /// provider has no session.
    pub async fn logout(&mut self, provider: &dyn AuthProvider) -> Transition {
        if self.user().is_none() {
            return Transition::Ignored;
        }
        if let Err(err) = provider.logout().await {
            debug!(error = %err, "provider had no session to end");
        }
        self.signed_out()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::DemoAuthProvider;

    #[tokio::test]
    async fn failed_attempt_can_be_retried() {
        let auth = DemoAuthProvider::new();
        let mut login = LoginState::default();

        let t = login
            .submit(&auth, &Credentials::new("someone@example.com", "123"))
            .await;
        assert!(t.is_applied());
        assert!(matches!(
            login.status(),
            LoginStatus::Failed(AuthError::WeakPassword { .. })
        ));

        login
            .submit(&auth, &Credentials::new("someone@example.com", "123456"))
            .await;
        assert_eq!(login.user().map(|u| u.email.as_str()), Some("someone@example.com"));

        assert_eq!(
            login
                .submit(&auth, &Credentials::new("other@example.com", "123456"))
                .await,
            Transition::Ignored
        );
        assert!(login.logout(&auth).await.is_applied());
        assert_eq!(login.status(), &LoginStatus::SignedOut);
        assert_eq!(auth.current_user().await, None);
    }

    #[test]
    fn finish_without_begin_is_ignored() {
        let mut login = LoginState::default();
        assert_eq!(login.finish(Err(AuthError::InvalidEmail)), Transition::Ignored);
        assert_eq!(login.status(), &LoginStatus::SignedOut);
        assert_eq!(login.signed_out(), Transition::Ignored);
    }
}
