//! Pluggable sign-in.
//!
//! `AuthProvider` is the seam the UI session talks to. `DemoAuthProvider`
//! accepts any well-formed address and keeps the signed-in user in memory.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use course_core::model::UserId;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::AuthError;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `AuthError` when the credentials are rejected.
    async fn login(&self, credentials: &Credentials) -> Result<AuthUser, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` when nobody is signed in.
    async fn logout(&self) -> Result<(), AuthError>;

    async fn current_user(&self) -> Option<AuthUser>;
}

/// In-memory provider with format-only credential checks.
#[derive(Clone, Default)]
pub struct DemoAuthProvider {
    current: Arc<Mutex<Option<AuthUser>>>,
}

impl DemoAuthProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Stable user id for an email address, case-insensitive.
#[must_use]
pub fn user_id_for_email(email: &str) -> UserId {
    let normalized = email.trim().to_ascii_lowercase();
    let name = format!("mailto:{normalized}");
    UserId::new(Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes()).to_string())
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

fn unavailable<E: std::fmt::Display>(e: E) -> AuthError {
    AuthError::Unavailable(e.to_string())
}

#[async_trait]
impl AuthProvider for DemoAuthProvider {
    async fn login(&self, credentials: &Credentials) -> Result<AuthUser, AuthError> {
        let email = credentials.email.trim();
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail);
        }
        if credentials.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }

        let display_name = email
            .split_once('@')
            .map_or(email, |(local, _)| local)
            .to_owned();
        let user = AuthUser {
            id: user_id_for_email(email),
            email: email.to_ascii_lowercase(),
            display_name,
        };

        *self.current.lock().map_err(unavailable)? = Some(user.clone());
        info!(user = %user.id, "signed in");
        Ok(user)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let mut guard = self.current.lock().map_err(unavailable)?;
        match guard.take() {
            Some(user) => {
                info!(user = %user.id, "signed out");
                Ok(())
            }
            None => Err(AuthError::NotSignedIn),
        }
    }

    async fn current_user(&self) -> Option<AuthUser> {
        self.current.lock().ok().and_then(|guard| guard.clone())
    }
}
