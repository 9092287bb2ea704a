//! Scripted [`AuthProvider`] used by unit tests

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{AuthError, AuthProvider, ChallengeCallback, DeviceChallenge};
use crate::models::User;

pub struct StaticAuth {
    user: Option<User>,
    pub authorize_calls: AtomicUsize,
    pub clear_calls: AtomicUsize,
}

impl StaticAuth {
    /// Logs in as `nickname` after showing a challenge.
    pub fn succeeding(nickname: &str) -> Self {
        Self {
            user: Some(User {
                sub: format!("auth0|{}", nickname),
                nickname: Some(nickname.to_string()),
                name: None,
                email: None,
            }),
            authorize_calls: AtomicUsize::new(0),
            clear_calls: AtomicUsize::new(0),
        }
    }

    /// Every login is denied.
    pub fn denying() -> Self {
        Self {
            user: None,
            authorize_calls: AtomicUsize::new(0),
            clear_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn authorize(&self, on_challenge: ChallengeCallback) -> Result<User, AuthError> {
        self.authorize_calls.fetch_add(1, Ordering::SeqCst);
        on_challenge(DeviceChallenge {
            verification_uri: "https://login.example.com/activate".to_string(),
            verification_uri_complete: None,
            user_code: "ABCD-EFGH".to_string(),
        });
        self.user.clone().ok_or(AuthError::Denied)
    }

    async fn clear_session(&self) -> Result<(), AuthError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
