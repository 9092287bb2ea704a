//! Identity provider capability
//!
//! Login and logout are delegated to a third-party provider. The app only
//! asks it to [`AuthProvider::authorize`] or [`AuthProvider::clear_session`]
//! and mirrors the outcome in an [`AuthState`] the screens read.

pub mod auth0;
pub mod errors;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use crate::models::User;

pub use auth0::Auth0DeviceAuth;
pub use errors::AuthError;

/// What the user must do to finish logging in on another device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceChallenge {
    pub verification_uri: String,
    pub verification_uri_complete: Option<String>,
    pub user_code: String,
}

/// Receives the challenge once the provider has one to show.
pub type ChallengeCallback = Box<dyn FnOnce(DeviceChallenge) + Send>;

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Log in, resolving once the user has completed the flow.
    async fn authorize(&self, on_challenge: ChallengeCallback) -> Result<User, AuthError>;

    /// Log out of the current session.
    async fn clear_session(&self) -> Result<(), AuthError>;
}

/// Reactive `{user, is_loading}` pair exposed to screens.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_loading: bool,
    pub challenge: Option<DeviceChallenge>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn begin(&mut self) {
        self.is_loading = true;
        self.challenge = None;
    }

    pub fn signed_in(&mut self, user: User) {
        self.user = Some(user);
        self.is_loading = false;
        self.challenge = None;
    }

    pub fn signed_out(&mut self) {
        self.user = None;
        self.is_loading = false;
        self.challenge = None;
    }

    /// Provider call finished without changing who is signed in.
    pub fn settle(&mut self) {
        self.is_loading = false;
        self.challenge = None;
    }
}
