//! Events delivered to the UI loop by background tasks

use crate::api::ApiError;
use crate::auth::{AuthError, DeviceChallenge};
use crate::models::{Post, User};
use crate::navigation::ScreenKind;

/// Result of a request issued on behalf of a screen
#[derive(Debug)]
pub enum TaskOutcome {
    /// Full list or search results for the home screen
    PostsLoaded(Result<Vec<Post>, ApiError>),
    /// Single post for the edit screen
    PostLoaded(Result<Post, ApiError>),
    PostCreated(Result<Option<Post>, ApiError>),
    PostUpdated(Result<Option<Post>, ApiError>),
    PostDeleted {
        id: String,
        result: Result<(), ApiError>,
    },
}

/// Application events that arrive from outside the key handler
#[derive(Debug)]
pub enum AppEvent {
    /// A screen task finished. `generation` tells whether it is still wanted.
    Task {
        screen: ScreenKind,
        generation: u64,
        outcome: TaskOutcome,
    },
    /// The identity provider wants the user to confirm a code
    AuthChallenge(DeviceChallenge),
    LoggedIn(Result<User, AuthError>),
    LoggedOut(Result<(), AuthError>),
}
