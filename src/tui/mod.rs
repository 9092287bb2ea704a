//! Terminal user interface for the blog
//!
//! One screen per route. Screens translate keys into actions; the [`App`]
//! performs the requests those actions need on background tasks and feeds
//! the results back as [`AppEvent`]s.

pub mod app;
pub mod components;
pub mod events;
pub mod screens;
pub mod tasks;
pub mod traits;
pub mod ui;

pub use app::App;
pub use events::{AppEvent, TaskOutcome};

// Re-export screen modules for easy access
pub use screens::{CreatePostScreen, EditPostScreen, PostListScreen, TeacherUsersScreen};
