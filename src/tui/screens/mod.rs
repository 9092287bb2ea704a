//! Screen modules for the blogdesk TUI

pub mod create_post;
pub mod edit_post;
pub mod post_form;
pub mod post_list;
pub mod teacher_users;

// Re-export all screens
pub use create_post::CreatePostScreen;
pub use edit_post::EditPostScreen;
pub use post_list::PostListScreen;
pub use teacher_users::TeacherUsersScreen;
