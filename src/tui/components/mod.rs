//! Reusable UI components for the blogdesk TUI

pub mod auth_header;
pub mod base_screen;
pub mod confirm_dialog;
pub mod form_field;
pub mod loading;
pub mod post_card;
pub mod status_display;

pub use auth_header::AuthHeader;
pub use base_screen::{Busy, ScreenStatus};
pub use confirm_dialog::{ConfirmDialog, DialogResult};
pub use form_field::{Form, FormField, FormFieldType};
pub use loading::LoadingIndicator;
pub use post_card::PostCard;
pub use status_display::StatusDisplay;
