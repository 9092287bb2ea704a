//! Core traits for the blogdesk TUI architecture
//!
//! Screens turn key presses into [`ScreenAction`]s; the app owns the network
//! and navigation side effects those actions imply.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::navigation::Route;

/// Actions that can be returned from screen event handling
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    /// Push a route
    NavigateTo(Route),
    /// Go back to the previous screen
    NavigateBack,
    /// Re-run the screen's load
    Reload,
    /// Submit the screen's form
    Submit,
    /// Delete the post (already confirmed by the user)
    DeletePost(String),
    /// Ask the identity provider to log in
    Login,
    /// Ask the identity provider to log out
    Logout,
    /// Set status message
    SetStatus(String),
    /// No action taken
    None,
}

/// Core trait for all TUI screens
pub trait Screen {
    /// Draw the screen content. `tick` drives the loading spinner.
    fn draw(&mut self, f: &mut Frame, area: Rect, tick: usize);

    /// Handle keyboard input and return an action
    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction;

    /// Whether plain characters are text input right now (global shortcuts off)
    fn captures_text(&self) -> bool {
        false
    }

    /// Whether a request is in flight for this screen
    fn is_loading(&self) -> bool {
        false
    }
}

/// Trait for screens with navigable lists
pub trait Navigable {
    /// Move selection up
    fn navigate_up(&mut self);

    /// Move selection down
    fn navigate_down(&mut self);

    /// Get currently selected index
    fn get_selected_index(&self) -> Option<usize>;

    /// Set selected index
    fn set_selected_index(&mut self, index: Option<usize>);

    /// Get total number of items
    fn get_item_count(&self) -> usize;

    /// Navigate to first item
    fn navigate_to_first(&mut self) {
        if self.get_item_count() > 0 {
            self.set_selected_index(Some(0));
        }
    }

    /// Navigate to last item
    fn navigate_to_last(&mut self) {
        let count = self.get_item_count();
        if count > 0 {
            self.set_selected_index(Some(count - 1));
        }
    }
}

/// Trait for form handling
pub trait FormHandler {
    /// Get current field index
    fn get_current_field(&self) -> usize;

    /// Set current field
    fn set_current_field(&mut self, field: usize);

    /// Get total number of fields
    fn get_field_count(&self) -> usize;

    /// Whether the field can take focus
    fn is_focusable(&self, _field: usize) -> bool {
        true
    }

    /// Move to the next focusable field, wrapping around
    fn next_field(&mut self) {
        let total = self.get_field_count();
        let mut field = self.get_current_field();
        for _ in 0..total {
            field = (field + 1) % total;
            if self.is_focusable(field) {
                self.set_current_field(field);
                return;
            }
        }
    }

    /// Move to the previous focusable field, wrapping around
    fn previous_field(&mut self) {
        let total = self.get_field_count();
        let mut field = self.get_current_field();
        for _ in 0..total {
            field = if field == 0 { total - 1 } else { field - 1 };
            if self.is_focusable(field) {
                self.set_current_field(field);
                return;
            }
        }
    }

    /// Handle character input for current field
    fn handle_char_input(&mut self, c: char);

    /// Handle backspace for current field
    fn handle_backspace(&mut self);

    /// Handle delete for current field
    fn handle_delete(&mut self);
}
