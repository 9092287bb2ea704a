//! Post list screen (home route)

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::Post;
use crate::navigation::Route;
use crate::tui::{
    components::{
        base_screen::render_error, ConfirmDialog, DialogResult, FormField, FormFieldType,
        LoadingIndicator, PostCard, ScreenStatus,
    },
    traits::{Navigable, Screen, ScreenAction},
    ui::Styles,
};

/// Post list screen state
pub struct PostListScreen {
    pub posts: Vec<Post>,
    pub list_state: ListState,
    pub search_input: FormField,
    pub search_focused: bool,
    pub confirm: Option<ConfirmDialog>,
    pub status: ScreenStatus,
}

impl Default for PostListScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl PostListScreen {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            list_state: ListState::default(),
            search_input: FormField::new("Search (/)", FormFieldType::Text)
                .with_placeholder("Press / to search posts"),
            search_focused: false,
            confirm: None,
            status: ScreenStatus::default(),
        }
    }

    /// Search term to send, if any
    pub fn query(&self) -> Option<String> {
        let term = self.search_input.value.trim();
        if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        }
    }

    /// Replace the list, keeping the selection where possible
    pub fn set_posts(&mut self, posts: Vec<Post>) {
        let selected = self.list_state.selected();
        self.posts = posts;

        let next = match selected {
            _ if self.posts.is_empty() => None,
            Some(idx) if idx < self.posts.len() => Some(idx),
            Some(_) => Some(self.posts.len() - 1),
            None => Some(0),
        };
        self.list_state.select(next);
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.list_state.selected().and_then(|i| self.posts.get(i))
    }

    fn set_search_focus(&mut self, focused: bool) {
        self.search_focused = focused;
        self.search_input.set_focus(focused);
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Enter => {
                self.set_search_focus(false);
                ScreenAction::Reload
            }
            KeyCode::Esc => {
                self.set_search_focus(false);
                let had_query = self.query().is_some();
                self.search_input.clear();
                if had_query {
                    ScreenAction::Reload
                } else {
                    ScreenAction::None
                }
            }
            KeyCode::Char(c) => {
                self.search_input.insert_char(c);
                ScreenAction::None
            }
            KeyCode::Backspace => {
                self.search_input.delete_char();
                ScreenAction::None
            }
            KeyCode::Delete => {
                self.search_input.delete_char_forward();
                ScreenAction::None
            }
            KeyCode::Left => {
                self.search_input.move_cursor_left();
                ScreenAction::None
            }
            KeyCode::Right => {
                self.search_input.move_cursor_right();
                ScreenAction::None
            }
            _ => ScreenAction::None,
        }
    }

    fn draw_posts(&mut self, f: &mut Frame, area: Rect) {
        let title = match self.query() {
            Some(term) => format!("Posts matching \"{}\" ({})", term, self.posts.len()),
            None => format!("Posts ({})", self.posts.len()),
        };

        if let Some(error) = &self.status.error_message {
            render_error(f, area, "Could not load posts", error, "r: Retry");
            return;
        }

        if self.posts.is_empty() {
            let empty = Paragraph::new("No posts found")
                .style(Styles::inactive())
                .block(
                    Block::default()
                        .title(title)
                        .borders(Borders::ALL)
                        .border_style(Styles::inactive_border()),
                );
            f.render_widget(empty, area);
            return;
        }

        let width = area.width.saturating_sub(4) as usize;
        let selected = self.list_state.selected();
        let items: Vec<ListItem> = self
            .posts
            .iter()
            .enumerate()
            .map(|(i, post)| {
                let mut lines = PostCard::lines(post, width, Some(i) == selected);
                lines.push(Line::from(""));
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Styles::active_border()),
        );

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let text = if self.search_focused {
            "Enter: Search | Esc: Clear search"
        } else {
            "↑/↓: Select | e/Enter: Edit | d: Delete | n: New post | /: Search | r: Refresh | t: Teachers"
        };
        let instructions = Paragraph::new(text).style(Styles::info()).block(
            Block::default()
                .title("Instructions")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(instructions, area);
    }
}

impl Screen for PostListScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect, tick: usize) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search
                Constraint::Min(0),    // Cards
                Constraint::Length(3), // Instructions
            ])
            .split(area);

        self.search_input.render(f, chunks[0]);

        if self.status.is_loading() {
            LoadingIndicator::render(f, chunks[1], tick, "Loading posts...");
        } else {
            self.draw_posts(f, chunks[1]);
        }

        self.draw_instructions(f, chunks[2]);

        if let Some(dialog) = &self.confirm {
            dialog.render(f, area);
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        if self.status.is_loading() {
            return ScreenAction::None;
        }

        if let Some(dialog) = self.confirm.as_mut() {
            return match dialog.handle_key(key) {
                DialogResult::Pending => ScreenAction::None,
                DialogResult::Cancelled => {
                    self.confirm = None;
                    ScreenAction::None
                }
                DialogResult::Confirmed => {
                    let post_id = dialog.post_id.clone();
                    self.confirm = None;
                    ScreenAction::DeletePost(post_id)
                }
            };
        }

        if self.search_focused {
            return self.handle_search_key(key);
        }

        match key.code {
            KeyCode::Up => self.navigate_up(),
            KeyCode::Down => self.navigate_down(),
            KeyCode::Home => self.navigate_to_first(),
            KeyCode::End => self.navigate_to_last(),
            KeyCode::Enter | KeyCode::Char('e') => {
                return match self.selected_post() {
                    Some(post) => ScreenAction::NavigateTo(Route::EditScreen {
                        post_id: post.id.clone(),
                    }),
                    None => ScreenAction::SetStatus("No post selected".to_string()),
                };
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                return match self.selected_post() {
                    Some(post) => {
                        self.confirm = Some(ConfirmDialog::delete_post(&post.id, &post.title));
                        ScreenAction::None
                    }
                    None => ScreenAction::SetStatus("No post selected".to_string()),
                };
            }
            KeyCode::Char('n') => return ScreenAction::NavigateTo(Route::CreatePostScreen),
            KeyCode::Char('t') => return ScreenAction::NavigateTo(Route::TeacherUsersScreen),
            KeyCode::Char('/') => self.set_search_focus(true),
            KeyCode::Char('r') => return ScreenAction::Reload,
            KeyCode::Char('l') => return ScreenAction::Login,
            KeyCode::Char('o') => return ScreenAction::Logout,
            _ => {}
        }
        ScreenAction::None
    }

    fn captures_text(&self) -> bool {
        self.search_focused
    }

    fn is_loading(&self) -> bool {
        self.status.is_loading()
    }
}

impl Navigable for PostListScreen {
    fn navigate_up(&mut self) {
        if self.posts.is_empty() {
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.posts.len() - 1
        } else {
            selected - 1
        };
        self.list_state.select(Some(new_selected));
    }

    fn navigate_down(&mut self) {
        if self.posts.is_empty() {
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((selected + 1) % self.posts.len()));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.list_state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.list_state.select(index);
    }

    fn get_item_count(&self) -> usize {
        self.posts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::post;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen_with_posts() -> PostListScreen {
        let mut screen = PostListScreen::new();
        screen.set_posts(vec![post("1", "A", "B", "C"), post("2", "D", "E", "F")]);
        screen
    }

    #[test]
    fn test_set_posts_keeps_selection_in_range() {
        let mut screen = screen_with_posts();
        screen.navigate_down();
        assert_eq!(screen.selected_post().unwrap().id, "2");

        screen.set_posts(vec![post("1", "A", "B", "C")]);
        assert_eq!(screen.selected_post().unwrap().id, "1");

        screen.set_posts(Vec::new());
        assert!(screen.selected_post().is_none());
    }

    #[test]
    fn test_edit_passes_selected_id() {
        let mut screen = screen_with_posts();
        screen.handle_key_event(key(KeyCode::Down));
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('e'))),
            ScreenAction::NavigateTo(Route::EditScreen {
                post_id: "2".to_string()
            })
        );
    }

    #[test]
    fn test_delete_only_after_confirmation() {
        let mut screen = screen_with_posts();

        assert_eq!(screen.handle_key_event(key(KeyCode::Char('d'))), ScreenAction::None);
        assert!(screen.confirm.is_some());
        assert_eq!(screen.handle_key_event(key(KeyCode::Enter)), ScreenAction::None);
        assert!(screen.confirm.is_none());

        screen.handle_key_event(key(KeyCode::Char('d')));
        screen.handle_key_event(key(KeyCode::Right));
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Enter)),
            ScreenAction::DeletePost("1".to_string())
        );
    }

    #[test]
    fn test_search_input_flow() {
        let mut screen = screen_with_posts();
        screen.handle_key_event(key(KeyCode::Char('/')));
        assert!(screen.captures_text());
        for c in "rust".chars() {
            assert_eq!(screen.handle_key_event(key(KeyCode::Char(c))), ScreenAction::None);
        }
        assert_eq!(screen.handle_key_event(key(KeyCode::Enter)), ScreenAction::Reload);
        assert_eq!(screen.query().as_deref(), Some("rust"));
        assert!(!screen.captures_text());

        screen.handle_key_event(key(KeyCode::Char('/')));
        assert_eq!(screen.handle_key_event(key(KeyCode::Esc)), ScreenAction::Reload);
        assert!(screen.query().is_none());
    }

    #[test]
    fn test_keys_ignored_while_loading() {
        let mut screen = screen_with_posts();
        screen.status.start(crate::tui::components::Busy::Fetching);
        assert_eq!(screen.handle_key_event(key(KeyCode::Char('d'))), ScreenAction::None);
        assert!(screen.confirm.is_none());
    }
}
